use std::net::SocketAddr;

use axum::{response::Html, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, favorites, weather};

const UI_SHELL: &str = r#"<!DOCTYPE html>
<html>
<head><title>Weather Dashboard</title></head>
<body>
<h1>Weather Dashboard</h1>
<p>See <code>/api/weather/:city</code>, <code>/api/history</code>,
<code>/api/favorites</code>, <code>/api/stats</code> and
<code>/api/visualization/temperature</code>.</p>
</body>
</html>
"#;

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(weather::router())
                .merge(favorites::router()),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn home() -> Html<&'static str> {
    Html(UI_SHELL)
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
