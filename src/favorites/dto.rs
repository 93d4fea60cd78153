use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FavoriteCity {
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}
