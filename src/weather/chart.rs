use anyhow::{anyhow, Result};
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};
use plotters::prelude::*;

use super::repo::TemperaturePoint;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;

// matplotlib-style category colors
const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Renders one line-with-markers series per city and returns the PNG bytes.
/// Callers must pass at least one point.
pub fn render_temperature_chart(points: &[TemperaturePoint]) -> Result<Vec<u8>> {
    let mut series: Vec<(&str, Vec<(f64, f64)>)> = Vec::new();
    for p in points {
        let x = p.timestamp.and_utc().timestamp() as f64;
        match series.iter().position(|(city, _)| *city == p.city.as_str()) {
            Some(idx) => series[idx].1.push((x, p.temperature)),
            None => series.push((p.city.as_str(), vec![(x, p.temperature)])),
        }
    }

    let xs = points
        .iter()
        .map(|p| p.timestamp.and_utc().timestamp() as f64);
    let mut x_min = xs.clone().fold(f64::INFINITY, f64::min);
    let mut x_max = xs.fold(f64::NEG_INFINITY, f64::max);
    let mut y_min = points
        .iter()
        .map(|p| p.temperature)
        .fold(f64::INFINITY, f64::min);
    let mut y_max = points
        .iter()
        .map(|p| p.temperature)
        .fold(f64::NEG_INFINITY, f64::max);

    // pad degenerate ranges so the coordinate build never sees an empty span
    if x_min >= x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if y_min >= y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let mut raw = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("fill chart background: {e}"))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(24)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("build chart axes: {e}"))?;

        for (idx, (_, pts)) in series.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            chart
                .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))
                .map_err(|e| anyhow!("draw temperature series: {e}"))?;
            chart
                .draw_series(
                    pts.iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(|e| anyhow!("draw temperature markers: {e}"))?;
        }

        root.present().map_err(|e| anyhow!("finalize chart: {e}"))?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&raw, WIDTH, HEIGHT, ExtendedColorType::Rgb8)?;
    Ok(png)
}
