use super::canvas::{Canvas, Point};
use super::color::Color;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// Feature sizes are normalized to a 1024px canvas.
const CRATER_MIN_RADIUS: f64 = 2.0 / 1024.0;
const CRATER_EXTRA_RADIUS: f64 = 10.0 / 1024.0;
const CRATER_MAX_ALPHA: f32 = 0.3;
const DUST_MAX_RADIUS: f64 = 20.0 / 1024.0;
const DUST_ALPHA: f32 = 0.05;
const POLAR_CAP_RADIUS: f64 = 80.0 / 1024.0;
const POLAR_CAP_ALPHA: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    /// Airless, impact-scarred rock.
    Cratered,
    /// Rusty dust with two polar caps.
    Dusty,
}

#[derive(Clone, Copy, Debug)]
pub struct TerrainParams {
    pub base: Color,
    pub feature: Color,
    pub kind: TerrainKind,
    pub features: usize,
}

pub fn paint_terrain(canvas: &mut Canvas, params: &TerrainParams, rng: &mut ChaCha8Rng) {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let side = w.max(h);
    canvas.fill(params.base);

    match params.kind {
        TerrainKind::Cratered => {
            for _ in 0..params.features {
                let center = Point::new(rng.gen::<f64>() * w, rng.gen::<f64>() * h);
                let r = (rng.gen::<f64>() * CRATER_EXTRA_RADIUS + CRATER_MIN_RADIUS) * side;
                canvas.set_global_alpha(rng.gen::<f32>() * CRATER_MAX_ALPHA);
                canvas.fill_circle(center, r, params.feature);
            }
        }
        TerrainKind::Dusty => {
            canvas.set_global_alpha(DUST_ALPHA);
            for _ in 0..params.features {
                let center = Point::new(rng.gen::<f64>() * w, rng.gen::<f64>() * h);
                let r = rng.gen::<f64>() * DUST_MAX_RADIUS * side;
                canvas.fill_circle(center, r, params.feature);
            }

            canvas.set_global_alpha(POLAR_CAP_ALPHA);
            let cap = POLAR_CAP_RADIUS * side;
            canvas.fill_circle(Point::new(w / 2.0, 0.0), cap, Color::WHITE);
            canvas.fill_circle(Point::new(w / 2.0, h), cap, Color::WHITE);
        }
    }
    canvas.set_global_alpha(1.0);
}
