//! Continent silhouettes shared by the oceanic color and specular maps.
//!
//! The layout is split in two: a fixed set of anchor vertices per
//! landmass (the shape) and a jagged coastline walked between them (the
//! jitter). Coordinates are normalized to the canvas so the same layout
//! works at any resolution, and every jittered vertex is clamped back into
//! its landmass anchor box.

use super::canvas::{Canvas, Point};
use super::color::Color;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

/// Default coastline jitter, normalized to the canvas side (±5px at 2048).
pub const COASTLINE_JITTER: f64 = 10.0 / 2048.0;

const ARCTIC_SEGMENTS: usize = 20;
const ARCTIC_FLOOR: f64 = 0.02;
const ARCTIC_SPREAD: f64 = 0.05;
const ANTARCTIC_TOP: f64 = 0.92;
const AUSTRALIA_CENTER: (f64, f64) = (0.85, 0.75);
const AUSTRALIA_RADIUS: f64 = 60.0 / 2048.0;
const AUSTRALIA_VERTICES: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Landmass {
    NorthAmerica,
    SouthAmerica,
    Eurasia,
    Africa,
    Australia,
}

pub const LANDMASSES: [Landmass; 5] = [
    Landmass::NorthAmerica,
    Landmass::SouthAmerica,
    Landmass::Eurasia,
    Landmass::Africa,
    Landmass::Australia,
];

impl Landmass {
    /// Anchor vertices in normalized canvas space, walked in order and closed.
    pub fn anchors(self) -> Vec<(f64, f64)> {
        match self {
            Landmass::NorthAmerica => vec![
                (0.05, 0.10),
                (0.40, 0.10),
                (0.45, 0.35),
                (0.30, 0.55),
                (0.25, 0.45),
                (0.15, 0.40),
            ],
            Landmass::SouthAmerica => vec![(0.32, 0.50), (0.45, 0.55), (0.38, 0.90), (0.28, 0.60)],
            Landmass::Eurasia => vec![
                (0.45, 0.10),
                (0.98, 0.12),
                (0.92, 0.50),
                (0.75, 0.60),
                (0.60, 0.50),
                (0.50, 0.35),
            ],
            Landmass::Africa => vec![
                (0.48, 0.40),
                (0.65, 0.40),
                (0.70, 0.65),
                (0.55, 0.85),
                (0.48, 0.60),
            ],
            Landmass::Australia => (0..AUSTRALIA_VERTICES)
                .map(|i| {
                    let angle = i as f64 / AUSTRALIA_VERTICES as f64 * TAU;
                    (
                        AUSTRALIA_CENTER.0 + angle.cos() * AUSTRALIA_RADIUS,
                        AUSTRALIA_CENTER.1 + angle.sin() * AUSTRALIA_RADIUS,
                    )
                })
                .collect(),
        }
    }

    pub fn anchor_bounds(self) -> Bounds {
        Bounds::around(&self.anchors())
    }
}

/// Axis-aligned box in normalized canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn around(points: &[(f64, f64)]) -> Self {
        points.iter().fold(
            Bounds {
                min_x: f64::MAX,
                min_y: f64::MAX,
                max_x: f64::MIN,
                max_y: f64::MIN,
            },
            |b, &(x, y)| Bounds {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    fn clamp(&self, p: Point, width: f64, height: f64) -> Point {
        Point::new(
            p.x.clamp(self.min_x * width, self.max_x * width),
            p.y.clamp(self.min_y * height, self.max_y * height),
        )
    }
}

#[derive(Clone, Debug)]
pub struct Silhouette {
    pub landmass: Landmass,
    pub outline: Vec<Point>,
}

/// One concrete, jittered set of coastlines for a given canvas size.
#[derive(Clone, Debug)]
pub struct ContinentLayout {
    pub width: u32,
    pub height: u32,
    pub silhouettes: Vec<Silhouette>,
    pub arctic: Vec<Point>,
}

#[derive(Clone, Copy, Debug)]
pub struct ContinentPaint {
    pub land: Color,
    pub ice: Color,
}

impl ContinentPaint {
    pub fn single(color: Color) -> Self {
        Self {
            land: color,
            ice: color,
        }
    }
}

pub fn layout_continents(width: u32, height: u32, jitter: f64, rng: &mut ChaCha8Rng) -> ContinentLayout {
    let (w, h) = (width as f64, height as f64);
    let silhouettes = LANDMASSES
        .iter()
        .map(|&landmass| Silhouette {
            landmass,
            outline: coastline(landmass, w, h, jitter, rng),
        })
        .collect();

    let ragged = (jitter / COASTLINE_JITTER).clamp(0.0, 1.0) * ARCTIC_SPREAD;
    let mut arctic: Vec<Point> = (0..=ARCTIC_SEGMENTS)
        .map(|i| {
            let x = i as f64 / ARCTIC_SEGMENTS as f64 * w;
            let y = (ARCTIC_FLOOR + rng.gen::<f64>() * ragged) * h;
            Point::new(x, y)
        })
        .collect();
    arctic.push(Point::new(w, 0.0));
    arctic.push(Point::new(0.0, 0.0));

    ContinentLayout {
        width,
        height,
        silhouettes,
        arctic,
    }
}

fn coastline(landmass: Landmass, w: f64, h: f64, jitter: f64, rng: &mut ChaCha8Rng) -> Vec<Point> {
    let anchors: Vec<Point> = landmass
        .anchors()
        .into_iter()
        .map(|(x, y)| Point::new(x * w, y * h))
        .collect();
    let bounds = landmass.anchor_bounds();
    let (jx, jy) = (jitter * w, jitter * h);

    let mut outline = Vec::new();
    for (i, a) in anchors.iter().enumerate() {
        let b = anchors[(i + 1) % anchors.len()];
        let dist = (b.x - a.x).hypot(b.y - a.y);
        let steps = (dist / 5.0).ceil().max(5.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let p = Point::new(
                a.x + (b.x - a.x) * t + (rng.gen::<f64>() - 0.5) * jx,
                a.y + (b.y - a.y) * t + (rng.gen::<f64>() - 0.5) * jy,
            );
            outline.push(bounds.clamp(p, w, h));
        }
    }
    outline
}

/// Paints land in one color and both polar caps in another. The same
/// layout painted twice yields pixel-identical masks.
pub fn draw_continents(canvas: &mut Canvas, layout: &ContinentLayout, paint: ContinentPaint) {
    for silhouette in &layout.silhouettes {
        canvas.fill_polygon(&silhouette.outline, paint.land);
    }

    let (w, h) = (layout.width as f64, layout.height as f64);
    canvas.fill_rect(0.0, h * ANTARCTIC_TOP, w, h * (1.0 - ANTARCTIC_TOP), paint.ice);
    canvas.fill_polygon(&layout.arctic, paint.ice);
}
