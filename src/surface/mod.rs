pub mod atmosphere;
pub mod canvas;
pub mod color;
pub mod continents;
pub mod gas_giant;
pub mod oceanic;
pub mod ring;
pub mod terrain;

use canvas::Canvas;
use color::Color;
use gas_giant::BandedParams;
use oceanic::OceanicParams;
use rand_chacha::ChaCha8Rng;
use ring::RingLayout;
use serde::{Deserialize, Serialize};
use terrain::{TerrainKind, TerrainParams};
use tracing::warn;

/// Finished RGBA8 image handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl From<Canvas> for Raster {
    fn from(canvas: Canvas) -> Self {
        Self {
            width: canvas.width(),
            height: canvas.height(),
            pixels: canvas.into_pixels(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RingSurface {
    pub raster: Raster,
    pub layout: RingLayout,
}

/// Every raster a planet needs. Built fresh whenever a planet becomes
/// current and dropped when the next one replaces it.
#[derive(Clone, Debug)]
pub struct GeneratedSurface {
    pub color: Raster,
    pub specular: Option<Raster>,
    pub atmosphere: Option<Raster>,
    pub ring: Option<RingSurface>,
    pub moons: Vec<Raster>,
}

/// Which generator paints a planet's color map.
#[derive(Clone, Copy, Debug)]
pub enum SurfaceRecipe {
    Banded { palette: &'static [Color] },
    Terrain {
        base: Color,
        feature: Color,
        kind: TerrainKind,
    },
    Oceanic,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub base_size: u32,
    pub oceanic_size: u32,
    pub moon_size: u32,
    pub turbulence_bands: usize,
    pub coastline_jitter: f64,
    pub desert_patches: usize,
    pub craters: usize,
    pub dust_specks: usize,
    pub cloud_count: usize,
    pub ring_dust_lines: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            base_size: 1024,
            oceanic_size: 2048,
            moon_size: 1024,
            turbulence_bands: 50,
            coastline_jitter: continents::COASTLINE_JITTER,
            desert_patches: 80,
            craters: 400,
            dust_specks: 1000,
            cloud_count: 200,
            ring_dust_lines: 100,
        }
    }
}

/// Allocates a canvas, or a 1x1 transparent stand-in when the size is
/// refused. Texture generation must never stop a planet from showing.
fn canvas_or_blank(width: u32, height: u32) -> Canvas {
    Canvas::new(width, height).unwrap_or_else(|err| {
        warn!(%err, "falling back to a blank surface");
        Canvas::placeholder()
    })
}

pub fn banded(palette: &[Color], config: &SurfaceConfig, rng: &mut ChaCha8Rng) -> Raster {
    let mut canvas = canvas_or_blank(config.base_size, config.base_size);
    let params = BandedParams {
        palette,
        bands: config.turbulence_bands,
    };
    gas_giant::paint_banded(&mut canvas, &params, rng);
    canvas.into()
}

pub fn terrain(
    base: Color,
    feature: Color,
    kind: TerrainKind,
    size: u32,
    config: &SurfaceConfig,
    rng: &mut ChaCha8Rng,
) -> Raster {
    let mut canvas = canvas_or_blank(size, size);
    let features = match kind {
        TerrainKind::Cratered => config.craters,
        TerrainKind::Dusty => config.dust_specks,
    };
    let params = TerrainParams {
        base,
        feature,
        kind,
        features,
    };
    terrain::paint_terrain(&mut canvas, &params, rng);
    canvas.into()
}

/// Diffuse map and specular mask, pixel-aligned.
pub fn oceanic(config: &SurfaceConfig, rng: &mut ChaCha8Rng) -> (Raster, Raster) {
    let size = config.oceanic_size;
    let mut color = canvas_or_blank(size, size);
    let mut specular = canvas_or_blank(color.width(), color.height());
    let params = OceanicParams {
        jitter: config.coastline_jitter,
        desert_patches: config.desert_patches,
    };
    oceanic::paint_oceanic(&mut color, &mut specular, &params, rng);
    (color.into(), specular.into())
}

pub fn clouds(color: Color, config: &SurfaceConfig, rng: &mut ChaCha8Rng) -> Raster {
    let mut canvas = canvas_or_blank(config.base_size, config.base_size);
    atmosphere::paint_clouds(&mut canvas, color, config.cloud_count, rng);
    canvas.into()
}

pub fn ring(inner: Color, outer: Color, config: &SurfaceConfig, rng: &mut ChaCha8Rng) -> RingSurface {
    let mut canvas = canvas_or_blank(config.base_size, config.base_size);
    let layout = ring::paint_ring(&mut canvas, inner, outer, config.ring_dust_lines, rng);
    RingSurface {
        raster: canvas.into(),
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn small() -> SurfaceConfig {
        SurfaceConfig {
            base_size: 64,
            oceanic_size: 96,
            moon_size: 32,
            ..SurfaceConfig::default()
        }
    }

    #[test]
    fn refused_canvas_degrades_to_blank_raster() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = SurfaceConfig {
            base_size: 0,
            oceanic_size: canvas::MAX_CANVAS_SIDE * 2,
            ..SurfaceConfig::default()
        };

        let raster = banded(&[Color::hex(0x3a489e), Color::hex(0x5063c9)], &config, &mut rng);
        assert_eq!((raster.width, raster.height), (1, 1));
        assert_eq!(raster.pixels.len(), 4);

        let (color, specular) = oceanic(&config, &mut rng);
        assert_eq!(color.pixels.len(), 4);
        assert_eq!(specular.pixels.len(), 4);

        let ring = ring(Color::WHITE, Color::hex(0xaaddff), &config, &mut rng);
        assert_eq!(ring.raster.pixels.len(), 4);
        assert_eq!(ring.layout, RingLayout::standard());
    }

    #[test]
    fn rasters_have_requested_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = small();

        let raster = terrain(
            Color::hex(0xcccccc),
            Color::BLACK,
            TerrainKind::Cratered,
            config.moon_size,
            &config,
            &mut rng,
        );
        assert_eq!(raster.pixels.len(), 32 * 32 * 4);

        let (color, specular) = oceanic(&config, &mut rng);
        assert_eq!((color.width, specular.width), (96, 96));
        assert_eq!(clouds(Color::WHITE, &config, &mut rng).pixels.len(), 64 * 64 * 4);
    }

    #[test]
    fn empty_palette_still_yields_a_surface() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let raster = banded(&[], &small(), &mut rng);
        assert_eq!(raster.pixels.len(), 64 * 64 * 4);
        assert!(raster.pixels.iter().all(|&b| b == 0));
    }
}
