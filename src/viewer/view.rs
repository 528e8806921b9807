use super::catalog::{class_label, PlanetDescriptor};
use super::gesture::Rotation;
use crate::surface::ring::{RingGeometry, RingLayout};
use crate::surface::color::Color;
use crate::surface::{GeneratedSurface, Raster};
use serde::Serialize;

#[derive(Serialize)]
pub struct MoonView {
    pub name: &'static str,
    pub radius: f64,
    pub color: Color,
    pub distance: f64,
    pub tilt_x: f64,
    pub tilt_z: f64,
    pub angle: f64,
}

/// Per-tick state the host renders and shows in its overlay.
#[derive(Serialize)]
pub struct DisplayState {
    pub index: usize,
    pub name: &'static str,
    pub class: &'static str,
    pub description: &'static str,
    pub radius: f64,
    pub moons: Vec<MoonView>,
    pub status: &'static str,
    pub rotation: Rotation,
    pub camera_distance: f64,
    pub cloud_angle: f64,
    pub cursor: Option<(f64, f64)>,
    pub generation: u32,
    pub pointer_only: bool,
}

#[derive(Serialize)]
pub struct PlanetView {
    pub name: &'static str,
    pub class: &'static str,
    pub description: &'static str,
    pub radius: f64,
    pub has_rings: bool,
    pub moons: Vec<&'static str>,
}

impl From<&PlanetDescriptor> for PlanetView {
    fn from(planet: &PlanetDescriptor) -> Self {
        Self {
            name: planet.name,
            class: class_label(planet.class),
            description: planet.description,
            radius: planet.radius,
            has_rings: planet.has_rings(),
            moons: planet.moons.iter().map(|m| m.name).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct RasterView {
    pub width: u32,
    pub height: u32,
}

impl From<&Raster> for RasterView {
    fn from(raster: &Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
        }
    }
}

#[derive(Serialize)]
pub struct RingView {
    pub raster: RasterView,
    pub layout: RingLayout,
    pub geometry: RingGeometry,
}

/// Which layers the current bundle carries, so the host knows what to pull.
#[derive(Serialize)]
pub struct SurfaceView {
    pub generation: u32,
    pub planet: &'static str,
    pub color: RasterView,
    pub specular: Option<RasterView>,
    pub atmosphere: Option<RasterView>,
    pub ring: Option<RingView>,
    pub moons: Vec<RasterView>,
}

impl SurfaceView {
    pub fn new(generation: u32, planet: &PlanetDescriptor, surface: &GeneratedSurface) -> Self {
        Self {
            generation,
            planet: planet.name,
            color: RasterView::from(&surface.color),
            specular: surface.specular.as_ref().map(RasterView::from),
            atmosphere: surface.atmosphere.as_ref().map(RasterView::from),
            ring: surface.ring.as_ref().map(|ring| RingView {
                raster: RasterView::from(&ring.raster),
                layout: ring.layout,
                geometry: RingGeometry::for_planet(planet.radius),
            }),
            moons: surface.moons.iter().map(RasterView::from).collect(),
        }
    }
}
