use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod surface;
pub mod viewer;

use config::ViewerConfig;
use error::{PlanetDeckError, Result};
use serde::Serialize;
use surface::ring::{RingGeometry, RingLayout};
use surface::Raster;
use tracing::warn;
use viewer::catalog::PLANETS;
use viewer::gesture::LandmarkFrame;
use viewer::view::PlanetView;
use viewer::Viewer;

thread_local! {
    static VIEWER: RefCell<Option<Viewer>> = RefCell::new(None);
}

fn with_viewer_mut<R>(f: impl FnOnce(&mut Viewer) -> R) -> Result<R> {
    VIEWER.with(|cell| {
        let mut opt = cell.borrow_mut();
        match opt.as_mut() {
            Some(viewer) => Ok(f(viewer)),
            None => Err(PlanetDeckError::NotInitialized),
        }
    })
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn json_or_error<T: Serialize>(result: Result<T>) -> String {
    match result {
        Ok(v) => to_json(&v),
        Err(e) => e.to_string(),
    }
}

fn install_diagnostics() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static TRACING: Once = Once::new();
        TRACING.call_once(|| {
            tracing_wasm::set_as_global_default();
            web_sys::console::log_1(&"planet-deck loaded".into());
        });
    }
}

fn install(viewer: Viewer) {
    VIEWER.with(|v| {
        *v.borrow_mut() = Some(viewer);
    });
}

#[wasm_bindgen]
pub fn init_viewer(seed: u64) {
    install_diagnostics();
    install(Viewer::new(seed));
}

/// Like `init_viewer` with a JSON config overlay. Returns "ok" or the
/// parse error; on error the previous viewer (if any) is kept.
#[wasm_bindgen]
pub fn init_viewer_with_config(seed: u64, config_json: &str) -> String {
    install_diagnostics();
    match ViewerConfig::from_json(config_json) {
        Ok(config) => {
            install(Viewer::with_config(seed, config));
            "ok".to_string()
        }
        Err(e) => {
            warn!(%e, "rejected viewer config");
            e.to_string()
        }
    }
}

/// One hand-tracking result as a flat landmark array. Arrays that are
/// short or out of frame count as "no hand".
#[wasm_bindgen]
pub fn push_landmarks(coords: &[f32], stride: u32) -> String {
    let frame = LandmarkFrame::from_hand(coords, stride as usize);
    json_or_error(with_viewer_mut(|viewer| {
        viewer.on_landmarks(frame.as_ref());
        viewer.display_state()
    }))
}

#[wasm_bindgen]
pub fn push_no_hand() -> String {
    json_or_error(with_viewer_mut(|viewer| {
        viewer.on_landmarks(None);
        viewer.display_state()
    }))
}

#[wasm_bindgen]
pub fn tracking_failed() {
    let _ = with_viewer_mut(|viewer| viewer.tracking_failed());
}

#[wasm_bindgen]
pub fn pointer_move(x: f64, y: f64) {
    let _ = with_viewer_mut(|viewer| viewer.pointer_move(x, y));
}

#[wasm_bindgen]
pub fn pointer_activate() -> String {
    json_or_error(with_viewer_mut(|viewer| {
        viewer.pointer_activate();
        viewer.display_state()
    }))
}

#[wasm_bindgen]
pub fn tick() -> String {
    json_or_error(with_viewer_mut(|viewer| viewer.tick()))
}

#[wasm_bindgen]
pub fn display_state() -> String {
    json_or_error(with_viewer_mut(|viewer| viewer.display_state()))
}

#[wasm_bindgen]
pub fn catalog_json() -> String {
    let planets: Vec<PlanetView> = PLANETS.iter().map(PlanetView::from).collect();
    to_json(&planets)
}

#[wasm_bindgen]
pub fn surface_json() -> String {
    json_or_error(with_viewer_mut(|viewer| viewer.surface_view()))
}

fn raster_bytes(pick: impl FnOnce(&Viewer) -> Option<&Raster>) -> Vec<u8> {
    with_viewer_mut(|viewer| pick(viewer).map(|r| r.pixels.clone()))
        .ok()
        .flatten()
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn color_map() -> Vec<u8> {
    raster_bytes(|v| Some(&v.surface().color))
}

#[wasm_bindgen]
pub fn specular_map() -> Vec<u8> {
    raster_bytes(|v| v.surface().specular.as_ref())
}

#[wasm_bindgen]
pub fn atmosphere_map() -> Vec<u8> {
    raster_bytes(|v| v.surface().atmosphere.as_ref())
}

#[wasm_bindgen]
pub fn ring_map() -> Vec<u8> {
    raster_bytes(|v| v.surface().ring.as_ref().map(|r| &r.raster))
}

#[wasm_bindgen]
pub fn moon_map(index: usize) -> Vec<u8> {
    raster_bytes(|v| v.surface().moons.get(index))
}

/// UVs for ring vertices (`stride` floats each, x/y first) on a ring mesh
/// of the given outer radius.
#[wasm_bindgen]
pub fn ring_uvs(positions: &[f32], stride: u32, outer_radius: f64) -> Vec<f32> {
    let layout = with_viewer_mut(|viewer| viewer.surface().ring.as_ref().map(|r| r.layout))
        .ok()
        .flatten()
        .unwrap_or_else(RingLayout::standard);
    layout.remap(positions, stride as usize, outer_radius)
}

#[wasm_bindgen]
pub fn ring_geometry(planet_radius: f64) -> String {
    to_json(&RingGeometry::for_planet(planet_radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset() {
        VIEWER.with(|v| *v.borrow_mut() = None);
    }

    const SMALL: &str = r#"{ "surface": { "base_size": 16, "oceanic_size": 24, "moon_size": 8 } }"#;

    #[test]
    fn calls_before_init_report_instead_of_panicking() {
        reset();
        assert_eq!(tick(), "viewer not initialized");
        assert!(color_map().is_empty());
        pointer_move(0.5, 0.5);
        assert_eq!(ring_uvs(&[2.0, 0.0], 2, 2.0), vec![1.0, 0.5]);
    }

    #[test]
    fn host_round_trip_through_exports() {
        reset();
        assert_eq!(init_viewer_with_config(11, SMALL), "ok");

        let state: serde_json::Value = serde_json::from_str(&tick()).unwrap();
        assert_eq!(state["name"], "EARTH");
        assert_eq!(state["status"], "Waiting for hand...");
        assert_eq!(state["moons"][0]["color"], "#cccccc");
        assert_eq!(color_map().len(), 24 * 24 * 4);
        assert_eq!(specular_map().len(), 24 * 24 * 4);
        assert_eq!(atmosphere_map().len(), 16 * 16 * 4);
        assert_eq!(moon_map(0).len(), 8 * 8 * 4);
        assert!(ring_map().is_empty());

        let state: serde_json::Value = serde_json::from_str(&push_landmarks(&[0.2; 10], 2)).unwrap();
        assert_eq!(state["status"], "No hand detected");

        for _ in 0..3 {
            pointer_activate();
        }
        let surface: serde_json::Value = serde_json::from_str(&surface_json()).unwrap();
        assert_eq!(surface["planet"], "SATURN");
        assert_eq!(surface["generation"], 3);
        assert_eq!(surface["ring"]["layout"]["edge_radius"], 0.5);
        assert_eq!(ring_map().len(), 16 * 16 * 4);
    }

    #[test]
    fn bad_config_keeps_previous_viewer() {
        reset();
        init_viewer_with_config(1, SMALL);
        pointer_activate();
        let reply = init_viewer_with_config(2, "not json");
        assert!(reply.starts_with("config error"));
        let state: serde_json::Value = serde_json::from_str(&display_state()).unwrap();
        assert_eq!(state["name"], "MARS");
    }

    #[test]
    fn catalog_lists_all_planets() {
        let planets: Vec<serde_json::Value> = serde_json::from_str(&catalog_json()).unwrap();
        assert_eq!(planets.len(), 8);
        assert_eq!(planets[5]["moons"][0], "Titan");
        assert_eq!(planets[4]["class"], "Gas Giant");
    }
}
