#![cfg(target_arch = "wasm32")]

use planet_deck::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const SMALL: &str = r#"{ "surface": { "base_size": 32, "oceanic_size": 32, "moon_size": 16 } }"#;

#[wasm_bindgen_test]
fn boots_on_earth_and_cycles_with_the_pointer() {
    assert_eq!(init_viewer_with_config(3, SMALL), "ok");
    assert!(display_state().contains("\"name\":\"EARTH\""));
    assert_eq!(color_map().len(), 32 * 32 * 4);

    pointer_activate();
    assert!(tick().contains("\"name\":\"MARS\""));
    assert_eq!(moon_map(1).len(), 16 * 16 * 4);
}

#[wasm_bindgen_test]
fn tracking_failure_switches_to_pointer_only() {
    init_viewer_with_config(4, SMALL);
    tracking_failed();
    let state = push_no_hand();
    assert!(state.contains("Hand tracking unavailable"));
    assert!(state.contains("\"pointer_only\":true"));
}
