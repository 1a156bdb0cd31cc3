//! Browser bindings
//!
//! The live canvas calls into the same generator as the server-side preview
//! so both draw the same track for a repository.

use wasm_bindgen::prelude::*;

use crate::generator::generate;
use crate::track::{CornerScan, Track};

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    // Another module may have installed a logger already
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("race-track wasm ready");
    }
}

/// Generated track handle for JavaScript
#[wasm_bindgen]
pub struct WasmTrack {
    track: Track,
}

#[wasm_bindgen]
impl WasmTrack {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: &str, center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            track: generate(seed, center_x, center_y, width, height),
        }
    }

    #[wasm_bindgen(getter, js_name = totalLength)]
    pub fn total_length(&self) -> f64 {
        self.track.total_length()
    }

    /// `[x, y]` at lap fraction `t`
    #[wasm_bindgen(js_name = pointAt)]
    pub fn point_at(&self, t: f64) -> Vec<f64> {
        self.track.point_at(t).to_array().to_vec()
    }

    /// Unit `[tx, ty]` at lap fraction `t`
    #[wasm_bindgen(js_name = tangentAt)]
    pub fn tangent_at(&self, t: f64) -> Vec<f64> {
        self.track.tangent_at(t).to_array().to_vec()
    }

    /// `[x, y]` offset `distance` to the left of the centreline
    #[wasm_bindgen(js_name = offsetPoint)]
    pub fn offset_point(&self, t: f64, distance: f64) -> Vec<f64> {
        self.track.offset_point(t, distance).to_array().to_vec()
    }

    /// Interleaved polyline `[x0, y0, x1, y1, ...]`
    #[wasm_bindgen(js_name = pointsFlat)]
    pub fn points_flat(&self) -> Vec<f64> {
        self.track.points_flat()
    }

    #[wasm_bindgen(js_name = svgPath)]
    pub fn svg_path(&self) -> String {
        self.track.svg_path()
    }

    /// Lap fractions of the labelled corners (T1, T2, ...)
    #[wasm_bindgen(js_name = cornerTs)]
    pub fn corner_ts(&self) -> Vec<f64> {
        self.track
            .corners(&CornerScan::LABELS)
            .iter()
            .map(|c| c.t)
            .collect()
    }

    /// Lap fractions that get kerbs
    #[wasm_bindgen(js_name = kerbTs)]
    pub fn kerb_ts(&self) -> Vec<f64> {
        self.track
            .corners(&CornerScan::KERBS)
            .iter()
            .map(|c| c.t)
            .collect()
    }
}
