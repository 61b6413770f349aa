//! Browser boundary
//!
//! The host page owns the canvas, the mousemove listener and the render
//! loop; it forwards pointer offsets and frame times here and pulls dirty
//! cells back out.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::SimSettings;
use crate::simulation::Simulation;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("Keeping existing logger: {}", e);
    }
    log::info!("Liquid grid module loaded");
}

/// Simulation handle exported to JavaScript
#[wasm_bindgen]
pub struct WebSimulation {
    inner: Simulation,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Build a simulation. `settings_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<WebSimulation, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            SimSettings::default()
        } else {
            SimSettings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let inner = Simulation::new(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn width(&self) -> u32 {
        self.inner.dimensions().0 as u32
    }

    pub fn height(&self) -> u32 {
        self.inner.dimensions().1 as u32
    }

    /// Forward a mousemove `offsetX/offsetY` plus the canvas bounding size
    pub fn pointer_move(&mut self, offset_x: f32, offset_y: f32, canvas_width: f32, canvas_height: f32) -> u32 {
        self.inner
            .pointer_moved(Vec2::new(offset_x, offset_y), Vec2::new(canvas_width, canvas_height)) as u32
    }

    /// Advance by `dt` seconds; returns whether the field was advected
    pub fn tick(&mut self, dt: f32) -> bool {
        matches!(self.inner.tick(dt), crate::sim::TickReport::Advected { .. })
    }

    /// Changed cells since the last call, flattened as `[x0, y0, x1, y1, ...]`
    pub fn flush_dirty(&mut self) -> Vec<u32> {
        self.inner
            .flush_dirty()
            .into_iter()
            .flat_map(|(x, y)| [x as u32, y as u32])
            .collect()
    }

    pub fn level_set(&self, x: i32, y: i32) -> Option<f32> {
        self.inner.cell(x, y).map(|c| c.level_set)
    }

    pub fn is_liquid(&self, x: i32, y: i32) -> Option<bool> {
        self.inner.cell(x, y).map(|c| c.is_liquid)
    }

    /// Call when the page removes its mousemove listener
    pub fn detach(&mut self) {
        self.inner.detach_pointer();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
