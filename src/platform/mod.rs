//! Platform abstraction layer
//!
//! Input backends that drive a [`crate::Simulation`]:
//! - `scripted`: seeded pointer path for the native demo and tests
//! - `web`: `wasm_bindgen` boundary for a browser host (wasm32 only)

pub mod scripted;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scripted::PointerScript;
