//! Platform abstraction layer
//!
//! On the web the physics world is Matter.js, reached through
//! wasm-bindgen. Natively the crate runs against `engine::HeadlessWorld`.

#[cfg(target_arch = "wasm32")]
pub mod matter;

#[cfg(target_arch = "wasm32")]
pub use matter::MatterWorld;
