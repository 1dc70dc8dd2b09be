//! Configuration management for Mockup Studio
//!
//! - **settings**: the persisted `Configuration` value and its defaults
//! - **patch**: partial, clamped updates producing a new `Configuration`
//! - **lenient**: per-field restore from a persisted JSON blob
//! - **store**: the single writer mediating load, update, persist and reset

pub mod lenient;
pub mod patch;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use patch::{BackgroundImagePatch, ConfigPatch, DevicePatch, GradientPatch, ShadowPatch};
pub use settings::{ActiveDevice, Configuration, DeviceKind, GradientDirection};
pub use store::ConfigStore;
