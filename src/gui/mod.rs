//! Desktop front end: control panel, device display and fullscreen overlay

pub mod components;
pub mod constants;
pub mod image;
pub mod manager;
pub mod paint;

pub use manager::{LaunchOptions, run_gui};
