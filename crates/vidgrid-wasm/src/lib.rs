#![forbid(unsafe_code)]

//! Browser bindings for the vidgrid comparison page.
//!
//! [`GridRunner`] is a `wasm-bindgen`-exported struct wrapping
//! `vidgrid_web::GridRunnerCore` over the page's eight `<video>` elements.
//! The host page forwards clicks, file picks and divider pointer/touch events
//! to it and performs the returned pointer-capture commands.
//!
//! The CSS mapping in [`style`] is plain data and compiles on every target.

pub mod style;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::GridRunner;
