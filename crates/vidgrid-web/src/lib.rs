#![forbid(unsafe_code)]

//! Host-driven browser backend for vidgrid.
//!
//! The host (JS glue or a native test) owns the event loop and pushes
//! lifecycle signals and DOM measurements into a [`GridRunnerCore`]; it gets
//! back plain data: pointer-capture commands, presentation snapshots and log
//! lines. Nothing in this crate touches `web-sys`.

pub mod config;
pub mod divider_pointer;
pub mod runner_core;

pub use config::{ConfigError, GridConfig};
pub use divider_pointer::{
    DividerCaptureCommand, DividerDispatch, DividerIgnoredReason, DividerLifecyclePhase,
    DividerLogEntry, DividerLogOutcome, DividerPointerAdapter, DividerPointerButton,
    DividerPointerConfig, DividerTarget,
};
pub use runner_core::{GridRunnerCore, LayoutSwitch, SplitReset};
