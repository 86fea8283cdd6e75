#![forbid(unsafe_code)]

//! Layout primitives for the vidgrid comparison grid.
//!
//! - [`geometry`]: the closed table of layouts keyed by slot count.
//! - [`split`]: clamped column/row split percentages.
//! - [`drag`]: per-axis divider drag machine with unified pointer samples.
//! - [`engine`]: the owned layout state that ties them together.
//!
//! Nothing here touches the DOM; hosts feed measurements and pointer
//! coordinates in and read a [`GridPresentation`] back.

pub mod drag;
pub mod engine;
pub mod geometry;
pub mod presentation;
pub mod split;

pub use drag::{
    ContainerRect, DragCancelReason, DragController, DragEffect, DragNoopReason, DragPhase,
    DragTransition, PointerSample, split_percent,
};
pub use engine::{LayoutChange, LayoutEngine};
pub use geometry::{
    DEFAULT_HEADER_HEIGHT_PX, DEFAULT_SPLIT_PERCENT, GeometryError, LayoutDefinition, LayoutId,
    MAX_SLOTS, MAX_SPLIT_PERCENT, MIN_SPLIT_PERCENT, ResizableAxes, SlotSpan, SplitAxis,
};
pub use presentation::{DividerPresentation, GridPresentation, SlotPresentation};
pub use split::{SplitBounds, SplitBoundsError, SplitState};
