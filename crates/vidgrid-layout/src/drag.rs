//! Divider drag lifecycle.
//!
//! Each axis runs an independent machine:
//!
//! ```text
//! Idle --press--> Dragging --release/cancel--> Idle
//! ```
//!
//! Mouse and touch input are both reduced to a [`PointerSample`] before any
//! percentage math, so [`split_percent`] is the single place that maps a
//! pointer position to a split.

use serde::{Deserialize, Serialize};

use crate::geometry::{ResizableAxes, SplitAxis};
use crate::split::SplitBounds;

/// Pointer position in the same coordinate space as [`ContainerRect`]
/// (CSS pixels, viewport-relative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Bounding box of the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn span(self, axis: SplitAxis) -> Option<(f64, f64)> {
        let (origin, extent) = match axis {
            SplitAxis::Horizontal => (self.left, self.width),
            SplitAxis::Vertical => (self.top, self.height),
        };
        (origin.is_finite() && extent.is_finite() && extent > 0.0).then_some((origin, extent))
    }
}

/// Map a pointer position onto a clamped split percentage for `axis`.
///
/// Returns `None` for a degenerate container or a non-finite sample.
#[must_use]
pub fn split_percent(
    axis: SplitAxis,
    sample: PointerSample,
    container: ContainerRect,
    bounds: SplitBounds,
) -> Option<f64> {
    if !sample.is_finite() {
        return None;
    }
    let (origin, extent) = container.span(axis)?;
    let coordinate = match axis {
        SplitAxis::Horizontal => sample.x,
        SplitAxis::Vertical => sample.y,
    };
    Some(bounds.clamp(100.0 * (coordinate - origin) / extent))
}

/// Lifecycle state of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Why a drag session ended without a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelReason {
    LayoutChanged,
    SplitReset,
    FocusLost,
    PointerCancel,
}

/// Input that was accepted by the machine but changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    AxisNotResizable,
    AlreadyDragging,
    DegenerateContainer,
    NonFiniteSample,
}

/// Effect of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started,
    Updated { percent: f64 },
    Released,
    Canceled { reason: DragCancelReason },
    Noop { reason: DragNoopReason },
}

/// One per-axis transition with a monotonic id for logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub axis: SplitAxis,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

impl DragTransition {
    /// Percentage produced by an `Updated` effect.
    #[must_use]
    pub const fn updated_percent(&self) -> Option<f64> {
        match self.effect {
            DragEffect::Updated { percent } => Some(percent),
            _ => None,
        }
    }
}

/// Per-axis drag machines.
///
/// The controller does not own the split; [`crate::LayoutEngine`] stores the
/// percentages carried by `Updated` transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    phases: [DragPhase; 2],
    transition_counter: u64,
}

impl DragController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phases: [DragPhase::Idle; 2],
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self, axis: SplitAxis) -> DragPhase {
        self.phases[axis.index()]
    }

    #[must_use]
    pub const fn is_dragging(&self, axis: SplitAxis) -> bool {
        matches!(self.phase(axis), DragPhase::Dragging)
    }

    /// Whether any axis is mid-drag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        SplitAxis::ALL.into_iter().any(|axis| self.is_dragging(axis))
    }

    /// Press on the divider for `axis`. Starts a session only when the axis
    /// is resizable in the active layout.
    pub fn press(&mut self, axis: SplitAxis, resizable: ResizableAxes) -> DragTransition {
        let from = self.phase(axis);
        if !resizable.allows(axis) {
            return self.noop(axis, DragNoopReason::AxisNotResizable);
        }
        if from == DragPhase::Dragging {
            return self.noop(axis, DragNoopReason::AlreadyDragging);
        }
        self.transition(axis, DragPhase::Dragging, DragEffect::Started)
    }

    /// Feed one move sample to every dragging axis.
    ///
    /// Idle axes are skipped, so a stale move after release yields an empty
    /// list.
    pub fn track(
        &mut self,
        sample: PointerSample,
        container: ContainerRect,
        bounds: SplitBounds,
    ) -> Vec<DragTransition> {
        let mut out = Vec::new();
        for axis in SplitAxis::ALL {
            if !self.is_dragging(axis) {
                continue;
            }
            let transition = if !sample.is_finite() {
                self.noop(axis, DragNoopReason::NonFiniteSample)
            } else {
                match split_percent(axis, sample, container, bounds) {
                    Some(percent) => self.transition(
                        axis,
                        DragPhase::Dragging,
                        DragEffect::Updated { percent },
                    ),
                    None => self.noop(axis, DragNoopReason::DegenerateContainer),
                }
            };
            out.push(transition);
        }
        out
    }

    /// Release wherever the pointer is. Ends every dragging axis.
    pub fn release(&mut self) -> Vec<DragTransition> {
        self.end_all(DragEffect::Released)
    }

    /// Force every dragging axis back to Idle.
    pub fn cancel(&mut self, reason: DragCancelReason) -> Vec<DragTransition> {
        self.end_all(DragEffect::Canceled { reason })
    }

    fn end_all(&mut self, effect: DragEffect) -> Vec<DragTransition> {
        let mut out = Vec::new();
        for axis in SplitAxis::ALL {
            if self.is_dragging(axis) {
                out.push(self.transition(axis, DragPhase::Idle, effect));
            }
        }
        out
    }

    fn transition(&mut self, axis: SplitAxis, to: DragPhase, effect: DragEffect) -> DragTransition {
        let from = self.phase(axis);
        self.phases[axis.index()] = to;
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            axis,
            from,
            to,
            effect,
        }
    }

    fn noop(&mut self, axis: SplitAxis, reason: DragNoopReason) -> DragTransition {
        let phase = self.phase(axis);
        self.transition(axis, phase, DragEffect::Noop { reason })
    }
}
