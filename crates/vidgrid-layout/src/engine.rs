//! Layout engine: active layout, split proportions and divider drags.

use crate::drag::{
    ContainerRect, DragCancelReason, DragController, DragPhase, DragTransition, PointerSample,
};
use crate::geometry::{DEFAULT_HEADER_HEIGHT_PX, LayoutDefinition, LayoutId, MAX_SLOTS, SplitAxis};
use crate::presentation::{DividerPresentation, GridPresentation, SlotPresentation};
use crate::split::{SplitBounds, SplitState};

/// Result of [`LayoutEngine::apply_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutChange {
    pub layout: LayoutId,
    pub visible_slots: usize,
    /// Drag sessions the switch terminated.
    pub canceled: Vec<DragTransition>,
}

/// Owns everything the grid needs to draw itself.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    layout: LayoutId,
    split: SplitState,
    bounds: SplitBounds,
    drag: DragController,
    header_height_px: u16,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(SplitBounds::default())
    }
}

impl LayoutEngine {
    /// Engine showing [`LayoutId::DEFAULT`] with a centered split.
    #[must_use]
    pub fn new(bounds: SplitBounds) -> Self {
        Self {
            layout: LayoutId::DEFAULT,
            split: SplitState::centered(bounds),
            bounds,
            drag: DragController::new(),
            header_height_px: DEFAULT_HEADER_HEIGHT_PX,
        }
    }

    #[must_use]
    pub fn with_header_height(mut self, header_height_px: u16) -> Self {
        self.header_height_px = header_height_px;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutId {
        self.layout
    }

    #[must_use]
    pub fn definition(&self) -> &'static LayoutDefinition {
        self.layout.definition()
    }

    #[must_use]
    pub const fn split(&self) -> SplitState {
        self.split
    }

    #[must_use]
    pub const fn bounds(&self) -> SplitBounds {
        self.bounds
    }

    #[must_use]
    pub const fn drag_phase(&self, axis: SplitAxis) -> DragPhase {
        self.drag.phase(axis)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Switch to `layout`.
    ///
    /// Any drag in progress is canceled first, then the split is reset to
    /// the bounds' reset value on both axes. Applying the same layout again
    /// resets the split again.
    pub fn apply_layout(&mut self, layout: LayoutId) -> LayoutChange {
        let canceled = self.drag.cancel(DragCancelReason::LayoutChanged);
        self.layout = layout;
        self.split.reset(self.bounds);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            slots = layout.slot_count(),
            canceled = canceled.len(),
            "layout applied"
        );
        LayoutChange {
            layout,
            visible_slots: layout.slot_count(),
            canceled,
        }
    }

    /// Reset both splits without touching the layout.
    pub fn reset_split(&mut self) -> Vec<DragTransition> {
        let canceled = self.drag.cancel(DragCancelReason::SplitReset);
        self.split.reset(self.bounds);
        canceled
    }

    /// Whether slot `index` (zero-based) is part of the active layout.
    #[must_use]
    pub fn is_slot_visible(&self, index: usize) -> bool {
        index < self.layout.slot_count()
    }

    /// Visibility of every slot, in slot order.
    #[must_use]
    pub fn slot_visibility(&self) -> [bool; MAX_SLOTS] {
        std::array::from_fn(|index| self.is_slot_visible(index))
    }

    /// Whether the divider for `axis` is shown (and therefore draggable).
    #[must_use]
    pub fn is_divider_visible(&self, axis: SplitAxis) -> bool {
        self.definition().resizable_axes.allows(axis)
    }

    /// Press on a divider.
    pub fn press_divider(&mut self, axis: SplitAxis) -> DragTransition {
        let transition = self.drag.press(axis, self.definition().resizable_axes);
        #[cfg(feature = "tracing")]
        tracing::trace!(axis = %axis, effect = ?transition.effect, "divider press");
        transition
    }

    /// Apply a move sample to the dragging axes and store the new splits.
    pub fn drag_to(
        &mut self,
        sample: PointerSample,
        container: ContainerRect,
    ) -> Vec<DragTransition> {
        let transitions = self.drag.track(sample, container, self.bounds);
        for transition in &transitions {
            if let Some(percent) = transition.updated_percent() {
                self.split.set(transition.axis, percent, self.bounds);
            }
        }
        transitions
    }

    /// Release the pointer anywhere on the page.
    pub fn release(&mut self) -> Vec<DragTransition> {
        self.drag.release()
    }

    /// Abort active drags, e.g. when the window loses focus.
    pub fn cancel_drag(&mut self, reason: DragCancelReason) -> Vec<DragTransition> {
        self.drag.cancel(reason)
    }

    /// Snapshot consumed by the presentation layer.
    #[must_use]
    pub fn presentation(&self) -> GridPresentation {
        let def = self.definition();
        let slots = (0..MAX_SLOTS)
            .map(|index| {
                let visible = self.is_slot_visible(index);
                SlotPresentation {
                    slot: index + 1,
                    visible,
                    column_span: if visible { def.column_span(index) } else { 1 },
                }
            })
            .collect();
        let dividers = SplitAxis::ALL
            .into_iter()
            .map(|axis| self.divider_presentation(def, axis))
            .collect();
        GridPresentation {
            layout: self.layout,
            template_columns: track_template(def.cols, self.split.column_split()),
            template_rows: row_template(def, self.split.row_split()),
            header_height_px: self.header_height_px,
            column_split: self.split.column_split(),
            row_split: self.split.row_split(),
            slots,
            dividers,
        }
    }

    fn divider_presentation(&self, def: &LayoutDefinition, axis: SplitAxis) -> DividerPresentation {
        let visible = def.resizable_axes.allows(axis);
        // The column seam does not cross a first row that spans every column.
        let extent_start_percent = match axis {
            SplitAxis::Horizontal if def.has_spanning_first_row() => self.split.row_split(),
            _ => 0.0,
        };
        DividerPresentation {
            axis,
            visible,
            offset_percent: self.split.get(axis),
            extent_start_percent,
            dragging: self.drag.is_dragging(axis),
        }
    }
}

/// CSS track list for one axis.
fn track_template(tracks: u8, first_percent: f64) -> String {
    match tracks {
        0 | 1 => "1fr".to_string(),
        2 => format!(
            "{}% {}%",
            format_percent(first_percent),
            format_percent(100.0 - first_percent)
        ),
        n => format!("repeat({n}, 1fr)"),
    }
}

/// Row track list; overflow rows below the split share the remainder.
fn row_template(def: &LayoutDefinition, first_percent: f64) -> String {
    let tracks = def.track_rows();
    if tracks <= def.rows {
        return track_template(def.rows, first_percent);
    }
    format!(
        "{}% repeat({}, 1fr)",
        format_percent(first_percent),
        tracks - 1
    )
}

fn format_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}
