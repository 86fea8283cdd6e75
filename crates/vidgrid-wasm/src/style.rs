//! DOM write plan for a [`GridPresentation`].
//!
//! Pure data so the mapping from presentation to CSS can be checked natively;
//! `dom.rs` only resolves element ids and performs the writes.

use vidgrid_layout::{GridPresentation, SplitAxis};
use vidgrid_media::SlotId;
use vidgrid_web::DividerTarget;

/// Id of the grid container element.
pub const GRID_CONTAINER_ID: &str = "video-grid";
/// Id of the bar between the two columns.
pub const COLUMN_DIVIDER_ID: &str = "divider-column";
/// Id of the bar between the two rows.
pub const ROW_DIVIDER_ID: &str = "divider-row";
/// Class toggled on a divider while it is dragged.
pub const DRAGGING_CLASS: &str = "dragging";
/// Class of the upload label inside each slot.
pub const UPLOAD_BUTTON_SELECTOR: &str = ".upload-button";

/// Id of the `<video>` element for `slot`.
#[must_use]
pub fn player_id(slot: SlotId) -> String {
    format!("player{}", slot.get())
}

#[must_use]
pub const fn divider_id(axis: SplitAxis) -> &'static str {
    match axis {
        SplitAxis::Horizontal => COLUMN_DIVIDER_ID,
        SplitAxis::Vertical => ROW_DIVIDER_ID,
    }
}

/// Host code for a divider handle: 0 column, 1 row, 2 their crossing.
#[must_use]
pub const fn divider_target_from_u8(code: u8) -> Option<DividerTarget> {
    match code {
        0 => Some(DividerTarget::Single(SplitAxis::Horizontal)),
        1 => Some(DividerTarget::Single(SplitAxis::Vertical)),
        2 => Some(DividerTarget::Intersection),
        _ => None,
    }
}

/// Element a write applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    Container,
    /// The element wrapping the player of this slot.
    Slot(SlotId),
    Divider(SplitAxis),
}

/// One DOM mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomWrite {
    /// Set an inline style property; an empty value removes it.
    Style {
        target: StyleTarget,
        property: &'static str,
        value: String,
    },
    Class {
        target: StyleTarget,
        class: &'static str,
        enabled: bool,
    },
}

impl DomWrite {
    fn style(target: StyleTarget, property: &'static str, value: impl Into<String>) -> Self {
        Self::Style {
            target,
            property,
            value: value.into(),
        }
    }
}

fn percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}%")
}

fn display(visible: bool) -> &'static str {
    if visible { "" } else { "none" }
}

/// Every write needed to bring the page in line with `presentation`.
#[must_use]
pub fn plan_writes(presentation: &GridPresentation) -> Vec<DomWrite> {
    let mut writes = vec![
        DomWrite::style(
            StyleTarget::Container,
            "grid-template-columns",
            presentation.template_columns.clone(),
        ),
        DomWrite::style(
            StyleTarget::Container,
            "grid-template-rows",
            presentation.template_rows.clone(),
        ),
        DomWrite::style(
            StyleTarget::Container,
            "height",
            presentation.container_height(),
        ),
    ];

    for slot in &presentation.slots {
        let Some(id) = u32::try_from(slot.slot).ok().and_then(|n| SlotId::new(n).ok()) else {
            continue;
        };
        let target = StyleTarget::Slot(id);
        writes.push(DomWrite::style(target, "display", display(slot.visible)));
        writes.push(DomWrite::style(
            target,
            "grid-column",
            slot.grid_column().unwrap_or_default(),
        ));
    }

    for divider in &presentation.dividers {
        let target = StyleTarget::Divider(divider.axis);
        writes.push(DomWrite::style(target, "display", display(divider.visible)));
        match divider.axis {
            SplitAxis::Horizontal => {
                writes.push(DomWrite::style(
                    target,
                    "left",
                    percent(divider.offset_percent),
                ));
                writes.push(DomWrite::style(
                    target,
                    "top",
                    percent(divider.extent_start_percent),
                ));
                writes.push(DomWrite::style(
                    target,
                    "height",
                    percent(100.0 - divider.extent_start_percent),
                ));
            }
            SplitAxis::Vertical => {
                writes.push(DomWrite::style(
                    target,
                    "top",
                    percent(divider.offset_percent),
                ));
            }
        }
        writes.push(DomWrite::Class {
            target,
            class: DRAGGING_CLASS,
            enabled: divider.dragging,
        });
    }
    writes
}
