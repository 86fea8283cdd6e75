//! Serializable view of the grid for the CSS/DOM layer.

use serde::{Deserialize, Serialize};

use crate::geometry::{LayoutId, SplitAxis};

/// Grid snapshot produced by [`crate::LayoutEngine::presentation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPresentation {
    pub layout: LayoutId,
    /// Value for `grid-template-columns`.
    pub template_columns: String,
    /// Value for `grid-template-rows`.
    pub template_rows: String,
    pub header_height_px: u16,
    pub column_split: f64,
    pub row_split: f64,
    pub slots: Vec<SlotPresentation>,
    pub dividers: Vec<DividerPresentation>,
}

impl GridPresentation {
    /// Container height expression leaving room for the header.
    #[must_use]
    pub fn container_height(&self) -> String {
        format!("calc(100vh - {}px)", self.header_height_px)
    }

    #[must_use]
    pub fn divider(&self, axis: SplitAxis) -> Option<&DividerPresentation> {
        self.dividers.iter().find(|divider| divider.axis == axis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPresentation {
    /// One-based slot number.
    pub slot: usize,
    pub visible: bool,
    pub column_span: u8,
}

impl SlotPresentation {
    /// Value for `grid-column`, or `None` for the default single cell.
    #[must_use]
    pub fn grid_column(&self) -> Option<String> {
        (self.column_span > 1).then(|| format!("span {}", self.column_span))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividerPresentation {
    pub axis: SplitAxis,
    pub visible: bool,
    /// Seam position: `left` for the column divider, `top` for the row one.
    pub offset_percent: f64,
    /// Where along the seam the divider starts (the column divider skips a
    /// spanning first row).
    pub extent_start_percent: f64,
    pub dragging: bool,
}
