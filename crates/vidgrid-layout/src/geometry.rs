//! Closed table of grid layouts keyed by slot count.
//!
//! Every layout is a 1- or 2-row grid. A column split only exists for
//! two-column grids and a row split only for two-row grids, so the set of
//! draggable dividers falls out of the grid shape.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Number of slots the page hosts, visible or not.
pub const MAX_SLOTS: usize = 8;

/// Lower clamp bound for a split percentage.
pub const MIN_SPLIT_PERCENT: f64 = 10.0;

/// Upper clamp bound for a split percentage.
pub const MAX_SPLIT_PERCENT: f64 = 90.0;

/// Split percentage applied on every layout change and reset.
pub const DEFAULT_SPLIT_PERCENT: f64 = 50.0;

/// Height of the control header above the grid, in CSS pixels.
pub const DEFAULT_HEADER_HEIGHT_PX: u16 = 60;

/// Axis along which a divider resizes the grid.
///
/// `Horizontal` follows the pointer's X coordinate and drives the column
/// split; its divider is drawn as a vertical bar between the columns.
/// `Vertical` follows Y and drives the row split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

impl SplitAxis {
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Dense index used for per-axis arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    const fn flag(self) -> ResizableAxes {
        match self {
            Self::Horizontal => ResizableAxes::HORIZONTAL,
            Self::Vertical => ResizableAxes::VERTICAL,
        }
    }
}

impl fmt::Display for SplitAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

bitflags! {
    /// Dividers that are active (visible and draggable) for a layout.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResizableAxes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

impl ResizableAxes {
    #[must_use]
    pub const fn allows(self, axis: SplitAxis) -> bool {
        self.contains(axis.flag())
    }
}

/// Column-span override for one slot in an irregular layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpan {
    /// Zero-based slot index.
    pub slot: usize,
    pub column_span: u8,
}

/// Immutable description of one grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDefinition {
    pub slot_count: u8,
    pub rows: u8,
    pub cols: u8,
    pub resizable_axes: ResizableAxes,
    pub spanning_slots: &'static [SlotSpan],
}

impl LayoutDefinition {
    /// Total grid cells; may exceed `slot_count`.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Column span for a slot, `1` unless overridden.
    #[must_use]
    pub fn column_span(&self, slot: usize) -> u8 {
        self.spanning_slots
            .iter()
            .find(|span| span.slot == slot)
            .map_or(1, |span| span.column_span)
    }

    /// Whether the first row is a single slot spanning every column.
    #[must_use]
    pub fn has_spanning_first_row(&self) -> bool {
        self.cols > 1 && self.column_span(0) == self.cols
    }

    /// Cells covered by the layout's slots once spans are applied.
    ///
    /// The 5-slot layout covers 7 cells of its 6-cell grid.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        (0..usize::from(self.slot_count))
            .map(|slot| usize::from(self.column_span(slot)))
            .sum()
    }

    /// Row tracks the container must declare so no slot falls outside it.
    ///
    /// Equal to `rows` unless the spans overflow the nominal grid.
    #[must_use]
    pub fn track_rows(&self) -> u8 {
        let cols = usize::from(self.cols.max(1));
        let needed = self.occupied_cells().div_ceil(cols);
        u8::try_from(needed).map_or(u8::MAX, |needed| needed.max(self.rows))
    }

    /// The 7-slot layout reuses the 8-cell grid and hides the last cell
    /// instead of computing a real 7-way packing.
    #[must_use]
    pub fn is_approximation(&self) -> bool {
        self.occupied_cells() < self.cells()
    }
}

const FIRST_SPANS_TWO: &[SlotSpan] = &[SlotSpan {
    slot: 0,
    column_span: 2,
}];

const FIRST_SPANS_THREE: &[SlotSpan] = &[SlotSpan {
    slot: 0,
    column_span: 3,
}];

const BOTH: ResizableAxes = ResizableAxes::HORIZONTAL.union(ResizableAxes::VERTICAL);

static LAYOUTS: [LayoutDefinition; MAX_SLOTS] = [
    LayoutDefinition {
        slot_count: 1,
        rows: 1,
        cols: 1,
        resizable_axes: ResizableAxes::empty(),
        spanning_slots: &[],
    },
    LayoutDefinition {
        slot_count: 2,
        rows: 1,
        cols: 2,
        resizable_axes: ResizableAxes::HORIZONTAL,
        spanning_slots: &[],
    },
    LayoutDefinition {
        slot_count: 3,
        rows: 2,
        cols: 2,
        resizable_axes: BOTH,
        spanning_slots: FIRST_SPANS_TWO,
    },
    LayoutDefinition {
        slot_count: 4,
        rows: 2,
        cols: 2,
        resizable_axes: BOTH,
        spanning_slots: &[],
    },
    LayoutDefinition {
        slot_count: 5,
        rows: 2,
        cols: 3,
        resizable_axes: ResizableAxes::VERTICAL,
        spanning_slots: FIRST_SPANS_THREE,
    },
    LayoutDefinition {
        slot_count: 6,
        rows: 2,
        cols: 3,
        resizable_axes: ResizableAxes::VERTICAL,
        spanning_slots: &[],
    },
    LayoutDefinition {
        slot_count: 7,
        rows: 2,
        cols: 4,
        resizable_axes: ResizableAxes::VERTICAL,
        spanning_slots: &[],
    },
    LayoutDefinition {
        slot_count: 8,
        rows: 2,
        cols: 4,
        resizable_axes: ResizableAxes::VERTICAL,
        spanning_slots: &[],
    },
];

/// Validated layout key (the slot count, 1..=8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LayoutId(u8);

impl LayoutId {
    /// Layout shown before the user picks one.
    pub const DEFAULT: Self = Self(2);

    /// Validate a raw slot count coming from the layout selector.
    pub fn new(slot_count: u32) -> Result<Self, GeometryError> {
        match u8::try_from(slot_count) {
            Ok(count @ 1..=8) => Ok(Self(count)),
            _ => Err(GeometryError::UnknownLayout {
                requested: slot_count,
            }),
        }
    }

    /// Every supported layout in selector order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_SLOTS as u8).map(Self)
    }

    #[must_use]
    pub const fn slot_count(self) -> usize {
        self.0 as usize
    }

    /// Look up the layout; infallible once the id has been validated.
    #[must_use]
    pub fn definition(self) -> &'static LayoutDefinition {
        &LAYOUTS[self.slot_count() - 1]
    }
}

impl Default for LayoutId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for LayoutId {
    type Error = GeometryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LayoutId> for u32 {
    fn from(id: LayoutId) -> Self {
        u32::from(id.0)
    }
}

/// Geometry lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    UnknownLayout { requested: u32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayout { requested } => {
                write!(f, "no layout for {requested} slots (expected 1..={MAX_SLOTS})")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
