//! Errors returned by region containers.

use crate::core::cell::Cell;
use crate::core::rect::Rect;

/// Result type for region and city operations.
pub type RegionResult<T> = Result<T, RegionError>;

/// Why a construction or an `add` was refused.
///
/// Labels are reported by their `Debug` rendering so the error type stays independent of the
/// label type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// Inverted rectangle corners or a non-positive grid size.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("{rect} lies outside the {grid_size}x{grid_size} grid")]
    OutOfBounds { rect: Rect, grid_size: i32 },

    /// Two candidate rectangles of the same `add` cover `cell`.
    #[error("candidate rectangles overlap at cell {cell}")]
    SelfOverlap { cell: Cell },

    #[error("candidate rectangles form {components} separate pieces")]
    Disconnected { components: usize },

    /// A candidate cell is already owned by a committed region.
    #[error("cell {cell} is already owned by {owner}")]
    Overlap { cell: Cell, owner: String },

    #[error("label {label} is already present")]
    DuplicateLabel { label: String },

    #[error("building {building} has no floors")]
    EmptyBuilding { building: String },

    #[error("floor {floor} belongs to building {found}, expected {expected}")]
    MismatchedBuilding {
        expected: String,
        found: String,
        floor: i32,
    },
}

impl RegionError {
    pub(crate) fn duplicate(label: &impl std::fmt::Debug) -> Self {
        RegionError::DuplicateLabel {
            label: format!("{label:?}"),
        }
    }

    pub(crate) fn overlap(cell: Cell, owner: &impl std::fmt::Debug) -> Self {
        RegionError::Overlap {
            cell,
            owner: format!("{owner:?}"),
        }
    }
}

/// Shared grid size check for every container constructor.
pub(crate) fn check_grid_size(grid_size: i32) -> RegionResult<()> {
    if grid_size <= 0 {
        return Err(RegionError::InvalidGeometry {
            reason: format!("grid size must be positive, got {grid_size}"),
        });
    }
    Ok(())
}
