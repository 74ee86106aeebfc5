//! Drop Intent
//!
//! Maps where the pointer sits inside the hovered row to the structural
//! intent of the drop.

use serde::{Deserialize, Serialize};

/// Share of the row height, at the top and at the bottom, treated as the
/// gap between rows rather than the row itself.
pub const GAP_RATIO: f64 = 0.25;

/// Structural intent of a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropIntent {
    /// Become the first child of the target
    Into,
    /// Become the sibling immediately before the target
    Before,
    /// Become the sibling immediately after the target
    After,
}

/// Where inside the target row the pointer was released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropZone {
    GapAbove,
    Node,
    GapBelow,
}

impl DropZone {
    /// Classify a pointer by its vertical offset from the top of a row of
    /// the given height.
    pub fn from_offset(offset_y: f64, height: f64) -> Self {
        if !(height > 0.0) || !offset_y.is_finite() {
            return DropZone::Node;
        }
        let ratio = (offset_y / height).clamp(0.0, 1.0);
        if ratio < GAP_RATIO {
            DropZone::GapAbove
        } else if ratio > 1.0 - GAP_RATIO {
            DropZone::GapBelow
        } else {
            DropZone::Node
        }
    }
}

/// Resolve the drop intent for a zone on a target row.
///
/// The gap below an expanded row with children sits right above its first
/// child, so dropping there nests the module instead of placing it after
/// the whole subtree.
pub fn resolve_intent(zone: DropZone, target_expanded: bool, target_has_children: bool) -> DropIntent {
    match zone {
        DropZone::Node => DropIntent::Into,
        DropZone::GapAbove => DropIntent::Before,
        DropZone::GapBelow if target_expanded && target_has_children => DropIntent::Into,
        DropZone::GapBelow => DropIntent::After,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_from_offset() {
        assert_eq!(DropZone::from_offset(2.0, 32.0), DropZone::GapAbove);
        assert_eq!(DropZone::from_offset(16.0, 32.0), DropZone::Node);
        assert_eq!(DropZone::from_offset(30.0, 32.0), DropZone::GapBelow);
        // Pointer slightly outside the row still counts as the nearest gap
        assert_eq!(DropZone::from_offset(-3.0, 32.0), DropZone::GapAbove);
        assert_eq!(DropZone::from_offset(40.0, 32.0), DropZone::GapBelow);
    }

    #[test]
    fn test_zero_height_row_is_a_node_drop() {
        assert_eq!(DropZone::from_offset(5.0, 0.0), DropZone::Node);
        assert_eq!(DropZone::from_offset(f64::NAN, 20.0), DropZone::Node);
    }

    #[test]
    fn test_resolve_intent() {
        assert_eq!(resolve_intent(DropZone::Node, false, false), DropIntent::Into);
        assert_eq!(resolve_intent(DropZone::GapAbove, true, true), DropIntent::Before);
        assert_eq!(resolve_intent(DropZone::GapBelow, false, true), DropIntent::After);
        assert_eq!(resolve_intent(DropZone::GapBelow, true, false), DropIntent::After);
        assert_eq!(resolve_intent(DropZone::GapBelow, true, true), DropIntent::Into);
    }
}
