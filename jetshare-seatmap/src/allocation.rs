use serde::{Deserialize, Serialize};
use crate::layout::SeatLayout;

/// Share of seats assigned to the first side of the split.
///
/// Always within `[1, 99]`; a 0% or 100% split would leave one side empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "u8")]
pub struct SplitPercentage(u8);

impl SplitPercentage {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    /// Clamp any integer into the allowed range
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Round a fractional percentage (e.g. from a slider) and clamp it
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self::clamped(value.round() as i64)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The other side's share
    pub fn complement(self) -> u8 {
        100 - self.0
    }

    /// `"P/(100-P)"`, e.g. `"60/40"`
    pub fn ratio_label(self) -> String {
        format!("{}/{}", self.0, self.complement())
    }
}

impl Default for SplitPercentage {
    fn default() -> Self {
        Self(50)
    }
}

/// JSON integers and fractional slider values both land here
impl From<f64> for SplitPercentage {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<SplitPercentage> for u8 {
    fn from(p: SplitPercentage) -> Self {
        p.0
    }
}

/// Axis along which seats are partitioned
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    /// front / back, divided between rows
    #[default]
    Horizontal,
    /// left / right, divided between columns
    Vertical,
}

impl SplitOrientation {
    pub fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Seat identifiers on each side of the divide.
///
/// Only the pair matching the active orientation is authoritative; the
/// other pair is a plain half split kept for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AllocatedSeats {
    #[serde(default)]
    pub front: Vec<String>,
    #[serde(default)]
    pub back: Vec<String>,
    #[serde(default)]
    pub left: Vec<String>,
    #[serde(default)]
    pub right: Vec<String>,
}

impl AllocatedSeats {
    /// The authoritative (first, second) groups for an orientation
    pub fn active(&self, orientation: SplitOrientation) -> (&[String], &[String]) {
        match orientation {
            SplitOrientation::Horizontal => (&self.front, &self.back),
            SplitOrientation::Vertical => (&self.left, &self.right),
        }
    }
}

/// Number of seats on the first side: `round(pct × total / 100)`, kept
/// within `[1, total - 1]` so neither side is empty.
///
/// Layouts with a single seat put it on the first side.
pub fn first_section_count(total_seats: usize, percentage: SplitPercentage) -> usize {
    if total_seats < 2 {
        return total_seats;
    }
    let raw = (percentage.value() as u128 * total_seats as u128 + 50) / 100;
    // raw <= total_seats, so it fits back into usize
    (raw as usize).clamp(1, total_seats - 1)
}

/// Partition a layout's seats along `orientation`.
///
/// The first group is the row-major (horizontal) or column-major (vertical)
/// prefix of exactly [`first_section_count`] seats, so a partial row or
/// column is split in the middle.
pub fn allocate(
    layout: &SeatLayout,
    orientation: SplitOrientation,
    percentage: SplitPercentage,
) -> AllocatedSeats {
    let first_count = first_section_count(layout.total_seats(), percentage);

    let mut seats = AllocatedSeats::default();
    match orientation {
        SplitOrientation::Horizontal => {
            for (i, seat) in layout.seats().enumerate() {
                if i < first_count {
                    seats.front.push(seat.id);
                } else {
                    seats.back.push(seat.id);
                }
            }

            let half_cols = layout.seats_per_row().div_ceil(2);
            for seat in layout.seats() {
                if seat.col < half_cols {
                    seats.left.push(seat.id);
                } else {
                    seats.right.push(seat.id);
                }
            }
        }
        SplitOrientation::Vertical => {
            for (i, seat) in layout.column_major_seats().enumerate() {
                if i < first_count {
                    seats.left.push(seat.id);
                } else {
                    seats.right.push(seat.id);
                }
            }

            let half_rows = layout.rows().div_ceil(2);
            for seat in layout.seats() {
                if seat.row < half_rows {
                    seats.front.push(seat.id);
                } else {
                    seats.back.push(seat.id);
                }
            }
        }
    }

    seats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridPosition, LayoutType};
    use std::collections::HashSet;

    fn grid(rows: u32, cols: u32) -> SeatLayout {
        SeatLayout::new(rows, cols, LayoutType::Standard).unwrap()
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_percentage_clamping() {
        assert_eq!(SplitPercentage::clamped(0).value(), 1);
        assert_eq!(SplitPercentage::clamped(100).value(), 99);
        assert_eq!(SplitPercentage::clamped(-20).value(), 1);
        assert_eq!(SplitPercentage::from_f64(42.6).value(), 43);
        assert_eq!(SplitPercentage::clamped(60).ratio_label(), "60/40");

        let p: SplitPercentage = serde_json::from_value(serde_json::json!(150)).unwrap();
        assert_eq!(p.value(), 99);
    }

    #[test]
    fn test_fractional_percentage_deserializes() {
        let p: SplitPercentage = serde_json::from_value(serde_json::json!(42.6)).unwrap();
        assert_eq!(p.value(), 43);

        let p: SplitPercentage = serde_json::from_value(serde_json::json!(-3.2)).unwrap();
        assert_eq!(p.value(), 1);

        let p: SplitPercentage = serde_json::from_value(serde_json::json!(60)).unwrap();
        assert_eq!(p.value(), 60);
    }

    #[test]
    fn test_first_section_count_on_huge_totals() {
        let half = first_section_count(usize::MAX, SplitPercentage::clamped(50));
        assert!(half > usize::MAX / 3 && half < usize::MAX);
        let most = first_section_count(usize::MAX, SplitPercentage::clamped(99));
        assert!(most > half && most < usize::MAX);
    }

    #[test]
    fn test_half_split_three_by_four() {
        let seats = allocate(&grid(3, 4), SplitOrientation::Horizontal, SplitPercentage::clamped(50));

        assert_eq!(seats.front, ids(&["A1", "A2", "A3", "A4", "B1", "B2"]));
        assert_eq!(seats.back, ids(&["B3", "B4", "C1", "C2", "C3", "C4"]));
    }

    #[test]
    fn test_quarter_split_three_by_four() {
        let seats = allocate(&grid(3, 4), SplitOrientation::Horizontal, SplitPercentage::clamped(25));

        assert_eq!(seats.front, ids(&["A1", "A2", "A3"]));
        assert_eq!(seats.back.len(), 9);
    }

    #[test]
    fn test_counts_hold_for_every_percentage() {
        let layout = grid(5, 3);
        let total = layout.total_seats();

        for pct in 1..=99 {
            let p = SplitPercentage::clamped(pct);
            let seats = allocate(&layout, SplitOrientation::Horizontal, p);
            let expected = ((pct as usize * total) as f64 / 100.0).round() as usize;

            assert_eq!(seats.front.len() + seats.back.len(), total);
            assert_eq!(seats.front.len(), expected.clamp(1, total - 1));

            let seats = allocate(&layout, SplitOrientation::Vertical, p);
            assert_eq!(seats.left.len() + seats.right.len(), total);
            assert_eq!(seats.left.len(), expected.clamp(1, total - 1));
        }
    }

    #[test]
    fn test_groups_do_not_overlap() {
        let seats = allocate(&grid(4, 4), SplitOrientation::Vertical, SplitPercentage::clamped(37));
        let left: HashSet<_> = seats.left.iter().collect();
        assert!(seats.right.iter().all(|s| !left.contains(s)));
    }

    #[test]
    fn test_vertical_is_column_major() {
        let seats = allocate(&grid(3, 4), SplitOrientation::Vertical, SplitPercentage::clamped(50));

        assert_eq!(seats.left, ids(&["A1", "B1", "C1", "A2", "B2", "C2"]));
        // inactive pair is a half split by row
        assert_eq!(seats.front, ids(&["A1", "A2", "A3", "A4", "B1", "B2", "B3", "B4"]));
        assert_eq!(seats.back, ids(&["C1", "C2", "C3", "C4"]));
    }

    #[test]
    fn test_orientation_changes_grouping() {
        let layout = grid(3, 4);
        let p = SplitPercentage::clamped(50);
        let horizontal = allocate(&layout, SplitOrientation::Horizontal, p);
        let vertical = allocate(&layout, SplitOrientation::Vertical, p);

        assert_ne!(
            horizontal.active(SplitOrientation::Horizontal).0,
            vertical.active(SplitOrientation::Vertical).0
        );
    }

    #[test]
    fn test_extremes_leave_both_sides_populated() {
        let layout = grid(2, 2);
        let low = allocate(&layout, SplitOrientation::Horizontal, SplitPercentage::clamped(1));
        let high = allocate(&layout, SplitOrientation::Horizontal, SplitPercentage::clamped(99));

        assert_eq!(low.front.len(), 1);
        assert_eq!(high.back.len(), 1);
    }

    #[test]
    fn test_single_seat_layout() {
        let seats = allocate(&grid(1, 1), SplitOrientation::Horizontal, SplitPercentage::clamped(50));
        assert_eq!(seats.front, ids(&["A1"]));
        assert!(seats.back.is_empty());
    }

    #[test]
    fn test_skipped_positions_are_never_allocated() {
        let layout = SeatLayout::with_skips(
            2,
            3,
            LayoutType::Custom,
            [GridPosition { row: 0, col: 2 }],
        )
        .unwrap();
        let seats = allocate(&layout, SplitOrientation::Horizontal, SplitPercentage::clamped(60));

        assert_eq!(seats.front, ids(&["A1", "A2", "B1"]));
        assert_eq!(seats.back, ids(&["B2", "B3"]));
    }
}
