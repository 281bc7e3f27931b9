use serde::{Deserialize, Serialize};
use crate::allocation::{SplitOrientation, SplitPercentage};
use crate::layout::SeatLayout;

pub const DEFAULT_SEAT_SIZE_PX: f64 = 40.0;

/// Converts between the divider's pixel offset and the split percentage.
///
/// The percentage is authoritative. The divider offset is derived from it
/// with [`DividerGeometry::offset_for`] whenever it is drawn, and only a
/// finished drag gesture ([`DividerGeometry::percentage_from_drag`]) turns
/// pixels back into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerGeometry {
    pub seat_size_px: f64,
}

impl Default for DividerGeometry {
    fn default() -> Self {
        Self {
            seat_size_px: DEFAULT_SEAT_SIZE_PX,
        }
    }
}

impl DividerGeometry {
    pub fn new(seat_size_px: f64) -> Self {
        if seat_size_px.is_finite() && seat_size_px > 0.0 {
            Self { seat_size_px }
        } else {
            Self::default()
        }
    }

    /// Number of seat lines the divider can sit between
    fn lines(layout: &SeatLayout, orientation: SplitOrientation) -> u32 {
        match orientation {
            SplitOrientation::Horizontal => layout.rows(),
            SplitOrientation::Vertical => layout.seats_per_row(),
        }
    }

    /// Seats in one line perpendicular to the divider
    fn seats_per_line(layout: &SeatLayout, orientation: SplitOrientation) -> u32 {
        match orientation {
            SplitOrientation::Horizontal => layout.seats_per_row(),
            SplitOrientation::Vertical => layout.rows(),
        }
    }

    /// Length of the axis the divider travels along
    pub fn grid_extent_px(&self, layout: &SeatLayout, orientation: SplitOrientation) -> f64 {
        Self::lines(layout, orientation) as f64 * self.seat_size_px
    }

    /// Percentage implied by dropping the divider at `raw_px`
    pub fn percentage_from_drag(
        &self,
        layout: &SeatLayout,
        orientation: SplitOrientation,
        raw_px: f64,
    ) -> SplitPercentage {
        let extent = self.grid_extent_px(layout, orientation);
        let px = if raw_px.is_nan() { 0.0 } else { raw_px.clamp(0.0, extent) };

        let line_index = (px / self.seat_size_px).round() as u32;
        let seats_before = line_index.min(Self::lines(layout, orientation)) as f64
            * Self::seats_per_line(layout, orientation) as f64;
        let grid_seats = layout.rows() as f64 * layout.seats_per_row() as f64;

        SplitPercentage::from_f64(seats_before / grid_seats * 100.0)
    }

    /// Divider offset in pixels for a percentage, clamped to the grid
    pub fn offset_for(
        &self,
        layout: &SeatLayout,
        orientation: SplitOrientation,
        percentage: SplitPercentage,
    ) -> f64 {
        let grid_seats = layout.rows() as f64 * layout.seats_per_row() as f64;
        let per_line = Self::seats_per_line(layout, orientation) as f64;
        let line_count = (percentage.value() as f64 / 100.0 * grid_seats / per_line).ceil();

        (line_count * self.seat_size_px).min(self.grid_extent_px(layout, orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutType;

    fn grid(rows: u32, cols: u32) -> SeatLayout {
        SeatLayout::new(rows, cols, LayoutType::Standard).unwrap()
    }

    #[test]
    fn test_drag_to_midpoint() {
        let geometry = DividerGeometry::new(40.0);
        let layout = grid(4, 4);
        let midpoint = geometry.grid_extent_px(&layout, SplitOrientation::Horizontal) / 2.0;

        let pct = geometry.percentage_from_drag(&layout, SplitOrientation::Horizontal, midpoint);
        assert_eq!(pct.value(), 50);

        let pct = geometry.percentage_from_drag(&layout, SplitOrientation::Vertical, midpoint);
        assert_eq!(pct.value(), 50);
    }

    #[test]
    fn test_drag_clamps_to_grid() {
        let geometry = DividerGeometry::default();
        let layout = grid(4, 4);

        let low = geometry.percentage_from_drag(&layout, SplitOrientation::Horizontal, -500.0);
        let high = geometry.percentage_from_drag(&layout, SplitOrientation::Horizontal, 10_000.0);

        assert_eq!(low.value(), 1);
        assert_eq!(high.value(), 99);
    }

    #[test]
    fn test_drag_snaps_to_nearest_line() {
        let geometry = DividerGeometry::new(40.0);
        let layout = grid(5, 2);

        // 55px rounds to the boundary after row A: 2 of 10 seats
        let pct = geometry.percentage_from_drag(&layout, SplitOrientation::Horizontal, 55.0);
        assert_eq!(pct.value(), 20);
    }

    #[test]
    fn test_offset_for_percentage() {
        let geometry = DividerGeometry::new(40.0);
        let layout = grid(3, 4);

        // 50% of 12 seats = 6 seats -> 1.5 rows -> 2 rows
        let px = geometry.offset_for(&layout, SplitOrientation::Horizontal, SplitPercentage::clamped(50));
        assert_eq!(px, 80.0);

        let px = geometry.offset_for(&layout, SplitOrientation::Horizontal, SplitPercentage::clamped(99));
        assert_eq!(px, 120.0);

        // vertical: 6 seats / 3 per column = 2 columns
        let px = geometry.offset_for(&layout, SplitOrientation::Vertical, SplitPercentage::clamped(50));
        assert_eq!(px, 80.0);
    }

    #[test]
    fn test_offset_and_drag_agree_on_aligned_splits() {
        let geometry = DividerGeometry::default();
        let layout = grid(4, 4);

        for pct in [25, 50, 75] {
            let p = SplitPercentage::clamped(pct);
            let px = geometry.offset_for(&layout, SplitOrientation::Horizontal, p);
            assert_eq!(geometry.percentage_from_drag(&layout, SplitOrientation::Horizontal, px), p);
        }
    }

    #[test]
    fn test_invalid_seat_size_falls_back() {
        assert_eq!(DividerGeometry::new(0.0).seat_size_px, DEFAULT_SEAT_SIZE_PX);
        assert_eq!(DividerGeometry::new(f64::NAN).seat_size_px, DEFAULT_SEAT_SIZE_PX);
    }
}
