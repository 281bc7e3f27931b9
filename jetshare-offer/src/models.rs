use jetshare_seatmap::{allocate, AllocatedSeats, SeatLayout, SplitOrientation, SplitPercentage};
use serde::{Deserialize, Serialize};

/// How an aircraft's seats are split between the offering and the joining party.
///
/// This is the one shape kept in application state. Other wire shapes are
/// converted at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SplitConfiguration {
    pub jet_id: String,
    pub split_orientation: SplitOrientation,
    pub split_ratio: String,
    pub split_percentage: SplitPercentage,
    pub allocated_seats: AllocatedSeats,
}

impl SplitConfiguration {
    pub fn compute(
        jet_id: impl Into<String>,
        layout: &SeatLayout,
        orientation: SplitOrientation,
        percentage: SplitPercentage,
    ) -> Self {
        Self {
            jet_id: jet_id.into(),
            split_orientation: orientation,
            split_ratio: percentage.ratio_label(),
            split_percentage: percentage,
            allocated_seats: allocate(layout, orientation, percentage),
        }
    }

    /// Seats on the first side of the active split
    pub fn first_group(&self) -> &[String] {
        self.allocated_seats.active(self.split_orientation).0
    }

    /// Seats on the second side of the active split
    pub fn second_group(&self) -> &[String] {
        self.allocated_seats.active(self.split_orientation).1
    }

    pub fn total_seats(&self) -> usize {
        self.first_group().len() + self.second_group().len()
    }

    pub fn to_selection(&self) -> SeatSelectionConfiguration {
        SeatSelectionConfiguration {
            jet_id: self.jet_id.clone(),
            selected_seats: self.first_group().to_vec(),
            total_seats: self.total_seats(),
            split_orientation: self.split_orientation,
        }
    }
}

/// Flat "selected seats" shape produced by the newer seat picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatSelectionConfiguration {
    pub jet_id: String,
    pub selected_seats: Vec<String>,
    pub total_seats: usize,
    #[serde(default)]
    pub split_orientation: SplitOrientation,
}

impl SeatSelectionConfiguration {
    /// Percentage of the layout the selection covers
    pub fn percentage(&self) -> SplitPercentage {
        if self.total_seats == 0 {
            return SplitPercentage::default();
        }
        SplitPercentage::from_f64(self.selected_seats.len() as f64 / self.total_seats as f64 * 100.0)
    }

    /// Re-derive the canonical split from the selection's share of `layout`.
    ///
    /// The seats are reallocated from the percentage, so the first group can
    /// differ from `selected_seats` by a rounding seat.
    pub fn to_split(&self, layout: &SeatLayout) -> SplitConfiguration {
        SplitConfiguration::compute(self.jet_id.clone(), layout, self.split_orientation, self.percentage())
    }
}

/// Any configuration shape a client may send
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IncomingSplit {
    Split(SplitConfiguration),
    Selection(SeatSelectionConfiguration),
}

impl IncomingSplit {
    pub fn into_canonical(self, layout: &SeatLayout) -> SplitConfiguration {
        match self {
            IncomingSplit::Split(config) => config,
            IncomingSplit::Selection(selection) => selection.to_split(layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jetshare_seatmap::LayoutType;

    fn grid(rows: u32, cols: u32) -> SeatLayout {
        SeatLayout::new(rows, cols, LayoutType::Standard).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let config = SplitConfiguration::compute("jet-1", &grid(3, 4), SplitOrientation::Horizontal, SplitPercentage::clamped(25));
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["jetId"], "jet-1");
        assert_eq!(json["splitOrientation"], "horizontal");
        assert_eq!(json["splitRatio"], "25/75");
        assert_eq!(json["splitPercentage"], 25);
        assert_eq!(json["allocatedSeats"]["front"], serde_json::json!(["A1", "A2", "A3"]));

        let back: SplitConfiguration = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_selection_round_trip_keeps_seat_count() {
        for (rows, cols) in [(3, 4), (5, 3), (7, 2), (4, 4)] {
            let layout = grid(rows, cols);
            for pct in 1..=99 {
                for orientation in [SplitOrientation::Horizontal, SplitOrientation::Vertical] {
                    let original = SplitConfiguration::compute("jet", &layout, orientation, SplitPercentage::clamped(pct));
                    let selection = original.to_selection();
                    assert_eq!(selection.total_seats, layout.total_seats());

                    let restored = selection.to_split(&layout);
                    let drift = original.first_group().len().abs_diff(restored.first_group().len());
                    assert!(drift <= 1, "{rows}x{cols} at {pct}% drifted by {drift}");
                    assert_eq!(restored.split_orientation, orientation);
                }
            }
        }
    }

    #[test]
    fn test_incoming_accepts_both_shapes() {
        let layout = grid(3, 4);
        let selection = serde_json::json!({
            "jetId": "jet-9",
            "selectedSeats": ["A1", "A2", "A3", "A4", "B1", "B2"],
            "totalSeats": 12
        });

        let incoming: IncomingSplit = serde_json::from_value(selection).unwrap();
        let config = incoming.into_canonical(&layout);
        assert_eq!(config.split_percentage.value(), 50);
        assert_eq!(config.split_orientation, SplitOrientation::Horizontal);
        assert_eq!(config.first_group().len(), 6);

        let split = SplitConfiguration::compute("jet-9", &layout, SplitOrientation::Vertical, SplitPercentage::clamped(30));
        let incoming: IncomingSplit = serde_json::from_value(serde_json::to_value(&split).unwrap()).unwrap();
        assert_eq!(incoming.into_canonical(&layout), split);
    }

    #[test]
    fn test_empty_selection_defaults_to_even_split() {
        let selection = SeatSelectionConfiguration {
            jet_id: "jet".into(),
            selected_seats: vec![],
            total_seats: 0,
            split_orientation: SplitOrientation::Horizontal,
        };
        assert_eq!(selection.percentage().value(), 50);
    }
}
