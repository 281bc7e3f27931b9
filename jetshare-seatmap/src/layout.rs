use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cabin layout family of an aircraft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    Standard,
    Luxury,
    Custom,
}

/// A grid position that holds no seat (galley, lavatory, bulkhead...)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
}

/// Optional seat map details attached to a layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    #[serde(default)]
    pub skip_positions: Vec<GridPosition>,
}

/// Raw wire shape of a seat layout, as stored with a jet record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayoutSpec {
    pub rows: u32,
    pub seats_per_row: u32,
    #[serde(default)]
    pub layout_type: LayoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_map: Option<SeatMap>,
}

/// Validated seat grid for one configurator session.
///
/// Immutable once built; seats are named by [`identifier_for`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SeatLayoutSpec", into = "SeatLayoutSpec")]
pub struct SeatLayout {
    rows: u32,
    seats_per_row: u32,
    layout_type: LayoutType,
    skip_positions: BTreeSet<GridPosition>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout must have at least one row and one seat per row (got {rows}x{seats_per_row})")]
    EmptyDimension { rows: u32, seats_per_row: u32 },

    #[error("Layout {rows}x{seats_per_row} exceeds the {max_rows}x{max_seats_per_row} limit")]
    TooLarge {
        rows: u32,
        seats_per_row: u32,
        max_rows: u32,
        max_seats_per_row: u32,
    },

    #[error("Skip position row {row}, col {col} is outside the {rows}x{seats_per_row} grid")]
    SkipOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        seats_per_row: u32,
    },
}

impl SeatLayout {
    /// Rows `A` through `ZZ`
    pub const MAX_ROWS: u32 = 702;
    pub const MAX_SEATS_PER_ROW: u32 = 26;
    pub const MAX_SEATS: usize = Self::MAX_ROWS as usize * Self::MAX_SEATS_PER_ROW as usize;

    pub fn new(rows: u32, seats_per_row: u32, layout_type: LayoutType) -> Result<Self, LayoutError> {
        Self::with_skips(rows, seats_per_row, layout_type, std::iter::empty())
    }

    pub fn with_skips(
        rows: u32,
        seats_per_row: u32,
        layout_type: LayoutType,
        skips: impl IntoIterator<Item = GridPosition>,
    ) -> Result<Self, LayoutError> {
        if rows == 0 || seats_per_row == 0 {
            return Err(LayoutError::EmptyDimension { rows, seats_per_row });
        }
        if rows > Self::MAX_ROWS || seats_per_row > Self::MAX_SEATS_PER_ROW {
            return Err(LayoutError::TooLarge {
                rows,
                seats_per_row,
                max_rows: Self::MAX_ROWS,
                max_seats_per_row: Self::MAX_SEATS_PER_ROW,
            });
        }

        let mut skip_positions = BTreeSet::new();
        for pos in skips {
            if pos.row >= rows || pos.col >= seats_per_row {
                return Err(LayoutError::SkipOutOfBounds {
                    row: pos.row,
                    col: pos.col,
                    rows,
                    seats_per_row,
                });
            }
            skip_positions.insert(pos);
        }

        Ok(Self {
            rows,
            seats_per_row,
            layout_type,
            skip_positions,
        })
    }

    /// Layout used when nothing better is known about the aircraft
    pub fn default_fallback() -> Self {
        Self {
            rows: 6,
            seats_per_row: 4,
            layout_type: LayoutType::Standard,
            skip_positions: BTreeSet::new(),
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    pub fn layout_type(&self) -> LayoutType {
        self.layout_type
    }

    pub fn is_seat(&self, row: u32, col: u32) -> bool {
        row < self.rows
            && col < self.seats_per_row
            && !self.skip_positions.contains(&GridPosition { row, col })
    }

    /// Number of real seats (grid size minus skipped positions)
    pub fn total_seats(&self) -> usize {
        (self.rows as usize * self.seats_per_row as usize) - self.skip_positions.len()
    }

    /// Seats in row-major order
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.seats_per_row).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.is_seat(row, col))
            .map(|(row, col)| Seat::new(row, col))
    }

    /// Seats in column-major order
    pub fn column_major_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.seats_per_row)
            .flat_map(move |col| (0..self.rows).map(move |row| (row, col)))
            .filter(move |&(row, col)| self.is_seat(row, col))
            .map(|(row, col)| Seat::new(row, col))
    }

    pub fn to_spec(&self) -> SeatLayoutSpec {
        SeatLayoutSpec::from(self.clone())
    }
}

impl TryFrom<SeatLayoutSpec> for SeatLayout {
    type Error = LayoutError;

    fn try_from(spec: SeatLayoutSpec) -> Result<Self, Self::Error> {
        let skips = spec.seat_map.map(|m| m.skip_positions).unwrap_or_default();
        Self::with_skips(spec.rows, spec.seats_per_row, spec.layout_type, skips)
    }
}

impl From<SeatLayout> for SeatLayoutSpec {
    fn from(layout: SeatLayout) -> Self {
        let seat_map = if layout.skip_positions.is_empty() {
            None
        } else {
            Some(SeatMap {
                skip_positions: layout.skip_positions.into_iter().collect(),
            })
        };

        Self {
            rows: layout.rows,
            seats_per_row: layout.seats_per_row,
            layout_type: layout.layout_type,
            seat_map,
        }
    }
}

/// A seat with its grid position and identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub row: u32,
    pub col: u32,
    pub id: String,
}

impl Seat {
    fn new(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            id: identifier_for(row, col),
        }
    }
}

/// Name a seat: row letter followed by the 1-based column number.
///
/// Row 0 is `A`. Past `Z` the letters continue spreadsheet style
/// (`AA`, `AB`, ...), so identifiers stay unique for any row count.
pub fn identifier_for(row: u32, col: u32) -> String {
    format!("{}{}", row_label(row), col + 1)
}

pub fn row_label(row: u32) -> String {
    let mut n = row as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identifier_basics() {
        assert_eq!(identifier_for(0, 0), "A1");
        assert_eq!(identifier_for(2, 3), "C4");
        assert_eq!(identifier_for(25, 1), "Z2");
    }

    #[test]
    fn test_identifier_past_z() {
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
        assert_eq!(row_label(51), "AZ");
        assert_eq!(row_label(52), "BA");
        assert_eq!(row_label(701), "ZZ");
        assert_eq!(row_label(702), "AAA");
    }

    #[test]
    fn test_identifiers_unique() {
        let layout = SeatLayout::new(40, 6, LayoutType::Custom).unwrap();
        let ids: HashSet<String> = layout.seats().map(|s| s.id).collect();
        assert_eq!(ids.len(), 240);
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            SeatLayout::new(0, 4, LayoutType::Standard),
            Err(LayoutError::EmptyDimension { rows: 0, seats_per_row: 4 })
        );
    }

    #[test]
    fn test_rejects_oversized_grids() {
        assert!(matches!(
            SeatLayout::new(u32::MAX, u32::MAX, LayoutType::Custom),
            Err(LayoutError::TooLarge { .. })
        ));
        assert!(matches!(
            SeatLayout::new(60_000, 4, LayoutType::Custom),
            Err(LayoutError::TooLarge { rows: 60_000, .. })
        ));
        assert!(matches!(
            SeatLayout::new(10, 27, LayoutType::Custom),
            Err(LayoutError::TooLarge { seats_per_row: 27, .. })
        ));

        let largest = SeatLayout::new(SeatLayout::MAX_ROWS, SeatLayout::MAX_SEATS_PER_ROW, LayoutType::Custom).unwrap();
        assert_eq!(largest.total_seats(), SeatLayout::MAX_SEATS);

        let huge = serde_json::json!({ "rows": 4294967295u32, "seatsPerRow": 4294967295u32 });
        assert!(serde_json::from_value::<SeatLayout>(huge).is_err());
    }

    #[test]
    fn test_skip_positions() {
        let layout = SeatLayout::with_skips(
            3,
            4,
            LayoutType::Luxury,
            [GridPosition { row: 0, col: 1 }, GridPosition { row: 2, col: 3 }],
        )
        .unwrap();

        assert_eq!(layout.total_seats(), 10);
        assert!(!layout.is_seat(0, 1));
        assert!(layout.seats().all(|s| s.id != "A2" && s.id != "C4"));

        let err = SeatLayout::with_skips(2, 2, LayoutType::Custom, [GridPosition { row: 2, col: 0 }]);
        assert!(matches!(err, Err(LayoutError::SkipOutOfBounds { row: 2, .. })));
    }

    #[test]
    fn test_column_major_order() {
        let layout = SeatLayout::new(2, 2, LayoutType::Standard).unwrap();
        let ids: Vec<String> = layout.column_major_seats().map(|s| s.id).collect();
        assert_eq!(ids, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::json!({
            "rows": 3,
            "seatsPerRow": 2,
            "layoutType": "luxury",
            "seatMap": { "skipPositions": [{ "row": 1, "col": 0 }] }
        });

        let layout: SeatLayout = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(layout.layout_type(), LayoutType::Luxury);
        assert_eq!(layout.total_seats(), 5);
        assert_eq!(serde_json::to_value(&layout).unwrap(), json);

        let bad = serde_json::json!({ "rows": 0, "seatsPerRow": 2 });
        assert!(serde_json::from_value::<SeatLayout>(bad).is_err());
    }
}
