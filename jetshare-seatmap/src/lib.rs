pub mod layout;
pub mod allocation;
pub mod geometry;

pub use layout::{identifier_for, GridPosition, LayoutError, LayoutType, Seat, SeatLayout, SeatLayoutSpec};
pub use allocation::{allocate, first_section_count, AllocatedSeats, SplitOrientation, SplitPercentage};
pub use geometry::DividerGeometry;
