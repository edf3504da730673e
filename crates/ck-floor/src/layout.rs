//! Floor geometry, reduced to what the state machines need.
//!
//! Lanes are placed centre-out, alternating left and right of the floor's
//! centre column with a fixed spacing:
//!
//! ```text
//! width = 30, spacing = 3
//!
//!   col:  2  5  8  11  14 | 17  20  23  26
//!   lane: 9  7  5   3   1 |  2   4   6   8
//! ```
//!
//! Customers enter on the main aisle at `entry_column`, walk sideways to
//! their lane's column, then walk `lane_length` steps up to the till.  After
//! paying they take `exit_length` steps to leave.

/// Layout parameters shared by every lane.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FloorLayout {
    /// Floor width in cells, walls included.
    pub width: u32,
    /// Columns between neighbouring lanes.
    pub lane_spacing: u32,
    /// Steps from the main aisle to the head of a lane.
    pub lane_length: u32,
    /// Steps from the till to the store exit.
    pub exit_length: u32,
    /// Column at which arriving customers appear on the aisle.
    pub entry_column: i32,
}

impl Default for FloorLayout {
    fn default() -> Self {
        Self {
            width:        30,
            lane_spacing: 3,
            lane_length:  13,
            exit_length:  15,
            entry_column: 0,
        }
    }
}

impl FloorLayout {
    /// Column of every lane the floor can hold, in lane order.
    pub fn columns(&self) -> Vec<i32> {
        let spacing = self.lane_spacing.max(1) as i32;
        let width = self.width as i32;
        let centre = width / 2;

        let mut left = Vec::new();
        let mut c = centre;
        while c > 0 {
            left.push(c - 1);
            c -= spacing;
        }

        let mut right = Vec::new();
        let mut c = centre + spacing;
        while c < width - 1 {
            right.push(c - 1);
            c += spacing;
        }

        // Interleave, keeping whatever remains on the longer side.
        let mut out = Vec::with_capacity(left.len() + right.len());
        let mut l = left.into_iter();
        let mut r = right.into_iter();
        loop {
            match (l.next(), r.next()) {
                (None, None) => break,
                (a, b) => out.extend(a.into_iter().chain(b)),
            }
        }
        out
    }

    /// Column of the lane at 0-based `index`, if the floor has room for it.
    pub fn column_for(&self, index: usize) -> Option<i32> {
        self.columns().get(index).copied()
    }

    /// Maximum number of lanes this floor can hold.
    pub fn max_lanes(&self) -> usize {
        self.columns().len()
    }
}
