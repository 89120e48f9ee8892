use super::candidate::Candidate;
use super::plate::PlateDimensions;

/// Axis-aligned rectangle of one hole, in plate coordinates.
///
/// The origin is the plate's top-left corner and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleRect {
    pub column: u64,
    pub row: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Regular grid of holes on a plate.
///
/// Hole `(c, r)` starts at `x = c * (hole_width + horizontal_spacing)` and
/// `y = r * (hole_height + vertical_spacing)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleLayout {
    pub plate: PlateDimensions,
    pub hole_width: f64,
    pub hole_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub columns: u64,
    pub rows: u64,
}

impl HoleLayout {
    pub fn from_candidate(plate: PlateDimensions, candidate: &Candidate) -> Self {
        Self {
            plate,
            hole_width: candidate.hole_width,
            hole_height: candidate.hole_height,
            horizontal_spacing: candidate.horizontal_spacing,
            vertical_spacing: candidate.vertical_spacing,
            columns: candidate.columns,
            rows: candidate.rows,
        }
    }

    #[inline]
    pub fn column_pitch(&self) -> f64 {
        self.hole_width + self.horizontal_spacing
    }

    #[inline]
    pub fn row_pitch(&self) -> f64 {
        self.hole_height + self.vertical_spacing
    }

    pub fn hole_count(&self) -> u64 {
        self.columns * self.rows
    }

    pub fn hole(&self, column: u64, row: u64) -> HoleRect {
        HoleRect {
            column,
            row,
            x: column as f64 * self.column_pitch(),
            y: row as f64 * self.row_pitch(),
            width: self.hole_width,
            height: self.hole_height,
        }
    }

    /// All holes in row-major order.
    pub fn holes(&self) -> impl Iterator<Item = HoleRect> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| self.hole(column, row))
        })
    }
}
