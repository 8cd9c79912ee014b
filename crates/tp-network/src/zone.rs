//! Zone grid: O(1) bucketing of planar points into `z_{row}_{col}` cells.
//!
//! # Layout
//!
//! The bounding box is divided into `rows × cols` equal cells.  Row 0 is at
//! `min.y`, column 0 at `min.x`.  Points on the max edge of the box belong
//! to the last row/column; points outside the box (or any point when the box
//! has zero width or height) resolve to [`ZoneId::Undefined`].

use std::fmt;

use tp_core::{BoundingBox, Point, UNDEFINED};

use crate::{NetworkError, NetworkResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ZoneId {
    Cell { row: usize, col: usize },
    Undefined,
}

impl ZoneId {
    pub fn is_defined(self) -> bool {
        matches!(self, ZoneId::Cell { .. })
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Cell { row, col } => write!(f, "z_{row}_{col}"),
            ZoneId::Undefined => f.write_str(UNDEFINED),
        }
    }
}

/// One grid cell; corners run bottom-left, bottom-right, top-right, top-left.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id:       ZoneId,
    pub boundary: [Point; 4],
}

impl Zone {
    /// Closed containment test (the border belongs to the zone).
    pub fn contains(&self, p: Point) -> bool {
        let [bl, _, tr, _] = self.boundary;
        bl.x <= p.x && p.x <= tr.x && bl.y <= p.y && p.y <= tr.y
    }
}

/// A zoning strategy: enumerates its zones and locates points in them.
pub trait ZoneGenerator {
    fn generate(&self) -> Vec<Zone>;

    fn find_zone_id(&self, p: Point) -> ZoneId;
}

/// Uniform `rows × cols` grid over a bounding box.
#[derive(Clone, Debug)]
pub struct GridZones {
    bbox: BoundingBox,
    rows: usize,
    cols: usize,
}

impl GridZones {
    pub fn new(bbox: BoundingBox, rows: usize, cols: usize) -> NetworkResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(NetworkError::InvalidGrid(format!(
                "rows and cols must be at least 1 (got {rows}x{cols})"
            )));
        }
        Ok(Self { bbox, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn unit_size(&self) -> (f64, f64) {
        (self.bbox.width() / self.cols as f64, self.bbox.height() / self.rows as f64)
    }
}

impl ZoneGenerator for GridZones {
    fn generate(&self) -> Vec<Zone> {
        let (w, h) = self.unit_size();
        let min = self.bbox.min;
        let mut zones = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let left = min.x + col as f64 * w;
                let bottom = min.y + row as f64 * h;
                let (right, top) = (left + w, bottom + h);
                zones.push(Zone {
                    id: ZoneId::Cell { row, col },
                    boundary: [
                        Point::new(left, bottom),
                        Point::new(right, bottom),
                        Point::new(right, top),
                        Point::new(left, top),
                    ],
                });
            }
        }
        zones
    }

    fn find_zone_id(&self, p: Point) -> ZoneId {
        if !self.bbox.contains(p) {
            return ZoneId::Undefined;
        }
        let (w, h) = self.unit_size();
        if w == 0.0 || h == 0.0 {
            return ZoneId::Undefined;
        }
        let col = (((p.x - self.bbox.min.x) / w) as usize).min(self.cols - 1);
        let row = (((p.y - self.bbox.min.y) / h) as usize).min(self.rows - 1);
        ZoneId::Cell { row, col }
    }
}
