//! R-tree over bus stop positions for radius queries.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tp_core::{Point, StopId};

/// Entry stored in the R-tree: a planar `[x, y]` point and its stop.
#[derive(Clone, Debug)]
struct StopEntry {
    point: [f64; 2],
    id:    StopId,
}

impl RTreeObject for StopEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopEntry {
    /// Squared Euclidean distance in projected metres.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Bulk-loaded spatial index of stop positions.
pub struct StopIndex {
    tree: RTree<StopEntry>,
}

impl StopIndex {
    pub fn new<'a>(stops: impl IntoIterator<Item = (&'a StopId, Point)>) -> Self {
        let entries = stops
            .into_iter()
            .map(|(id, p)| StopEntry { point: [p.x, p.y], id: id.clone() })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// `true` if at least one stop lies within `radius` of `p` (inclusive).
    pub fn any_within(&self, p: Point, radius: f64) -> bool {
        self.tree
            .locate_within_distance([p.x, p.y], radius * radius)
            .next()
            .is_some()
    }

    /// Closest stop and its distance.
    pub fn nearest(&self, p: Point) -> Option<(&StopId, f64)> {
        self.tree
            .nearest_neighbor(&[p.x, p.y])
            .map(|e| (&e.id, e.distance_2(&[p.x, p.y]).sqrt()))
    }
}
