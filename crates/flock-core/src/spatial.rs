use crate::biod::Biod;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Index entry: an agent's position plus its index in the swarm's agent list.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BiodLocation {
    pub index: usize,
    pub position: [f64; 2],
}

impl RTreeObject for BiodLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for BiodLocation {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Build an R*-tree over agent positions via bulk_load (O(n log n)).
pub(crate) fn build_index(biods: &[Biod]) -> RTree<BiodLocation> {
    RTree::bulk_load(
        biods
            .iter()
            .enumerate()
            .map(|(index, biod)| BiodLocation {
                index,
                position: [biod.position.x, biod.position.y],
            })
            .collect(),
    )
}

/// Indices of agents within `radius` of `center` (inclusive), excluding
/// `exclude`. AABB envelope query, then exact Euclidean filter.
pub(crate) fn neighbors_within(
    tree: &RTree<BiodLocation>,
    center: [f64; 2],
    radius: f64,
    exclude: usize,
) -> Vec<usize> {
    let envelope = AABB::from_corners(
        [center[0] - radius, center[1] - radius],
        [center[0] + radius, center[1] + radius],
    );
    let r_sq = radius * radius;

    tree.locate_in_envelope(&envelope)
        .filter(|loc| loc.index != exclude && loc.distance_2(&center) <= r_sq)
        .map(|loc| loc.index)
        .collect()
}
