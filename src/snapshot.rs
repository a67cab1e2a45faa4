use crate::{color::Hsl, memory::*, point::{Centroid, Point}, KMeansState};

/// A sample together with the cluster it is currently assigned to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssignedPoint<T> {
    pub x: T,
    pub y: T,
    /// Slot of the assigned centroid
    pub cluster: usize,
    /// Display color of the assigned slot
    pub color: Hsl,
}

/// View of all samples and their cluster assignment, right after an assignment pass and
/// before the centroids of that iteration are recomputed.
///
/// The order of the samples is the order they were given to [`crate::KMeans::new`].
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'s, T: Primitive> {
    pub(crate) points: &'s [Point<T>],
    pub(crate) state: &'s KMeansState<T>,
}
impl<'s, T: Primitive> Snapshot<'s, T> {
    /// Number of the iteration (starting at 1) this snapshot was taken in.
    pub fn iteration(&self) -> usize { self.state.iteration }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// The centroids the samples were assigned to.
    pub fn centroids(&self) -> &'s [Centroid<T>] { &self.state.centroids }
    /// Slot of every sample, in sample order.
    pub fn assignments(&self) -> &'s [usize] { &self.state.assignments }

    pub fn get(&self, idx: usize) -> Option<AssignedPoint<T>> {
        let p = self.points.get(idx)?;
        let cluster = self.state.assignments[idx];
        Some(AssignedPoint { x: p.x, y: p.y, cluster, color: self.state.centroids[cluster].color })
    }

    pub fn iter(&self) -> impl Iterator<Item = AssignedPoint<T>> + 's {
        let centroids = &self.state.centroids;
        self.points.iter().zip(self.state.assignments.iter().cloned())
            .map(move |(p, cluster)| AssignedPoint { x: p.x, y: p.y, cluster, color: centroids[cluster].color })
    }

    /// Samples grouped by slot, each group in sample order.
    pub fn clusters(&self) -> Vec<Vec<Point<T>>> {
        let mut clusters = vec![Vec::new(); self.state.k];
        self.points.iter().zip(self.state.assignments.iter().cloned())
            .for_each(|(p, cluster)| clusters[cluster].push(*p));
        clusters
    }

    pub fn to_vec(&self) -> Vec<AssignedPoint<T>> { self.iter().collect() }
}
