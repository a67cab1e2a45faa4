/// What to do with a centroid that ended up without any assigned sample after an iteration.
///
/// The mean of an empty cluster is undefined, so one of these recoveries is applied instead.
/// An empty cluster is never reported as an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterStrategy {
    /// The centroid keeps its previous position.
    #[default]
    KeepPrevious,
    /// The sample farthest from its own centroid (taken from a cluster with more than one sample)
    /// is moved into the empty cluster, which then sits exactly on that sample.
    StealFarthest,
}
