use thiserror::Error;

/// Errors raised while setting up a k-means calculation.
///
/// Every variant describes an invalid argument. Once a calculation was set up successfully,
/// stepping through it never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KMeansError {
    /// `k` has to be at least 1.
    #[error("k must be > 0")]
    ZeroClusters,

    /// The iteration limit has to be at least 1.
    #[error("max_iter must be > 0")]
    ZeroIterations,

    /// There are fewer samples than requested clusters.
    #[error("need at least {k} points to calculate {k} clusters, got {points}")]
    NotEnoughPoints { points: usize, k: usize },

    /// A sample has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    /// A precomputed initialization did not supply exactly `k` centroids.
    #[error("expected {expected} precomputed centroids, got {got}")]
    CentroidCountMismatch { expected: usize, got: usize },
}

pub type KMeansResult<T> = Result<T, KMeansError>;
