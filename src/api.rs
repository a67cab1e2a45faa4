use crate::{
    color::generate_distinct_colors,
    memory::*,
    point::{nearest_centroid, Centroid, Point},
    variants::Lloyd,
    AbortStrategy, EmptyClusterStrategy, KMeansError, KMeansResult,
};
use std::cell::RefCell;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration, once the centroids were recomputed
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the finished iteration
    /// - **distsum**: New distance sum (**state** still contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    /// Recovery for clusters without samples
    pub(crate) empty_cluster_strategy: EmptyClusterStrategy,
    /// Whether recomputed centroids are floored to whole numbers
    pub(crate) floor_centroids: bool,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::CentroidKeysUnchanged,
            empty_cluster_strategy: EmptyClusterStrategy::KeepPrevious,
            floor_centroids: true,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .field("empty_cluster_strategy", &self.empty_cluster_strategy)
            .field("floor_centroids", &self.floor_centroids)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::CentroidKeysUnchanged`]
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Set how clusters without samples are recovered.
    /// ## Default
    /// [`EmptyClusterStrategy::KeepPrevious`]
    pub fn empty_cluster_strategy(mut self, strategy: EmptyClusterStrategy) -> Self {
        self.config.empty_cluster_strategy = strategy; self
    }
    /// Set whether recomputed centroids are floored to whole numbers.
    /// ## Default
    /// `true`
    pub fn floor_centroids(mut self, floor: bool) -> Self {
        self.config.floor_centroids = floor; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Phase of a running k-means calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KMeansStatus {
    /// Centroids are initialized, no sample was assigned yet
    Initialized,
    /// Samples were assigned, the centroids of this iteration are recomputed on the next step
    Assigning,
    /// The abort strategy detected convergence
    Converged,
    /// The iteration limit was reached before convergence
    ExhaustedIterations,
}
impl KMeansStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, KMeansStatus::Converged | KMeansStatus::ExhaustedIterations)
    }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result.
/// All mutations are done in this structure, making [`KMeans`] immutable, so the samples can be
/// shared by multiple calculations.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **iteration**: Number of assignment passes done so far
/// - **status**: Current phase of the calculation
/// - **distsum**: The total sum of squared distances from all samples to their respective centroids
/// - **centroids**: Cluster centers, indexed by slot
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to the slot of its nearest centroid
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **empty_clusters**: Amount of clusters that were empty in the last recomputation
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub iteration: usize,
    pub status: KMeansStatus,
    pub distsum: T,
    pub centroids: Vec<Centroid<T>>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub empty_clusters: usize,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, k: usize) -> Self {
        Self {
            k,
            iteration: 0,
            status: KMeansStatus::Initialized,
            distsum: T::infinity(),
            centroids: generate_distinct_colors(k).into_iter().enumerate()
                .map(|(slot, color)| Centroid::new(slot, color))
                .collect(),
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            empty_clusters: 0,
        }
    }
    pub(crate) fn set_centroid(&mut self, idx: usize, src: &Point<T>) {
        self.centroids[idx].move_to(src.x, src.y);
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples will be the type used internaly for all calculations, as well as the result
/// as stored in the [`KMeansState`] structure.
///
/// ## Supported variants
/// - Step-wise k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - Random-Sample [`KMeans::init_random_sample`]
/// - K-Mean++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) points: Vec<Point<T>>,
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **points**: The samples to cluster. Their order is kept in every snapshot.
    pub fn new(points: Vec<Point<T>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<T>] { &self.points }
    pub fn sample_cnt(&self) -> usize { self.points.len() }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>, limit_k: Option<usize>) {
        let centroids = &state.centroids[..limit_k.unwrap_or(state.k)];
        self.points.iter()
            .zip(state.assignments.iter_mut())
            .zip(state.centroid_distances.iter_mut())
            .for_each(|((p, assignment), centroid_dist)| {
                let (best_idx, best_dist) = nearest_centroid(p, centroids);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    fn validate(&self, k: usize, max_iter: usize) -> KMeansResult<()> {
        if k == 0 {
            return Err(KMeansError::ZeroClusters);
        }
        if max_iter == 0 {
            return Err(KMeansError::ZeroIterations);
        }
        if self.points.len() < k {
            return Err(KMeansError::NotEnoughPoints { points: self.points.len(), k });
        }
        match self.points.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(KMeansError::NonFinitePoint { index }),
            None => Ok(()),
        }
    }


    /// Step-wise K-Means algorithm (Lloyd). Initializes the centroids and returns a [`Lloyd`] calculation,
    /// that advances by exactly one iteration per [`Lloyd::step`] and hands out a snapshot of all samples
    /// with their current cluster assignment.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of iterations
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Errors
    /// [`KMeansError`] if `k == 0`, `max_iter == 0`, there are fewer samples than `k`, a sample is not finite,
    /// or the initialization rejected its input.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans2d::*;
    ///
    /// let points = vec![(0.0f64, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)]
    ///     .into_iter().map(Point::from).collect();
    /// let kmean = KMeans::new(points);
    /// let conf = KMeansConfig::default();
    /// let mut lloyd = kmean.kmeans_lloyd(2, 10, KMeans::init_random_sample, &conf).unwrap();
    ///
    /// while let Some(snapshot) = lloyd.step() {
    ///     for p in snapshot.iter() {
    ///         println!("({}, {}) -> cluster {} [{}]", p.x, p.y, p.cluster, p.color);
    ///     }
    /// }
    /// println!("Finished with {:?} after {} iterations", lloyd.status(), lloyd.state().iteration);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&'a self, k: usize, max_iter: usize, init: F, config: &'a KMeansConfig<'a, T>) -> KMeansResult<Lloyd<'a, T>>
                where F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'_, T>) -> KMeansResult<()> {
        self.validate(k, max_iter)?;
        Lloyd::new(self, k, max_iter, init, config)
    }

    /// K-Means++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one random sample as first centroid.
    /// Every following centroid is drawn from the samples with a probability proportional to the squared
    /// distance of the sample to its closest, already chosen centroid. This leads to a tendency of selecting
    /// centroids that are far away from each other.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_kmeanplusplus(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> KMeansResult<()> {
        crate::inits::kmeanplusplus::calculate(kmean, state, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// Shuffles the samples (Fisher-Yates) and uses the first **k** of them as initial centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> KMeansResult<()> {
        crate::inits::randomsample::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given positions as initial centroids, in slot order. Exactly **k** positions have to be given.
    pub fn init_precomputed(centroids: Vec<Point<T>>) -> impl FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'_, T>) -> KMeansResult<()> {
        move |kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn kmean<T: Primitive>(coords: &[(f64, f64)]) -> KMeans<T> {
        KMeans::new(coords.iter().map(|&(x, y)| Point::new(T::from(x).unwrap(), T::from(y).unwrap())).collect())
    }

    #[test] fn cluster_assignments_f32() { cluster_assignments::<f32>(); }
    #[test] fn cluster_assignments_f64() { cluster_assignments::<f64>(); }

    fn cluster_assignments<T: Primitive>() {
        let kmean = kmean::<T>(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0), (5.0, 5.0)]);
        let mut state = KMeansState::new(kmean.sample_cnt(), 2);
        state.set_centroid(0, &kmean.points[0]);
        state.set_centroid(1, &kmean.points[2]);

        // calculate assignments using a method that (hopefully) works.
        let should: Vec<usize> = kmean.points.iter()
            .map(|p| {
                let d0 = ((p.x - state.centroids[0].x).powi(2) + (p.y - state.centroids[0].y).powi(2)).sqrt();
                let d1 = ((p.x - state.centroids[1].x).powi(2) + (p.y - state.centroids[1].y).powi(2)).sqrt();
                if d1 < d0 { 1 } else { 0 }
            })
            .collect();

        kmean.update_cluster_assignments(&mut state, None);
        assert_eq!(state.assignments, should);
        assert_eq!(state.assignments, vec![0, 0, 1, 1, 0]);
        assert_approx_eq!(state.centroid_distances[1], T::one(), T::from(1e-6).unwrap());
        assert_approx_eq!(state.centroid_distances[2], T::zero(), T::from(1e-6).unwrap());

        // limiting k only considers the first centroids
        kmean.update_cluster_assignments(&mut state, Some(1));
        assert_eq!(state.assignments, vec![0; 5]);
    }

    #[test]
    fn cluster_frequencies() {
        let kmean = kmean::<f64>(&[(0.0, 0.0); 5]);
        let mut frequency = vec![7usize; 3];
        let used = kmean.update_cluster_frequencies(&[0, 2, 2, 0, 2], &mut frequency);
        assert_eq!(used, 2);
        assert_eq!(frequency, vec![2, 0, 3]);
    }

    #[test]
    fn state_starts_with_colored_slots() {
        let state = KMeansState::<f64>::new(10, 4);
        assert_eq!(state.status, KMeansStatus::Initialized);
        assert_eq!(state.centroids.len(), 4);
        assert_eq!(state.assignments.len(), 10);
        for (slot, c) in state.centroids.iter().enumerate() {
            assert_eq!(c.slot, slot);
            assert_eq!(c.color.hue as usize, slot * 90);
        }
    }

    #[test]
    fn invalid_arguments() {
        let conf = KMeansConfig::default();
        let single = kmean::<f64>(&[(0.0, 0.0)]);
        assert_eq!(
            single.kmeans_lloyd(5, 10, KMeans::init_random_sample, &conf).err(),
            Some(KMeansError::NotEnoughPoints { points: 1, k: 5 })
        );
        assert_eq!(single.kmeans_lloyd(0, 10, KMeans::init_random_sample, &conf).err(), Some(KMeansError::ZeroClusters));
        assert_eq!(single.kmeans_lloyd(1, 0, KMeans::init_random_sample, &conf).err(), Some(KMeansError::ZeroIterations));

        let broken = KMeans::new(vec![Point::new(0.0f64, 0.0), Point::new(f64::NAN, 1.0)]);
        assert_eq!(
            broken.kmeans_lloyd(1, 10, KMeans::init_random_sample, &conf).err(),
            Some(KMeansError::NonFinitePoint { index: 1 })
        );
    }

    #[test]
    fn config_builder() {
        let conf = KMeansConfig::<f64>::build()
            .random_generator(StdRng::seed_from_u64(1))
            .abort_strategy(AbortStrategy::CentroidsUnchanged)
            .empty_cluster_strategy(EmptyClusterStrategy::StealFarthest)
            .floor_centroids(false)
            .build();
        assert_eq!(conf.abort_strategy, AbortStrategy::CentroidsUnchanged);
        assert_eq!(conf.empty_cluster_strategy, EmptyClusterStrategy::StealFarthest);
        assert!(!conf.floor_centroids);

        let defaults = KMeansConfig::<f32>::default();
        assert_eq!(defaults.abort_strategy, AbortStrategy::CentroidKeysUnchanged);
        assert_eq!(defaults.empty_cluster_strategy, EmptyClusterStrategy::KeepPrevious);
        assert!(defaults.floor_centroids);
    }
}
