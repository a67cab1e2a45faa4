//! # kmeans2d - API documentation
//!
//! kmeans2d is a small rust library for step-wise k-means clustering of points in the plane.
//!
//! ## Design target
//! It is meant to drive visualizations of the clustering process. Instead of returning only the final
//! result, a calculation is advanced one iteration at a time, and every iteration hands out a snapshot
//! of the current assignment, with the color of each cluster attached.
//!
//! Samples are plain [`Point`]s with an `x` and a `y` coordinate. Cluster centers ([`Centroid`]) keep
//! a fixed slot and a fixed display color for the whole calculation.
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. For a list of
//! implemented initialization methods, see [`KMeans`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! Here is an example stepping through a calculation on random points, using random-sample initialization:
//!
//! ```rust
//! use kmeans2d::*;
//!
//! fn main() {
//!     let (point_cnt, k, max_iter) = (500, 50, 20);
//!
//!     // Generate some random data on a 800x600 field
//!     let points: Vec<Point<f64>> = random_points(point_cnt, 800, 600, &mut rand::thread_rng());
//!
//!     let kmean = KMeans::new(points);
//!     let conf = KMeansConfig::default();
//!     let mut lloyd = kmean.kmeans_lloyd(k, max_iter, KMeans::init_random_sample, &conf).unwrap();
//!
//!     while let Some(snapshot) = lloyd.step() {
//!         let first = snapshot.get(0).unwrap();
//!         println!("Iteration {}: first point is drawn in {}", snapshot.iteration(), first.color);
//!     }
//!     println!("Centroids: {:?}", lloyd.state().centroids);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans2d::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let mut rnd = StdRng::seed_from_u64(1337);
//!     let points: Vec<Point<f32>> = random_points(2000, 1024, 768, &mut rnd);
//!
//!     let conf = KMeansConfig::build()
//!         .random_generator(rnd)
//!         .init_done(&|_| println!("Initialization completed."))
//!         .iteration_done(&|s, nr, new_distsum|
//!             println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!                 nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!         .build();
//!
//!     // Run to the end, using kmean++ as initialization-method
//!     let kmean = KMeans::new(points);
//!     let result = kmean.kmeans_lloyd(8, 100, KMeans::init_kmeanplusplus, &conf).unwrap().run();
//!
//!     println!("Status: {:?}", result.status);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {}", result.distsum);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. This struct is generic over the underlying primitive
//! type, that should be used for the calculations. An instance of this struct takes over the points into its
//! ownership.
//!
//! Calling [`KMeans::kmeans_lloyd`] does not mutate the instance. It validates the arguments, runs the chosen
//! initialization and returns a [`Lloyd`] calculation. Each call to [`Lloyd::step`] yields a [`Snapshot`] until
//! the calculation converged or ran out of iterations. [`Lloyd`] is an [`Iterator`] over owned snapshots as well.
//! Internally, a [`KMeansState`] stores the state (and finally the result) of the calculation.
//!
//! When the calculation stops is decided by an [`AbortStrategy`], what happens to clusters that lost all of
//! their samples by an [`EmptyClusterStrategy`]. Both are set through [`KMeansConfig::build`].

#[macro_use] mod helpers;
mod memory;
mod point;
mod color;
mod error;
mod snapshot;
mod empty_cluster;
mod api;
mod variants;
mod inits;
mod abort_strategy;

pub use abort_strategy::AbortStrategy;
pub use api::{KMeansState, KMeansStatus, KMeansConfig, KMeansConfigBuilder, KMeans};
pub use color::{generate_distinct_colors, Hsl};
pub use empty_cluster::EmptyClusterStrategy;
pub use error::{KMeansError, KMeansResult};
pub use memory::Primitive;
pub use point::{distance, random_points, Centroid, Point, PointKey};
pub use snapshot::{AssignedPoint, Snapshot};
pub use variants::Lloyd;
