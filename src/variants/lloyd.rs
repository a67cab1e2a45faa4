use crate::{
	abort_strategy::AbortStrategyLogic, helpers, memory::*, snapshot::{AssignedPoint, Snapshot},
	EmptyClusterStrategy, KMeans, KMeansConfig, KMeansResult, KMeansState, KMeansStatus,
};
use std::cmp::Ordering;
use std::iter::FusedIterator;

/// A running, step-wise k-means (Lloyd) calculation, created by [`KMeans::kmeans_lloyd`].
///
/// Every call to [`Lloyd::step`] advances the calculation by exactly one iteration:
/// 1. The centroids of the previous iteration are recomputed from its assignment, and the
///    abort strategy decides whether the calculation converged.
/// 2. All samples are assigned to their nearest centroid, and a [`Snapshot`] of the assignment is returned.
///
/// Recomputation is therefore deferred until the caller asks for the next snapshot. Once the calculation
/// converged or ran out of iterations, `step` keeps returning `None`. Dropping the calculation early is fine.
///
/// As an [`Iterator`], it yields owned copies of the snapshots.
pub struct Lloyd<'a, T: Primitive> {
	data: &'a KMeans<T>,
	config: &'a KMeansConfig<'a, T>,
	max_iter: usize,
	state: KMeansState<T>,
	abort_strategy: Box<dyn AbortStrategyLogic<T>>,
}
impl<'a, T: Primitive> Lloyd<'a, T> {
	pub(crate) fn new<F>(data: &'a KMeans<T>, k: usize, max_iter: usize, init: F, config: &'a KMeansConfig<'a, T>) -> KMeansResult<Self>
				where F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'_, T>) -> KMeansResult<()> {
		let mut state = KMeansState::new(data.sample_cnt(), k);

		// Initialize clusters and notify subscriber
		init(data, &mut state, config)?;
		(config.init_done)(&state);
		log::debug!("initialized {} centroids for {} samples", k, data.sample_cnt());

		let abort_strategy = config.abort_strategy.create_logic(&state.centroids);
		Ok(Self { data, config, max_iter, state, abort_strategy })
	}

	pub fn state(&self) -> &KMeansState<T> { &self.state }
	pub fn status(&self) -> KMeansStatus { self.state.status }

	/// Advance by one iteration. Returns `None` once the calculation has finished.
	pub fn step(&mut self) -> Option<Snapshot<'_, T>> {
		if self.state.status.is_finished() {
			return None;
		}
		if self.state.status == KMeansStatus::Assigning && !self.finish_iteration() {
			return None;
		}
		if self.state.iteration >= self.max_iter {
			self.state.status = KMeansStatus::ExhaustedIterations;
			log::info!("no convergence after {} iterations", self.state.iteration);
			return None;
		}

		self.data.update_cluster_assignments(&mut self.state, None);
		self.state.iteration += 1;
		self.state.status = KMeansStatus::Assigning;
		Some(Snapshot { points: &self.data.points, state: &self.state })
	}

	/// Run the calculation to its end and return the final state.
	pub fn run(mut self) -> KMeansState<T> {
		while self.step().is_some() {}
		self.state
	}

	/// Recompute the centroids from the last assignment and consult the abort strategy.
	/// Returns whether the calculation continues.
	fn finish_iteration(&mut self) -> bool {
		let new_distsum: T = self.state.centroid_distances.iter().map(|&d| d * d).sum();
		self.update_centroids();

		// Notify subscriber about finished iteration
		let iteration = self.state.iteration;
		(self.config.iteration_done)(&self.state, iteration, new_distsum);
		log::debug!("iteration {} - distsum: {:.2} -> {:.2}, empty clusters: {}",
			iteration, self.state.distsum, new_distsum, self.state.empty_clusters);

		let proceed = self.abort_strategy.next(&self.state.centroids, new_distsum);
		self.state.distsum = new_distsum;
		if !proceed {
			self.state.status = KMeansStatus::Converged;
			log::info!("converged after {} iterations (distsum: {:.2})", iteration, new_distsum);
		}
		proceed
	}

	fn update_centroids(&mut self) {
		let (data, state) = (self.data, &mut self.state);
		let used_centroids_cnt = data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
		state.empty_clusters = state.k - used_centroids_cnt;

		// Sum all samples in a cluster together
		let mut sums = vec![(T::zero(), T::zero()); state.k];
		data.points.iter()
			.zip(state.assignments.iter().cloned())
			.for_each(|(p, centroid_id)| {
				sums[centroid_id].0 += p.x;
				sums[centroid_id].1 += p.y;
			});

		if state.empty_clusters > 0 && self.config.empty_cluster_strategy == EmptyClusterStrategy::StealFarthest {
			Self::assign_empty_clusters(data, state, &mut sums);
		}

		let floor = self.config.floor_centroids;
		state.centroids.iter_mut()
			.zip(sums.iter().cloned())
			.zip(state.centroid_frequency.iter().cloned())
			.for_each(|((c, (sx, sy)), cfreq)| {
				if cfreq == 0 { // Mean of nothing is undefined -> centroid stays where it is
					log::debug!("cluster {} is empty, keeping centroid at {}", c.slot, c.key());
					return;
				}
				c.move_to(helpers::mean(sx, cfreq, floor), helpers::mean(sy, cfreq, floor));
			});
	}

	/// Give every empty cluster the sample that is farthest away from its centroid, as long as that
	/// sample is not alone in its cluster. **sums** holds the per-cluster coordinate sums and is kept in sync.
	fn assign_empty_clusters(data: &KMeans<T>, state: &mut KMeansState<T>, sums: &mut [(T, T)]) {
		let mut distance_sorted_samples: Vec<usize> = (0..data.sample_cnt()).collect();
		distance_sorted_samples.sort_by(|&i1, &i2| {
			state.centroid_distances[i1].partial_cmp(&state.centroid_distances[i2]).unwrap_or(Ordering::Equal)
		});

		for i in 0..state.k {
			if state.centroid_frequency[i] != 0 {
				continue;
			}
			let candidate = distance_sorted_samples.iter().rev().cloned()
				.find(|&s| state.centroid_frequency[state.assignments[s]] > 1);
			let Some(sample_id) = candidate else { continue };

			// Re-Assign found sample to centroid without any samples
			let prev_centroid_id = state.assignments[sample_id];
			let p = &data.points[sample_id];
			state.centroid_frequency[prev_centroid_id] -= 1;
			state.centroid_frequency[i] += 1;
			sums[prev_centroid_id].0 -= p.x;
			sums[prev_centroid_id].1 -= p.y;
			sums[i] = (p.x, p.y);
			// Centroid is moved into the chosen point -> the points centroid distance is 0
			state.centroid_distances[sample_id] = T::zero();
			state.assignments[sample_id] = i;
			log::debug!("cluster {} is empty, moving sample {} from cluster {} into it", i, sample_id, prev_centroid_id);
		}
	}
}
impl<'a, T: Primitive> Iterator for Lloyd<'a, T> {
	type Item = Vec<AssignedPoint<T>>;
	fn next(&mut self) -> Option<Self::Item> {
		self.step().map(|snapshot| snapshot.to_vec())
	}
}
impl<'a, T: Primitive> FusedIterator for Lloyd<'a, T> {}
impl<'a, T: Primitive> std::fmt::Debug for Lloyd<'a, T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Lloyd")
			.field("max_iter", &self.max_iter)
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}
