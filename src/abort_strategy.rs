use crate::{memory::*, point::{Centroid, PointKey}};
use std::collections::HashSet;

/// Enum with possible abort strategies.
/// These strategies decide, after the centroids of an iteration were recomputed, whether the calculation
/// has converged (and therefore stops) or continues with another iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbortStrategy<T: Primitive> {
	/// Converged as soon as every recomputed centroid key (`"x,y"`) was already present in the
	/// previous iteration's set of centroid keys.
	///
	/// Slots are not taken into account, so two slots swapping positions count as converged.
	CentroidKeysUnchanged,
	/// Converged when every slot's recomputed position equals its previous position.
	CentroidsUnchanged,
	/// Converged directly after an iteration produced no improvement of the distance sum where
	/// `improvement > threshold`.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	NoImprovement { threshold: T },
}
impl<T: Primitive> Default for AbortStrategy<T> {
	fn default() -> Self { AbortStrategy::CentroidKeysUnchanged }
}
impl<T: Primitive> AbortStrategy<T> {
	/// Create the stateful logic, seeded with the centroids the calculation was initialized with.
	pub(crate) fn create_logic(&self, initial: &[Centroid<T>]) -> Box<dyn AbortStrategyLogic<T>> {
		match *self {
			AbortStrategy::CentroidKeysUnchanged => Box::new(CentroidKeysLogic {
				prev_keys: initial.iter().map(Centroid::key).collect()
			}),
			AbortStrategy::CentroidsUnchanged => Box::new(CentroidPositionsLogic {
				prev_positions: initial.iter().map(|c| (c.x, c.y)).collect()
			}),
			AbortStrategy::NoImprovement{threshold} => Box::new(NoImprovementLogic {
				threshold,
				prev_error: T::infinity()
			})
		}
	}
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
	/// Function that has to be called once an iteration of the calculation ended and the centroids were recomputed.
	/// ## Arguments
	/// - **centroids**: The recomputed centroids
	/// - **error**: The distance sum of the iteration's assignment
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation has converged
	fn next(&mut self, centroids: &[Centroid<T>], error: T) -> bool;
}


pub(crate) struct CentroidKeysLogic {
	prev_keys: HashSet<PointKey>
}
impl<T: Primitive> AbortStrategyLogic<T> for CentroidKeysLogic {
	fn next(&mut self, centroids: &[Centroid<T>], _: T) -> bool {
		let keys: HashSet<PointKey> = centroids.iter().map(Centroid::key).collect();
		if keys.iter().all(|k| self.prev_keys.contains(k)) {
			return false;
		}
		self.prev_keys = keys;
		true
	}
}


pub(crate) struct CentroidPositionsLogic<T: Primitive> {
	prev_positions: Vec<(T, T)>
}
impl<T: Primitive> AbortStrategyLogic<T> for CentroidPositionsLogic<T> {
	fn next(&mut self, centroids: &[Centroid<T>], _: T) -> bool {
		let unchanged = centroids.iter().zip(self.prev_positions.iter())
			.all(|(c, &(x, y))| c.x == x && c.y == y);
		if unchanged {
			return false;
		}
		self.prev_positions = centroids.iter().map(|c| (c.x, c.y)).collect();
		true
	}
}


pub(crate) struct NoImprovementLogic<T: Primitive> {
	threshold: T,
	prev_error: T
}
impl<T: Primitive> AbortStrategyLogic<T> for NoImprovementLogic<T> {
	fn next(&mut self, _: &[Centroid<T>], error: T) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		improvement > self.threshold
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::color::generate_distinct_colors;

	fn centroids<T: Primitive>(positions: &[(f64, f64)]) -> Vec<Centroid<T>> {
		let colors = generate_distinct_colors(positions.len());
		positions.iter().enumerate().map(|(slot, &(x, y))| {
			let mut c = Centroid::new(slot, colors[slot]);
			c.move_to(T::from(x).unwrap(), T::from(y).unwrap());
			c
		}).collect()
	}

	#[test] fn test_centroid_keys_f32() { test_centroid_keys::<f32>(); }
	#[test] fn test_centroid_keys_f64() { test_centroid_keys::<f64>(); }

	fn test_centroid_keys<T: Primitive>() {
		let zero = T::zero();
		{
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidKeysUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]), zero), false);
		}
		{
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidKeysUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(1.0, 0.0), (10.0, 10.0)]), zero), true);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(2.0, 0.0), (10.0, 10.0)]), zero), true);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(2.0, 0.0), (10.0, 10.0)]), zero), false);
		}
		{ // Slots swapping their positions count as converged
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidKeysUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(10.0, 10.0), (0.0, 0.0)]), zero), false);
		}
		{ // Collapsing onto one previous key is a subset too
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidKeysUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(10.0, 10.0), (10.0, 10.0)]), zero), false);
		}
	}

	#[test] fn test_centroid_positions_f32() { test_centroid_positions::<f32>(); }
	#[test] fn test_centroid_positions_f64() { test_centroid_positions::<f64>(); }

	fn test_centroid_positions<T: Primitive>() {
		let zero = T::zero();
		{
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidsUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]), zero), false);
		}
		{ // Swapped slots are a change
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidsUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(10.0, 10.0), (0.0, 0.0)]), zero), true);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(10.0, 10.0), (0.0, 0.0)]), zero), false);
		}
		{
			let initial = centroids::<T>(&[(0.0, 0.0), (10.0, 10.0)]);
			let mut abort_strategy = AbortStrategy::CentroidsUnchanged.create_logic(&initial);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(0.0, 0.5), (10.0, 10.0)]), zero), true);
			assert_eq!(abort_strategy.next(&centroids::<T>(&[(0.0, 0.5), (10.0, 10.0)]), zero), false);
		}
	}

	#[test] fn test_no_improvement_f32() { test_no_improvement::<f32>(); }
	#[test] fn test_no_improvement_f64() { test_no_improvement::<f64>(); }

	fn test_no_improvement<T: Primitive>() {
		let initial = centroids::<T>(&[(0.0, 0.0)]);
		let threshold = T::from(0.5).unwrap();
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold }.create_logic(&initial);
			assert_eq!(abort_strategy.next(&initial, T::from(3000.0).unwrap()), true);
			assert_eq!(abort_strategy.next(&initial, T::from(3000.0).unwrap()), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold }.create_logic(&initial);
			assert_eq!(abort_strategy.next(&initial, T::from(3000.0).unwrap()), true);
			assert_eq!(abort_strategy.next(&initial, T::from(2999.75).unwrap()), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold }.create_logic(&initial);
			assert_eq!(abort_strategy.next(&initial, T::from(3000.0).unwrap()), true);
			assert_eq!(abort_strategy.next(&initial, T::from(2000.0).unwrap()), true);
			assert_eq!(abort_strategy.next(&initial, T::from(1999.0).unwrap()), true);
			assert_eq!(abort_strategy.next(&initial, T::from(1999.0).unwrap()), false);
		}
		{ // Getting worse is no improvement either
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold }.create_logic(&initial);
			assert_eq!(abort_strategy.next(&initial, T::from(3000.0).unwrap()), true);
			assert_eq!(abort_strategy.next(&initial, T::from(3100.0).unwrap()), false);
		}
	}
}
