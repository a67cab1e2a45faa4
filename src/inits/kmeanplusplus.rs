use crate::{KMeans, KMeansConfig, KMeansResult, KMeansState, memory::*, point::distance_squared};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> KMeansResult<()> {
    {
        // Randomly select first centroid
        let first_idx = config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt());
        state.set_centroid(0, &kmean.points[first_idx]);
    }
    for k in 1..state.k {
        // For each following centroid...
        // Calculate distances & update cluster-assignments
        kmean.update_cluster_assignments(state, Some(k));

        // Squared distance of each sample to its closest centroid is its weight of becoming the next centroid
        let weights: Vec<T> = kmean.points.iter()
            .zip(state.assignments.iter().cloned())
            .map(|(p, c)| distance_squared(p, &state.centroids[c]))
            .collect();
        let sampled_centroid_id = match WeightedIndex::new(&weights) {
            Ok(centroid_index) => centroid_index.sample(config.rnd.borrow_mut().deref_mut()),
            // Every sample sits on a chosen centroid already
            Err(_) => config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt()),
        };
        state.set_centroid(k, &kmean.points[sampled_centroid_id]);
    }
    Ok(())
}
