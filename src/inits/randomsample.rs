use crate::{KMeans, KMeansState, KMeansConfig, KMeansResult, memory::*};
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)] pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> KMeansResult<()> {
    let mut idxs: Vec<usize> = (0..kmean.sample_cnt()).collect();
    idxs.shuffle(config.rnd.borrow_mut().deref_mut());
    idxs.iter().cloned().take(state.k)
        .enumerate()
        .for_each(|(ci, si)| { // Copy the first k shuffled samples into state.centroids
            state.set_centroid(ci, &kmean.points[si]);
        });
    Ok(())
}
