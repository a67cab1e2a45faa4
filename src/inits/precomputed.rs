use crate::{KMeans, KMeansConfig, KMeansError, KMeansResult, KMeansState, Point, memory::*};

#[inline(always)]
pub fn calculate<T: Primitive>(
    _kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<Point<T>>,
) -> KMeansResult<()> {
    if computed.len() != state.k {
        return Err(KMeansError::CentroidCountMismatch { expected: state.k, got: computed.len() });
    }
    if let Some(index) = computed.iter().position(|c| !c.is_finite()) {
        return Err(KMeansError::NonFinitePoint { index });
    }
    computed.iter().enumerate().for_each(|(ci, c)| {
        state.set_centroid(ci, c);
    });
    Ok(())
}
