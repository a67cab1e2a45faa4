use crate::memory::*;

/// Arithmetic mean of **cnt** values that sum up to **sum**, optionally floored to a whole number.
/// **cnt** has to be > 0.
pub(crate) fn mean<T: Primitive>(sum: T, cnt: usize, floor: bool) -> T {
    debug_assert!(cnt > 0);
    let mean = sum / T::from(cnt).unwrap(); // usize -> float does not fail
    if floor { mean.floor() } else { mean }
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}
