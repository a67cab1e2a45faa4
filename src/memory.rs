use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};
use rand::distributions::uniform::SampleUniform;

/// Floating point types the clustering can be calculated with.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}
