use crate::{color::Hsl, memory::*};
use rand::prelude::*;
use std::fmt;

/// Coordinate-derived identity of a point or centroid: `"x,y"`.
///
/// Two points with identical coordinates share the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(String);
impl PointKey {
    pub fn new<T: Primitive>(x: T, y: T) -> Self {
        Self(format!("{},{}", x, y))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}
impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}


/// A single input sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self { Self { x, y } }
    pub fn key(&self) -> PointKey { PointKey::new(self.x, self.y) }
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}
impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self { Self { x, y } }
}


/// Representative position of one of the `k` clusters.
///
/// The **slot** never changes during a run, only the position does. The color is bound to the slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid<T> {
    pub x: T,
    pub y: T,
    pub slot: usize,
    pub color: Hsl,
}
impl<T: Primitive> Centroid<T> {
    pub(crate) fn new(slot: usize, color: Hsl) -> Self {
        Self { x: T::zero(), y: T::zero(), slot, color }
    }
    pub fn key(&self) -> PointKey { PointKey::new(self.x, self.y) }
    pub fn position(&self) -> Point<T> { Point::new(self.x, self.y) }
    pub(crate) fn move_to(&mut self, x: T, y: T) {
        self.x = x;
        self.y = y;
    }
}


/// Euclidean distance between a sample and a centroid.
#[inline(always)]
pub fn distance<T: Primitive>(p: &Point<T>, c: &Centroid<T>) -> T {
    distance_squared(p, c).sqrt()
}

#[inline(always)]
pub(crate) fn distance_squared<T: Primitive>(p: &Point<T>, c: &Centroid<T>) -> T {
    let (dx, dy) = (p.x - c.x, p.y - c.y);
    dx * dx + dy * dy
}

/// Index and distance of the centroid closest to **p**.
///
/// Only a strictly smaller distance replaces the current best, so ties resolve to the
/// centroid that comes first in slot order.
pub(crate) fn nearest_centroid<T: Primitive>(p: &Point<T>, centroids: &[Centroid<T>]) -> (usize, T) {
    let mut best = (0, T::infinity());
    for (idx, c) in centroids.iter().enumerate() {
        let d = distance(p, c);
        if d < best.1 {
            best = (idx, d);
        }
    }
    best
}


/// Generate **count** integer-valued points, uniformly distributed in `[0, width) x [0, height)`.
///
/// ## Panics
/// If **width** or **height** is zero.
pub fn random_points<T: Primitive, R: Rng + ?Sized>(count: usize, width: u32, height: u32, rng: &mut R) -> Vec<Point<T>> {
    assert!(width > 0 && height > 0, "point field must not be empty");
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            Point::new(T::from(x).unwrap_or_else(T::zero), T::from(y).unwrap_or_else(T::zero))
        })
        .collect()
}
