use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use approx::abs_diff_eq;
use ordered_float::OrderedFloat;

/// Uniquely identify a vertex that belongs to a graph.
/// Two vertices are the same only if they have the same ID, regardless of their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Uniquely identify an undirected edge that belongs to a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Cost of traversing an edge or a path (e.g. travel time in seconds or length in meters).
/// Totally ordered so it can be used as a priority queue key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost(OrderedFloat<f64>);

impl Cost {
    pub const ZERO: Self = Self(OrderedFloat(0.0));
    pub const MAX: Self = Self(OrderedFloat(f64::MAX));

    pub const fn new(value: f64) -> Self {
        Self(OrderedFloat(value))
    }

    pub const fn value(&self) -> f64 {
        self.0.0
    }

    /// Edge weights must be finite and non-negative for shortest paths to be correct.
    pub fn is_valid_weight(&self) -> bool {
        self.value().is_finite() && self.value() >= 0.0
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Cost {
    fn from(value: u32) -> Self {
        Self::new(value.into())
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, cost| acc + cost)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// WGS84 latitude and longitude of a vertex, in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        const EPSILON: f64 = 1e-7;
        abs_diff_eq!(self.lat, other.lat, epsilon = EPSILON)
            && abs_diff_eq!(self.lon, other.lon, epsilon = EPSILON)
    }
}

#[cfg(feature = "geo")]
impl From<Coordinate> for geo::Point {
    fn from(coordinate: Coordinate) -> Self {
        geo::Point::new(coordinate.lon, coordinate.lat)
    }
}

#[cfg(feature = "geo")]
impl From<geo::Point> for Coordinate {
    fn from(point: geo::Point) -> Self {
        Self::new(point.y(), point.x())
    }
}
