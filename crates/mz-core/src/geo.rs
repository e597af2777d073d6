//! Maze-plane coordinate type.
//!
//! `Vec2` uses `f32` components in board units (one unit ≈ one tile).  It is
//! used both for positions and for unit travel directions; the maze is
//! y-up, so `Vec2::UP` is `(0, 1)`.
//!
//! Direction vectors along axis-aligned edges normalise to exactly `±1.0`
//! on one axis and `0.0` on the other, which is what lets edge selection
//! compare directions with `==` instead of an angular tolerance.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2-D vector / point on the maze plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO:  Vec2 = Vec2 { x:  0.0, y:  0.0 };
    pub const UP:    Vec2 = Vec2 { x:  0.0, y:  1.0 };
    pub const DOWN:  Vec2 = Vec2 { x:  0.0, y: -1.0 };
    pub const LEFT:  Vec2 = Vec2 { x: -1.0, y:  0.0 };
    pub const RIGHT: Vec2 = Vec2 { x:  1.0, y:  0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared Euclidean distance.  Avoids the `sqrt`.
    #[inline]
    pub fn distance_squared(self, other: Vec2) -> f32 {
        (other - self).length_squared()
    }

    /// Euclidean distance in board units.  Used as the edge weight.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length
    /// (or non-finite) vector.
    pub fn try_normalize(self) -> Option<Vec2> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Unit vector in the same direction; `Vec2::ZERO` if `self` has no
    /// length.
    #[inline]
    pub fn normalize_or_zero(self) -> Vec2 {
        self.try_normalize().unwrap_or(Vec2::ZERO)
    }

    /// `true` if both components are exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Component-wise rounding to the nearest whole board unit.
    #[inline]
    pub fn round(self) -> Vec2 {
        Vec2::new(self.x.round(), self.y.round())
    }

    /// Integer grid key of the rounded position.  Two positions that share
    /// a key are considered the same maze cell.
    #[inline]
    pub fn grid_key(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
