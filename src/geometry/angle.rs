//! Angles normalized to [0, 2π).

use std::f64::consts::TAU;
use std::ops::{Add, Div, Mul, Sub};

use super::{GeometryError, is_infinite, is_zero};

/// An angle, stored in radians, always normalized to [0, 2π).
///
/// Equality is within 1e-5 radians, so a full number of turns in
/// either direction compares equal to the base angle.
#[derive(Debug, Clone, Copy)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub fn radians(r: f64) -> Self {
        Self {
            radians: normalize(r),
        }
    }

    pub fn degrees(d: f64) -> Self {
        Self::radians(d.to_radians())
    }

    /// The normalized radian value, in [0, 2π).
    pub fn as_radians(&self) -> f64 {
        self.radians
    }

    /// The normalized value in degrees, in [0, 360).
    pub fn as_degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn sin(&self) -> f64 {
        snap_zero(self.radians.sin())
    }

    pub fn cos(&self) -> f64 {
        snap_zero(self.radians.cos())
    }

    /// The tangent; near-right angles have none.
    pub fn tan(&self) -> Result<f64, GeometryError> {
        let v = self.radians.tan();
        if is_infinite(v) {
            return Err(GeometryError::TangentUndefined);
        }
        Ok(snap_zero(v))
    }

    /// The angle whose tangent is `t`, normalized like any other.
    pub fn arctan(t: f64) -> Self {
        Self::radians(t.atan())
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        is_zero(self.radians - other.radians)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::radians(self.radians - rhs.radians)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, k: f64) -> Angle {
        Angle::radians(self.radians * k)
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;

    fn mul(self, a: Angle) -> Angle {
        a * self
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, k: f64) -> Angle {
        Angle::radians(self.radians / k)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad", self.radians)
    }
}

fn normalize(r: f64) -> f64 {
    let v = r.rem_euclid(TAU);
    if v >= TAU { 0.0 } else { v }
}

fn snap_zero(v: f64) -> f64 {
    if is_zero(v) { 0.0 } else { v }
}
