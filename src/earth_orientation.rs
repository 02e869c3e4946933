//! # Earth orientation: precession and sidereal time
//!
//! Minimal Earth-orientation toolkit needed to go from catalog (J2000) equatorial
//! coordinates to the local horizon of an observer:
//!
//! - [`rotmt`] – active rotation matrix around one coordinate axis,
//! - [`precession_angles`] / [`precession_matrix`] – IAU 1976 precession from J2000
//!   to the mean equator and equinox of date,
//! - [`local_sidereal_time`] – GMST shifted by the observer's east longitude.
//!
//! Nutation and the equation of the equinoxes are deliberately not applied: they move
//! a position by less than 20 arcseconds, well below the resolution of the
//! planner.
use hifitime::Epoch;
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Degree, Radian, DPI, MJD, RADEG, T2000},
    time::gmst,
};

/// Coordinate axis of a rotation built by [`rotmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a rotation matrix around one coordinate axis.
///
/// The rotation is **active**: it rotates the vector counter-clockwise by `alpha`
/// radians in a fixed frame. The result is orthonormal, so its transpose is its inverse.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// IAU 1976 precession angles `(ζ, z, θ)` in radians.
///
/// ```text
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// θ(T) = (0.5567530 − 0.0001185·T − 0.0000116·T²) · T  [deg]
/// ```
/// with `T` the Julian centuries (TT) elapsed since J2000.
pub fn precession_angles(tjm: MJD) -> (Radian, Radian, Radian) {
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let t = (tjm - T2000) / 36525.0;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    (zeta, z, theta)
}

/// Precession matrix from mean equatorial J2000 to the mean equator of date.
///
/// Applied to a J2000 unit vector, it yields the direction referred to the mean
/// equator and equinox at `tjm` (MJD, TT):
///
/// ```text
/// P = Rz(z) · Ry(−θ) · Rz(ζ)
/// ```
pub fn precession_matrix(tjm: MJD) -> Matrix3<f64> {
    let (zeta, z, theta) = precession_angles(tjm);
    rotmt(z, Axis::Z) * rotmt(-theta, Axis::Y) * rotmt(zeta, Axis::Z)
}

/// Local mean sidereal time at `epoch` for an observer at east `longitude`.
///
/// Return
/// ----------
/// * LMST in radians, normalized to [0, 2π).
pub fn local_sidereal_time(epoch: &Epoch, longitude: Degree) -> Radian {
    (gmst(epoch.to_mjd_utc_days()) + longitude * RADEG).rem_euclid(DPI)
}
