//! Finds the next predicted collision time between two bodies.
//!
//! The squared-distance-minus-sum-of-radii equation between two bodies
//! moving under constant acceleration is a quartic in `t`. We delegate the
//! actual root-finding to the `roots` crate, which already degrades
//! correctly to cubic/quadratic/linear solvers when the leading
//! coefficients vanish (the common case of zero relative acceleration).
use glam::DVec2;
use roots::{find_roots_quartic, Roots};

/// Coefficients `c0..=c4` of the quartic collision polynomial, in
/// ascending order of degree (`c0` is the constant term).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionPolynomial {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
}

impl CollisionPolynomial {
    /// Builds the polynomial whose roots are the times at which two bodies
    /// parameterized by `(x0, v0, a)` and radius sum `r` touch.
    pub fn from_relative_trajectory(dx: DVec2, dv: DVec2, da: DVec2, r: f64) -> CollisionPolynomial {
        CollisionPolynomial {
            c0: dx.dot(dx) - r * r,
            c1: 2.0 * dx.dot(dv),
            c2: dx.dot(da) + dv.dot(dv),
            c3: dv.dot(da),
            c4: da.dot(da) / 4.0,
        }
    }

    /// All real roots of the polynomial, in ascending order.
    pub fn real_roots(&self) -> Roots<f64> {
        find_roots_quartic(self.c4, self.c3, self.c2, self.c1, self.c0)
    }
}

/// The smallest real root strictly greater than `t`, or `+inf` if none qualifies.
///
/// Ties within tolerance are broken arbitrarily but consistently (ascending
/// order from the underlying solver); the simulator re-predicts after every
/// event, so duplicate roots are self-correcting.
pub fn next_time_after(roots: Roots<f64>, t: f64) -> f64 {
    roots
        .as_ref()
        .iter()
        .copied()
        .filter(|&root| root > t)
        .fold(f64::INFINITY, f64::min)
}
