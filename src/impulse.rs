//! The value object produced by a predicted collision and consumed by
//! [`Body::apply`](crate::body::Body::apply).
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;

use crate::mass::Mass;
use crate::tolerance::scalar_close;

/// A positional correction `dx` and velocity change `dv` at an instant `t`.
///
/// Re-expresses the reference implementation's `Ball + CollisionImpulse`
/// operator overload as an explicit value consumed by `Body::apply`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionImpulse {
    pub t: f64,
    pub dx: DVec2,
    pub dv: DVec2,
}

impl CollisionImpulse {
    pub fn new(t: f64, dx: DVec2, dv: DVec2) -> CollisionImpulse {
        CollisionImpulse { t, dx, dv }
    }

    /// Rescales the velocity change by `(1 + e)`. The base impulse is
    /// perfectly inelastic (`e = 0` cancels relative normal velocity);
    /// `e = 1` produces the elastic case.
    ///
    /// Restitution is a one-shot multiplier, not a cached, settable field:
    /// an earlier revision of the reference implementation kept a
    /// restitution-cache field on the impulse, but it was abandoned and is
    /// not carried over here.
    pub fn with_restitution(&self, e: f64) -> CollisionImpulse {
        CollisionImpulse {
            dv: self.dv * (1.0 + e),
            ..*self
        }
    }

    /// Splits this impulse between two bodies in proportion to their
    /// masses: the lighter body (in inverse-mass terms) receives the
    /// larger share. `m1 = m2 = Infinite` propagates NaN in every
    /// component, an unphysical configuration the simulator does not mask.
    pub fn split(&self, m1: Mass, m2: Mass) -> (CollisionImpulse, CollisionImpulse) {
        match (m1, m2) {
            (Mass::Infinite, Mass::Finite(_)) => (
                CollisionImpulse::new(self.t, DVec2::ZERO, DVec2::ZERO),
                *self,
            ),
            (Mass::Finite(_), Mass::Infinite) => (
                -*self,
                CollisionImpulse::new(self.t, DVec2::ZERO, DVec2::ZERO),
            ),
            (m1, m2) => {
                // Both finite, or both infinite (in which case the f64 arithmetic
                // below produces NaN on its own -- no special case needed).
                let m1 = m1.as_f64();
                let m2 = m2.as_f64();
                let denom = m1 + m2;
                let f1 = -m2 / denom;
                let f2 = m1 / denom;
                (*self * f1, *self * f2)
            }
        }
    }

    /// Like `Add`, but returns `None` instead of panicking when the two
    /// impulses are not at (approximately) the same instant.
    pub fn checked_add(&self, other: &CollisionImpulse) -> Option<CollisionImpulse> {
        scalar_close(self.t, other.t).then(|| CollisionImpulse {
            t: self.t,
            dx: self.dx + other.dx,
            dv: self.dv + other.dv,
        })
    }

    /// Like `Sub`, but returns `None` instead of panicking when the two
    /// impulses are not at (approximately) the same instant.
    pub fn checked_sub(&self, other: &CollisionImpulse) -> Option<CollisionImpulse> {
        scalar_close(self.t, other.t).then(|| CollisionImpulse {
            t: self.t,
            dx: self.dx - other.dx,
            dv: self.dv - other.dv,
        })
    }
}

impl Add for CollisionImpulse {
    type Output = CollisionImpulse;
    /// Panics if the two impulses are not at the same instant; use
    /// [`CollisionImpulse::checked_add`] when `t` is not already known to match.
    fn add(self, rhs: CollisionImpulse) -> CollisionImpulse {
        self.checked_add(&rhs)
            .expect("CollisionImpulse::add requires matching t")
    }
}

impl Sub for CollisionImpulse {
    type Output = CollisionImpulse;
    /// Panics if the two impulses are not at the same instant; use
    /// [`CollisionImpulse::checked_sub`] when `t` is not already known to match.
    fn sub(self, rhs: CollisionImpulse) -> CollisionImpulse {
        self.checked_sub(&rhs)
            .expect("CollisionImpulse::sub requires matching t")
    }
}

impl Mul<f64> for CollisionImpulse {
    type Output = CollisionImpulse;
    fn mul(self, rhs: f64) -> CollisionImpulse {
        CollisionImpulse {
            t: self.t,
            dx: self.dx * rhs,
            dv: self.dv * rhs,
        }
    }
}

impl Mul<CollisionImpulse> for f64 {
    type Output = CollisionImpulse;
    fn mul(self, rhs: CollisionImpulse) -> CollisionImpulse {
        rhs * self
    }
}

impl Neg for CollisionImpulse {
    type Output = CollisionImpulse;
    fn neg(self) -> CollisionImpulse {
        CollisionImpulse {
            t: self.t,
            dx: -self.dx,
            dv: -self.dv,
        }
    }
}
