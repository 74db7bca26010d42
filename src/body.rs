//! Trajectory state for a single circular body moving under constant
//! acceleration, and the impulse/collision algebra defined over it.
use glam::DVec2;
use tracing::warn;

use crate::impulse::CollisionImpulse;
use crate::quartic::{next_time_after, CollisionPolynomial};
use crate::tolerance::vec_is_zero;
use roots::Roots;

/// A circular rigid point with constant acceleration.
///
/// `x0`, `v0` and `a` are the closed-form coefficients of the trajectory at
/// its *virtual t=0* (the time origin of the current parameterization).
/// Impulses reset these coefficients so that they remain valid for all `t`,
/// without ever touching the trajectory's value at the impulse instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Virtual t=0 position.
    pub x0: DVec2,
    /// Virtual t=0 velocity.
    pub v0: DVec2,
    /// Constant acceleration.
    pub a: DVec2,
    /// Collision radius.
    pub r: f64,
    /// Mass; `f64::INFINITY` denotes an immovable body.
    pub m: f64,
    /// Restitution vector; the coefficient of restitution between two
    /// bodies is the dot product of their `b` vectors.
    pub b: DVec2,
}

impl Default for Body {
    fn default() -> Self {
        Body {
            x0: DVec2::ZERO,
            v0: DVec2::ZERO,
            a: DVec2::ZERO,
            r: 1.0,
            m: 1.0,
            b: DVec2::ZERO,
        }
    }
}

impl Body {
    pub fn new(x0: DVec2, v0: DVec2, a: DVec2, r: f64, m: f64, b: DVec2) -> Body {
        Body { x0, v0, a, r, m, b }
    }

    /// Position. `x(t) = 1/2 a t^2 + v0 t + x0`.
    pub fn x_at(&self, t: f64) -> DVec2 {
        (self.a / 2.0 * t + self.v0) * t + self.x0
    }

    /// Velocity. `v(t) = a t + v0`.
    pub fn v_at(&self, t: f64) -> DVec2 {
        self.a * t + self.v0
    }

    /// Acceleration is piecewise constant between impulses.
    pub fn a_at(&self, _t: f64) -> DVec2 {
        self.a
    }

    pub fn r_at(&self, _t: f64) -> f64 {
        self.r
    }

    pub fn m_at(&self, _t: f64) -> f64 {
        self.m
    }

    /// Momentum. `P(t) = m v(t)`.
    pub fn p_at(&self, t: f64) -> DVec2 {
        self.m * self.v_at(t)
    }

    /// Force. `F(t) = m a(t)`.
    pub fn f_at(&self, t: f64) -> DVec2 {
        self.m * self.a_at(t)
    }

    /// Potential energy. `U(t) = -m (a . x(t))`.
    pub fn u_at(&self, t: f64) -> f64 {
        -self.m * self.a_at(t).dot(self.x_at(t))
    }

    /// Kinetic energy. `K(t) = 1/2 m |v(t)|^2`.
    pub fn k_at(&self, t: f64) -> f64 {
        let v = self.v_at(t);
        0.5 * self.m * v.dot(v)
    }

    /// Total energy. `E(t) = K(t) + U(t)`.
    pub fn e_at(&self, t: f64) -> f64 {
        self.k_at(t) + self.u_at(t)
    }

    /// True if none of the body's trajectory parameters are NaN.
    ///
    /// A NaN-tainted body is the (intentional) result of resolving a
    /// collision between two infinite-mass bodies; this lets callers
    /// detect and prune such bodies instead of the simulator masking them.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.v0.is_finite() && self.a.is_finite() && self.m.is_finite()
    }

    /// General impulse primitive: shifts the trajectory so that, evaluated
    /// at `t`, position changes by exactly `dx`, velocity by
    /// `dv + dP/m`, and acceleration by `da + dF/m`.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_impulse_raw(
        &self,
        t: f64,
        dx: DVec2,
        dv: DVec2,
        da: DVec2,
        d_p: DVec2,
        d_f: DVec2,
    ) -> Body {
        let da = da + d_f / self.m;
        let dv = dv + d_p / self.m;

        let new_a = self.a + da;
        let new_v0 = self.v0 - da * t + dv;
        let new_x0 = self.x0 + (da / 2.0 * t - dv) * t + dx;

        Body {
            x0: new_x0,
            v0: new_v0,
            a: new_a,
            ..*self
        }
    }

    /// Applies a [`CollisionImpulse`], returning the post-impulse body.
    pub fn apply(&self, impulse: CollisionImpulse) -> Body {
        self.apply_impulse_raw(impulse.t, impulse.dx, impulse.dv, DVec2::ZERO, DVec2::ZERO, DVec2::ZERO)
    }

    /// Applies a [`CollisionImpulse`] in place.
    pub fn apply_mut(&mut self, impulse: CollisionImpulse) {
        *self = self.apply(impulse);
    }

    /// Computes the impulse that would drive whichever of `x, v, a, p, f`
    /// are `Some` to the supplied values, evaluated **at `t`** (not at the
    /// trajectory's virtual origin; state edits are relative to the
    /// state the caller currently observes).
    #[allow(clippy::too_many_arguments)]
    pub fn apply_state(
        &self,
        t: f64,
        x: Option<DVec2>,
        v: Option<DVec2>,
        a: Option<DVec2>,
        p: Option<DVec2>,
        f: Option<DVec2>,
    ) -> Body {
        let dx = x.map_or(DVec2::ZERO, |x| x - self.x_at(t));
        let dv = v.map_or(DVec2::ZERO, |v| v - self.v_at(t));
        let da = a.map_or(DVec2::ZERO, |a| a - self.a_at(t));
        let d_p = p.map_or(DVec2::ZERO, |p| p - self.p_at(t));
        let d_f = f.map_or(DVec2::ZERO, |f| f - self.f_at(t));
        self.apply_impulse_raw(t, dx, dv, da, d_p, d_f)
    }

    /// The perfectly inelastic relative impulse at `t`: cancels the
    /// component of relative velocity along the line of centers.
    ///
    /// If `t` is not actually the predicted contact time, the positional
    /// correction `dx` will be nonzero; this is logged as a warning (the
    /// caller likely applied the impulse at the wrong time) but the
    /// impulse is still computed and returned.
    pub fn collision_impulse(&self, other: &Body, t: f64) -> CollisionImpulse {
        let x = self.x_at(t) - other.x_at(t);
        let v = self.v_at(t) - other.v_at(t);
        let r = self.r_at(t) + other.r_at(t);

        let dist = x.length();
        let dx = x * (1.0 - r / dist);
        if !vec_is_zero(dx) {
            warn!(?dx, t, "collision displacement is nonzero: impulse applied off the true contact time");
        }
        let dv = v.dot(x) / x.dot(x) * x;

        CollisionImpulse { t, dx, dv }
    }

    /// The collision polynomial between `self` and `other`, evaluated from
    /// their trajectories' virtual t=0 (i.e. coefficients are constant,
    /// independent of any particular `t`).
    fn collision_polynomial(&self, other: &Body) -> CollisionPolynomial {
        let dx = self.x0 - other.x0;
        let dv = self.v0 - other.v0;
        let da = self.a - other.a;
        let r = self.r + other.r;
        CollisionPolynomial::from_relative_trajectory(dx, dv, da, r)
    }

    /// Real roots of the collision polynomial between `self` and `other`.
    pub fn collision_times(&self, other: &Body) -> Roots<f64> {
        self.collision_polynomial(other).real_roots()
    }

    /// The smallest predicted collision time with `other` strictly after `t`.
    pub fn next_collision_time(&self, other: &Body, t: f64) -> f64 {
        next_time_after(self.collision_times(other), t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vector(rng: &mut StdRng) -> DVec2 {
        DVec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0))
    }

    fn random_body(rng: &mut StdRng) -> Body {
        Body {
            x0: random_vector(rng),
            v0: random_vector(rng),
            a: random_vector(rng),
            r: 1.0,
            m: 1.0,
            b: DVec2::ZERO,
        }
    }

    #[test]
    fn impulse_isolation_dx() {
        for n in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(n);
            let b1 = random_body(&mut rng);
            let t = rng.gen_range(0.0..1.0);
            let dx = random_vector(&mut rng);

            let b2 = b1.apply_impulse_raw(t, dx, DVec2::ZERO, DVec2::ZERO, DVec2::ZERO, DVec2::ZERO);

            assert_eq!(b1.v_at(t), b2.v_at(t));
            assert_eq!(b1.a_at(t), b2.a_at(t));
        }
    }

    #[test]
    fn impulse_isolation_dv() {
        for n in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(n);
            let b1 = random_body(&mut rng);
            let t = rng.gen_range(0.0..1.0);
            let dv = random_vector(&mut rng);

            let b2 = b1.apply_impulse_raw(t, DVec2::ZERO, dv, DVec2::ZERO, DVec2::ZERO, DVec2::ZERO);

            assert!((b1.x_at(t) - b2.x_at(t)).length() < 1e-9);
            assert_eq!(b1.a_at(t), b2.a_at(t));
        }
    }

    #[test]
    fn impulse_isolation_da() {
        for n in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(n);
            let b1 = random_body(&mut rng);
            let t = rng.gen_range(0.0..1.0);
            let da = random_vector(&mut rng);

            let b2 = b1.apply_impulse_raw(t, DVec2::ZERO, DVec2::ZERO, da, DVec2::ZERO, DVec2::ZERO);

            assert!((b1.x_at(t) - b2.x_at(t)).length() < 1e-9);
            assert!((b1.v_at(t) - b2.v_at(t)).length() < 1e-9);
        }
    }

    #[test]
    fn impulse_isolation_dx_dv_leaves_a_invariant() {
        for n in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(n);
            let b1 = random_body(&mut rng);
            let t = rng.gen_range(0.0..1.0);
            let dx = random_vector(&mut rng);
            let dv = random_vector(&mut rng);

            let b2 = b1.apply_impulse_raw(t, dx, dv, DVec2::ZERO, DVec2::ZERO, DVec2::ZERO);
            assert_eq!(b1.a_at(t), b2.a_at(t));
        }
    }

    #[test]
    fn impulse_isolation_dx_da_leaves_v_invariant() {
        for n in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(n);
            let b1 = random_body(&mut rng);
            let t = rng.gen_range(0.0..1.0);
            let dx = random_vector(&mut rng);
            let da = random_vector(&mut rng);

            let b2 = b1.apply_impulse_raw(t, dx, DVec2::ZERO, da, DVec2::ZERO, DVec2::ZERO);
            assert!((b1.v_at(t) - b2.v_at(t)).length() < 1e-9);
        }
    }

    #[test]
    fn impulse_isolation_dv_da_leaves_x_invariant() {
        for n in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(n);
            let b1 = random_body(&mut rng);
            let t = rng.gen_range(0.0..1.0);
            let dv = random_vector(&mut rng);
            let da = random_vector(&mut rng);

            let b2 = b1.apply_impulse_raw(t, DVec2::ZERO, dv, da, DVec2::ZERO, DVec2::ZERO);
            assert!((b1.x_at(t) - b2.x_at(t)).length() < 1e-9);
        }
    }

    #[test]
    fn collision_impulse_cancels_normal_relative_velocity() {
        let b1 = Body {
            x0: DVec2::new(1.0, 0.0),
            v0: DVec2::new(-1.0, 0.0),
            m: 1.0,
            r: 1.0,
            ..Default::default()
        };
        let b2 = Body {
            x0: DVec2::new(-1.0, 0.0),
            v0: DVec2::new(1.0, 0.0),
            m: 1.0,
            r: 1.0,
            ..Default::default()
        };
        let impulse = b1.collision_impulse(&b2, 0.0);
        assert!(vec_is_zero(impulse.dx));
        assert!((impulse.dv - DVec2::new(-2.0, 0.0)).length() < 1e-9);
    }
}
