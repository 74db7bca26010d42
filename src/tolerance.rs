//! The "all close" idiom used throughout the simulation: every comparison
//! between predicted and actual physical quantities has to tolerate the
//! usual floating point slop, so it is centralized here instead of being
//! reinvented at each call site.
use glam::DVec2;

/// Default relative tolerance, matching the reference implementation's
/// `numpy.allclose` defaults.
pub const REL_TOLERANCE: f64 = 1e-8;
/// Default absolute tolerance.
pub const ABS_TOLERANCE: f64 = 1e-8;

/// True if `a` and `b` are close enough to be considered equal:
/// `|a - b| <= ABS_TOLERANCE + REL_TOLERANCE * |b|`.
#[inline]
pub fn scalar_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ABS_TOLERANCE + REL_TOLERANCE * b.abs()
}

/// True if `a` and `b` are close component-wise.
#[inline]
pub fn vec_close(a: DVec2, b: DVec2) -> bool {
    scalar_close(a.x, b.x) && scalar_close(a.y, b.y)
}

/// True if `v` is close enough to the zero vector to be treated as exact contact.
#[inline]
pub fn vec_is_zero(v: DVec2) -> bool {
    vec_close(v, DVec2::ZERO)
}
