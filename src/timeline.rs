//! Drives the simulation: rebuilds stale events, pops the next one,
//! resolves it as an impulse, and advances logical time to that instant.
use std::ops::{Deref, DerefMut};

use tracing::{instrument, trace, trace_span};

use crate::body::Body;
use crate::error::TimeTravelError;
use crate::heap::CollisionHeap;
use crate::mass::Mass;
use crate::universe::{BodyKey, Universe};

/// Wraps a [`Universe`] with the collision heap that keeps its scheduled
/// events synchronized with the bodies' trajectories.
///
/// `Timeline` derefs to `Universe`, so callers see one cohesive API:
/// `timeline.add(body)`, `timeline.view(key)`, and so on all work directly,
/// alongside `Timeline`'s own `advance_to`.
#[derive(Default)]
pub struct Timeline {
    universe: Universe,
    heap: CollisionHeap,
}

impl Timeline {
    pub fn new(t_now: f64) -> Timeline {
        Timeline {
            universe: Universe::new(t_now),
            heap: CollisionHeap::new(),
        }
    }

    /// Advances logical time to `t_target`, resolving every collision
    /// scheduled strictly before it along the way.
    ///
    /// Fails with [`TimeTravelError`] if `t_target < t_now` and
    /// `allow_time_travel` is `false`. NaN propagation from a collision
    /// between two infinite-mass bodies is not an error; a collision's
    /// positional drift is logged, not raised.
    pub fn advance_to(&mut self, t_target: f64, allow_time_travel: bool) -> Result<(), TimeTravelError> {
        if !allow_time_travel && t_target < self.universe.t_now {
            return Err(TimeTravelError {
                from: self.universe.t_now,
                to: t_target,
            });
        }

        if !self.universe.modified.is_empty() {
            self.recompute_future();
        }

        while self.heap.peek() < t_target {
            self.do_next_collision();
        }

        self.universe.t_now = t_target;
        Ok(())
    }

    /// Re-schedules every pair touching a modified key, then clears the
    /// modified set. Every unordered pair involving at least one modified
    /// key is pushed exactly once: modified keys are folded into the
    /// "already covered" set as they are processed, so a pair of two
    /// modified keys is pushed when the first of the two is handled.
    #[instrument(level = "trace", skip_all)]
    pub fn recompute_future(&mut self) {
        let mut unmodified: Vec<BodyKey> = self
            .universe
            .contents
            .keys()
            .filter(|k| !self.universe.modified.contains(k))
            .collect();

        let mut modified: Vec<BodyKey> = self.universe.modified.iter().copied().collect();
        while let Some(k1) = modified.pop() {
            for &k2 in &unmodified {
                self.push_prediction(k1, k2);
            }
            unmodified.push(k1);
        }

        self.universe.modified.clear();
    }

    fn push_prediction(&mut self, k1: BodyKey, k2: BodyKey) {
        let b1 = &self.universe.contents[k1];
        let b2 = &self.universe.contents[k2];
        let t = b1.next_collision_time(b2, self.universe.t_now);
        trace!(?k1, ?k2, t, "predicted next collision");
        self.heap.push(k1, k2, t);
    }

    /// Pops the next scheduled event, resolves it as an impulse on both
    /// bodies, advances `t_now` to the event's instant, and re-schedules
    /// whatever that touched.
    #[instrument(level = "trace", skip_all)]
    fn do_next_collision(&mut self) {
        let Some((t, k1, k2)) = self.heap.pop() else {
            return;
        };

        let b1 = self.universe.contents[k1];
        let b2 = self.universe.contents[k2];

        let impulse = b1.collision_impulse(&b2, t);
        let impulse = impulse.with_restitution(b1.b.dot(b2.b));
        let (i1, i2) = impulse.split(Mass::from_f64(b1.m), Mass::from_f64(b2.m));

        trace!(?k1, ?k2, t, "resolving collision");

        self.universe.contents[k1] = b1.apply(i1);
        self.universe.contents[k2] = b2.apply(i2);

        self.universe.t_now = t;
        self.universe.modified.insert(k1);
        self.universe.modified.insert(k2);

        let span = trace_span!("recompute after collision");
        let _enter = span.enter();
        self.recompute_future();
    }

    /// The underlying body, bypassing the universe/view indirection, for
    /// tests and diagnostics.
    pub fn body(&self, key: BodyKey) -> Option<&Body> {
        self.universe.get(key)
    }
}

impl Deref for Timeline {
    type Target = Universe;
    fn deref(&self) -> &Universe {
        &self.universe
    }
}

impl DerefMut for Timeline {
    fn deref_mut(&mut self) -> &mut Universe {
        &mut self.universe
    }
}
