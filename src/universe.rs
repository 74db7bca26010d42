//! The container of bodies, addressed by stable keys, plus the view
//! objects that read and write body state at the universe's current time.
use std::collections::HashSet;

use glam::DVec2;
use slotmap::{new_key_type, SlotMap};

use crate::body::Body;

new_key_type! {
    /// A stable handle to a [`Body`] stored in a [`Universe`]. Keys remain
    /// valid across collisions and edits; they are invalidated only by
    /// [`Universe::remove`].
    pub struct BodyKey;
}

/// A mapping from stable keys to bodies, plus the set of keys whose
/// scheduled collision events may be stale.
#[derive(Clone, Debug, Default)]
pub struct Universe {
    pub(crate) t_now: f64,
    pub(crate) contents: SlotMap<BodyKey, Body>,
    pub(crate) modified: HashSet<BodyKey>,
}

impl Universe {
    pub fn new(t_now: f64) -> Universe {
        Universe {
            t_now,
            contents: SlotMap::with_key(),
            modified: HashSet::new(),
        }
    }

    /// The universe's current simulation time.
    pub fn t_now(&self) -> f64 {
        self.t_now
    }

    /// Inserts a body, returning its stable key. The key is marked
    /// modified so that the next `advance_to` schedules its collisions.
    pub fn add(&mut self, body: Body) -> BodyKey {
        let key = self.contents.insert(body);
        self.modified.insert(key);
        key
    }

    /// Removes a body, returning it if it was present.
    pub fn remove(&mut self, key: BodyKey) -> Option<Body> {
        self.modified.remove(&key);
        self.contents.remove(key)
    }

    pub fn get(&self, key: BodyKey) -> Option<&Body> {
        self.contents.get(key)
    }

    pub fn contains(&self, key: BodyKey) -> bool {
        self.contents.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// A read/write view bound to `(self, key)`, evaluated at `t_now`.
    pub fn view(&self, key: BodyKey) -> Option<BodyView<'_>> {
        self.contents.get(key).map(|_| BodyView { universe: self, key })
    }

    /// A mutable view bound to `(self, key)`, evaluated at `t_now`.
    pub fn view_mut(&mut self, key: BodyKey) -> Option<BodyViewMut<'_>> {
        if self.contents.contains_key(key) {
            Some(BodyViewMut { universe: self, key })
        } else {
            None
        }
    }

    /// Keys and bodies of every body currently in the universe.
    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &Body)> {
        self.contents.iter()
    }

    /// Views of every body currently in the universe.
    pub fn views(&self) -> impl Iterator<Item = BodyView<'_>> {
        self.contents.keys().map(|key| BodyView { universe: self, key })
    }
}

/// A read-only view of a body's time-parameterized quantities, evaluated
/// at the owning universe's current time.
pub struct BodyView<'u> {
    universe: &'u Universe,
    key: BodyKey,
}

impl BodyView<'_> {
    fn body(&self) -> &Body {
        &self.universe.contents[self.key]
    }

    pub fn key(&self) -> BodyKey {
        self.key
    }

    pub fn x(&self) -> DVec2 {
        self.body().x_at(self.universe.t_now)
    }
    pub fn v(&self) -> DVec2 {
        self.body().v_at(self.universe.t_now)
    }
    pub fn a(&self) -> DVec2 {
        self.body().a_at(self.universe.t_now)
    }
    pub fn p(&self) -> DVec2 {
        self.body().p_at(self.universe.t_now)
    }
    pub fn f(&self) -> DVec2 {
        self.body().f_at(self.universe.t_now)
    }
    pub fn u(&self) -> f64 {
        self.body().u_at(self.universe.t_now)
    }
    pub fn k(&self) -> f64 {
        self.body().k_at(self.universe.t_now)
    }
    pub fn e(&self) -> f64 {
        self.body().e_at(self.universe.t_now)
    }
    pub fn r(&self) -> f64 {
        self.body().r_at(self.universe.t_now)
    }
    pub fn m(&self) -> f64 {
        self.body().m_at(self.universe.t_now)
    }
    pub fn b(&self) -> DVec2 {
        self.body().b
    }
}

/// A read/write view of a body's time-parameterized quantities, evaluated
/// at the owning universe's current time. Writes to `x, v, a, p, f` are
/// translated into an impulse via `Body::apply_state`; writes to `r, m, b`
/// replace the field directly. Either way the key is marked modified, so
/// the next `advance_to` recomputes this body's scheduled collisions.
pub struct BodyViewMut<'u> {
    universe: &'u mut Universe,
    key: BodyKey,
}

impl BodyViewMut<'_> {
    fn body(&self) -> &Body {
        &self.universe.contents[self.key]
    }

    pub fn key(&self) -> BodyKey {
        self.key
    }

    pub fn x(&self) -> DVec2 {
        self.body().x_at(self.universe.t_now)
    }
    pub fn v(&self) -> DVec2 {
        self.body().v_at(self.universe.t_now)
    }
    pub fn a(&self) -> DVec2 {
        self.body().a_at(self.universe.t_now)
    }
    pub fn p(&self) -> DVec2 {
        self.body().p_at(self.universe.t_now)
    }
    pub fn f(&self) -> DVec2 {
        self.body().f_at(self.universe.t_now)
    }
    pub fn u(&self) -> f64 {
        self.body().u_at(self.universe.t_now)
    }
    pub fn k(&self) -> f64 {
        self.body().k_at(self.universe.t_now)
    }
    pub fn e(&self) -> f64 {
        self.body().e_at(self.universe.t_now)
    }
    pub fn r(&self) -> f64 {
        self.body().r_at(self.universe.t_now)
    }
    pub fn m(&self) -> f64 {
        self.body().m_at(self.universe.t_now)
    }
    pub fn b(&self) -> DVec2 {
        self.body().b
    }

    fn apply_state_edit(
        &mut self,
        x: Option<DVec2>,
        v: Option<DVec2>,
        a: Option<DVec2>,
        p: Option<DVec2>,
        f: Option<DVec2>,
    ) {
        let t = self.universe.t_now;
        let body = &mut self.universe.contents[self.key];
        *body = body.apply_state(t, x, v, a, p, f);
        self.universe.modified.insert(self.key);
    }

    pub fn set_x(&mut self, x: DVec2) {
        self.apply_state_edit(Some(x), None, None, None, None);
    }
    pub fn set_v(&mut self, v: DVec2) {
        self.apply_state_edit(None, Some(v), None, None, None);
    }
    pub fn set_a(&mut self, a: DVec2) {
        self.apply_state_edit(None, None, Some(a), None, None);
    }
    pub fn set_p(&mut self, p: DVec2) {
        self.apply_state_edit(None, None, None, Some(p), None);
    }
    pub fn set_f(&mut self, f: DVec2) {
        self.apply_state_edit(None, None, None, None, Some(f));
    }

    pub fn set_r(&mut self, r: f64) {
        self.universe.contents[self.key].r = r;
        self.universe.modified.insert(self.key);
    }
    pub fn set_m(&mut self, m: f64) {
        self.universe.contents[self.key].m = m;
        self.universe.modified.insert(self.key);
    }
    pub fn set_b(&mut self, b: DVec2) {
        self.universe.contents[self.key].b = b;
        self.universe.modified.insert(self.key);
    }
}
