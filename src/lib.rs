//! A stepless (event-driven) 2D physics simulator.
//!
//! Rather than advancing state in fixed time steps, [`Timeline`] predicts
//! the next pairwise contact among a population of [`Body`] values moving
//! under constant acceleration, jumps logical time directly to that
//! instant, resolves the collision as an instantaneous impulse, and
//! repeats. The hard part is not the kinematics themselves but keeping the
//! [`CollisionHeap`] of predicted events synchronized with bodies whose
//! trajectories can be perturbed at any instant: by a collision, by an
//! external impulse, or by a direct edit through a [`universe::BodyView`].
//!
//! Rotation, deformation, friction, many-body contact manifolds, and
//! spatial acceleration structures are explicitly out of scope; collisions
//! are resolved pairwise and the broad phase is `O(N^2)`.
pub mod body;
pub mod error;
pub mod heap;
pub mod impulse;
pub mod mass;
pub mod quartic;
pub mod timeline;
pub mod tolerance;
pub mod universe;

pub use body::Body;
pub use error::TimeTravelError;
pub use heap::CollisionHeap;
pub use impulse::CollisionImpulse;
pub use mass::Mass;
pub use timeline::Timeline;
pub use universe::{BodyKey, BodyView, BodyViewMut, Universe};
