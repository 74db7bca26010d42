//! Re-expresses the reference implementation's polymorphic "massable"
//! (a value that is either a [`Body`](crate::body::Body) or a bare scalar mass)
//! as an explicit sum type, per the design note on dynamic-typed duck-typing.

/// The mass of a body, finite or immovable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mass {
    Finite(f64),
    Infinite,
}

impl Mass {
    pub fn from_f64(m: f64) -> Mass {
        if m.is_infinite() {
            Mass::Infinite
        } else {
            Mass::Finite(m)
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Mass::Infinite)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Mass::Finite(m) => m,
            Mass::Infinite => f64::INFINITY,
        }
    }
}

impl From<f64> for Mass {
    fn from(m: f64) -> Mass {
        Mass::from_f64(m)
    }
}
