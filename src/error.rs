use thiserror::Error;

/// The one hard failure mode the timeline exposes: stepping backward
/// without explicitly opting in.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("cannot advance from t={from} to t={to} without allow_time_travel")]
pub struct TimeTravelError {
    pub from: f64,
    pub to: f64,
}
