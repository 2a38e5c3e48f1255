//! Gold estimator for finishing a unit at max rank.
//!
//! Treats each missing copy as a geometric wait over rerolls, with odds taken
//! from a shared pool that shrinks as copies are bought. Copies returned to the
//! pool by rerolls are not modeled.

pub mod logic;
pub mod pool;
pub mod types;

pub use logic::*;
pub use pool::*;
pub use types::*;
