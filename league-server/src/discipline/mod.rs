//! Season discipline engine
//!
//! card events → [`aggregator`] → [`rules`] → [`lifecycle`] (persisted)
//! → [`eligibility`]. [`recalc`] drives the write path end to end.

pub mod aggregator;
pub mod eligibility;
pub mod error;
pub mod lifecycle;
pub mod lock;
pub mod policy;
pub mod recalc;
pub mod rules;
pub mod service;

pub use error::{DisciplineError, DisciplineResult};
pub use lock::SeasonLocks;
pub use policy::DisciplinePolicy;
pub use service::DisciplineService;
