//! streamgrid-state — domain vocabulary for the streamgrid autoscaler.
//!
//! Memory sizes, metric kinds, and the per-cycle evaluated metric snapshots
//! shared by the scaling and tuning subsystems. All types are immutable
//! value objects: the evaluation pipeline produces them once per cycle and
//! the decision engines only read them.

pub mod error;
pub mod memsize;
pub mod types;

pub use error::ParseSizeError;
pub use memsize::MemSize;
pub use types::*;
