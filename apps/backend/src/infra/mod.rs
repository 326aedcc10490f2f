//! Infrastructure layer - clocks and other process-level services.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
