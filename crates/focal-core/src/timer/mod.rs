mod phase;
mod session;

pub use phase::{Phase, PhaseCycle};
pub use session::{AdjustDirection, TimerSession};
