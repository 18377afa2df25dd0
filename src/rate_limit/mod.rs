//! Rate limiting for external analysis providers.
//!
//! Providers that report quota exhaustion are suppressed for a fixed window
//! instead of being retried.

mod clock;
mod cooldown;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cooldown::{CooldownState, CooldownStatus, CooldownTracker, DEFAULT_COOLDOWN};
