//! Sliding-window rate limiting logic.

mod decision;
mod limiter;
mod log;

pub use decision::RateLimit;
pub use limiter::RateLimiter;
pub use log::AttemptLog;
