//! Wall-clock source for commands that stamp a time.
//!
//! Clients read the time once per command and pass it into the actor, so the
//! stored timestamps never depend on when the actor gets to the message.
use chrono::Utc;
use std::sync::Arc;

/// Returns epoch milliseconds.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| Utc::now().timestamp_millis())
}

/// A clock stuck at `millis`, for tests and replays.
pub fn fixed_clock(millis: i64) -> Clock {
    Arc::new(move || millis)
}
