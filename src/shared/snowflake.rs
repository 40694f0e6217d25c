//! Snowflake ID Generator
//!
//! Time-ordered unique message ids. Ids generated by one generator are
//! strictly increasing, so sorting by id gives creation order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Chat room epoch (2024-01-01T00:00:00.000Z)
pub const CHAT_EPOCH: u64 = 1704067200000;

const SEQUENCE_BITS: u64 = 12;
const MACHINE_BITS: u64 = 10;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const MACHINE_MASK: u64 = (1 << MACHINE_BITS) - 1;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    machine_id: u64,
    /// Packed `(timestamp << SEQUENCE_BITS) | sequence` of the last issued id.
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64) -> Self {
        Self {
            machine_id: machine_id & MACHINE_MASK,
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let now = current_timestamp().saturating_sub(CHAT_EPOCH);
            let last_ts = current >> SEQUENCE_BITS;
            let last_seq = current & SEQUENCE_MASK;

            // Clock going backwards or sequence overflow both borrow from the
            // last timestamp so ids keep increasing.
            let next = if now > last_ts {
                now << SEQUENCE_BITS
            } else if last_seq < SEQUENCE_MASK {
                current + 1
            } else {
                (last_ts + 1) << SEQUENCE_BITS
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let ts = next >> SEQUENCE_BITS;
                    let seq = next & SEQUENCE_MASK;
                    let id = (ts << (MACHINE_BITS + SEQUENCE_BITS))
                        | (self.machine_id << SEQUENCE_BITS)
                        | seq;
                    return id as i64;
                }
                Err(actual) => current = actual,
            }
        }
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(CHAT_EPOCH)
}

/// Parse snowflake from string
pub fn from_string(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.parse()
}
