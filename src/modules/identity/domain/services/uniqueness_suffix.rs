use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Source of the trailing part of freshly minted series tokens.
///
/// Must never hand out the same value twice within a process, and should not
/// repeat across separate grouping runs.
pub trait SuffixGenerator: Send + Sync {
    fn next_suffix(&self) -> String;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}

/// Monotonic counter seeded from the wall clock (Unix milliseconds), base 36
#[derive(Debug)]
pub struct TimeSeededSuffix {
    counter: AtomicU64,
}

impl TimeSeededSuffix {
    pub fn new() -> Self {
        let seed = Utc::now().timestamp_millis().max(0) as u64;
        Self::starting_at(seed)
    }

    pub fn starting_at(seed: u64) -> Self {
        Self {
            counter: AtomicU64::new(seed),
        }
    }
}

impl Default for TimeSeededSuffix {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixGenerator for TimeSeededSuffix {
    fn next_suffix(&self) -> String {
        to_base36(self.counter.fetch_add(1, Ordering::Relaxed))
    }

    fn name(&self) -> &'static str {
        "TimeSeeded"
    }
}

/// First 8 hex characters of a random v4 UUID
#[derive(Debug, Clone, Default)]
pub struct RandomSuffix;

impl SuffixGenerator for RandomSuffix {
    fn next_suffix(&self) -> String {
        let mut simple = Uuid::new_v4().simple().to_string();
        simple.truncate(8);
        simple
    }

    fn name(&self) -> &'static str {
        "Random"
    }
}

/// Plain decimal counter, for dry runs and reproducible output
#[derive(Debug)]
pub struct SequenceSuffix {
    next: AtomicU64,
}

impl SequenceSuffix {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequenceSuffix {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl SuffixGenerator for SequenceSuffix {
    fn next_suffix(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }

    fn name(&self) -> &'static str {
        "Sequence"
    }
}
