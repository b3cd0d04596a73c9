use crate::domain::payment::PaymentId;
use crate::domain::ports::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Hands out increasing numeric ids, starting after the highest seeded one.
///
/// Once the counter reaches `u64::MAX` it falls back to UUID ids instead of
/// wrapping around.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Starts past every numeric id already in use so new ids never collide
    /// with seeded records. An id of `u64::MAX` has no successor and is
    /// skipped; the store redraws if the counter ever lands on a taken id.
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a PaymentId>) -> Self {
        let first = existing
            .into_iter()
            .filter_map(|id| id.as_str().parse::<u64>().ok())
            .filter_map(|n| n.checked_add(1))
            .max()
            .unwrap_or(1);
        Self::starting_at(first)
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> PaymentId {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(n) => PaymentId::new(n.to_string()),
            Err(_) => UuidIdGenerator.next_id(),
        }
    }
}

/// Random v4 UUID ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> PaymentId {
        PaymentId::new(Uuid::new_v4().to_string())
    }
}
