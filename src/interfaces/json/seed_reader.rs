use crate::domain::payment::Payment;
use crate::error::{Result, StoreError};
use std::collections::HashSet;
use std::io::Read;

/// Reads a seed data set: a JSON array of payments in the same camelCase
/// shape the store serializes them in.
pub struct SeedReader<R: Read> {
    source: R,
}

impl<R: Read> SeedReader<R> {
    /// Creates a new `SeedReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Parses the whole source. Duplicate ids are rejected since the store
    /// addresses payments by id.
    pub fn payments(self) -> Result<Vec<Payment>> {
        let payments: Vec<Payment> = serde_json::from_reader(self.source)?;

        let mut seen = HashSet::new();
        if let Some(dup) = payments.iter().find(|p| !seen.insert(&p.id)) {
            return Err(StoreError::Validation(format!(
                "duplicate payment id {} in seed data",
                dup.id
            )));
        }
        Ok(payments)
    }
}
