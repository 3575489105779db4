//! Human-readable document numbers (`PED-000001`, `OT-000042`, ...)

use anyhow::Result;
use std::future::Future;
use tokio::sync::Mutex;

/// Monotonic number generator for one document prefix.
///
/// The counter is seeded lazily from the highest number already stored, so
/// numbering survives restarts on persistent backends. The lock is held
/// across the seed lookup so concurrent creations never share a number.
#[derive(Debug)]
pub struct NumberSequence {
    prefix: &'static str,
    width: usize,
    last: Mutex<Option<u64>>,
}

impl NumberSequence {
    pub fn new(prefix: &'static str, width: usize) -> Self {
        Self {
            prefix,
            width,
            last: Mutex::new(None),
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Reserve the next number; `seed` returns the numbers already in use
    pub async fn next_with<F, Fut>(&self, seed: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>>>,
    {
        let mut last = self.last.lock().await;
        let current = match *last {
            Some(value) => value,
            None => seed()
                .await?
                .iter()
                .filter_map(|number| self.parse(number))
                .max()
                .unwrap_or(0),
        };
        let next = current + 1;
        *last = Some(next);
        Ok(self.format(next))
    }

    /// Render a counter value with this sequence's prefix
    pub fn format(&self, value: u64) -> String {
        format!("{}-{:0width$}", self.prefix, value, width = self.width)
    }

    /// Extract the counter from a number of this sequence
    pub fn parse(&self, number: &str) -> Option<u64> {
        number
            .strip_prefix(self.prefix)?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_at_one_when_empty() {
        let sequence = NumberSequence::new("PED", 6);
        let number = sequence.next_with(|| async { Ok(vec![]) }).await.unwrap();
        assert_eq!(number, "PED-000001");
        let number = sequence.next_with(|| async { Ok(vec![]) }).await.unwrap();
        assert_eq!(number, "PED-000002");
    }

    #[tokio::test]
    async fn test_seeds_from_existing_numbers() {
        let sequence = NumberSequence::new("OT", 6);
        let existing = vec![
            "OT-000007".to_string(),
            "OT-000003".to_string(),
            "garbage".to_string(),
        ];
        let number = sequence
            .next_with(|| async move { Ok(existing) })
            .await
            .unwrap();
        assert_eq!(number, "OT-000008");
    }

    #[tokio::test]
    async fn test_seed_only_runs_once() {
        let sequence = NumberSequence::new("OG", 4);
        sequence.next_with(|| async { Ok(vec![]) }).await.unwrap();
        let number = sequence
            .next_with(|| async { Ok(vec!["OG-0100".to_string()]) })
            .await
            .unwrap();
        assert_eq!(number, "OG-0002");
    }

    #[test]
    fn test_parse_rejects_other_prefixes() {
        let sequence = NumberSequence::new("PED", 6);
        assert_eq!(sequence.parse("PED-000010"), Some(10));
        assert_eq!(sequence.parse("OT-000010"), None);
        assert_eq!(sequence.parse("PED000010"), None);
    }
}
