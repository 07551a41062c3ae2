//! Unique id generation for meals.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs (122 random bits).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Process-wide counter combined with the current time in milliseconds,
/// e.g. `id_2a_19a3c1f0b12`. Fallback for when random ids are unwanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds;

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        format!("id_{:x}_{:x}", n, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| UuidIds.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_uuid_ids_parse() {
        let id = UuidIds.next_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_sequential_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| SequentialIds.next_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("id_")));
    }
}
