//! Default value generation for new posts.

use chrono::{DateTime, Utc};
use rand::Rng;

const SHORT_ID_ALPHABET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";
const SHORT_ID_LEN: usize = 9;

/// Generates `shortId` and `date` for a new post.
///
/// Called once per document being inserted, so two posts never share a
/// generated value by construction.
pub trait PostDefaults: Send + Sync {
    /// A fresh short URL token.
    fn short_id(&self) -> String;

    /// The creation timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Random short ids and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDefaults;

impl PostDefaults for SystemDefaults {
    fn short_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..SHORT_ID_LEN)
            .map(|_| SHORT_ID_ALPHABET[rng.gen_range(0..SHORT_ID_ALPHABET.len())] as char)
            .collect()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_short_id_shape() {
        let id = SystemDefaults.short_id();
        assert_eq!(id.len(), SHORT_ID_LEN);
        assert!(id.bytes().all(|b| SHORT_ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_short_ids_are_fresh_per_call() {
        let ids: HashSet<String> = (0..200).map(|_| SystemDefaults.short_id()).collect();
        assert_eq!(ids.len(), 200);
    }
}
