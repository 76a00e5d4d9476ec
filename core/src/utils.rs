//! Shared pipeline utilities.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a unique id from the current time in nanoseconds plus a
/// process-wide counter. Two concurrent requests can land on the same
/// nanosecond; the counter keeps their temp file names disjoint.
#[inline]
pub(crate) fn gen_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{:x}_{:x}", nanos, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_across_calls() {
        let ids: HashSet<String> = (0..1000).map(|_| gen_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
