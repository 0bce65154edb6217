use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Last microsecond value handed out in this process
static LAST_MICROS: AtomicI64 = AtomicI64::new(0);

/// Generate a process-unique request identifier.
///
/// Layout is 13 lowercase hex characters: 8 for the unix seconds, 5 for the
/// microseconds. The underlying clock is forced to be strictly monotonic, so
/// two calls in the same process never return the same value, even within one
/// microsecond. Not unique across processes and not suitable as a secret.
pub fn generate_request_id() -> String {
    let now = Utc::now().timestamp_micros();
    let mut last = LAST_MICROS.load(Ordering::Relaxed);

    loop {
        let next = now.max(last + 1);
        match LAST_MICROS.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return format_id(next),
            Err(actual) => last = actual,
        }
    }
}

fn format_id(micros: i64) -> String {
    let secs = micros.div_euclid(1_000_000);
    let usecs = micros.rem_euclid(1_000_000);
    format!("{:08x}{:05x}", secs, usecs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format_layout() {
        // 2024-01-01T00:00:00.000001Z
        assert_eq!(format_id(1_704_067_200_000_001), "6592008000001");
        assert_eq!(format_id(999_999), "00000000f423f");
    }

    #[test]
    fn test_ids_are_hex_and_fixed_width() {
        let id = generate_request_id();
        assert_eq!(id.len(), 13);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_never_repeat() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_request_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..1_000).map(|_| generate_request_id()).collect::<Vec<_>>()))
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id));
            }
        }
        assert_eq!(ids.len(), 4_000);
    }
}
