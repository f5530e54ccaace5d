//! Bounded parallel fetch with results returned in input order.

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Default number of lookups in flight at once.
pub const DEFAULT_WIDTH: usize = 10;

/// Run `fetch` for every key with at most `width` futures in flight, and
/// return the outputs in the order the keys were given.
///
/// Completion order is arbitrary, so each output is tagged with its key's
/// position and sorted afterwards. `fetch` is expected to fold failures into
/// its output; one bad key never aborts the batch. A `width` of 0 is treated
/// as 1.
pub async fn fetch_ordered<K, T, F, Fut>(
    keys: impl IntoIterator<Item = K>,
    width: usize,
    fetch: F,
) -> Vec<T>
where
    F: Fn(K) -> Fut,
    Fut: Future<Output = T>,
{
    let mut tagged: Vec<(usize, T)> = stream::iter(keys.into_iter().enumerate())
        .map(|(index, key)| {
            let pending = fetch(key);
            async move { (index, pending.await) }
        })
        .buffer_unordered(width.max(1))
        .collect()
        .await;

    tagged.sort_by_key(|(index, _)| *index);
    tagged.into_iter().map(|(_, output)| output).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_preserves_input_order() {
        // Earlier keys sleep longer, so they finish last.
        let keys = vec![50u64, 40, 30, 20, 10, 0];
        let out = fetch_ordered(keys.clone(), 10, |ms| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            ms
        })
        .await;

        assert_eq!(out, keys);
    }

    #[tokio::test]
    async fn test_caps_concurrency() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let (in_flight, peak) = (&in_flight, &peak);

        let out = fetch_ordered(0..25, 4, |n| async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            n * 2
        })
        .await;

        assert_eq!(out.len(), 25);
        assert_eq!(out[24], 48);
        assert!(peak.load(Ordering::SeqCst) <= 4);
        assert!(peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_failures_stay_in_place() {
        let out = fetch_ordered(["ok", "bad", "ok"], DEFAULT_WIDTH, |key| async move {
            if key == "bad" {
                Err(format!("{} failed", key))
            } else {
                Ok(key.len())
            }
        })
        .await;

        assert_eq!(out, vec![Ok(2), Err("bad failed".to_string()), Ok(2)]);
    }

    #[tokio::test]
    async fn test_duplicate_keys_each_get_a_result() {
        let out = fetch_ordered(vec!["a", "a", "b"], 0, |key| async move { key }).await;
        assert_eq!(out, vec!["a", "a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let out: Vec<u8> = fetch_ordered(Vec::<u8>::new(), 3, |k| async move { k }).await;
        assert!(out.is_empty());
    }
}
