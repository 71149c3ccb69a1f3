use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("id{i}")).collect()
}

/// Records every resolver call and can be switched into failing
#[derive(Clone, Default)]
struct Calls {
    log: Arc<Mutex<Vec<Vec<String>>>>,
    fail: Arc<AtomicBool>,
}

impl Calls {
    fn count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    fn batches(&self) -> Vec<Vec<String>> {
        self.log.lock().unwrap().clone()
    }

    fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

/// Resolves `id` to `item:id`, except ids starting with `missing`
fn grouping(
    ids: Vec<String>,
    options: GroupingOptions,
    calls: &Calls,
) -> VirtualizedGrouping<String, impl BatchResolver<String>> {
    let calls = calls.clone();
    VirtualizedGrouping::with_options(ids, options, move |batch: Vec<String>| {
        calls.log.lock().unwrap().push(batch.clone());
        let fail = calls.fail.load(Ordering::SeqCst);
        async move {
            tokio::task::yield_now().await;
            if fail {
                return Err(QuillError::Other("backend offline".to_string()));
            }
            Ok(batch
                .into_iter()
                .filter(|id| !id.starts_with("missing"))
                .map(|id| {
                    let item = format!("item:{id}");
                    (id, item)
                })
                .collect::<HashMap<String, String>>())
        }
    })
}

fn options(batch_size: usize, max_resident_batches: usize) -> GroupingOptions {
    GroupingOptions {
        batch_size,
        max_resident_batches,
    }
}

fn value(entry: Option<CachedItem<String>>) -> Option<String> {
    entry.and_then(|e| e.item)
}

#[tokio::test]
async fn test_same_batch_fetched_once() {
    let calls = Calls::default();
    let g = grouping(ids(10), options(3, 1), &calls);

    assert_eq!(value(g.item("id0").await.unwrap()).as_deref(), Some("item:id0"));
    assert_eq!(value(g.item("id2").await.unwrap()).as_deref(), Some("item:id2"));
    assert_eq!(value(g.item("id1").await.unwrap()).as_deref(), Some("item:id1"));

    assert_eq!(calls.batches(), vec![vec!["id0", "id1", "id2"]]);
    assert_eq!(g.metrics().cache_misses(), 1);
    assert_eq!(g.metrics().cache_hits(), 2);
    assert_eq!(g.metrics().batch_fetches(), 1);
}

#[tokio::test]
async fn test_distinct_batches_each_fetch_and_evict() {
    let calls = Calls::default();
    let g = grouping(ids(10), options(3, 1), &calls);

    g.item("id0").await.unwrap();
    g.item("id4").await.unwrap();
    assert_eq!(calls.count(), 2);
    assert!(g.cached("id0").is_none());
    assert!(g.cached("id5").is_some());

    // Returning to an evicted batch refetches it
    g.item("id1").await.unwrap();
    assert_eq!(calls.count(), 3);
    assert!(g.cached("id4").is_none());
    assert_eq!(g.metrics().evictions(), 2);
}

#[tokio::test]
async fn test_last_batch_clipped() {
    let calls = Calls::default();
    let g = grouping(ids(10), options(4, 1), &calls);

    g.item("id9").await.unwrap();
    assert_eq!(calls.batches(), vec![vec!["id8", "id9"]]);
}

#[tokio::test]
async fn test_unknown_id_is_none_without_fetch() {
    let calls = Calls::default();
    let g = grouping(ids(5), options(2, 1), &calls);

    assert_eq!(g.item("nope").await.unwrap(), None);
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn test_unresolved_id_cached_as_not_found() {
    let calls = Calls::default();
    let list = vec!["a".to_string(), "missing-b".to_string()];
    let g = grouping(list, options(2, 1), &calls);

    let entry = g.item("missing-b").await.unwrap();
    assert_eq!(entry, Some(CachedItem { item: None }));
    assert_eq!(g.cached("missing-b"), Some(CachedItem { item: None }));
    assert_eq!(value(g.item("a").await.unwrap()).as_deref(), Some("item:a"));
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn test_refresh_clears_cache() {
    let calls = Calls::default();
    let g = grouping(ids(6), options(3, 1), &calls);

    g.item("id0").await.unwrap();
    g.refresh(ids(4));
    assert_eq!(g.len(), 4);
    assert!(g.cached("id0").is_none());

    g.item("id0").await.unwrap();
    assert_eq!(calls.count(), 2);
    assert_eq!(g.item("id5").await.unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_fetch() {
    let calls = Calls::default();
    let g = grouping(ids(10), options(5, 1), &calls);

    let (a, b, c) = tokio::join!(g.item("id0"), g.item("id3"), g.item("id4"));
    assert_eq!(value(a.unwrap()).as_deref(), Some("item:id0"));
    assert_eq!(value(b.unwrap()).as_deref(), Some("item:id3"));
    assert_eq!(value(c.unwrap()).as_deref(), Some("item:id4"));
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn test_resolver_error_propagates_and_is_not_cached() {
    let calls = Calls::default();
    let g = grouping(ids(6), options(3, 1), &calls);

    calls.set_failing(true);
    let err = g.item("id4").await.unwrap_err();
    assert!(matches!(err, QuillError::Resolver { batch_start: 3, .. }));
    assert!(err.to_string().contains("backend offline"));
    assert!(g.cached("id4").is_none());

    calls.set_failing(false);
    assert_eq!(value(g.item("id4").await.unwrap()).as_deref(), Some("item:id4"));
    assert_eq!(calls.count(), 2);
}

#[tokio::test]
async fn test_concurrent_waiters_share_failure() {
    let calls = Calls::default();
    let g = grouping(ids(4), options(4, 1), &calls);

    calls.set_failing(true);
    let (a, b) = tokio::join!(g.item("id0"), g.item("id1"));
    assert!(a.is_err());
    assert!(b.is_err());
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn test_lru_keeps_recent_batches() {
    let calls = Calls::default();
    let g = grouping(ids(9), options(3, 2), &calls);

    g.item("id0").await.unwrap(); // fetch batch 0
    g.item("id3").await.unwrap(); // fetch batch 1
    g.item("id1").await.unwrap(); // hit, batch 0 most recent
    assert_eq!(calls.count(), 2);

    g.item("id6").await.unwrap(); // fetch batch 2, evicts batch 1
    assert!(g.cached("id0").is_some());
    assert!(g.cached("id3").is_none());

    g.item("id2").await.unwrap();
    assert_eq!(calls.count(), 3);
    g.item("id4").await.unwrap();
    assert_eq!(calls.count(), 4);
}

#[tokio::test]
async fn test_cached_peek_does_not_refresh_recency() {
    let calls = Calls::default();
    let g = grouping(ids(9), options(3, 2), &calls);

    g.item("id0").await.unwrap();
    g.item("id3").await.unwrap();
    assert!(g.cached("id0").is_some());

    // batch 0 is still least recently used
    g.item("id6").await.unwrap();
    assert!(g.cached("id0").is_none());
    assert!(g.cached("id3").is_some());
    assert_eq!(g.metrics().evictions(), 1);
    assert_eq!(g.metrics().batch_fetches(), 3);
}

#[tokio::test]
async fn test_item_at() {
    let calls = Calls::default();
    let g = grouping(ids(5), options(2, 1), &calls);

    assert_eq!(value(g.item_at(4).await.unwrap()).as_deref(), Some("item:id4"));
    assert_eq!(g.item_at(5).await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_ids_use_first_position() {
    let calls = Calls::default();
    let list = vec!["a".into(), "b".into(), "c".into(), "a".into()];
    let g = grouping(list, options(2, 1), &calls);

    g.item("a").await.unwrap();
    assert_eq!(calls.batches(), vec![vec!["a", "b"]]);
}

#[test]
fn test_sizes_clamped_and_accessors() {
    let g: VirtualizedGrouping<String, _> = VirtualizedGrouping::new(
        ids(3),
        0,
        |_: Vec<String>| async { Ok::<_, QuillError>(HashMap::<String, String>::new()) },
    );
    assert_eq!(g.batch_size(), 1);
    assert_eq!(g.len(), 3);
    assert!(!g.is_empty());
    assert_eq!(g.ids().len(), 3);
    assert_eq!(&g.ids()[1], "id1");
}

#[test]
fn test_options_from_config() {
    let config = GroupingConfig {
        batch_size: 50,
        max_resident_batches: 3,
    };
    assert_eq!(GroupingOptions::from(&config), options(50, 3));
    assert_eq!(GroupingOptions::default(), options(500, 1));
}

#[tokio::test]
async fn test_fetch_finishing_after_refresh_is_discarded() {
    let gate = Arc::new(Notify::new());
    let calls = Calls::default();
    let resolver = {
        let gate = Arc::clone(&gate);
        let calls = calls.clone();
        move |batch: Vec<String>| {
            calls.log.lock().unwrap().push(batch.clone());
            let gate = Arc::clone(&gate);
            async move {
                gate.notified().await;
                Ok::<_, QuillError>(
                    batch
                        .into_iter()
                        .map(|id| (id.clone(), id))
                        .collect::<HashMap<String, String>>(),
                )
            }
        }
    };
    let g = VirtualizedGrouping::new(ids(4), 4, resolver);

    let pending = g.item("id0");
    tokio::pin!(pending);
    assert!(tokio::time::timeout(Duration::from_millis(20), &mut pending)
        .await
        .is_err());

    g.refresh(ids(4));
    gate.notify_one();
    let stale = pending.await.unwrap();
    assert_eq!(value(stale).as_deref(), Some("id0"));
    assert!(g.cached("id0").is_none());

    gate.notify_one();
    g.item("id0").await.unwrap();
    assert_eq!(calls.count(), 2);
    assert!(g.cached("id0").is_some());
}
