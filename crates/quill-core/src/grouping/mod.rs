//! Windowed item cache for long lists
//!
//! A [`VirtualizedGrouping`] holds the ordered ids of a list and resolves
//! items lazily, one fixed-size batch at a time, through an injected
//! [`BatchResolver`]. Only the most recently used batches stay resident.
//!
//! Each instance owns its cache; nothing is shared between groupings.

mod resolver;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::config::GroupingConfig;
use crate::error::{QuillError, Result};
use crate::logging::ResourceMetrics;

pub use resolver::BatchResolver;

/// A resolved cache entry. `item` is `None` when the resolver did not
/// return the id, which is "not found" rather than "not fetched yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedItem<T> {
    pub item: Option<T>,
}

/// Sizing for a [`VirtualizedGrouping`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingOptions {
    /// Ids per resolver call
    pub batch_size: usize,
    /// Batches kept before the least recently used is evicted
    pub max_resident_batches: usize,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        GroupingConfig::default().into()
    }
}

impl From<&GroupingConfig> for GroupingOptions {
    fn from(config: &GroupingConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            max_resident_batches: config.max_resident_batches,
        }
    }
}

impl From<GroupingConfig> for GroupingOptions {
    fn from(config: GroupingConfig) -> Self {
        Self::from(&config)
    }
}

type Batch<T> = HashMap<String, Option<T>>;

/// What every waiter on one fetch receives; the error is the resolver's message
type FetchOutcome<T> = std::result::Result<Arc<Batch<T>>, String>;

type InFlight<T> = Arc<OnceCell<FetchOutcome<T>>>;

struct State<T> {
    ids: Arc<[String]>,
    positions: HashMap<String, usize>,
    /// Bumped by every refresh so late fetches cannot repopulate the cache
    generation: u64,
    /// Resident batches keyed by start index
    resident: LruCache<usize, Arc<Batch<T>>>,
    in_flight: HashMap<usize, InFlight<T>>,
}

impl<T> State<T> {
    fn new(ids: Vec<String>, capacity: NonZeroUsize) -> Self {
        let mut state = Self {
            ids: Arc::from(Vec::new()),
            positions: HashMap::new(),
            generation: 0,
            resident: LruCache::new(capacity),
            in_flight: HashMap::new(),
        };
        state.set_ids(ids);
        state
    }

    fn set_ids(&mut self, ids: Vec<String>) {
        let mut positions = HashMap::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            positions.entry(id.clone()).or_insert(index);
        }
        self.ids = ids.into();
        self.positions = positions;
    }
}

/// Lazily resolved, batch-cached view over an ordered id list
pub struct VirtualizedGrouping<T, R> {
    resolver: R,
    options: GroupingOptions,
    state: Mutex<State<T>>,
    metrics: ResourceMetrics,
}

impl<T, R> VirtualizedGrouping<T, R>
where
    T: Clone,
    R: BatchResolver<T>,
{
    /// A grouping that keeps one batch resident
    pub fn new(ids: Vec<String>, batch_size: usize, resolver: R) -> Self {
        Self::with_options(
            ids,
            GroupingOptions {
                batch_size,
                max_resident_batches: 1,
            },
            resolver,
        )
    }

    /// Zero sizes are raised to one.
    pub fn with_options(ids: Vec<String>, options: GroupingOptions, resolver: R) -> Self {
        let capacity =
            NonZeroUsize::new(options.max_resident_batches).unwrap_or(NonZeroUsize::MIN);
        let options = GroupingOptions {
            batch_size: options.batch_size.max(1),
            max_resident_batches: capacity.get(),
        };
        Self {
            resolver,
            options,
            state: Mutex::new(State::new(ids, capacity)),
            metrics: ResourceMetrics::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current id list
    pub fn ids(&self) -> Arc<[String]> {
        Arc::clone(&self.lock().ids)
    }

    pub fn batch_size(&self) -> usize {
        self.options.batch_size
    }

    pub fn metrics(&self) -> &ResourceMetrics {
        &self.metrics
    }

    /// Resolve the item for `id`.
    ///
    /// Returns `Ok(None)` when `id` is not in the list. Fetches the containing
    /// batch at most once, however many callers ask concurrently; resolver
    /// failures propagate and leave the batch uncached.
    pub async fn item(&self, id: &str) -> Result<Option<CachedItem<T>>> {
        let (start, generation, cell, batch_ids) = {
            let mut state = self.lock();
            let Some(&index) = state.positions.get(id) else {
                return Ok(None);
            };
            let start = index - index % self.options.batch_size;
            if let Some(batch) = state.resident.get(&start).map(Arc::clone) {
                self.metrics.record_cache_hit();
                trace!(id, batch_start = start, "grouping cache hit");
                return Ok(Some(entry(&batch, id)));
            }
            self.metrics.record_cache_miss();
            let end = (start + self.options.batch_size).min(state.ids.len());
            let batch_ids = state.ids[start..end].to_vec();
            let cell = Arc::clone(state.in_flight.entry(start).or_default());
            (start, state.generation, cell, batch_ids)
        };

        let batch = self.fetch(start, generation, &cell, batch_ids).await?;
        Ok(Some(entry(&batch, id)))
    }

    /// Resolve the item at a list position; `Ok(None)` past the end
    pub async fn item_at(&self, index: usize) -> Result<Option<CachedItem<T>>> {
        let id = self.lock().ids.get(index).cloned();
        match id {
            Some(id) => self.item(&id).await,
            None => Ok(None),
        }
    }

    /// Peek at a resident entry without fetching or touching recency
    pub fn cached(&self, id: &str) -> Option<CachedItem<T>> {
        let state = self.lock();
        let index = *state.positions.get(id)?;
        let start = index - index % self.options.batch_size;
        state.resident.peek(&start).map(|batch| entry(batch, id))
    }

    /// Replace the id list and drop every cached batch
    pub fn refresh(&self, ids: Vec<String>) {
        let mut state = self.lock();
        let dropped = state.resident.len();
        state.resident.clear();
        state.in_flight.clear();
        state.set_ids(ids);
        state.generation += 1;
        let generation = state.generation;
        self.metrics.record_evictions(dropped as u64);
        debug!(
            len = state.ids.len(),
            dropped_batches = dropped,
            generation,
            "grouping refreshed"
        );
        crate::log_resource_metrics!(self.metrics, "grouping_refresh");
    }

    async fn fetch(
        &self,
        start: usize,
        generation: u64,
        cell: &InFlight<T>,
        batch_ids: Vec<String>,
    ) -> Result<Arc<Batch<T>>> {
        let outcome = cell
            .get_or_init(|| async {
                self.metrics.record_batch_fetch();
                debug!(batch_start = start, count = batch_ids.len(), "fetching batch");
                let outcome = match self.resolver.resolve(batch_ids.clone()).await {
                    Ok(mut found) => {
                        let batch: Batch<T> = batch_ids
                            .iter()
                            .map(|id| (id.clone(), found.remove(id)))
                            .collect();
                        Ok(Arc::new(batch))
                    }
                    Err(e) => {
                        warn!(batch_start = start, error = %e, "batch resolver failed");
                        Err(e.to_string())
                    }
                };
                self.settle(start, generation, cell, &outcome);
                outcome
            })
            .await;

        outcome
            .clone()
            .map_err(|reason| QuillError::resolver(start, reason))
    }

    /// Retire the in-flight entry and cache a successful batch
    fn settle(&self, start: usize, generation: u64, cell: &InFlight<T>, outcome: &FetchOutcome<T>) {
        let mut state = self.lock();
        if state
            .in_flight
            .get(&start)
            .is_some_and(|current| Arc::ptr_eq(current, cell))
        {
            state.in_flight.remove(&start);
        }

        let Ok(batch) = outcome else {
            return;
        };
        if state.generation != generation {
            debug!(batch_start = start, "discarding batch fetched before refresh");
            return;
        }

        if let Some((old, _)) = state.resident.push(start, Arc::clone(batch)) {
            if old != start {
                debug!(batch_start = old, "evicting batch");
                self.metrics.record_evictions(1);
            }
        }
    }
}

fn entry<T: Clone>(batch: &Batch<T>, id: &str) -> CachedItem<T> {
    CachedItem {
        item: batch.get(id).cloned().flatten(),
    }
}
