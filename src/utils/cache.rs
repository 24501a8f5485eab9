// Time-bounded cache shared by every proxied endpoint.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Keyed cache whose entries expire a fixed window after the fetch that produced them.
///
/// Entries are only ever written by a successful fetch. A failed fetch leaves
/// the entry for its key untouched, including its timestamp.
/// Concurrent misses on one key join a single in-flight fetch and all receive
/// its result, error included; misses on other keys proceed independently.
/// Storing a value sweeps out every other entry that has already gone stale.
pub struct TtlCache<K, V, E> {
    name: &'static str,
    window: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    in_flight: Mutex<HashMap<K, Flight<V, E>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

type Flight<V, E> = Arc<OnceCell<Result<V, E>>>;

impl<K, V, E> TtlCache<K, V, E>
where
    K: Eq + Hash,
    V: Clone,
    E: Clone,
{
    pub fn with_clock(name: &'static str, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            window,
            clock,
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(test)]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the cached value for `key` while it is fresh, otherwise runs
    /// `fetch`, stores its result and returns it. Fetch errors are returned
    /// to every caller waiting on that fetch and never cached.
    ///
    /// The key is only copied into the cache on a miss.
    pub async fn get_or_fetch<Q, F, Fut>(&self, key: &Q, fetch: F) -> Result<V, E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.fresh(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("📦 [{}] cache hit for {:?}", self.name, key);
            return Ok(value);
        }

        let flight = self.join_flight(key);
        let landing = &flight;

        // Only one initializer runs per flight. The others wait for its result,
        // or take over if it is dropped before finishing.
        let result = flight
            .get_or_init(move || async move {
                // A flight that landed between our lookup and now may already have refreshed it.
                if let Some(value) = self.fresh(key) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    self.land(key, landing);
                    return Ok(value);
                }

                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!("🔄 [{}] cache miss for {:?}, fetching upstream", self.name, key);

                let result = fetch().await;
                if let Ok(value) = &result {
                    self.store(key.to_owned(), value.clone());
                }
                self.land(key, landing);
                result
            })
            .await
            .clone();
        result
    }

    /// Raw entry for `key`, fresh or not.
    #[cfg(test)]
    pub fn peek<Q>(&self, key: &Q) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner()).len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    fn fresh<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.window))
            .map(|entry| entry.value.clone())
    }

    fn store(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, self.window));
        let swept = before - entries.len();
        if swept > 0 {
            log::debug!("🧹 [{}] dropped {} stale entries", self.name, swept);
        }
        entries.insert(key, CacheEntry { value, fetched_at: now });
    }

    fn join_flight<Q>(&self, key: &Q) -> Flight<V, E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(flight) = in_flight.get(key) {
            return flight.clone();
        }
        let flight = Arc::new(OnceCell::new());
        in_flight.insert(key.to_owned(), flight.clone());
        flight
    }

    // Callers already holding the flight still read its result; later callers start fresh.
    fn land<Q>(&self, key: &Q, flight: &Flight<V, E>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if in_flight.get(key).map_or(false, |current| Arc::ptr_eq(current, flight)) {
            in_flight.remove(key);
        }
    }
}

#[cfg(test)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }
}
