//! Namespace-insensitive path cleaning.
//!
//! Paths and attribute names are stripped of their `prefix:` qualifiers so that
//! `/sch:Preference/sch:Airport[2]` and `/Preference/Airport[2]` address the same
//! node. Namespace declarations (`xmlns:sch`) collapse to a bare `xmlns`.
//!
//! Cleaning is a pure function, so results are memoized in a bounded,
//! process-wide cache. Concurrent callers may race to fill the same entry; the
//! only cost is recomputation.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::Mutex;

/// Maximum number of memoized paths.
pub const CACHE_CAPACITY: usize = 10_000;

static CLEANED_PATHS: OnceLock<PathCache> = OnceLock::new();

/// Strip namespace prefixes from every segment of `path`.
pub fn clean_path(path: &str) -> String {
    cache().get_or_insert_with(path, strip_path)
}

/// Strip the namespace prefix from an attribute name.
///
/// `xmlns:prefix` becomes `xmlns`; any other `prefix:name` becomes `name`.
pub fn clean_attribute_name(name: &str) -> String {
    if name.starts_with("xmlns:") {
        return "xmlns".to_string();
    }
    local_name(name).to_string()
}

fn cache() -> &'static PathCache {
    CLEANED_PATHS.get_or_init(|| PathCache::new(CACHE_CAPACITY))
}

fn strip_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix('@') {
            Some(attribute) => format!("@{}", clean_attribute_name(attribute)),
            None => local_name(segment).to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn local_name(segment: &str) -> &str {
    match segment.rfind(':') {
        Some(pos) => &segment[pos + 1..],
        None => segment,
    }
}

/// Bounded memo table with least-recently-used eviction.
///
/// Every access stamps the entry with a monotonically increasing tick. When the
/// table is full, the oldest quarter of entries is dropped in one sweep so the
/// eviction cost is amortized over many inserts.
#[derive(Debug)]
pub(crate) struct PathCache {
    capacity: usize,
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    tick: u64,
    entries: HashMap<String, (String, u64)>,
}

impl PathCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheState::default()),
        }
    }

    pub(crate) fn get_or_insert_with(&self, key: &str, compute: impl Fn(&str) -> String) -> String {
        {
            let mut state = self.inner.lock();
            state.tick += 1;
            let tick = state.tick;
            if let Some((value, stamp)) = state.entries.get_mut(key) {
                *stamp = tick;
                return value.clone();
            }
        }

        // Computed outside the lock; a racing caller may compute the same value.
        let value = compute(key);

        let mut state = self.inner.lock();
        if state.entries.len() >= self.capacity {
            evict_oldest(&mut state, self.capacity);
        }
        state.tick += 1;
        let tick = state.tick;
        state
            .entries
            .insert(key.to_string(), (value.clone(), tick));
        value
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }
}

fn evict_oldest(state: &mut CacheState, capacity: usize) {
    let drop_count = (capacity / 4).max(1);
    let mut stamps: Vec<(u64, String)> = state
        .entries
        .iter()
        .map(|(key, (_, stamp))| (*stamp, key.clone()))
        .collect();
    stamps.sort_unstable();
    for (_, key) in stamps.into_iter().take(drop_count) {
        state.entries.remove(&key);
    }
    tracing::trace!(evicted = drop_count, "namespace cache eviction");
}
