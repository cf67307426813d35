//! Shared table cache for the radix-4 engine.
//!
//! Building tables costs `O(N)` trigonometric evaluations, while an engine
//! only needs a private scratch buffer on top of them. [`OouraPlanner`]
//! keeps recently used tables behind [`Arc`] so that many engines of the
//! same size (one per thread, one per channel) share a single copy.

use alloc::{collections::VecDeque, sync::Arc};

use hashbrown::HashMap;

use crate::error::FftError;
use crate::ooura::OouraFft;
use crate::twiddle::OouraTables;

/// Default number of table sets retained by a planner.
pub const MAX_CACHE_ENTRIES: usize = 64;

/// Environment variable overriding [`MAX_CACHE_ENTRIES`]; `0` or an
/// unparsable value keeps the default.
pub const CACHE_ENTRIES_ENV: &str = "AUDIOFFT_PLANNER_CACHE_ENTRIES";

#[cfg(feature = "std")]
static CACHE_ENTRIES: std::sync::OnceLock<usize> = std::sync::OnceLock::new();

/// Cache capacity used by [`OouraPlanner::new`].
///
/// With `std` the environment is read once per process.
pub fn default_cache_entries() -> usize {
    #[cfg(feature = "std")]
    {
        *CACHE_ENTRIES.get_or_init(|| {
            std::env::var(CACHE_ENTRIES_ENV)
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&v| v != 0)
                .unwrap_or(MAX_CACHE_ENTRIES)
        })
    }
    #[cfg(not(feature = "std"))]
    {
        MAX_CACHE_ENTRIES
    }
}

/// LRU cache of [`OouraTables`] keyed by block size.
#[derive(Debug)]
pub struct OouraPlanner {
    cache: HashMap<usize, Arc<OouraTables>>,
    /// Least recently used size at the front.
    order: VecDeque<usize>,
    capacity: usize,
}

impl Default for OouraPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl OouraPlanner {
    pub fn new() -> Self {
        Self::with_capacity(default_cache_entries())
    }

    /// Planner retaining at most `capacity` table sets (`0` selects the
    /// default).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            MAX_CACHE_ENTRIES
        } else {
            capacity
        };
        Self {
            cache: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of table sets currently cached.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Retrieve or build the tables for `size`.
    pub fn tables(&mut self, size: usize) -> Result<Arc<OouraTables>, FftError> {
        if let Some(tables) = self.cache.get(&size) {
            let tables = Arc::clone(tables);
            #[cfg(feature = "verbose-logging")]
            log::trace!("planner: cache hit for size {size}");
            self.touch(size);
            return Ok(tables);
        }

        let tables = Arc::new(OouraTables::new(size)?);
        #[cfg(feature = "verbose-logging")]
        log::debug!("planner: built tables for size {size}");
        if self.cache.len() >= self.capacity {
            if let Some(old) = self.order.pop_front() {
                self.cache.remove(&old);
                #[cfg(feature = "verbose-logging")]
                log::debug!("planner: evicted tables for size {old}");
            }
        }
        self.cache.insert(size, Arc::clone(&tables));
        self.order.push_back(size);
        Ok(tables)
    }

    /// Engine for `size` sharing the cached tables.
    pub fn plan(&mut self, size: usize) -> Result<OouraFft, FftError> {
        Ok(OouraFft::from_tables(self.tables(size)?))
    }

    fn touch(&mut self, size: usize) {
        self.order.retain(|&s| s != size);
        self.order.push_back(size);
    }
}
