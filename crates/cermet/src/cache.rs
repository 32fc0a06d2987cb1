//! Memoization of parse results.
//!
//! Lab datasets repeat the same composition strings many times, so
//! [`CachedParser`] keeps the results of the most recently used inputs, up
//! to a fixed capacity.

use std::{
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::trace;
use lru::LruCache;

use cermet_core::ParsedComposition;
use cermet_parser::CompositionParser;

/// Raw input plus the bit pattern of the binder volume percent.
type CacheKey = (String, Option<u64>);

#[derive(Debug)]
struct CacheState {
    entries: LruCache<CacheKey, ParsedComposition>,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }
}

/// Counters of a [`CachedParser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// A [`CompositionParser`] that remembers its results.
///
/// Results are cloned out of the cache. When the cache is full the least
/// recently used result is evicted.
#[derive(Debug)]
pub struct CachedParser {
    parser: CompositionParser,
    /// `None` when caching is disabled.
    state: Option<Mutex<CacheState>>,
}

impl CachedParser {
    /// Wraps `parser`; a `capacity` of 0 disables caching.
    pub fn new(parser: CompositionParser, capacity: usize) -> Self {
        Self {
            parser,
            state: NonZeroUsize::new(capacity)
                .map(|capacity| Mutex::new(CacheState::new(capacity))),
        }
    }

    pub fn parser(&self) -> &CompositionParser {
        &self.parser
    }

    /// Parses `input`, answering from the cache when possible.
    pub fn parse_with_volume(&self, input: &str, binder_vol_pct: Option<f64>) -> ParsedComposition {
        let Some(state) = &self.state else {
            return self.parser.parse_with_volume(input, binder_vol_pct);
        };

        let key = (input.to_string(), binder_vol_pct.map(f64::to_bits));
        {
            let mut state = lock(state);
            if let Some(result) = state.entries.get(&key).cloned() {
                state.hits += 1;
                trace!(input; "Cache hit");
                return result;
            }
            state.misses += 1;
        }

        // Parse outside the lock.
        let result = self.parser.parse_with_volume(input, binder_vol_pct);

        lock(state).entries.put(key, result.clone());
        result
    }

    pub fn stats(&self) -> CacheStats {
        self.state.as_ref().map_or_else(CacheStats::default, |state| {
            let state = lock(state);
            CacheStats {
                hits: state.hits,
                misses: state.misses,
                entries: state.entries.len(),
            }
        })
    }

    /// Drops every cached result and resets the counters.
    pub fn clear(&self) {
        if let Some(state) = &self.state {
            let mut state = lock(state);
            state.entries.clear();
            state.hits = 0;
            state.misses = 0;
        }
    }
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    // The state stays valid even if a holder panicked.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
