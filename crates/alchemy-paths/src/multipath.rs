//! Concurrent collection of several distinct paths for one target.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::config::MultiPathConfig;
use crate::error::SearchError;
use crate::reconstruct::validate_path;
use crate::result::SearchResult;
use crate::traits::{PathFinder, Query};
use crate::variant::Variant;

/// Distinct paths gathered by [`MultiPath::find`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSet {
    /// Accepted results in completion order.
    pub results: Vec<SearchResult>,
    /// Number of paths asked for.
    pub requested: usize,
    /// Variant searches actually run.
    pub attempts: usize,
    /// Valid results rejected because their signature was already taken.
    pub duplicates: usize,
}

impl PathSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// How many requested paths could not be found.
    #[inline]
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.results.len())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }
}

impl IntoIterator for PathSet {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[derive(Default)]
struct Collector {
    signatures: HashSet<String>,
    results: Vec<SearchResult>,
    duplicates: usize,
}

/// Runs variants of one engine on a bounded pool of scoped threads and keeps
/// the distinct paths.
pub struct MultiPath<'f, F: PathFinder + ?Sized> {
    finder: &'f F,
    config: MultiPathConfig,
}

impl<'f, F: PathFinder + ?Sized> MultiPath<'f, F> {
    pub fn new(finder: &'f F) -> Self {
        Self::with_config(finder, MultiPathConfig::default())
    }

    pub fn with_config(finder: &'f F, config: MultiPathConfig) -> Self {
        Self { finder, config }
    }

    pub fn config(&self) -> &MultiPathConfig {
        &self.config
    }

    /// Collect up to `k` distinct paths to `target`.
    ///
    /// Lookup errors are reported before any search starts. Returns
    /// [`SearchError::NoPathFound`] when no variant produced a path; a
    /// non-empty set smaller than `k` is a success with a
    /// [`shortfall`](PathSet::shortfall).
    pub fn find(&self, target: &str, k: usize) -> Result<PathSet, SearchError> {
        Query::resolve(self.finder.source(), target)?;
        if k == 0 {
            return Ok(PathSet::default());
        }

        let (workers, attempts) = self.config.plan(k);
        let next = AtomicUsize::new(0);
        let ran = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let collector = Mutex::new(Collector::default());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| self.work(target, k, attempts, &next, &ran, &stop, &collector));
            }
        });

        let collector = collector.into_inner().unwrap_or_else(PoisonError::into_inner);
        let set = PathSet {
            results: collector.results,
            requested: k,
            attempts: ran.into_inner(),
            duplicates: collector.duplicates,
        };
        if set.is_empty() {
            return Err(SearchError::NoPathFound(target.to_string()));
        }
        if set.shortfall() > 0 {
            log::info!(
                "{}: found {} of {} paths for {} ({} attempts, {} duplicates)",
                self.finder.algorithm(),
                set.len(),
                k,
                target,
                set.attempts,
                set.duplicates
            );
        }
        Ok(set)
    }

    #[allow(clippy::too_many_arguments)]
    fn work(
        &self,
        target: &str,
        k: usize,
        attempts: usize,
        next: &AtomicUsize,
        ran: &AtomicUsize,
        stop: &AtomicBool,
        collector: &Mutex<Collector>,
    ) {
        let source = self.finder.source();
        loop {
            if stop.load(Ordering::Acquire) {
                break;
            }
            let index = next.fetch_add(1, Ordering::Relaxed);
            if index >= attempts {
                break;
            }
            ran.fetch_add(1, Ordering::Relaxed);

            let mut result = match self.finder.find_variant(target, Variant::new(index)) {
                Ok(result) => result,
                Err(SearchError::NoPathFound(_)) => continue,
                Err(err) => {
                    log::warn!("variant {index} for {target} failed: {err}");
                    continue;
                }
            };
            if let Err(defect) = validate_path(source, target, &result.path) {
                log::warn!("variant {index} for {target} rejected: {defect}");
                continue;
            }
            result.variant = Some(index);
            let signature = result.signature();

            let mut c = collector.lock().unwrap_or_else(PoisonError::into_inner);
            if c.results.len() >= k {
                continue;
            }
            if !c.signatures.insert(signature) {
                c.duplicates += 1;
                continue;
            }
            c.results.push(result);
            if c.results.len() >= k && self.config.stop_when_satisfied {
                stop.store(true, Ordering::Release);
            }
        }
    }
}
