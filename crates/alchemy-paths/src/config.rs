/// Settings for [`MultiPath`](crate::MultiPath).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiPathConfig {
    /// Upper bound on concurrently running searches. The pool is never wider
    /// than the number of requested paths.
    pub max_workers: usize,
    /// Variant indices tried per requested path.
    pub attempts_per_path: usize,
    /// Stop handing out variant indices once enough distinct paths are in.
    pub stop_when_satisfied: bool,
}

impl Default for MultiPathConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            attempts_per_path: 2,
            stop_when_satisfied: true,
        }
    }
}

impl MultiPathConfig {
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_attempts_per_path(mut self, attempts: usize) -> Self {
        self.attempts_per_path = attempts;
        self
    }

    pub fn with_stop_when_satisfied(mut self, stop: bool) -> Self {
        self.stop_when_satisfied = stop;
        self
    }

    /// Pool width and total attempts for `k` requested paths.
    pub(crate) fn plan(&self, k: usize) -> (usize, usize) {
        let attempts = k.saturating_mul(self.attempts_per_path.max(1));
        let workers = self.max_workers.max(1).min(k).min(attempts);
        (workers, attempts)
    }
}
