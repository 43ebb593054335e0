//! Styling options and configuration.

use super::Selector;
use rand::rngs::StdRng;
use std::time::Duration;

/// Options for styling documents.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Base seed for reproducible output (None = system entropy)
    pub seed: Option<u64>,

    /// Whether batches process documents in parallel
    pub parallel: bool,

    /// Upper bound on parallel workers (None = number of CPUs)
    pub max_jobs: Option<usize>,

    /// Per-paragraph classification timeout
    pub classify_timeout: Option<Duration>,

    /// Paragraphs longer than this many characters are refused by the classifier
    pub max_paragraph_chars: Option<usize>,
}

impl StyleOptions {
    /// Create new style options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Limit the number of parallel workers.
    pub fn with_max_jobs(mut self, jobs: usize) -> Self {
        self.max_jobs = Some(jobs.max(1));
        self
    }

    /// Set the classification timeout.
    pub fn with_classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = Some(timeout);
        self
    }

    /// Set the maximum paragraph length handed to the classifier.
    pub fn with_max_paragraph_chars(mut self, chars: usize) -> Self {
        self.max_paragraph_chars = Some(chars);
        self
    }

    /// Selector for the document at `index` within a batch.
    ///
    /// With a seed, document `i` draws from `seed + i` so results do not
    /// depend on scheduling.
    pub fn selector_for(&self, index: usize) -> Selector<StdRng> {
        match self.seed {
            Some(seed) => Selector::seeded(seed.wrapping_add(index as u64)),
            None => Selector::from_entropy(),
        }
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: true,
            max_jobs: None,
            classify_timeout: None,
            max_paragraph_chars: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_options_builder() {
        let options = StyleOptions::new()
            .with_seed(9)
            .with_max_jobs(0)
            .with_classify_timeout(Duration::from_secs(2))
            .with_max_paragraph_chars(500)
            .sequential();

        assert_eq!(options.seed, Some(9));
        assert_eq!(options.max_jobs, Some(1));
        assert_eq!(options.classify_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.max_paragraph_chars, Some(500));
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = StyleOptions::default();
        assert!(options.seed.is_none());
        assert!(options.parallel);
        assert!(options.classify_timeout.is_none());
    }

    #[test]
    fn test_selector_per_document() {
        let options = StyleOptions::new().with_seed(100);
        let candidates: Vec<usize> = (0..50).collect();
        let a = options.selector_for(3).select(&candidates, 20);
        let b = StyleOptions::new()
            .with_seed(101)
            .selector_for(2)
            .select(&candidates, 20);
        assert_eq!(a, b);
    }
}
