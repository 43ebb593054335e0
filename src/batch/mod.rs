//! Batch orchestration.
//!
//! A [`BatchRunner`] applies one rule set to several documents. Each
//! document is loaded, styled and written to
//! `<output_dir>/<stem>_styled.<ext>` independently: a failure becomes that
//! document's outcome and the batch moves on. Progress and completion are
//! reported as [`BatchEvent`]s, either to a callback ([`BatchRunner::run`])
//! or over a channel from a background thread ([`BatchRunner::start`]).
//!
//! # Example
//!
//! ```no_run
//! use restyle::batch::{BatchEvent, BatchRunner};
//! use restyle::classify::LexiconClassifier;
//! use restyle::rule::RuleSet;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! fn main() -> restyle::Result<()> {
//!     let rules: RuleSet = ["bold 50% of heading", "italic 20% of verb"]
//!         .iter()
//!         .map(|s| s.parse())
//!         .collect::<restyle::Result<_>>()?;
//!
//!     let runner = BatchRunner::new(Arc::new(LexiconClassifier::new()), "styled");
//!     let handle = runner.start(vec![PathBuf::from("notes.md")], rules.snapshot())?;
//!     for event in handle.events().iter() {
//!         if let BatchEvent::Progress(percent) = event {
//!             println!("{}%", percent);
//!         }
//!     }
//!     let report = handle.join()?;
//!     println!("{} styled", report.summary.succeeded);
//!     Ok(())
//! }
//! ```

mod events;
mod report;

pub use events::{BatchEvent, BatchSummary, DocumentOutcome, DocumentStatus};
pub use report::BatchReport;

use crate::classify::TokenClassifier;
use crate::error::{Error, Result};
use crate::format::FormatRegistry;
use crate::rule::StyleRule;
use crate::style::{DocumentStyler, StyleOptions, StyleStats};
use chrono::Utc;
use crossbeam_channel::Receiver;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Suffix appended to the file stem of styled documents.
pub const OUTPUT_SUFFIX: &str = "_styled";

/// Derive the output path for `source` inside `output_dir`.
///
/// Fails when the source has no file name, or when the derived path would
/// be the source itself.
pub fn output_path(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Other(format!("{} has no file name", source.display())))?;

    let name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };
    let output = output_dir.join(name);

    let same = output == source
        || matches!(
            (fs::canonicalize(&output), fs::canonicalize(source)),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(Error::Other(format!(
            "refusing to overwrite source document {}",
            source.display()
        )));
    }
    Ok(output)
}

/// Cooperative cancellation flag shared with a running batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a new, unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the batch to stop before its next document.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Completed-count and event sink, locked together so progress stays ordered.
struct Progress<F> {
    total: usize,
    completed: usize,
    sink: F,
}

/// Applies a rule set to a list of documents.
pub struct BatchRunner {
    styler: DocumentStyler,
    formats: Arc<FormatRegistry>,
    output_dir: PathBuf,
    cancel: CancelToken,
}

impl BatchRunner {
    /// Create a runner writing into `output_dir`, with the default formats.
    pub fn new(classifier: Arc<dyn TokenClassifier>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            styler: DocumentStyler::new(classifier),
            formats: Arc::new(FormatRegistry::with_defaults()),
            output_dir: output_dir.into(),
            cancel: CancelToken::new(),
        }
    }

    /// Set styling options.
    pub fn with_options(mut self, options: StyleOptions) -> Self {
        let classifier = Arc::clone(self.styler.classifier());
        self.styler = DocumentStyler::new(classifier).with_options(options);
        self
    }

    /// Use a custom format registry.
    pub fn with_formats(mut self, formats: FormatRegistry) -> Self {
        self.formats = Arc::new(formats);
        self
    }

    /// Get the styling options.
    pub fn options(&self) -> &StyleOptions {
        self.styler.options()
    }

    /// Get the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Token that cancels this runner's batches.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run a batch on the calling thread, sending events to `sink`.
    ///
    /// Outcomes are reported in input order regardless of parallelism.
    pub fn run<F>(&self, files: &[PathBuf], rules: &[StyleRule], sink: F) -> BatchReport
    where
        F: FnMut(BatchEvent) + Send,
    {
        let started_at = Utc::now();
        let total = files.len();
        log::info!(
            "Styling {} documents with {} rules into {}",
            total,
            rules.len(),
            self.output_dir.display()
        );

        let progress = Mutex::new(Progress {
            total,
            completed: 0,
            sink,
        });
        emit(&progress, BatchEvent::Started { total });

        let claims = self.output_claims(files);
        let outcomes = match self.worker_pool(total) {
            Some(pool) => pool.install(|| {
                files
                    .par_iter()
                    .enumerate()
                    .map(|(index, source)| {
                        self.run_one(index, source, claims[index], files, rules, &progress)
                    })
                    .collect()
            }),
            None => files
                .iter()
                .enumerate()
                .map(|(index, source)| {
                    self.run_one(index, source, claims[index], files, rules, &progress)
                })
                .collect::<Vec<_>>(),
        };

        let summary = BatchSummary::from_outcomes(&outcomes);
        emit(&progress, BatchEvent::Completed(summary));
        log::info!(
            "Batch finished: {} styled, {} failed, {} cancelled",
            summary.succeeded,
            summary.failed,
            summary.cancelled
        );

        BatchReport {
            output_dir: self.output_dir.clone(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
            summary,
        }
    }

    /// Run a batch on a background thread.
    ///
    /// The returned handle streams events and yields the report on `join`.
    pub fn start(self, files: Vec<PathBuf>, rules: Arc<[StyleRule]>) -> Result<BatchHandle> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cancel = self.cancel.clone();

        let thread = thread::Builder::new()
            .name("restyle-batch".into())
            .spawn(move || {
                self.run(&files, &rules, |event| {
                    // The receiver may be gone; the report is still returned.
                    let _ = tx.send(event);
                })
            })?;

        Ok(BatchHandle {
            events: rx,
            cancel,
            thread,
        })
    }

    /// Run a batch from an async context.
    #[cfg(feature = "async")]
    pub async fn run_async(self, files: Vec<PathBuf>, rules: Arc<[StyleRule]>) -> Result<BatchReport> {
        tokio::task::spawn_blocking(move || self.run(&files, &rules, |_| {}))
            .await
            .map_err(|e| Error::Other(format!("batch task failed: {}", e)))
    }

    /// Dedicated pool when parallel processing applies, sized `min(jobs, total)`.
    fn worker_pool(&self, total: usize) -> Option<rayon::ThreadPool> {
        let options = self.styler.options();
        if !options.parallel || total < 2 {
            return None;
        }
        let jobs = options
            .max_jobs
            .unwrap_or_else(rayon::current_num_threads)
            .min(total)
            .max(1);
        if jobs < 2 {
            return None;
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("restyle-worker-{}", i))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!("Falling back to sequential processing: {}", e);
                None
            }
        }
    }

    /// For each input, the earlier input that already derives the same
    /// output path, if any.
    ///
    /// The first input in list order owns an output path; later ones fail,
    /// so no styled copy is overwritten and parallel writes never race.
    fn output_claims(&self, files: &[PathBuf]) -> Vec<Option<usize>> {
        let mut owners: HashMap<PathBuf, usize> = HashMap::new();
        files
            .iter()
            .enumerate()
            .map(|(index, source)| {
                if self.formats.for_path(source).is_err() {
                    return None;
                }
                let output = output_path(source, &self.output_dir).ok()?;
                match owners.get(&output) {
                    Some(&owner) => Some(owner),
                    None => {
                        owners.insert(output, index);
                        None
                    }
                }
            })
            .collect()
    }

    fn run_one<F>(
        &self,
        index: usize,
        source: &Path,
        claimed_by: Option<usize>,
        files: &[PathBuf],
        rules: &[StyleRule],
        progress: &Mutex<Progress<F>>,
    ) -> DocumentOutcome
    where
        F: FnMut(BatchEvent) + Send,
    {
        if self.cancel.is_cancelled() {
            log::debug!("Skipping {} (cancelled)", source.display());
            let outcome = DocumentOutcome::cancelled(source);
            emit(
                progress,
                BatchEvent::DocumentFinished {
                    index,
                    outcome: outcome.clone(),
                },
            );
            return outcome;
        }

        let started = Instant::now();
        let result = match claimed_by {
            Some(owner) => Err(Error::Other(format!(
                "output for {} would overwrite the styled copy of {}",
                source.display(),
                files[owner].display()
            ))),
            None => self.style_one(index, source, rules),
        };
        let outcome = match result {
            Ok((output, stats)) => {
                log::debug!("Styled {} -> {}", source.display(), output.display());
                DocumentOutcome::styled(source, output, stats)
            }
            Err(e) => {
                log::warn!("Failed to style {}: {}", source.display(), e);
                DocumentOutcome::failed(source, &e)
            }
        };
        let outcome = outcome.with_duration_ms(started.elapsed().as_millis() as u64);

        let mut state = progress.lock().unwrap_or_else(PoisonError::into_inner);
        state.completed += 1;
        let percent = (state.completed * 100 / state.total.max(1)) as u8;
        (state.sink)(BatchEvent::DocumentFinished {
            index,
            outcome: outcome.clone(),
        });
        (state.sink)(BatchEvent::Progress(percent));
        outcome
    }

    fn style_one(
        &self,
        index: usize,
        source: &Path,
        rules: &[StyleRule],
    ) -> Result<(PathBuf, StyleStats)> {
        let handler = self.formats.for_path(source)?;
        let output = output_path(source, &self.output_dir)?;

        let mut doc = handler.load(source)?;
        let mut selector = self.styler.options().selector_for(index);
        let stats = self.styler.style_with(&mut doc, rules, &mut selector)?;

        fs::create_dir_all(&self.output_dir)?;
        handler.save(&doc, &output)?;
        Ok((output, stats))
    }
}

fn emit<F>(progress: &Mutex<Progress<F>>, event: BatchEvent)
where
    F: FnMut(BatchEvent),
{
    let mut state = progress.lock().unwrap_or_else(PoisonError::into_inner);
    (state.sink)(event);
}

/// Handle to a batch running on a background thread.
pub struct BatchHandle {
    events: Receiver<BatchEvent>,
    cancel: CancelToken,
    thread: JoinHandle<BatchReport>,
}

impl BatchHandle {
    /// Event stream; it ends after [`BatchEvent::Completed`].
    pub fn events(&self) -> &Receiver<BatchEvent> {
        &self.events
    }

    /// Ask the batch to stop before its next document.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this batch.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Check if the batch thread has finished.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the batch and return its report.
    pub fn join(self) -> Result<BatchReport> {
        self.thread
            .join()
            .map_err(|_| Error::Other("batch thread panicked".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LexiconClassifier;

    fn runner(dir: &Path) -> BatchRunner {
        BatchRunner::new(Arc::new(LexiconClassifier::new()), dir)
            .with_options(StyleOptions::new().with_seed(3).sequential())
    }

    fn rules() -> Vec<StyleRule> {
        vec!["bold 100% of heading".parse().unwrap()]
    }

    #[test]
    fn test_output_path() {
        let out = output_path(Path::new("docs/report.md"), Path::new("out")).unwrap();
        assert_eq!(out, PathBuf::from("out/report_styled.md"));

        let out = output_path(Path::new("README"), Path::new("out")).unwrap();
        assert_eq!(out, PathBuf::from("out/README_styled"));

        assert!(output_path(Path::new(""), Path::new("out")).is_err());
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_run_writes_styled_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.md");
        fs::write(&source, "# Title\nbody text").unwrap();
        let out_dir = dir.path().join("out");

        let report = runner(&out_dir).run(&[source.clone()], &rules(), |_| {});
        assert!(report.summary.is_clean());

        let written = fs::read_to_string(out_dir.join("notes_styled.md")).unwrap();
        assert_eq!(written, "# **Title**\nbody text");
        assert_eq!(fs::read_to_string(&source).unwrap(), "# Title\nbody text");
    }

    #[test]
    fn test_cancelled_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..3).map(|i| dir.path().join(format!("{}.md", i))).collect();
        for f in &files {
            fs::write(f, "# T").unwrap();
        }

        let runner = runner(&dir.path().join("out"));
        runner.cancel_token().cancel();

        let mut events = Vec::new();
        let report = runner.run(&files, &rules(), |e| events.push(e));

        assert_eq!(report.summary.cancelled, 3);
        assert!(!events.iter().any(|e| matches!(e, BatchEvent::Progress(_))));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, BatchEvent::Completed(_)))
                .count(),
            1
        );
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_same_stem_inputs_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for sub in ["a", "b"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
            let path = dir.path().join(sub).join("x.md");
            fs::write(&path, format!("# From {}", sub)).unwrap();
            files.push(path);
        }
        let out_dir = dir.path().join("out");

        for parallel in [false, true] {
            let runner = BatchRunner::new(Arc::new(LexiconClassifier::new()), &out_dir)
                .with_options(StyleOptions::new().with_seed(3).with_parallel(parallel));
            let report = runner.run(&files, &rules(), |_| {});

            assert!(report.outcomes[0].is_success());
            match &report.outcomes[1].status {
                DocumentStatus::Failed { kind, message } => {
                    assert_eq!(*kind, crate::error::ErrorKind::Other);
                    assert!(message.contains("would overwrite"));
                }
                other => panic!("unexpected status {:?}", other),
            }
            let written = fs::read_to_string(out_dir.join("x_styled.md")).unwrap();
            assert_eq!(written, "# **From a**");
        }
    }

    #[test]
    fn test_unsupported_input_claims_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let files = vec![
            PathBuf::from("a/notes"),
            PathBuf::from("a/report.md"),
            PathBuf::from("b/report.md"),
            PathBuf::from("c/report.md"),
        ];
        assert_eq!(runner.output_claims(&files), vec![None, None, Some(1), Some(1)]);
    }

    #[test]
    fn test_empty_batch_completes() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = Vec::new();
        let report = runner(dir.path()).run(&[], &rules(), |e| events.push(e));
        assert_eq!(report.summary.total, 0);
        assert_eq!(
            events,
            vec![
                BatchEvent::Started { total: 0 },
                BatchEvent::Completed(BatchSummary::default())
            ]
        );
    }
}
