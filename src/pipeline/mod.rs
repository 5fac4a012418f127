//! Generation pipeline: Loader -> Synthesizer -> Writer
//!
//! Each stage runs as a [`Stage`](stage::Stage) with its own parallelism. Inputs enter the Loader, which emits a
//! [`TypeRequest`] per class-like type straight into the Synthesizer queue; the Synthesizer pushes one
//! [`RenderedUnit`] per request into the Writer queue.
//!
//! ## Completion
//! The orchestrator closes the stages strictly in order: all inputs are queued, the Loader is drained, then the
//! Synthesizer, then the Writer. A stage's queue only closes once the stage before it has finished, so no item is
//! ever dropped on the floor.

pub mod loader;
pub(crate) mod stage;
pub mod synthesizer;
pub(crate) mod writer;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::info;

pub use stage::StageKind;

use crate::config::GeneratorConfig;
use crate::descriptor::{RenderedUnit, TypeRequest};
use crate::error::{GenerateError, GenerationFailure};
use crate::frontend::{CSharpParser, SourceParser};
use crate::render::{CSharpRenderer, TestRenderer};
use stage::Stage;
use writer::OutputFiles;

/// Counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Inputs handed to the run
    pub inputs: u64,
    /// Class-like types the Loader emitted
    pub types_discovered: u64,
    /// Test units the Synthesizer rendered
    pub units_rendered: u64,
    /// Test units persisted by the Writer
    pub files_written: u64,
    pub elapsed: Duration,
}

/// Live counters shared by the stage workers.
#[derive(Debug, Default)]
struct RunCounters {
    inputs: AtomicU64,
    types_discovered: AtomicU64,
    units_rendered: AtomicU64,
    files_written: AtomicU64,
}

impl RunCounters {
    fn record_input(&self) {
        self.inputs.fetch_add(1, Ordering::Relaxed);
    }

    fn record_types(&self, count: u64) {
        self.types_discovered.fetch_add(count, Ordering::Relaxed);
    }

    fn record_rendered(&self) {
        self.units_rendered.fetch_add(1, Ordering::Relaxed);
    }

    fn record_written(&self) {
        self.files_written.fetch_add(1, Ordering::Relaxed);
    }

    fn summary(&self, elapsed: Duration) -> GenerationSummary {
        GenerationSummary {
            inputs: self.inputs.load(Ordering::Relaxed),
            types_discovered: self.types_discovered.load(Ordering::Relaxed),
            units_rendered: self.units_rendered.load(Ordering::Relaxed),
            files_written: self.files_written.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

/// Completion handle of a run.
///
/// Resolves once every stage has drained: `Ok` when no item failed, otherwise a [`GenerationFailure`] holding
/// the partial summary and every per-item error.
#[derive(Debug)]
#[must_use = "the run is only observed by awaiting its handle"]
pub struct GenerationHandle {
    task: JoinHandle<Result<GenerationSummary, GenerationFailure>>,
}

impl Future for GenerationHandle {
    type Output = Result<GenerationSummary, GenerationFailure>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.task).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) => Poll::Ready(Err(GenerationFailure {
                summary: GenerationSummary::default(),
                errors: vec![GenerateError::WorkerPanicked {
                    stage: StageKind::Pipeline,
                    message: stage::panic_message(e),
                }],
            })),
        }
    }
}

/// Start generating test units for `inputs` with the C# parser and the configured framework.
///
/// Must be called from within a tokio runtime; the returned handle drives nothing itself, the run proceeds on
/// the runtime whether or not the handle is polled.
///
/// ## Errors
/// [`GenerateError::Configuration`] if the configuration is invalid or no runtime is available. Nothing is
/// started in that case.
pub fn generate_tests<I, P>(config: GeneratorConfig, inputs: I) -> Result<GenerationHandle, GenerateError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let renderer = Arc::new(CSharpRenderer::new(config.framework));
    generate_tests_with(config, inputs, Arc::new(CSharpParser), renderer)
}

/// Like [`generate_tests`], with a caller-supplied parser and renderer.
///
/// ## Errors
/// Same as [`generate_tests`].
pub fn generate_tests_with<I, P>(
    config: GeneratorConfig,
    inputs: I,
    parser: Arc<dyn SourceParser>,
    renderer: Arc<dyn TestRenderer>,
) -> Result<GenerationHandle, GenerateError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    config.validate()?;
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| GenerateError::Configuration(format!("no tokio runtime available: {}", e)))?;

    let inputs: Vec<PathBuf> = inputs.into_iter().map(Into::into).collect();
    let task = runtime.spawn(execute(config, inputs, parser, renderer));
    Ok(GenerationHandle { task })
}

async fn execute(
    config: GeneratorConfig,
    inputs: Vec<PathBuf>,
    parser: Arc<dyn SourceParser>,
    renderer: Arc<dyn TestRenderer>,
) -> Result<GenerationSummary, GenerationFailure> {
    let start = Instant::now();
    let counters = Arc::new(RunCounters::default());
    let output = Arc::new(OutputFiles::new(&config.output_dir, renderer.extension()));
    let search_root = Arc::new(config.search_root.clone());

    info!(
        inputs = inputs.len(),
        output_dir = %output.output_dir().display(),
        load = config.load_parallelism,
        synth = config.synth_parallelism,
        write = config.write_parallelism,
        framework = %config.framework,
        "Starting generation"
    );

    // Built back to front so each stage can capture the next one's sender
    let writer = {
        let counters = Arc::clone(&counters);
        let output = Arc::clone(&output);
        Stage::spawn(StageKind::Write, config.write_parallelism, move |unit: RenderedUnit| {
            let counters = Arc::clone(&counters);
            let output = Arc::clone(&output);
            async move {
                output.write(&unit).await?;
                counters.record_written();
                Ok(())
            }
        })
    };

    let synthesizer = {
        let counters = Arc::clone(&counters);
        let to_writer = writer.sender();
        Stage::spawn(StageKind::Synthesize, config.synth_parallelism, move |request: TypeRequest| {
            let counters = Arc::clone(&counters);
            let renderer = Arc::clone(&renderer);
            let to_writer = to_writer.clone();
            async move {
                let unit = synthesizer::synthesize(&request, renderer.as_ref())?;
                counters.record_rendered();
                to_writer.send(unit)
            }
        })
    };

    let loader = {
        let counters = Arc::clone(&counters);
        let to_synthesizer = synthesizer.sender();
        Stage::spawn(StageKind::Load, config.load_parallelism, move |input: PathBuf| {
            let counters = Arc::clone(&counters);
            let parser = Arc::clone(&parser);
            let search_root = Arc::clone(&search_root);
            let to_synthesizer = to_synthesizer.clone();
            async move {
                let emit_counters = Arc::clone(&counters);
                loader::load(input, &search_root, parser, |request| {
                    emit_counters.record_types(1);
                    to_synthesizer.send(request)
                })
                .await
                .map(|_| ())
            }
        })
    };

    let mut errors = Vec::new();
    for input in inputs {
        counters.record_input();
        if let Err(e) = loader.submit(input) {
            errors.push(e);
        }
    }

    errors.extend(loader.complete().await);
    errors.extend(synthesizer.complete().await);
    errors.extend(writer.complete().await);

    let summary = counters.summary(start.elapsed());
    info!(
        inputs = summary.inputs,
        types = summary.types_discovered,
        written = summary.files_written,
        failed = errors.len(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Generation finished"
    );

    if errors.is_empty() {
        Ok(summary)
    } else {
        Err(GenerationFailure { summary, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_runtime_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_tests(GeneratorConfig::new(dir.path()), ["A.cs"]).unwrap_err();
        match err {
            GenerateError::Configuration(message) => assert!(message.contains("no tokio runtime")),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_run_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate_tests(GeneratorConfig::new(dir.path()), Vec::<PathBuf>::new())
            .unwrap()
            .await
            .unwrap();
        assert_eq!(summary.inputs, 0);
        assert_eq!(summary.files_written, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_counters_snapshot() {
        let counters = RunCounters::default();
        counters.record_input();
        counters.record_types(3);
        counters.record_rendered();
        counters.record_written();
        let summary = counters.summary(Duration::from_millis(5));
        assert_eq!(
            (summary.inputs, summary.types_discovered, summary.units_rendered, summary.files_written),
            (1, 3, 1, 1)
        );
    }
}
