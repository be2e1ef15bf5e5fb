//! The lint filter
//!
//! [`LintFilter`] is the plugin the build host loads: a per-file transform
//! that claims markdown sources, keys the host's persistent cache off
//! (content, path, options), runs the lint engine, and emits one generated
//! test stub per input file. The host drives it through [`ContentFilter`];
//! everything upstream (tree walking, scheduling, cache storage) is the
//! host's, not ours.

use crate::cache;
use crate::engine::{CommandEngine, CommandEngineConfig, LintEngine};
use crate::error::FilterError;
use crate::generators::{GeneratorChoice, GeneratorKind, TestGenerator};
use crate::message::LintMessage;
use crate::node::{PipelineNode, resolve_input_directory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Markdown file extensions the filter claims.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mdwn", "mkd", "mkdn", "mkdown"];

/// Extension of emitted files: `a.md` becomes `a.lint-test.js`.
pub const TARGET_EXTENSION: &str = "lint-test.js";

/// Per-file transform contract the host drives.
pub trait ContentFilter {
    /// Input extensions this filter claims.
    fn extensions(&self) -> &[&str];

    /// Extension of emitted files.
    fn target_extension(&self) -> &str;

    /// Persistent-cache key for one input file.
    fn cache_key(&self, content: &str, relative_path: &Path) -> String;

    /// Transform one input file into its report and emitted output.
    fn process(&self, content: &str, relative_path: &Path) -> Result<FileReport, FilterError>;

    /// Hook run after `process` (and after cache writes): failure reporting.
    fn post_process(&self, report: &FileReport);
}

/// Resolved filter options.
///
/// The serialized form participates in the cache key, so every data-bearing
/// field invalidates cached results when it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    /// Host-facing label for this filter instance.
    pub annotation: Option<String>,
    /// Whether the host should persist results across builds.
    pub persist: bool,
    /// How stubs are rendered; defaults to the QUnit dialect.
    pub test_generator: GeneratorChoice,
    /// Grouped mode: emit bare tests and let the host frame a batch of them
    /// with [`LintFilter::suite_header`] and [`LintFilter::suite_footer`].
    pub group: Option<String>,
    /// Shipped-engine configuration; ignored when an engine instance is
    /// injected through [`LintFilter::with_engine`].
    pub engine: CommandEngineConfig,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            annotation: None,
            persist: true,
            test_generator: GeneratorChoice::default(),
            group: None,
            engine: CommandEngineConfig::default(),
        }
    }
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Pipeline-relative path of the input file.
    pub relative_path: String,
    /// Messages that survived the failure filter, in engine order.
    pub failures: Vec<LintMessage>,
    /// Rendered stub, `None` when generation is disabled.
    pub output: Option<String>,
}

/// The markdown lint gate.
pub struct LintFilter {
    options: FilterOptions,
    config_dir: PathBuf,
    engine: Box<dyn LintEngine>,
    generator: Option<Box<dyn TestGenerator>>,
}

impl std::fmt::Debug for LintFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintFilter")
            .field("options", &self.options)
            .field("config_dir", &self.config_dir)
            .field("has_generator", &self.generator.is_some())
            .finish_non_exhaustive()
    }
}

impl LintFilter {
    /// Build a filter over `input`, delegating to the configured external
    /// lint command.
    ///
    /// Fails when the input pipeline cannot be resolved to a single source
    /// directory, or when the options name an unknown test generator.
    pub fn new<N: PipelineNode + ?Sized>(
        input: &N,
        options: FilterOptions,
    ) -> Result<Self, FilterError> {
        let engine = Box::new(CommandEngine::new(options.engine.clone()));
        Self::with_engine(input, options, engine)
    }

    /// Build a filter with a caller-supplied engine.
    pub fn with_engine<N: PipelineNode + ?Sized>(
        input: &N,
        options: FilterOptions,
        engine: Box<dyn LintEngine>,
    ) -> Result<Self, FilterError> {
        let config_dir = resolve_input_directory(input)?;
        let generator = match &options.test_generator {
            GeneratorChoice::Named(name) => Some(GeneratorKind::from_str(name)?.create_generator()),
            GeneratorChoice::Custom(generator) => Some(generator.clone()),
            GeneratorChoice::Disabled => None,
        };

        log::debug!(
            "lint filter over {} (generator: {:?}, persist: {})",
            config_dir.display(),
            options.test_generator,
            options.persist
        );

        Ok(Self {
            options,
            config_dir,
            engine,
            generator,
        })
    }

    /// Registry names of the built-in test generators. Returns a fresh list;
    /// the registry itself is fixed.
    pub fn test_generators() -> Vec<String> {
        GeneratorKind::names().iter().map(|name| name.to_string()).collect()
    }

    /// Directory lint configuration is resolved against.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Suite framing for grouped mode; empty when not grouped or when
    /// generation is disabled.
    pub fn suite_header(&self) -> String {
        match (&self.options.group, &self.generator) {
            (Some(group), Some(generator)) => generator.suite_header(group),
            _ => String::new(),
        }
    }

    /// Closing counterpart of [`suite_header`](Self::suite_header).
    pub fn suite_footer(&self) -> String {
        match (&self.options.group, &self.generator) {
            (Some(_), Some(generator)) => generator.suite_footer(),
            _ => String::new(),
        }
    }

    fn render(&self, relative_path: &str, failures: &[LintMessage]) -> Option<String> {
        let generator = self.generator.as_ref()?;
        Some(if self.options.group.is_some() {
            generator.test_only(relative_path, failures)
        } else {
            generator.suite(relative_path, failures)
        })
    }
}

impl ContentFilter for LintFilter {
    fn extensions(&self) -> &[&str] {
        MARKDOWN_EXTENSIONS
    }

    fn target_extension(&self) -> &str {
        TARGET_EXTENSION
    }

    fn cache_key(&self, content: &str, relative_path: &Path) -> String {
        cache::cache_key(content, relative_path, &self.options)
    }

    fn process(&self, content: &str, relative_path: &Path) -> Result<FileReport, FilterError> {
        let messages = self.engine.lint(&self.config_dir, relative_path, content)?;
        let failures: Vec<LintMessage> =
            messages.into_iter().filter(|m| m.is_lint_failure()).collect();

        let relative = relative_path.to_string_lossy().into_owned();
        log::debug!("linted {relative}: {} failure(s)", failures.len());

        let output = self.render(&relative, &failures);
        Ok(FileReport {
            relative_path: relative,
            failures,
            output,
        })
    }

    fn post_process(&self, report: &FileReport) {
        for failure in &report.failures {
            log::warn!("{failure}");
        }
    }
}
