//! mdgate: a markdown lint gate for incremental build pipelines
//!
//! A build host loads [`LintFilter`] as a per-file transform over a tree of
//! markdown sources. For each file the filter derives a persistent-cache key
//! from (content, relative path, resolved options), delegates linting to an
//! external engine, and emits a generated test stub asserting the file passed
//! lint — in QUnit or Mocha dialect, or any caller-supplied generator.
//!
//! The filter deliberately owns very little: tree walking, rebuild
//! scheduling, and cache storage belong to the host; parsing and rule
//! evaluation belong to the engine behind [`LintEngine`].
//!
//! ```no_run
//! use mdgate::{ContentFilter, FilterOptions, LintFilter};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), mdgate::FilterError> {
//! let filter = LintFilter::new(Path::new("docs"), FilterOptions::default())?;
//!
//! let content = "# Title\n";
//! let key = filter.cache_key(content, Path::new("a.md"));
//! let report = filter.process(content, Path::new("a.md"))?;
//! filter.post_process(&report);
//!
//! // the host stores `report.output` under `key` and writes a.lint-test.js
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod engine;
pub mod error;
pub mod filter;
pub mod generators;
pub mod message;
pub mod node;

pub use engine::{CommandEngine, CommandEngineConfig, EngineError, LintEngine};
pub use error::FilterError;
pub use filter::{
    ContentFilter, FileReport, FilterOptions, LintFilter, MARKDOWN_EXTENSIONS, TARGET_EXTENSION,
};
pub use generators::{FnGenerator, GeneratorChoice, GeneratorKind, TestGenerator};
pub use message::LintMessage;
pub use node::{NodeInfo, PipelineNode, resolve_input_directory};
