//! Error types for the lint filter.

use crate::engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error(
        "LintFilter can only resolve one:* pipeline nodes, but part of the given input pipeline \
         is a many:* node (a merged tree, for example); perform many:* operations after linting"
    )]
    AmbiguousInput,
    #[error("cannot resolve an input directory from a pipeline node with no inputs")]
    EmptyInput,
    #[error("could not find '{name}' test generator (known generators: {known})")]
    UnknownGenerator { name: String, known: String },
    #[error("lint engine failed: {0}")]
    Engine(#[from] EngineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
