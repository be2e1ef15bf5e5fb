//! Host pipeline node introspection
//!
//! The build host hands the filter an opaque node from its dependency graph.
//! The filter only needs one thing from it: the concrete source directory the
//! files (and the engine's rc files) live under. [`PipelineNode`] models the
//! minimal introspection protocol for that walk, and bare paths count as
//! source nodes so callers without a pipeline can pass a directory directly.

use crate::error::FilterError;
use std::path::{Path, PathBuf};

/// What a pipeline node is willing to reveal about itself.
pub enum NodeInfo<'a> {
    /// A leaf node backed by an on-disk directory.
    Source { directory: &'a Path },
    /// A derived node with upstream inputs.
    Transform { inputs: &'a [Box<dyn PipelineNode>] },
}

/// An abstract input node in the host build graph.
pub trait PipelineNode {
    fn node_info(&self) -> NodeInfo<'_>;
}

impl PipelineNode for Path {
    fn node_info(&self) -> NodeInfo<'_> {
        NodeInfo::Source { directory: self }
    }
}

impl PipelineNode for PathBuf {
    fn node_info(&self) -> NodeInfo<'_> {
        NodeInfo::Source { directory: self.as_path() }
    }
}

impl PipelineNode for str {
    fn node_info(&self) -> NodeInfo<'_> {
        NodeInfo::Source { directory: Path::new(self) }
    }
}

impl PipelineNode for String {
    fn node_info(&self) -> NodeInfo<'_> {
        NodeInfo::Source { directory: Path::new(self.as_str()) }
    }
}

/// Recursively unwrap `node` to the source directory it draws from.
///
/// Lint configuration is resolved relative to the returned directory, so the
/// walk only succeeds through one:* nodes: a fan-in node would make the
/// configuration directory ambiguous and fails with
/// [`FilterError::AmbiguousInput`].
pub fn resolve_input_directory<N: PipelineNode + ?Sized>(node: &N) -> Result<PathBuf, FilterError> {
    match node.node_info() {
        NodeInfo::Source { directory } => Ok(directory.to_path_buf()),
        NodeInfo::Transform { inputs } => match inputs {
            [] => Err(FilterError::EmptyInput),
            [single] => resolve_input_directory(single.as_ref()),
            _ => Err(FilterError::AmbiguousInput),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Chain(Vec<Box<dyn PipelineNode>>);

    impl PipelineNode for Chain {
        fn node_info(&self) -> NodeInfo<'_> {
            NodeInfo::Transform { inputs: &self.0 }
        }
    }

    #[test]
    fn test_bare_path_is_a_source_node() {
        let dir = resolve_input_directory(Path::new("docs")).unwrap();
        assert_eq!(dir, PathBuf::from("docs"));

        let dir = resolve_input_directory(&"docs".to_string()).unwrap();
        assert_eq!(dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_resolves_through_single_input_chain() {
        let inner = Chain(vec![Box::new(PathBuf::from("docs"))]);
        let outer = Chain(vec![Box::new(inner)]);

        let dir = resolve_input_directory(&outer).unwrap();
        assert_eq!(dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_fails_on_fan_in_node() {
        let merged = Chain(vec![Box::new(PathBuf::from("a")), Box::new(PathBuf::from("b"))]);
        let outer = Chain(vec![Box::new(merged)]);

        let err = resolve_input_directory(&outer).unwrap_err();
        assert!(matches!(err, FilterError::AmbiguousInput));
        assert!(err.to_string().contains("many:*"));
    }

    #[test]
    fn test_fails_on_empty_transform() {
        let empty = Chain(vec![]);
        let err = resolve_input_directory(&empty).unwrap_err();
        assert!(matches!(err, FilterError::EmptyInput));
    }
}
