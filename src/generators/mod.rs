//! Test-stub generators
//!
//! Lint results map to generated test files through a pluggable generator, so
//! a host test suite picks up one test per linted file. Two dialects ship
//! built in (QUnit and Mocha); callers can register their own by supplying a
//! [`TestGenerator`] implementation, or a bare rendering closure through
//! [`FnGenerator`].

use crate::error::FilterError;
use crate::message::LintMessage;
use dyn_clone::DynClone;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub mod mocha;
pub mod qunit;

pub use mocha::MochaGenerator;
pub use qunit::QUnitGenerator;

/// Suite label stamped into generated stubs.
pub const SUITE_LABEL: &str = "MarkdownLint";

/// Renders lint results for one file as test source in some dialect.
pub trait TestGenerator: DynClone + Send + Sync {
    /// Full stub for one file: suite framing around a single pass/fail test.
    fn suite(&self, relative_path: &str, messages: &[LintMessage]) -> String;

    /// Bare test named after the file, for grouped mode; the host frames a
    /// batch of these with [`suite_header`](Self::suite_header) and
    /// [`suite_footer`](Self::suite_footer).
    fn test_only(&self, relative_path: &str, messages: &[LintMessage]) -> String;

    fn suite_header(&self, group: &str) -> String;

    fn suite_footer(&self) -> String;
}

dyn_clone::clone_trait_object!(TestGenerator);

/// Available built-in generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    QUnit,
    Mocha,
}

impl GeneratorKind {
    /// Parse a generator kind from its registry name.
    pub fn from_str(s: &str) -> Result<Self, FilterError> {
        match s.to_lowercase().as_str() {
            "qunit" => Ok(GeneratorKind::QUnit),
            "mocha" => Ok(GeneratorKind::Mocha),
            _ => Err(FilterError::UnknownGenerator {
                name: s.to_string(),
                known: Self::names().join(", "),
            }),
        }
    }

    /// Registry names of the built-in generators.
    pub fn names() -> &'static [&'static str] {
        &["qunit", "mocha"]
    }

    /// Create a generator instance for this kind.
    pub fn create_generator(&self) -> Box<dyn TestGenerator> {
        match self {
            GeneratorKind::QUnit => Box::new(QUnitGenerator::new()),
            GeneratorKind::Mocha => Box::new(MochaGenerator::new()),
        }
    }
}

/// How the filter renders test stubs.
#[derive(Clone)]
pub enum GeneratorChoice {
    /// A built-in dialect, by registry name.
    Named(String),
    /// A caller-supplied generator.
    Custom(Box<dyn TestGenerator>),
    /// Lint gate only: no stub output.
    Disabled,
}

impl GeneratorChoice {
    /// Wrap a bare rendering closure as a custom generator.
    pub fn custom<F>(render: F) -> Self
    where
        F: Fn(&str, &[LintMessage]) -> String + Send + Sync + 'static,
    {
        GeneratorChoice::Custom(Box::new(FnGenerator::new(render)))
    }
}

impl Default for GeneratorChoice {
    fn default() -> Self {
        GeneratorChoice::Named("qunit".to_string())
    }
}

impl fmt::Debug for GeneratorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorChoice::Named(name) => f.debug_tuple("Named").field(name).finish(),
            GeneratorChoice::Custom(_) => f.write_str("Custom(..)"),
            GeneratorChoice::Disabled => f.write_str("Disabled"),
        }
    }
}

impl Serialize for GeneratorChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeneratorChoice::Named(name) => serializer.serialize_str(name),
            // functions have no serialized form; every custom hashes alike
            GeneratorChoice::Custom(_) => serializer.serialize_str("custom"),
            GeneratorChoice::Disabled => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for GeneratorChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name: Option<String> = Option::deserialize(deserializer)?;
        Ok(match name {
            Some(name) => GeneratorChoice::Named(name),
            None => GeneratorChoice::Disabled,
        })
    }
}

/// Adapts a plain rendering function to the [`TestGenerator`] trait.
///
/// The closure receives the relative path and the filtered failure list and
/// returns the emitted file content verbatim; grouped-mode framing degrades
/// to empty strings.
#[derive(Clone)]
pub struct FnGenerator {
    render: Arc<dyn Fn(&str, &[LintMessage]) -> String + Send + Sync>,
}

impl FnGenerator {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&str, &[LintMessage]) -> String + Send + Sync + 'static,
    {
        Self { render: Arc::new(render) }
    }
}

impl fmt::Debug for FnGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnGenerator(..)")
    }
}

impl TestGenerator for FnGenerator {
    fn suite(&self, relative_path: &str, messages: &[LintMessage]) -> String {
        (self.render)(relative_path, messages)
    }

    fn test_only(&self, relative_path: &str, messages: &[LintMessage]) -> String {
        (self.render)(relative_path, messages)
    }

    fn suite_header(&self, _group: &str) -> String {
        String::new()
    }

    fn suite_footer(&self) -> String {
        String::new()
    }
}

/// Whether a message list counts as passing: no fatal message present.
pub fn has_passed(messages: &[LintMessage]) -> bool {
    !messages.iter().any(|m| m.fatal)
}

/// Render the fatal messages as display lines, newline-joined, input order.
pub fn render_failures(messages: &[LintMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.fatal)
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The assertion message embedded in a stub: the pass expectation, plus the
/// rendered failures when the file fails.
pub fn assertion_message(relative_path: &str, messages: &[LintMessage]) -> String {
    let mut message = format!("{relative_path} should pass {SUITE_LABEL}");
    if !has_passed(messages) {
        message.push_str("\n\n");
        message.push_str(&render_failures(messages));
    }
    message
}

pub(crate) fn pass_test_name() -> String {
    format!("should pass {SUITE_LABEL}")
}

/// Escape a string for embedding in generated single-quoted JS source.
pub(crate) fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
}

#[cfg(test)]
pub(crate) fn sample_failures() -> Vec<LintMessage> {
    vec![
        LintMessage {
            name: "file.md:42:13".to_string(),
            reason: "This is not a valid foo".to_string(),
            rule_id: Some("validate-foo".to_string()),
            source: None,
            fatal: true,
            line: Some(42),
            column: Some(13),
            file: Some("file.md".to_string()),
        },
        LintMessage {
            name: "file.md:123:1".to_string(),
            reason: "foobar".to_string(),
            rule_id: Some("comma-dangle".to_string()),
            source: None,
            fatal: true,
            line: Some(123),
            column: Some(1),
            file: Some("file.md".to_string()),
        },
    ]
}
