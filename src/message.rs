//! Normalized lint messages
//!
//! Every engine adapter reports through [`LintMessage`], regardless of how the
//! underlying engine structures its output. The serde field names match the
//! camelCase wire shape emitted by the common reporter family, so a JSON
//! report can deserialize directly into a message list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single message reported by the lint engine for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Position-qualified label, e.g. `a.md:1:1`.
    pub name: String,
    /// Human-readable description of the problem.
    pub reason: String,
    /// Identifier of the rule that produced the message. `None` for
    /// non-rule output such as parse chatter or informational notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Plugin or source that produced the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Whether the message marks a lint failure.
    #[serde(default)]
    pub fatal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Relative path the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl LintMessage {
    /// Whether this message counts against the file: fatal and tagged with a
    /// rule. Everything else (ignored-file notes, info output) passes through
    /// the engine without failing the gate.
    pub fn is_lint_failure(&self) -> bool {
        self.fatal && self.rule_id.is_some()
    }
}

impl fmt::Display for LintMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.reason)?;
        if let Some(rule_id) = &self.rule_id {
            write!(f, " ({rule_id})")?;
        }
        Ok(())
    }
}
