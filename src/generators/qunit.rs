//! QUnit test-stub dialect

use crate::generators::{SUITE_LABEL, TestGenerator, assertion_message, escape_js, has_passed, pass_test_name};
use crate::message::LintMessage;

/// Renders stubs as QUnit modules with a single assertion per file.
#[derive(Debug, Clone, Default)]
pub struct QUnitGenerator;

impl QUnitGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn render_test(test_name: &str, passed: bool, message: &str) -> String {
    format!(
        "QUnit.test('{}', function(assert) {{\n  assert.expect(1);\n  assert.ok({}, '{}');\n}});\n",
        escape_js(test_name),
        passed,
        escape_js(message)
    )
}

impl TestGenerator for QUnitGenerator {
    fn suite(&self, relative_path: &str, messages: &[LintMessage]) -> String {
        let mut out = self.suite_header(relative_path);
        out.push_str(&render_test(
            &pass_test_name(),
            has_passed(messages),
            &assertion_message(relative_path, messages),
        ));
        out.push_str(&self.suite_footer());
        out
    }

    fn test_only(&self, relative_path: &str, messages: &[LintMessage]) -> String {
        render_test(
            relative_path,
            has_passed(messages),
            &assertion_message(relative_path, messages),
        )
    }

    fn suite_header(&self, group: &str) -> String {
        format!("QUnit.module('{SUITE_LABEL} | {}');\n", escape_js(group))
    }

    fn suite_footer(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::sample_failures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generates_passing_suite_for_no_messages() {
        let generator = QUnitGenerator::new();

        assert_eq!(
            generator.suite("some/file.md", &[]).trim(),
            "QUnit.module('MarkdownLint | some/file.md');\n\
             QUnit.test('should pass MarkdownLint', function(assert) {\n\
             \x20\x20assert.expect(1);\n\
             \x20\x20assert.ok(true, 'some/file.md should pass MarkdownLint');\n\
             });"
        );
    }

    #[test]
    fn test_generates_passing_suite_for_non_fatal_messages() {
        let generator = QUnitGenerator::new();
        let mut messages = sample_failures();
        for m in &mut messages {
            m.fatal = false;
        }

        let stub = generator.suite("some/file.md", &messages);
        assert!(stub.contains("assert.ok(true, 'some/file.md should pass MarkdownLint');"));
    }

    #[test]
    fn test_renders_error_messages() {
        let generator = QUnitGenerator::new();

        assert_eq!(
            generator.suite("some/file.md", &sample_failures()).trim(),
            "QUnit.module('MarkdownLint | some/file.md');\n\
             QUnit.test('should pass MarkdownLint', function(assert) {\n\
             \x20\x20assert.expect(1);\n\
             \x20\x20assert.ok(false, 'some/file.md should pass MarkdownLint\\n\\n\
             file.md:42:13 - This is not a valid foo (validate-foo)\\n\
             file.md:123:1 - foobar (comma-dangle)');\n\
             });"
        );
    }

    #[test]
    fn test_test_only_passing() {
        let generator = QUnitGenerator::new();

        assert_eq!(
            generator.test_only("some/file.md", &[]).trim(),
            "QUnit.test('some/file.md', function(assert) {\n\
             \x20\x20assert.expect(1);\n\
             \x20\x20assert.ok(true, 'some/file.md should pass MarkdownLint');\n\
             });"
        );
    }

    #[test]
    fn test_test_only_failing() {
        let generator = QUnitGenerator::new();
        let stub = generator.test_only("some/file.md", &sample_failures());

        assert!(stub.starts_with("QUnit.test('some/file.md', function(assert) {"));
        assert!(stub.contains("assert.ok(false,"));
        assert!(!stub.contains("QUnit.module"));
    }

    #[test]
    fn test_group_framing() {
        let generator = QUnitGenerator::new();

        assert_eq!(generator.suite_header("docs"), "QUnit.module('MarkdownLint | docs');\n");
        assert_eq!(generator.suite_footer(), "");
    }

    #[test]
    fn test_escapes_quotes_in_path() {
        let generator = QUnitGenerator::new();
        let stub = generator.suite("it's.md", &[]);

        assert!(stub.contains("QUnit.module('MarkdownLint | it\\'s.md');"));
    }
}
