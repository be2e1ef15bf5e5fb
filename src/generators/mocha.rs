//! Mocha test-stub dialect

use crate::generators::{SUITE_LABEL, TestGenerator, assertion_message, escape_js, has_passed, pass_test_name};
use crate::message::LintMessage;

/// Renders stubs as Mocha describe blocks; failures throw a chai
/// `AssertionError` from the test body.
#[derive(Debug, Clone, Default)]
pub struct MochaGenerator;

impl MochaGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn render_test(test_name: &str, passed: bool, message: &str) -> String {
    let mut out = format!("  it('{}', function() {{\n", escape_js(test_name));
    if passed {
        out.push_str("    // test passed\n");
    } else {
        out.push_str("    // test failed\n");
        out.push_str(&format!(
            "    var error = new chai.AssertionError('{}');\n",
            escape_js(message)
        ));
        out.push_str("    error.stack = undefined;\n");
        out.push_str("    throw error;\n");
    }
    out.push_str("  });\n");
    out
}

impl TestGenerator for MochaGenerator {
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
        format!("describe('{SUITE_LABEL} | {}', function() {{\n", escape_js(group))
    }

    fn suite_footer(&self) -> String {
        "});\n".to_string()
    }
}
