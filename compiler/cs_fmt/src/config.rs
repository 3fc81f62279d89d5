//! Reflow configuration.

use cs_syntax::{factory, GreenTrivia};

/// Default indentation: four spaces per level.
pub const DEFAULT_INDENT: &str = "    ";

/// Whitespace policy for a reflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflowConfig {
    /// Whitespace inserted once per indentation level.
    pub indent_unit: String,
    /// Text of every inserted line break.
    pub end_of_line: String,
    /// Mark inserted trivia elastic so a later formatting pass may replace it.
    pub use_elastic_trivia: bool,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        ReflowConfig {
            indent_unit: DEFAULT_INDENT.to_owned(),
            end_of_line: "\n".to_owned(),
            use_elastic_trivia: false,
        }
    }
}

impl ReflowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent with one tab per level.
    #[must_use]
    pub fn with_tabs(self) -> Self {
        self.with_indent_unit("\t")
    }

    #[must_use]
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_end_of_line(mut self, eol: impl Into<String>) -> Self {
        self.end_of_line = eol.into();
        self
    }

    #[must_use]
    pub fn with_elastic_trivia(mut self, elastic: bool) -> Self {
        self.use_elastic_trivia = elastic;
        self
    }

    pub(crate) fn whitespace(&self, text: &str) -> GreenTrivia {
        if self.use_elastic_trivia {
            factory::elastic_whitespace(text)
        } else {
            factory::whitespace(text)
        }
    }

    pub(crate) fn line_break(&self) -> GreenTrivia {
        if self.use_elastic_trivia {
            factory::elastic_end_of_line(&self.end_of_line)
        } else {
            factory::end_of_line(&self.end_of_line)
        }
    }

    pub(crate) fn space(&self) -> GreenTrivia {
        if self.use_elastic_trivia {
            factory::elastic_space()
        } else {
            factory::space()
        }
    }
}
