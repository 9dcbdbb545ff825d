/// A delimited listing or literal block found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// 1-based line of the opening delimiter
    pub line: usize,
    /// Text of a preceding `.Title` line
    pub title: Option<String>,
    /// First positional attribute, e.g. `source`
    pub style: Option<String>,
    /// Second positional attribute of a source block, e.g. `console`
    pub language: Option<String>,
    /// Block carries `%skip` or `options=skip`
    pub skip: bool,
    /// Only blank lines, titles or attribute lines separate this block from the previous one
    pub follows_previous: bool,
    pub content: Vec<String>,
}

impl Block {
    /// True when the block is a source block in `language` (case-insensitive).
    #[must_use]
    pub fn is_language(&self, language: &str) -> bool {
        self.language
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
    }
}

/// One command of a console transcript and the output it should print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleStep {
    /// 1-based document line of the `$ ` prompt
    pub line: usize,
    pub command: String,
    pub expected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleKind {
    Console { steps: Vec<ConsoleStep> },
    Render { asciidoc: String, expected_html: String },
}

/// A checkable example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// 1-based line of the (first) block
    pub line: usize,
    pub title: Option<String>,
    pub kind: ExampleKind,
}

impl Example {
    /// `line 12 (Title)` or `line 12`.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => format!("line {} ({title})", self.line),
            None => format!("line {}", self.line),
        }
    }
}
