//! Example extraction
//!
//! A line scanner, not an AsciiDoc parser: it only recognizes block attribute
//! lines, `.Title` lines, comments and delimited listing/literal blocks. Anything
//! else is treated as prose separating blocks.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{Block, ConsoleStep, Example, ExampleKind};

static ATTRIBUTE_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<attrs>[^\[\]].*)\]$").expect("attribute pattern is valid"));

static BLOCK_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.(?P<title>[^.\s].*)$").expect("title pattern is valid"));

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?P<lang>[\w+-]*)$").expect("fence pattern is valid"));

static CALLOUTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s+<(\d+|\.)>)+$").expect("callout pattern is valid"));

const PROMPT: &str = "$ ";
const CONTINUATION_PROMPT: &str = "> ";

/// Metadata collected from attribute and title lines, applied to the next block.
#[derive(Debug, Default)]
struct Pending {
    title: Option<String>,
    style: Option<String>,
    language: Option<String>,
    skip: bool,
}

impl Pending {
    fn apply_attributes(&mut self, attrs: &str) {
        let mut position = 0;
        for entry in split_attributes(attrs) {
            if let Some((key, value)) = entry.split_once('=') {
                let value = unquote(value.trim());
                match key.trim() {
                    "options" | "opts" => {
                        if value.split(',').any(|opt| opt.trim() == "skip") {
                            self.skip = true;
                        }
                    }
                    "language" => self.language = Some(value.to_string()),
                    _ => {}
                }
                continue;
            }

            match position {
                0 => {
                    let (style, options) = split_shorthand(&entry);
                    if !style.is_empty() {
                        self.style = Some(style.to_string());
                    }
                    if options.contains(&"skip") {
                        self.skip = true;
                    }
                }
                1 if !entry.is_empty() => self.language = Some(entry.clone()),
                _ => {}
            }
            position += 1;
        }
    }
}

/// Split an attribute list on commas outside double quotes.
fn split_attributes(attrs: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in attrs.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => entries.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    entries.push(current.trim().to_string());
    entries
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `source%skip%nowrap` -> (`source`, [`skip`, `nowrap`]). Role (`.`) and id (`#`)
/// shorthands are dropped.
fn split_shorthand(entry: &str) -> (&str, Vec<&str>) {
    let style_end = entry.find(['%', '#', '.']).unwrap_or(entry.len());
    let (style, rest) = entry.split_at(style_end);

    let options = rest
        .split(['#', '.'])
        .flat_map(|part| part.split('%').skip(1))
        .filter(|opt| !opt.is_empty())
        .collect();

    (style, options)
}

/// Closing delimiter and fence language for a line that opens a block.
fn opening_delimiter(line: &str) -> Option<(String, Option<String>)> {
    let is_run = |ch: char| line.len() >= 4 && line.chars().all(|c| c == ch);
    if is_run('-') || is_run('.') || is_run('/') {
        return Some((line.to_string(), None));
    }

    FENCE.captures(line).map(|caps| {
        let lang = caps["lang"].to_string();
        ("```".to_string(), (!lang.is_empty()).then_some(lang))
    })
}

/// Find every delimited listing/literal block, with its metadata.
#[must_use]
pub fn extract_blocks(source: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut pending = Pending::default();
    let mut prose_since_block = false;
    let mut lines = source.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some((closing, fence_language)) = opening_delimiter(line) {
            let mut content = Vec::new();
            let mut closed = false;
            for (_, inner) in lines.by_ref() {
                if inner.trim_end() == closing {
                    closed = true;
                    break;
                }
                content.push(inner.to_string());
            }

            if closing.starts_with('/') {
                pending = Pending::default();
                continue;
            }
            if !closed {
                tracing::debug!(line = index + 1, "unterminated block runs to end of document");
            }

            let meta = std::mem::take(&mut pending);
            blocks.push(Block {
                line: index + 1,
                title: meta.title,
                style: meta.style.or_else(|| fence_language.as_ref().map(|_| "source".to_string())),
                language: meta.language.or(fence_language),
                skip: meta.skip,
                follows_previous: !blocks.is_empty() && !prose_since_block,
                content,
            });
            prose_since_block = false;
            continue;
        }

        if line.starts_with("//") {
            continue;
        }
        if let Some(caps) = ATTRIBUTE_LIST.captures(line) {
            pending.apply_attributes(&caps["attrs"]);
            continue;
        }
        if let Some(caps) = BLOCK_TITLE.captures(line) {
            pending.title = Some(caps["title"].trim().to_string());
            continue;
        }

        pending = Pending::default();
        prose_since_block = true;
    }

    blocks
}

/// Split a console transcript into commands and their expected output.
///
/// Lines before the first prompt are ignored. A command ending in `\` continues
/// on the next line, which may start with a `> ` prompt.
fn parse_transcript(block: &Block) -> Vec<ConsoleStep> {
    let mut steps: Vec<ConsoleStep> = Vec::new();
    let mut lines = block.content.iter().enumerate();

    while let Some((offset, raw)) = lines.next() {
        let line = CALLOUTS.replace(raw.trim_end(), "");
        if let Some(command) = line.trim_start().strip_prefix(PROMPT) {
            let mut command = command.trim_end().to_string();
            while command.ends_with('\\') {
                command.pop();
                let Some((_, next)) = lines.next() else {
                    break;
                };
                let next = next.trim();
                command.push(' ');
                command.push_str(next.strip_prefix(CONTINUATION_PROMPT).unwrap_or(next));
            }
            steps.push(ConsoleStep {
                line: block.line + 1 + offset,
                command: command.trim().to_string(),
                expected: Vec::new(),
            });
        } else if let Some(step) = steps.last_mut() {
            step.expected.push(line.into_owned());
        }
    }

    steps
}

/// Extract checkable examples, skipping blocks marked `skip`.
#[must_use]
pub fn extract_examples(source: &str, console_languages: &[String]) -> Vec<Example> {
    let blocks = extract_blocks(source);
    let mut examples = Vec::new();
    let mut index = 0;

    while index < blocks.len() {
        let block = &blocks[index];
        index += 1;

        if block.skip {
            continue;
        }

        if block.is_language("asciidoc")
            && let Some(expected) = blocks.get(index)
            && expected.follows_previous
            && expected.is_language("html")
            && !expected.skip
        {
            examples.push(Example {
                line: block.line,
                title: block.title.clone().or_else(|| expected.title.clone()),
                kind: ExampleKind::Render {
                    asciidoc: block.content.join("\n"),
                    expected_html: expected.content.join("\n"),
                },
            });
            index += 1;
            continue;
        }

        if console_languages.iter().any(|lang| block.is_language(lang)) {
            let steps = parse_transcript(block);
            if steps.is_empty() {
                tracing::debug!(line = block.line, "console block without commands");
                continue;
            }
            examples.push(Example {
                line: block.line,
                title: block.title.clone(),
                kind: ExampleKind::Console { steps },
            });
        }
    }

    examples
}
