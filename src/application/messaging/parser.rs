//! Message parser - Splits raw text into commands and free text

use crate::domain::entities::COMMAND_PREFIX;

/// Shape of one inbound text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<'a> {
    /// Nothing left after trimming
    Empty,
    /// Free text, trimmed
    Text(&'a str),
    /// `name` is lower-cased and keeps its prefix; `args` keep their original casing
    Command { name: String, args: Vec<String> },
}

pub fn parse(raw: &str) -> Parsed<'_> {
    let text = raw.trim();
    if text.is_empty() {
        return Parsed::Empty;
    }

    if !text.starts_with(COMMAND_PREFIX) {
        return Parsed::Text(text);
    }

    let mut parts = text.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args = parts.map(str::to_string).collect();

    Parsed::Command { name, args }
}
