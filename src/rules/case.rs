// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Letter case checks used by the `*-case` rules.

use crate::config::RuleValue;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#"`[^`]*`|"[^"]*"|'[^']*'"#).unwrap();
    static ref CAMEL: Regex = Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap();
    static ref PASCAL: Regex = Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap();
    static ref KEBAB: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    static ref SNAKE: Regex = Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").unwrap();
}

/// A letter case a text can be required to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
    Camel,
    Kebab,
    Pascal,
    Sentence,
    Snake,
    Start,
}

impl Case {
    pub fn as_str(&self) -> &'static str {
        match self {
            Case::Lower => "lower-case",
            Case::Upper => "upper-case",
            Case::Camel => "camel-case",
            Case::Kebab => "kebab-case",
            Case::Pascal => "pascal-case",
            Case::Sentence => "sentence-case",
            Case::Snake => "snake-case",
            Case::Start => "start-case",
        }
    }

    /// Parse a rule value holding one case name or a list of them.
    pub fn parse_value(value: &RuleValue) -> Result<Vec<Case>, String> {
        let names = value
            .as_list()
            .ok_or_else(|| format!("expected case names, found {}", value.kind()))?;
        names.into_iter().map(str::parse).collect()
    }

    /// Whether `text` is in this case.
    ///
    /// Quoted fragments are ignored, and text that is empty or starts with a
    /// digit is in every case.
    pub fn matches(&self, text: &str) -> bool {
        let stripped = QUOTED.replace_all(text, "");
        let input = stripped.trim();
        if input.is_empty() || input.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }

        match self {
            Case::Lower => input == input.to_lowercase(),
            Case::Upper => input == input.to_uppercase(),
            Case::Camel => CAMEL.is_match(input),
            Case::Kebab => KEBAB.is_match(input),
            Case::Pascal => PASCAL.is_match(input),
            Case::Snake => SNAKE.is_match(input),
            Case::Sentence => sentence_form(input) == input,
            Case::Start => start_form(input) == input,
        }
    }
}

/// First character uppercased, everything after it lowercased.
fn sentence_form(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Every word with its first character uppercased, joined by single spaces.
/// Punctuation is dropped and the rest of each word keeps its case, so
/// acronyms survive.
fn start_form(text: &str) -> String {
    words(text)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Split text into words at non-alphanumeric characters, lower-to-upper
/// humps (`fooBar`) and the end of an acronym (`XMLHttp`).
fn words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = index.checked_sub(1).and_then(|i| chars.get(i)) {
            let next_lower = chars.get(index + 1).map_or(false, |n| n.is_lowercase());
            let hump = (prev.is_lowercase() || prev.is_ascii_digit()) && c.is_uppercase();
            let acronym_end = prev.is_uppercase() && c.is_uppercase() && next_lower;
            if !current.is_empty() && (hump || acronym_end) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

impl std::str::FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(Case::Lower),
            "upper-case" | "uppercase" => Ok(Case::Upper),
            "camel-case" => Ok(Case::Camel),
            "kebab-case" => Ok(Case::Kebab),
            "pascal-case" => Ok(Case::Pascal),
            "sentence-case" | "sentencecase" => Ok(Case::Sentence),
            "snake-case" => Ok(Case::Snake),
            "start-case" => Ok(Case::Start),
            other => Err(format!("unknown case '{}'", other)),
        }
    }
}

impl std::fmt::Display for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
