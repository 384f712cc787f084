//! Filename rule engine: prioritized regex rules that turn a bare filename
//! into a [`BookDraft`].
//!
//! Rules are tried in the order given; the first pattern that matches wins.
//! Sorting by priority is the loader's job, never the parser's.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::types::BookDraft;

/// Named capture groups a rule may bind: `author`, `title`, `subtitle`,
/// `volume`, `original_author`, `series`, `magazine_flag`.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Diagnostic only; never used for matching.
    pub name: String,
    pub pattern: Regex,
    pub priority: i64,
}

/// On-disk rule shape (JSON array of these).
#[derive(Debug, Deserialize)]
struct RawRule {
    name: String,
    regex: String,
    priority: i64,
}

impl RawRule {
    fn compile(self) -> Result<Rule> {
        let pattern = Regex::new(&self.regex)
            .with_context(|| format!("compile rule pattern: {}", self.name))?;
        Ok(Rule {
            name: self.name,
            pattern,
            priority: self.priority,
        })
    }
}

/// Loads parsing rules from a JSON file, sorted ascending by priority.
/// Falls back to the built-in rule set when the file does not exist.
pub struct RuleLoader {
    rules_path: PathBuf,
}

impl RuleLoader {
    pub fn new(rules_path: impl Into<PathBuf>) -> Self {
        Self {
            rules_path: rules_path.into(),
        }
    }

    pub fn load(&self) -> Result<Vec<Rule>> {
        if !self.rules_path.exists() {
            log::debug!(
                "no rule file at {}, using built-in rules",
                self.rules_path.display()
            );
            return default_rules();
        }
        let file = File::open(&self.rules_path).context("open rule file")?;
        let raw: Vec<RawRule> = serde_json::from_reader(file).context("parse rule file")?;
        let mut rules = raw
            .into_iter()
            .map(RawRule::compile)
            .collect::<Result<Vec<_>>>()?;
        rules.sort_by_key(|r| r.priority);
        Ok(rules)
    }
}

/// Built-in rule set used when no external rule file exists:
/// a bracket-author-prefixed pattern and a trailing-parenthesized-author
/// pattern, both tolerating the 第N巻 / N巻 volume forms and the
/// magazine-anthology marker.
pub fn default_rules() -> Result<Vec<Rule>> {
    let raw = vec![
        RawRule {
            name: "[著者] タイトル 第N巻 (雑誌版対応)".to_string(),
            regex: r"^\[(?P<author>.+?)\]\s*(?P<title>.+?)\s+第?(?P<volume>\d+)巻(?P<magazine_flag>\s*\(雑誌寄せ集め\))?.*".to_string(),
            priority: 1,
        },
        RawRule {
            name: "タイトル N巻 (著者) (雑誌版対応)".to_string(),
            regex: r"^(?P<title>.+?)\s*第?(?P<volume>\d+)巻\s*\((?P<author>.+?)\)(?P<magazine_flag>\s*\(雑誌寄せ集め\))?.*".to_string(),
            priority: 2,
        },
    ];
    let mut rules = raw
        .into_iter()
        .map(RawRule::compile)
        .collect::<Result<Vec<_>>>()?;
    rules.sort_by_key(|r| r.priority);
    Ok(rules)
}

/// Extracts book metadata from filenames by trying each rule in order.
pub struct FileNameParser {
    rules: Vec<Rule>,
}

fn group(caps: &Captures<'_>, name: &str) -> Option<String> {
    // Unmatched groups stay unset; they are never defaulted to "".
    caps.name(name).map(|m| m.as_str().to_string())
}

/// Strip the last dot-suffix. A leading dot is part of the name, not an
/// extension, matching `Path::file_stem` semantics.
fn strip_extension(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

impl FileNameParser {
    /// The given order is trusted as ascending priority; the parser never
    /// re-sorts.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Result<Self> {
        Ok(Self::new(default_rules()?))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Parse a filename (extension optional) into a draft. Matching is a
    /// search, not a full-string anchor, unless the rule anchors itself.
    /// When no rule matches, the whole extension-stripped name becomes the
    /// title and every other field stays unset.
    pub fn parse(&self, filename: &str) -> BookDraft {
        let base = strip_extension(filename);

        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(base) else {
                continue;
            };
            log::debug!("rule matched: {} <- {}", rule.name, base);
            let volume = caps
                .name("volume")
                .map(|m| m.as_str())
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse().ok());
            let is_magazine = caps
                .name("magazine_flag")
                .is_some_and(|m| !m.as_str().is_empty());
            return BookDraft {
                title: group(&caps, "title"),
                subtitle: group(&caps, "subtitle"),
                volume,
                author: group(&caps, "author"),
                original_author: group(&caps, "original_author"),
                series: group(&caps, "series"),
                is_magazine_collection: is_magazine,
            };
        }

        BookDraft {
            title: Some(base.to_string()),
            ..BookDraft::default()
        }
    }
}
