//! YARA rule rendering.
//!
//! A [`Rule`] is a pure value: rendering it twice gives identical text. The
//! [`RuleRenderer`] stamps the current date onto a rule and optionally
//! persists the rendered text.

pub mod condition;

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

pub use condition::{Condition, ConditionParseError, DEFAULT_CONDITION};

/// Author tag written into the rule metadata by default.
pub const DEFAULT_AUTHOR: &str = "YARA Rule Generator";

/// Identifier used when a rule has no strings.
pub const PLACEHOLDER_IDENTIFIER: &str = "$placeholder";

/// Placeholder value. Rendered input strings have their backslashes escaped,
/// so a literal `\x00` escape sequence can never come from real input.
pub const PLACEHOLDER_VALUE: &str = r"\x00yargen:no-discriminative-strings\x00";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write rule to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A rule ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    /// Selected strings, in identifier order (`$s0`, `$s1`, ...).
    pub strings: Vec<String>,
    pub condition: Condition,
    pub author: String,
    pub date: NaiveDate,
}

impl Rule {
    /// Render the rule text. Deterministic for a given rule value.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "rule {}", self.name);
        out.push_str("{\n");
        out.push_str("    meta:\n");
        let _ = writeln!(out, "        author = \"{}\"", escape(&self.author));
        let _ = writeln!(out, "        date = \"{}\"", self.date.format("%Y-%m-%d"));
        let _ = writeln!(
            out,
            "        description = \"Automatically generated rule for {}\"",
            escape(&self.name)
        );
        out.push('\n');

        out.push_str("    strings:\n");
        if self.strings.is_empty() {
            out.push_str("        // No discriminative strings found; this rule never matches.\n");
            let _ = writeln!(out, "        {} = \"{}\"", PLACEHOLDER_IDENTIFIER, PLACEHOLDER_VALUE);
        } else {
            for (i, value) in self.strings.iter().enumerate() {
                let _ = writeln!(out, "        $s{} = \"{}\"", i, escape(value));
            }
        }

        out.push_str("    condition:\n");
        let _ = writeln!(out, "        {}", self.condition_expression());
        out.push_str("}\n");
        out
    }

    /// The condition line, without indentation.
    pub fn condition_expression(&self) -> String {
        if self.strings.is_empty() {
            return "false".to_string();
        }
        let identifiers: Vec<String> = (0..self.strings.len()).map(|i| format!("$s{i}")).collect();
        format!("{} of ({})", self.condition.quantifier(), identifiers.join(", "))
    }
}

/// Escape backslashes and double quotes for a YARA quoted string.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

/// Builds rules stamped with today's date and writes them to disk.
#[derive(Debug, Clone)]
pub struct RuleRenderer {
    author: String,
}

impl Default for RuleRenderer {
    fn default() -> Self {
        Self { author: DEFAULT_AUTHOR.to_string() }
    }
}

impl RuleRenderer {
    pub fn new(author: impl Into<String>) -> Self {
        Self { author: author.into() }
    }

    /// Assemble a rule value without rendering it.
    ///
    /// Unrecognized condition specs degrade to "any of them" with a warning.
    pub fn build(&self, name: &str, strings: &[String], condition_spec: &str) -> Rule {
        let condition = if strings.is_empty() {
            Condition::default()
        } else {
            Condition::parse_lenient(condition_spec)
        };
        if let Condition::AtLeast(n) = condition {
            if n as usize > strings.len() {
                warn!(threshold = n, strings = strings.len(), "condition threshold exceeds string count");
            }
        }
        Rule {
            name: name.to_string(),
            strings: strings.to_vec(),
            condition,
            author: self.author.clone(),
            date: Utc::now().date_naive(),
        }
    }

    /// Render a rule and, if `destination` is given, write it there.
    ///
    /// Missing parent directories are created and an existing file is
    /// overwritten. Write failures are logged and returned.
    pub fn render(
        &self,
        name: &str,
        strings: &[String],
        condition_spec: &str,
        destination: Option<&Path>,
    ) -> Result<String, RenderError> {
        info!(rule = name, strings = strings.len(), "rendering rule");
        let text = self.build(name, strings, condition_spec).render();
        if let Some(path) = destination {
            write_rule(path, &text)?;
            info!(path = %path.display(), "rule saved");
        }
        Ok(text)
    }
}

fn write_rule(path: &Path, text: &str) -> Result<(), RenderError> {
    let result = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
    .and_then(|()| fs::write(path, text));

    result.map_err(|source| {
        error!(path = %path.display(), error = %source, "failed to save rule");
        RenderError::Write { path: path.to_path_buf(), source }
    })
}

/// Render with the default author tag.
pub fn render(
    name: &str,
    strings: &[String],
    condition_spec: &str,
    destination: Option<&Path>,
) -> Result<String, RenderError> {
    RuleRenderer::default().render(name, strings, condition_spec, destination)
}
