use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use yargen_core::rules::RuleRenderer;
use yargen_core::scoring::{top_strings, Scorer};

use crate::commands::{require_dir, resolve_config, ConfigOverrides};

/// Default rule name when none is given.
pub const DEFAULT_RULE_NAME: &str = "GeneratedMalwareRule";
/// Default output path for the generated rule.
pub const DEFAULT_OUTPUT: &str = "rules/generated_rule.yar";

/// Score a badware corpus and write a rule built from the top strings.
///
/// With `to_stdout` the rule is printed instead of written to `output`.
/// Returns the rendered rule text.
pub fn generate_command(
    badware_dir: &Path,
    rule_name: &str,
    output: &Path,
    to_stdout: bool,
    overrides: &ConfigOverrides,
) -> Result<String> {
    require_dir(badware_dir, "Badware")?;
    let config = resolve_config(overrides)?;

    info!(badware = %badware_dir.display(), rule = rule_name, "starting rule generation");
    let scorer = Scorer::new(config.extract_options())
        .with_strategy(config.strategy)
        .with_exclusive_weight(config.exclusive_weight);
    let ranked = scorer
        .score(badware_dir, config.goodware_dir.as_deref())
        .with_context(|| format!("Failed to score strings in {}", badware_dir.display()))?;

    let selected = top_strings(&ranked, config.top_count);
    if selected.is_empty() {
        warn!("no discriminative strings found; emitting a rule that never matches");
    } else {
        info!(selected = selected.len(), "selected top strings");
    }

    let renderer = RuleRenderer::new(&config.author);
    let destination = if to_stdout { None } else { Some(output) };
    let text = renderer
        .render(rule_name, &selected, &config.condition, destination)
        .context("Failed to produce rule")?;

    if to_stdout {
        print!("{}", text);
    } else {
        println!("Generated rule '{}' with {} strings", rule_name, selected.len());
        println!("  Output: {}", output.display());
    }
    Ok(text)
}
