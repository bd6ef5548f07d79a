use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use yargen::commands::{
    generate_command, score_command, strings_command, ConfigOverrides, DEFAULT_OUTPUT,
    DEFAULT_RULE_NAME,
};
use yargen_core::extract::{DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use yargen_core::logging::{init_logging, LogOptions};

/// YARA rule generator CLI.
///
/// This CLI is a thin wrapper around `yargen-core`. All substantive logic
/// lives in the library so it can be tested thoroughly and reused.
#[derive(Parser, Debug)]
#[command(
    name = "yargen",
    version,
    about = "Generate YARA rules from malware and goodware samples",
    long_about = None
)]
struct Cli {
    /// Log debug-level details to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that scores a corpus.
#[derive(Args, Debug)]
struct ScoringArgs {
    /// Directory of clean samples (goodware) used to suppress common strings.
    #[arg(long, short = 'g')]
    goodware_dir: Option<PathBuf>,

    /// YAML or JSON file with generator options. Flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum string length to extract.
    #[arg(long)]
    min_len: Option<usize>,

    /// Maximum string length to extract.
    #[arg(long)]
    max_len: Option<usize>,

    /// Scoring strategy: graduated, prevalence, or exclusive.
    #[arg(long)]
    strategy: Option<String>,
}

impl ScoringArgs {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config,
            goodware_dir: self.goodware_dir,
            min_len: self.min_len,
            max_len: self.max_len,
            strategy: self.strategy,
            ..ConfigOverrides::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a YARA rule from the strings that best separate badware from goodware.
    Generate {
        /// Directory containing malware samples.
        badware_dir: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Name of the generated rule.
        #[arg(long, short = 'n', default_value = DEFAULT_RULE_NAME)]
        rule_name: String,

        /// Output path for the rule file.
        #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print the rule instead of writing it to --output.
        #[arg(long, default_value_t = false)]
        stdout: bool,

        /// Number of top-scoring strings to include.
        #[arg(long)]
        top_count: Option<usize>,

        /// Rule condition: "all of them", "any of them", or "N of them".
        #[arg(long, short = 'c')]
        condition: Option<String>,
    },

    /// Print the ranked candidate strings without rendering a rule.
    Score {
        /// Directory containing malware samples.
        badware_dir: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Show at most this many strings.
        #[arg(long)]
        limit: Option<usize>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Dump the strings extracted from a single file.
    Strings {
        /// Sample to extract strings from.
        path: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MIN_LEN)]
        min_len: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
        max_len: usize,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogOptions { verbose: cli.verbose, log_file: cli.log_file })?;

    match cli.command {
        Command::Generate { badware_dir, scoring, rule_name, output, stdout, top_count, condition } => {
            let overrides =
                ConfigOverrides { top_count, condition, ..scoring.into_overrides() };
            generate_command(&badware_dir, &rule_name, &output, stdout, &overrides)?;
        }
        Command::Score { badware_dir, scoring, limit, json } => {
            score_command(&badware_dir, limit, json, &scoring.into_overrides())?;
        }
        Command::Strings { path, min_len, max_len, json } => {
            strings_command(&path, min_len, max_len, json)?;
        }
    }

    Ok(())
}
