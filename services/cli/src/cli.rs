use crate::check::{run_check, CheckArgs};
use crate::preview::{run_preview, PreviewArgs};
use clap::{Args, Parser, Subcommand};
use dupecheck::config::MatchConfig;
use dupecheck::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "dupecheck",
    about = "Find prospects that already exist in a CRM export by fuzzy company-name matching",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a prospect list against a reference export and write possible duplicates
    Run(CheckArgs),
    /// Show how company names normalize under the configured suffix and filler-word rules
    Normalize(PreviewArgs),
}

/// Overrides for the normalization word lists.
#[derive(Args, Debug, Default)]
pub(crate) struct RuleArgs {
    /// Legal-entity suffix to strip from the end of names; repeat to build the list (replaces the configured list)
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub(crate) suffixes: Vec<String>,
    /// Filler word removed anywhere in a name; repeat to build the list (replaces the configured list)
    #[arg(long = "remove-word", value_name = "WORD")]
    pub(crate) remove_words: Vec<String>,
}

impl RuleArgs {
    pub(crate) fn apply(self, config: &mut MatchConfig) {
        if !self.suffixes.is_empty() {
            config.common_suffixes = self.suffixes;
        }
        if !self.remove_words.is_empty() {
            config.common_remove_words = self.remove_words;
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run_check(args),
        Command::Normalize(args) => run_preview(args),
    }
}
