use crate::cli::RuleArgs;
use clap::Args;
use dupecheck::config::AppConfig;
use dupecheck::error::AppError;
use dupecheck::matching::Normalizer;

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Company names to normalize
    #[arg(required = true, value_name = "NAME")]
    pub(crate) names: Vec<String>,
    #[command(flatten)]
    pub(crate) rules: RuleArgs,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.rules.apply(&mut config.matching);

    let normalizer = Normalizer::new(&config.matching);
    for line in preview_lines(&normalizer, &args.names) {
        println!("{line}");
    }
    Ok(())
}

fn preview_lines(normalizer: &Normalizer, names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|raw| {
            let normalized = normalizer.normalize(raw);
            if normalized.is_empty() {
                format!("'{raw}' -> (empty; excluded from matching)")
            } else {
                format!("'{raw}' -> '{normalized}'")
            }
        })
        .collect()
}
