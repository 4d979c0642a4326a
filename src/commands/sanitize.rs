use clap::Args;

use relabel::defaults;
use relabel::local_files;
use relabel::paths;
use relabel::sanitize::{self, SanitizeOutput, Sanitizer};
use relabel::validation;

use super::CmdResult;

#[derive(Args)]
pub struct SanitizeArgs {
    /// Directory of raw name lists
    #[arg(short = 'i', long = "input_dir")]
    pub input_dir: Option<String>,

    /// Directory receiving the cleaned lists
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: Option<String>,
}

pub fn run(args: SanitizeArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<SanitizeOutput> {
    let config = defaults::load_defaults();

    let input_dir =
        validation::resolve_arg(args.input_dir, &config.sanitize.input_dir, "input_dir")?;
    let output_dir =
        validation::resolve_arg(args.output_dir, &config.sanitize.output_dir, "output_dir")?;

    let sanitizer = Sanitizer::new(&config.keywords)?;
    let output = sanitize::process_all(
        &local_files::local(),
        &sanitizer,
        &paths::expand(&input_dir),
        &paths::expand(&output_dir),
    )?;

    Ok((output, 0))
}
