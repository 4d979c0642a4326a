use clap::Args;

use relabel::changelist::{self, ChangesOutput};
use relabel::defaults;
use relabel::local_files;
use relabel::paths;
use relabel::validation;

use super::CmdResult;

#[derive(Args)]
pub struct ChangesArgs {
    /// Change-log lookup document (JSON with HTML tables)
    #[arg(long)]
    pub lookup: Option<String>,

    /// Directory of result JSON files to match against the lookup
    #[arg(long)]
    pub src: Option<String>,

    /// Markdown report to write
    #[arg(long)]
    pub output: Option<String>,
}

pub fn run(args: ChangesArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ChangesOutput> {
    let config = defaults::load_defaults().changes;

    let lookup = validation::resolve_arg(args.lookup, &config.lookup, "lookup")?;
    let src = validation::resolve_arg(args.src, &config.src, "src")?;
    let output = validation::resolve_arg(args.output, &config.output, "output")?;

    let result = changelist::run(
        &local_files::local(),
        &paths::expand(&lookup),
        &paths::expand(&src),
        &paths::expand(&output),
    )?;

    Ok((result, 0))
}
