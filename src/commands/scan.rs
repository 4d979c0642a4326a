use clap::Args;

use relabel::defaults;
use relabel::local_files;
use relabel::paths;
use relabel::scan::{self, ScanOutput, ScanPattern};
use relabel::validation;

use super::CmdResult;

#[derive(Args)]
pub struct ScanArgs {
    /// Directory of JSON files to scan
    #[arg(long)]
    pub src: Option<String>,

    /// Regex matched at the start of every string value
    #[arg(long)]
    pub pattern: Option<String>,

    /// Glob selecting which file names to scan
    #[arg(long)]
    pub files: Option<String>,

    /// Print the JSON envelope instead of text lines
    #[arg(long)]
    pub json: bool,
}

pub fn is_text_output(args: &ScanArgs) -> bool {
    !args.json
}

pub fn run(args: ScanArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ScanOutput> {
    let config = defaults::load_defaults().scan;

    let src = validation::resolve_arg(args.src, &config.src, "src")?;
    let pattern = validation::resolve_arg(args.pattern, &config.pattern, "pattern")?;
    let files = validation::resolve_arg(args.files, &config.files, "files")?;

    let output = scan::scan_directory(
        &local_files::local(),
        &paths::expand(&src),
        &ScanPattern::new(&pattern)?,
        &files,
    )?;

    Ok((output, 0))
}

pub fn run_text(args: ScanArgs, global: &crate::commands::GlobalArgs) -> CmdResult<String> {
    let (output, exit_code) = run(args, global)?;
    Ok((output.to_text(), exit_code))
}
