use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw(RawOutputMode),
}

#[derive(Debug, Clone, Copy)]
enum RawOutputMode {
    Text,
}

mod commands;
mod output;
mod tty;

use commands::{changes, config, sanitize, scan};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "relabel")]
#[command(version = VERSION)]
#[command(about = "Clean and cross-reference item names exported as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a rename report from a change-log lookup
    Changes(changes::ChangesArgs),
    /// Find string values starting with a pattern in JSON files
    Scan(scan::ScanArgs),
    /// Normalize name lists line by line
    ///
    /// A `[sanitize] Processed <input> -> <output>` line is printed per file on
    /// stderr when stderr is a terminal. The JSON summary on stdout lists every
    /// processed file either way.
    Sanitize(sanitize::SanitizeArgs),
    /// Manage relabel configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Scan(args) if scan::is_text_output(args) => {
            ResponseMode::Raw(RawOutputMode::Text)
        }
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    if let ResponseMode::Raw(RawOutputMode::Text) = response_mode(&cli.command) {
        return match commands::run_text(cli.command, &global) {
            Ok((content, exit_code)) => {
                let _ = output::write_stdout(&content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let exit_code = output::exit_code_for_error(err.code);
                let _ = output::print_result::<serde_json::Value>(Err(err));
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn sanitize_accepts_short_and_underscored_flags() {
        let argv = ["relabel", "sanitize", "-i", "raw", "--output_dir", "clean"];
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Sanitize(args) = cli.command else {
            panic!("expected sanitize");
        };
        assert_eq!(args.input_dir.as_deref(), Some("raw"));
        assert_eq!(args.output_dir.as_deref(), Some("clean"));
    }

    #[test]
    fn sanitize_help_explains_progress_lines() {
        let mut cmd = Cli::command();
        let help = cmd
            .find_subcommand_mut("sanitize")
            .unwrap()
            .render_long_help()
            .to_string();
        assert!(help.contains("per file on"));
        assert!(help.contains("when stderr is a terminal"));
    }

    #[test]
    fn scan_defaults_to_text_output() {
        let cli = Cli::try_parse_from(["relabel", "scan"]).unwrap();
        assert!(matches!(
            response_mode(&cli.command),
            ResponseMode::Raw(RawOutputMode::Text)
        ));

        let cli = Cli::try_parse_from(["relabel", "scan", "--json"]).unwrap();
        assert!(matches!(response_mode(&cli.command), ResponseMode::Json));
    }
}
