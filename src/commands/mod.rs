pub type CmdResult<T> = relabel::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod changes;
pub mod config;
pub mod sanitize;
pub mod scan;

/// Run a command in raw text mode, returning the text to print.
pub(crate) fn run_text(
    command: crate::Commands,
    global: &GlobalArgs,
) -> relabel::Result<(String, i32)> {
    match command {
        crate::Commands::Scan(args) => scan::run_text(args, global),
        _ => Err(relabel::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support text output",
            None,
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (relabel::Result<serde_json::Value>, i32) {
    crate::tty::status("relabel is working...");

    match command {
        crate::Commands::Changes(args) => dispatch!(args, global, changes),
        crate::Commands::Scan(args) => dispatch!(args, global, scan),
        crate::Commands::Sanitize(args) => dispatch!(args, global, sanitize),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
