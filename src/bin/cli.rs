use std::ffi::OsString;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use logging::{LogConfig, LogError, LogLevel};

/// Exit status for rejected configuration values.
const CONFIG_FAILURE: u8 = 1;
/// Exit status for malformed command lines.
const USAGE_FAILURE: u8 = 2;

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("hwlog")
        .about("Emit a message through the hardware logging facility.")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .short('l')
                .value_name("LEVEL")
                .help("Verbosity threshold: none, error, warn, info, debug, spew, or 0-5.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("log-options")
                .long("log-options")
                .value_name("LIST")
                .help("Comma separated decorations: date, time, time-ms, time-us, utc.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("log-domain")
                .long("log-domain")
                .value_name("TEXT")
                .help("Prefix written before each message; empty disables it.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("severity")
                .long("severity")
                .short('s')
                .value_name("SEVERITY")
                .help("Severity of the emitted message.")
                .default_value("warn")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Message text; multiple words are joined with spaces.")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
}

/// Parses `args`, configures the process-wide logger from `vars` and the
/// command line, and emits the message.
pub fn run_with<I, V>(args: I, vars: V) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    V: IntoIterator<Item = (OsString, OsString)>,
{
    let matches = match clap_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::from(USAGE_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let loaded = LogConfig::from_os_vars(vars).and_then(|config| apply_flags(config, &matches));
    let config = match loaded {
        Ok(config) => config,
        Err(error) => {
            logging::error(format_args!("{}.", error.argument()));
            return ExitCode::from(CONFIG_FAILURE);
        }
    };
    logging::logger().apply_config(&config);

    let severity =
        string_arg(&matches, "severity").map_or(Ok(LogLevel::Warn), str::parse::<LogLevel>);
    let severity = match severity {
        Ok(severity) => severity,
        Err(error) => {
            logging::error(format_args!("{}.", error.argument()));
            return ExitCode::from(CONFIG_FAILURE);
        }
    };

    let message = matches
        .get_many::<String>("message")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    logging::log(severity, format_args!("{message}"));
    ExitCode::SUCCESS
}

/// Overlays command-line values on the environment configuration.
fn apply_flags(mut config: LogConfig, matches: &ArgMatches) -> Result<LogConfig, LogError> {
    if let Some(level) = string_arg(matches, "log-level") {
        config.level = level.parse()?;
    }
    if let Some(options) = string_arg(matches, "log-options") {
        config.options = options.parse()?;
    }
    if let Some(domain) = string_arg(matches, "log-domain") {
        domain.clone_into(&mut config.domain);
    }
    Ok(config)
}

fn string_arg<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches.get_one::<String>(id).map(String::as_str)
}
