//! The `read` command: read a script and print every datum.

use std::io::IsTerminal;
use std::path::PathBuf;

use nick_alias::ReaderConfig;
use nick_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use nick_host::ReadCase;
use nick_ir::Span;
use tracing::debug;

use crate::script::Session;

/// Parsed `nickc read` arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub path: PathBuf,
    pub config: ReaderConfig,
    pub color: ColorMode,
}

/// Parse the arguments following `read`.
///
/// Flags may appear before or after the path.
pub fn parse_read_options(args: &[String]) -> Result<ReadOptions, String> {
    let mut path = None;
    let mut config = ReaderConfig::default();
    let mut color = ColorMode::Auto;

    for arg in args {
        if let Some(trigger) = arg.strip_prefix("--trigger=") {
            let mut chars = trigger.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_whitespace() => config.trigger = c,
                _ => {
                    return Err(format!(
                        "--trigger expects a single character, got `{trigger}`"
                    ))
                }
            }
        } else if let Some(mode) = arg.strip_prefix("--case=") {
            let case = ReadCase::from_name(mode).ok_or_else(|| {
                format!("unknown case mode `{mode}` (expected upcase, downcase, preserve or invert)")
            })?;
            config.case = case;
        } else if arg == "--no-color" {
            color = ColorMode::Never;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option `{arg}`"));
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }

    let path = path.ok_or_else(|| "missing file path".to_owned())?;
    Ok(ReadOptions {
        path,
        config,
        color,
    })
}

/// Read the script at `options.path`, printing data to stdout and the
/// first error, if any, as a diagnostic on stderr.
pub fn read_file(options: &ReadOptions) {
    let source = match std::fs::read_to_string(&options.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", options.path.display());
            std::process::exit(1);
        }
    };
    debug!(path = %options.path.display(), config = ?options.config, "reading script");

    let is_tty = std::io::stderr().is_terminal();
    let mut emitter =
        TerminalEmitter::stderr(options.color, is_tty).with_source(source.as_str());

    let mut session = match Session::new(options.config) {
        Ok(session) => session,
        Err(err) => {
            emitter.emit(&err.to_diagnostic(Span::DUMMY));
            emitter.flush();
            std::process::exit(1);
        }
    };
    if let Err(err) = session.run(&source, |line| println!("{line}")) {
        emitter.emit(&err.to_diagnostic());
        emitter.flush();
        std::process::exit(1);
    }
}
