//! Subcommand parser for the `jassguard` binary.
//!
//! Hand-rolled; flags take either `--flag=value` or `--flag value`.
//!
//! # Grammar
//!
//! ```text
//! jassguard scan   [--config F] [--rules F] [--output DIR] [PATH...]
//! jassguard inject [--config F] --pack DIR [--output DIR] [--no-verify] [PATH...]
//! jassguard --help | -h
//! ```

use camino::Utf8PathBuf;

pub const USAGE: &str = "\
Usage:
  jassguard scan   [--config F] [--rules F] [--output DIR] [PATH...]
  jassguard inject [--config F] --pack DIR [--output DIR] [--no-verify] [PATH...]
  jassguard --help

PATH is a map directory (holding war3map.j or scripts/war3map.j) or a .j file.
Without paths, maps are discovered under the configured input_dir.

scan    report suspicious lines; writes <name>_J.txt and <name>_JSus.txt
inject  splice globals.txt, endglobals.txt and main.txt from the pack into
        each script; writes <name>_PreJ.txt and <name>_PostJ.txt unless
        --no-verify is given
";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing subcommand")]
    MissingCommand,
    #[error("unknown subcommand '{0}'")]
    UnknownCommand(String),
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("flag '{0}' needs a value")]
    MissingValue(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanArgs {
    pub config: Option<Utf8PathBuf>,
    pub rules: Option<Utf8PathBuf>,
    pub output: Option<Utf8PathBuf>,
    pub paths: Vec<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectArgs {
    pub config: Option<Utf8PathBuf>,
    pub pack: Option<Utf8PathBuf>,
    pub output: Option<Utf8PathBuf>,
    pub no_verify: bool,
    pub paths: Vec<Utf8PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(ScanArgs),
    Inject(InjectArgs),
    Help,
}

impl Command {
    pub fn config_path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Command::Scan(a) => a.config.as_ref(),
            Command::Inject(a) => a.config.as_ref(),
            Command::Help => None,
        }
    }
}

/// Pulls flag values off the argument stream.
struct Args<I> {
    inner: I,
}

impl<I: Iterator<Item = String>> Args<I> {
    /// Value of `name` if `arg` is that flag, in either spelling.
    fn value(
        &mut self,
        arg: &str,
        name: &'static str,
    ) -> Result<Option<Utf8PathBuf>, UsageError> {
        if arg == name {
            return self
                .inner
                .next()
                .map(|v| Some(Utf8PathBuf::from(v)))
                .ok_or(UsageError::MissingValue(name));
        }
        Ok(arg
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .map(Utf8PathBuf::from))
    }
}

impl<I: Iterator<Item = String>> Iterator for Args<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }
}

/// Parse arguments (program name already stripped).
pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        inner: args.into_iter(),
    };
    let first = args.next().ok_or(UsageError::MissingCommand)?;
    match first.as_str() {
        "--help" | "-h" => Ok(Command::Help),
        "scan" => parse_scan(args),
        "inject" => parse_inject(args),
        _ => Err(UsageError::UnknownCommand(first)),
    }
}

fn parse_scan<I: Iterator<Item = String>>(mut args: Args<I>) -> Result<Command, UsageError> {
    let mut out = ScanArgs::default();
    while let Some(arg) = args.next() {
        if let Some(v) = args.value(&arg, "--config")? {
            out.config = Some(v);
        } else if let Some(v) = args.value(&arg, "--rules")? {
            out.rules = Some(v);
        } else if let Some(v) = args.value(&arg, "--output")? {
            out.output = Some(v);
        } else if arg == "--help" || arg == "-h" {
            return Ok(Command::Help);
        } else if arg.starts_with("--") {
            return Err(UsageError::UnknownFlag(arg));
        } else {
            out.paths.push(Utf8PathBuf::from(arg));
        }
    }
    Ok(Command::Scan(out))
}

fn parse_inject<I: Iterator<Item = String>>(mut args: Args<I>) -> Result<Command, UsageError> {
    let mut out = InjectArgs::default();
    while let Some(arg) = args.next() {
        if let Some(v) = args.value(&arg, "--config")? {
            out.config = Some(v);
        } else if let Some(v) = args.value(&arg, "--pack")? {
            out.pack = Some(v);
        } else if let Some(v) = args.value(&arg, "--output")? {
            out.output = Some(v);
        } else if arg == "--no-verify" {
            out.no_verify = true;
        } else if arg == "--help" || arg == "-h" {
            return Ok(Command::Help);
        } else if arg.starts_with("--") {
            return Err(UsageError::UnknownFlag(arg));
        } else {
            out.paths.push(Utf8PathBuf::from(arg));
        }
    }
    Ok(Command::Inject(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    fn parse(args: &[&str]) -> Result<Command, UsageError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_scan_with_both_flag_spellings() {
        let cmd = parse(&["scan", "--rules=r.toml", "--output", "out", "a.j", "MapDir"]).unwrap();
        assert_eq!(
            cmd,
            Command::Scan(ScanArgs {
                config: None,
                rules: Some("r.toml".into()),
                output: Some("out".into()),
                paths: vec!["a.j".into(), "MapDir".into()],
            })
        );
    }

    #[test]
    fn test_inject_flags() {
        let cmd = parse(&["inject", "--config", "c.toml", "--pack=pack", "--no-verify"]).unwrap();
        let Command::Inject(args) = cmd else {
            panic!("expected inject");
        };
        assert_eq!(args.pack.as_deref(), Some(Utf8Path::new("pack")));
        assert_eq!(args.config.as_deref(), Some(Utf8Path::new("c.toml")));
        assert!(args.no_verify);
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(&[]), Err(UsageError::MissingCommand));
        assert_eq!(
            parse(&["audit"]),
            Err(UsageError::UnknownCommand("audit".into()))
        );
        assert_eq!(
            parse(&["scan", "--fast"]),
            Err(UsageError::UnknownFlag("--fast".into()))
        );
        assert_eq!(
            parse(&["inject", "--pack"]),
            Err(UsageError::MissingValue("--pack"))
        );
    }

    #[test]
    fn test_help_anywhere() {
        assert_eq!(parse(&["-h"]), Ok(Command::Help));
        assert_eq!(parse(&["scan", "x.j", "--help"]), Ok(Command::Help));
    }
}
