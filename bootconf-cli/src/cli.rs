//! Command-line interface definitions for `bootconf`.

use bootconf::Notation;
use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Notations accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotationArg {
    /// TOML.
    Toml,
    /// JSON.
    Json,
}

impl From<NotationArg> for Notation {
    fn from(arg: NotationArg) -> Self {
        match arg {
            NotationArg::Toml => Self::Toml,
            NotationArg::Json => Self::Json,
        }
    }
}

/// Parsed CLI arguments for `bootconf`.
#[derive(Debug, Parser)]
#[command(name = "bootconf")]
#[command(about = "Resolve per-context runtime configuration")]
#[command(version)]
pub struct Args {
    /// Engine settings file (TOML); `BOOTCONF_*` variables still apply.
    #[arg(long, value_name = "path", global = true)]
    pub settings: Option<Utf8PathBuf>,
    /// Log resolution steps at debug level.
    #[arg(long = "verbose", short = 'v', global = true)]
    pub is_verbose: bool,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one context and print its configuration as JSON.
    Resolve(ResolveArgs),
}

/// Declarations for the context being resolved.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ResolveArgs {
    /// Reference attribute: a relative path or a literal document.
    #[arg(long, value_name = "text")]
    pub config: Option<String>,
    /// File holding an inline configuration body (repeat to reproduce a
    /// conflicting declaration).
    #[arg(long, value_name = "file")]
    pub inline: Vec<Utf8PathBuf>,
    /// Notation declared for the inline bodies.
    #[arg(long, value_enum, value_name = "notation")]
    pub inline_notation: Option<NotationArg>,
    /// Resolve for the named worker instead of the main context.
    #[arg(long, value_name = "name")]
    pub worker: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(long = "pretty")]
    pub is_pretty: bool,
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::{Args, Command, NotationArg};

    #[rstest]
    fn parses_resolve_flags() {
        let args = Args::try_parse_from([
            "bootconf",
            "resolve",
            "--inline",
            "a.toml",
            "--inline",
            "b.json",
            "--inline-notation",
            "json",
            "--worker",
            "sim",
            "--pretty",
            "-v",
        ])
        .expect("valid arguments");
        assert!(args.is_verbose);
        let Command::Resolve(resolve) = args.command;
        assert_eq!(resolve.inline.len(), 2);
        assert_eq!(resolve.inline_notation, Some(NotationArg::Json));
        assert_eq!(resolve.worker.as_deref(), Some("sim"));
        assert!(resolve.is_pretty);
        assert!(resolve.config.is_none());
    }

    #[rstest]
    fn rejects_unknown_notation() {
        let parsed = Args::try_parse_from(["bootconf", "resolve", "--inline-notation", "yaml"]);
        assert!(parsed.is_err());
    }
}
