//! The `resolve` subcommand.

use std::io::Write;

use bootconf::{
    ExecutionContext, InlineBody, Notation, ResolvedConfiguration, Resolver, SourceCandidates,
};

use crate::cli::ResolveArgs;
use crate::error::CliError;
use crate::fetch::LocalFetcher;

/// Resolve the context described by `args` and write it to `out` as JSON.
pub fn run(
    resolver: &Resolver,
    fetcher: &LocalFetcher,
    args: &ResolveArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let config = resolve(resolver, fetcher, args)?;
    let rendered = if args.is_pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    writeln!(out, "{rendered}").map_err(CliError::Output)
}

fn resolve(
    resolver: &Resolver,
    fetcher: &LocalFetcher,
    args: &ResolveArgs,
) -> Result<ResolvedConfiguration, CliError> {
    let context = args
        .worker
        .clone()
        .map_or(ExecutionContext::Main, ExecutionContext::Worker);
    let candidates = candidates(fetcher, args)?;
    let config = resolver.resolve_context(&context, &candidates, |reference| {
        fetcher.fetch(reference)
    })?;
    Ok(config)
}

fn candidates(fetcher: &LocalFetcher, args: &ResolveArgs) -> Result<SourceCandidates, CliError> {
    let notation = args.inline_notation.map(Notation::from);
    let mut candidates = SourceCandidates::new();
    if let Some(attribute) = &args.config {
        candidates = candidates.with_attribute(attribute.as_str());
    }
    for path in &args.inline {
        let mut body = InlineBody::new(fetcher.read_inline(path)?);
        if let Some(declared) = notation {
            body = body.with_notation(declared);
        }
        candidates = candidates.with_inline(body);
    }
    Ok(candidates)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]
mod tests {
    use bootconf::{BootError, EngineSettings, Resolver};
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::run;
    use crate::cli::{NotationArg, ResolveArgs};
    use crate::error::CliError;
    use crate::fetch::LocalFetcher;

    #[fixture]
    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("app.toml"),
            "plugins = [\"!error\"]\n[files]\n\"https://x/data.csv\" = \"sub/\"\n",
        )
        .expect("write toml");
        std::fs::write(dir.path().join("body.json"), r#"{"packages": ["numpy"]}"#)
            .expect("write json");
        dir
    }

    fn execute(dir: &TempDir, args: &ResolveArgs) -> Result<serde_json::Value, CliError> {
        let root = Utf8Path::from_path(dir.path()).expect("utf-8 temp path");
        let fetcher = LocalFetcher::open(root)?;
        let mut out = Vec::new();
        run(&Resolver::default(), &fetcher, args, &mut out)?;
        Ok(serde_json::from_slice(&out)?)
    }

    #[rstest]
    fn resolves_reference_attribute(workspace: TempDir) {
        let args = ResolveArgs {
            config: Some("app.toml".into()),
            ..ResolveArgs::default()
        };
        let json = execute(&workspace, &args).expect("resolves");
        assert_eq!(json["files"][0]["destination"], "sub/data.csv");
        assert_eq!(json["plugins"][0]["enabled"], false);
    }

    #[rstest]
    fn inline_body_uses_declared_notation(workspace: TempDir) {
        let args = ResolveArgs {
            inline: vec![Utf8PathBuf::from("body.json")],
            inline_notation: Some(NotationArg::Json),
            worker: Some("sim".into()),
            ..ResolveArgs::default()
        };
        let json = execute(&workspace, &args).expect("resolves");
        assert_eq!(json["packages"][0], "numpy");
    }

    #[rstest]
    fn duplicate_inline_bodies_fail(workspace: TempDir) {
        let args = ResolveArgs {
            inline: vec![Utf8PathBuf::from("body.json"), Utf8PathBuf::from("body.json")],
            ..ResolveArgs::default()
        };
        let err = execute(&workspace, &args).expect_err("conflict");
        assert!(matches!(
            err,
            CliError::Resolve(ref boot) if matches!(boot.as_ref(), BootError::DuplicateConfigSource { .. })
        ));
    }

    #[rstest]
    fn remote_reference_is_a_fetch_error(workspace: TempDir) {
        let args = ResolveArgs {
            config: Some("https://example.com/app.toml".into()),
            ..ResolveArgs::default()
        };
        let err = execute(&workspace, &args).expect_err("remote");
        assert!(matches!(
            err,
            CliError::Resolve(ref boot) if matches!(boot.as_ref(), BootError::Fetch { .. })
        ));
    }

    #[rstest]
    fn default_notation_applies_to_unknown_suffix(workspace: TempDir) {
        std::fs::copy(workspace.path().join("body.json"), workspace.path().join("body.cfg"))
            .expect("copy");
        let root = Utf8Path::from_path(workspace.path()).expect("utf-8 temp path");
        let fetcher = LocalFetcher::open(root).expect("open");
        let resolver = Resolver::new(EngineSettings {
            default_notation: bootconf::Notation::Json,
            ..EngineSettings::default()
        });
        let args = ResolveArgs {
            config: Some("body.cfg".into()),
            ..ResolveArgs::default()
        };
        let mut out = Vec::new();
        run(&resolver, &fetcher, &args, &mut out).expect("resolves");
        let json: serde_json::Value = serde_json::from_slice(&out).expect("json output");
        assert_eq!(json["packages"][0], "numpy");
    }
}
