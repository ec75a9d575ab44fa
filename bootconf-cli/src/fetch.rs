//! Local-filesystem reads for external references and inline bodies.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use thiserror::Error;

use crate::error::CliError;

/// Why a reference could not be read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("remote reference '{0}' is not supported; download it and pass --inline")]
    Remote(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads files beneath one directory.
///
/// Paths that escape the directory, including absolute paths, are refused
/// by the capability handle.
#[derive(Debug)]
pub struct LocalFetcher {
    root: Utf8PathBuf,
    dir: Dir,
}

impl LocalFetcher {
    /// Open a fetcher rooted at `root`.
    pub fn open(root: &Utf8Path) -> Result<Self, CliError> {
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(|source| {
            CliError::Io {
                path: root.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Read the resource named by a reference attribute.
    pub fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        if reference.contains("://") {
            return Err(FetchError::Remote(reference.to_owned()));
        }
        tracing::debug!(root = %self.root, reference, "reading configuration reference");
        Ok(self.dir.read_to_string(reference)?)
    }

    /// Read an inline body from `path`.
    pub fn read_inline(&self, path: &Utf8Path) -> Result<String, CliError> {
        self.dir
            .read_to_string(path)
            .map_err(|source| CliError::Io {
                path: self.root.join(path),
                source,
            })
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]
mod tests {
    use camino::Utf8Path;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{FetchError, LocalFetcher};
    use crate::error::CliError;

    #[fixture]
    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir(dir.path().join("conf")).expect("conf dir");
        std::fs::write(dir.path().join("conf/app.toml"), "packages = [\"numpy\"]\n")
            .expect("write config");
        dir
    }

    fn fetcher(dir: &TempDir) -> LocalFetcher {
        let root = Utf8Path::from_path(dir.path()).expect("utf-8 temp path");
        LocalFetcher::open(root).expect("open root")
    }

    #[rstest]
    #[case("conf/app.toml")]
    #[case("./conf/app.toml")]
    fn reads_relative_references(workspace: TempDir, #[case] reference: &str) {
        let text = fetcher(&workspace).fetch(reference).expect("readable");
        assert_eq!(text, "packages = [\"numpy\"]\n");
    }

    #[rstest]
    fn refuses_remote_references(workspace: TempDir) {
        let err = fetcher(&workspace)
            .fetch("https://example.com/app.toml")
            .expect_err("remote");
        assert!(matches!(err, FetchError::Remote(url) if url == "https://example.com/app.toml"));
    }

    #[rstest]
    #[case("missing.toml")]
    #[case("../outside.toml")]
    fn reports_unreadable_references(workspace: TempDir, #[case] reference: &str) {
        let err = fetcher(&workspace).fetch(reference).expect_err("unreadable");
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[rstest]
    fn inline_read_errors_name_the_path(workspace: TempDir) {
        let err = fetcher(&workspace)
            .read_inline(Utf8Path::new("absent.toml"))
            .expect_err("missing");
        let CliError::Io { path, .. } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert!(path.ends_with("absent.toml"));
    }
}
