//! Destination inference and uniqueness checks for staged files.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::{BootError, BootResult, Collision, FileMapping};

/// A file to stage: where it comes from and its final path on the staged
/// filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFileEntry {
    source: String,
    destination: String,
}

impl ResolvedFileEntry {
    /// Expanded source location.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Final destination path, unique within one context.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

/// Infer final destinations for expanded file mappings and check they are
/// unique.
///
/// * An empty destination stages the source's file name at the root.
/// * A destination ending in `/` stages the source's file name inside that
///   directory.
/// * Any other destination is used verbatim.
///
/// # Examples
///
/// ```
/// use bootconf::{FileMapping, resolve_destinations};
///
/// let entries = resolve_destinations(vec![
///     FileMapping::new("https://x/data.csv", ""),
///     FileMapping::new("https://x/data.csv", "sub/"),
/// ])?;
/// assert_eq!(entries[0].destination(), "data.csv");
/// assert_eq!(entries[1].destination(), "sub/data.csv");
/// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
/// ```
///
/// # Errors
///
/// Returns [`BootError::InvalidDestination`] when a file name must be
/// inferred from a source that has none, and
/// [`BootError::DuplicateDestination`] listing every collision when two or
/// more entries share a destination. Destinations are compared as paths on
/// the staged filesystem, so `x.py`, `./x.py` and `/x.py` collide; the
/// returned entries keep the destinations as written.
pub fn resolve_destinations(entries: Vec<FileMapping>) -> BootResult<Vec<ResolvedFileEntry>> {
    let resolved = entries
        .into_iter()
        .map(|entry| {
            let destination = infer_destination(&entry)?;
            debug!(source = %entry.source, destination = %destination, "resolved file destination");
            Ok(ResolvedFileEntry {
                source: entry.source,
                destination,
            })
        })
        .collect::<BootResult<Vec<_>>>()?;

    let collisions = find_collisions(&resolved);
    if collisions.is_empty() {
        Ok(resolved)
    } else {
        Err(Arc::new(BootError::DuplicateDestination { collisions }))
    }
}

fn infer_destination(entry: &FileMapping) -> BootResult<String> {
    let dest = entry.destination.as_str();
    if !dest.is_empty() && !dest.ends_with('/') {
        return Ok(dest.to_owned());
    }
    let name = file_name(&entry.source).ok_or_else(|| {
        Arc::new(BootError::InvalidDestination {
            file_source: entry.source.clone(),
            reason: "the source has no file name to stage it under".to_owned(),
        })
    })?;
    Ok(format!("{dest}{name}"))
}

/// Last path segment of `source`, ignoring any query or fragment.
fn file_name(source: &str) -> Option<&str> {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Group sources by staged path, keeping paths claimed more than once.
///
/// Each collision reports the destination as first written.
fn find_collisions(entries: &[ResolvedFileEntry]) -> Vec<Collision> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Collision> = Vec::new();
    for entry in entries {
        let key = staged_path(&entry.destination);
        let existing = index.get(&key).copied();
        if let Some(group) = existing.and_then(|i| groups.get_mut(i)) {
            group.sources.push(entry.source.clone());
            continue;
        }
        index.insert(key, groups.len());
        groups.push(Collision {
            destination: entry.destination.clone(),
            sources: vec![entry.source.clone()],
        });
    }
    groups.retain(|group| group.sources.len() > 1);
    groups
}

/// Lexical form of `destination` relative to the staged root.
///
/// Leading `/`, empty and `.` segments are dropped; `..` removes the
/// preceding segment and never climbs above the root.
fn staged_path(destination: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in destination.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }
    segments.join("/")
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]
mod tests {
    use rstest::rstest;

    use super::{file_name, resolve_destinations, staged_path};
    use crate::{BootError, Collision, FileMapping};

    #[rstest]
    #[case("https://x/data.csv", "", "data.csv")]
    #[case("https://x/data.csv", "sub/", "sub/data.csv")]
    #[case("https://x/data.csv", "a/b/", "a/b/data.csv")]
    #[case("https://x/data.csv", "renamed.csv", "renamed.csv")]
    #[case("https://x/data.csv?raw=1#top", "", "data.csv")]
    #[case("./local/util.py", "lib/", "lib/util.py")]
    #[case("util.py", "", "util.py")]
    fn infers_destinations(#[case] source: &str, #[case] dest: &str, #[case] expected: &str) {
        let entries = resolve_destinations(vec![FileMapping::new(source, dest)])
            .expect("destination resolves");
        let [entry] = entries.as_slice() else {
            panic!("expected one entry, got {entries:?}");
        };
        assert_eq!(entry.destination(), expected);
        assert_eq!(entry.source(), source);
    }

    #[rstest]
    #[case("https://x/dir/")]
    #[case("https://x/dir/?q=1")]
    fn sources_without_file_names_need_explicit_destinations(#[case] source: &str) {
        let err = resolve_destinations(vec![FileMapping::new(source, "")])
            .expect_err("no file name");
        assert!(matches!(
            err.as_ref(),
            BootError::InvalidDestination { file_source, .. } if file_source == source
        ));
        assert_eq!(file_name(source), None);
    }

    #[test]
    fn collisions_list_every_source() {
        let err = resolve_destinations(vec![
            FileMapping::new("https://a/data.csv", ""),
            FileMapping::new("https://b/other.csv", "x.csv"),
            FileMapping::new("https://c/data.csv", ""),
            FileMapping::new("https://d/x.csv", ""),
            FileMapping::new("https://e/data.csv", "data.csv"),
        ])
        .expect_err("collisions");
        match err.as_ref() {
            BootError::DuplicateDestination { collisions } => assert_eq!(
                collisions,
                &[
                    Collision {
                        destination: "data.csv".into(),
                        sources: vec![
                            "https://a/data.csv".into(),
                            "https://c/data.csv".into(),
                            "https://e/data.csv".into(),
                        ],
                    },
                    Collision {
                        destination: "x.csv".into(),
                        sources: vec!["https://b/other.csv".into(), "https://d/x.csv".into()],
                    },
                ]
            ),
            other => panic!("expected DuplicateDestination, got {other:?}"),
        }
    }

    #[test]
    fn distinct_destinations_keep_document_order() {
        let entries = resolve_destinations(vec![
            FileMapping::new("https://x/b.py", ""),
            FileMapping::new("https://x/a.py", ""),
        ])
        .expect("unique destinations");
        let names: Vec<_> = entries.iter().map(|e| e.destination()).collect();
        assert_eq!(names, ["b.py", "a.py"]);
    }

    #[rstest]
    #[case("x.py", "x.py")]
    #[case("./x.py", "x.py")]
    #[case("/x.py", "x.py")]
    #[case("lib//x.py", "lib/x.py")]
    #[case("lib/./x.py", "lib/x.py")]
    #[case("lib/tmp/../x.py", "lib/x.py")]
    #[case("../x.py", "x.py")]
    fn staged_paths_are_lexically_normalised(#[case] destination: &str, #[case] expected: &str) {
        assert_eq!(staged_path(destination), expected);
    }

    #[rstest]
    #[case(&[("https://a/x.py", ""), ("https://b/x.py", "./x.py")], "x.py")]
    #[case(&[("https://a/x.py", ""), ("https://c/x.py", "/x.py")], "x.py")]
    #[case(&[("https://d/x.py", "lib//"), ("https://e/x.py", "lib/x.py")], "lib//x.py")]
    #[case(&[("https://f/x.py", "lib/sub/../x.py"), ("https://g/x.py", "lib/")], "lib/sub/../x.py")]
    fn spellings_of_one_path_collide(#[case] pairs: &[(&str, &str)], #[case] reported: &str) {
        let mappings = pairs
            .iter()
            .map(|(source, dest)| FileMapping::new(*source, *dest))
            .collect();
        let err = resolve_destinations(mappings).expect_err("same staged path");
        let BootError::DuplicateDestination { collisions } = err.as_ref() else {
            panic!("expected DuplicateDestination, got {err:?}");
        };
        let sources: Vec<&str> = pairs.iter().map(|(source, _)| *source).collect();
        assert_eq!(
            collisions,
            &[Collision {
                destination: reported.into(),
                sources: sources.iter().map(|s| (*s).to_owned()).collect(),
            }]
        );
    }

    #[test]
    fn normalised_comparison_keeps_written_destinations() {
        let entries = resolve_destinations(vec![
            FileMapping::new("https://x/a.py", "./lib/a.py"),
            FileMapping::new("https://x/b.py", "/lib//b.py"),
        ])
        .expect("distinct staged paths");
        let names: Vec<_> = entries.iter().map(|e| e.destination()).collect();
        assert_eq!(names, ["./lib/a.py", "/lib//b.py"]);
    }
}
