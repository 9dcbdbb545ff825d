//! Default document selection for `adoc-doctest`
//!
//! Walks a directory tree and keeps files matching the configured include glob
//! and none of the exclude globs. Dot-files and dot-directories are skipped
//! unless the include pattern names one. Symlinked files are selected;
//! symlinked directories are not entered.

use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};

use adocheck_config::DoctestConfig;
use adocheck_utils::error::ConfigError;

use crate::error::AdocheckError;

/// Include/exclude glob matcher over paths relative to the scan root.
#[derive(Debug, Clone)]
pub struct DocumentSelector {
    include: GlobSet,
    exclude: GlobSet,
    /// Include pattern has a component starting with `.`
    include_hidden: bool,
}

impl DocumentSelector {
    pub fn new(include: &str, exclude: &[String]) -> Result<Self, ConfigError> {
        let glob = |key: &str, pattern: &str| {
            Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: format!("{pattern}: {e}"),
            })
        };
        let build = |key: &str, builder: GlobSetBuilder| {
            builder.build().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: e.to_string(),
            })
        };

        let mut include_builder = GlobSetBuilder::new();
        include_builder.add(glob("doctest.include", include)?);

        let mut exclude_builder = GlobSetBuilder::new();
        for pattern in exclude {
            exclude_builder.add(glob("doctest.exclude", pattern)?);
        }

        Ok(Self {
            include: build("doctest.include", include_builder)?,
            exclude: build("doctest.exclude", exclude_builder)?,
            include_hidden: include.split('/').any(|part| part.starts_with('.')),
        })
    }

    pub fn from_config(config: &DoctestConfig) -> Result<Self, ConfigError> {
        Self::new(&config.include, &config.exclude)
    }

    #[must_use]
    pub fn should_include(&self, path: &Utf8Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }

    /// A directory is pruned when anything inside it would be excluded.
    fn should_descend(&self, dir: &Utf8Path) -> bool {
        !self.exclude.is_match(dir) && !self.exclude.is_match(dir.join("_"))
    }

    /// Matching files under `root`, relative to it, sorted by path.
    pub fn select_files(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, AdocheckError> {
        let mut files = Vec::new();
        self.walk_directory(root, root, &mut files)
            .map_err(|e| AdocheckError::Selection {
                root: root.to_string(),
                reason: format!("{e:#}"),
            })?;
        files.sort();
        tracing::debug!(root = %root, count = files.len(), "selected documents");
        Ok(files)
    }

    fn walk_directory(
        &self,
        root: &Utf8Path,
        dir: &Utf8Path,
        files: &mut Vec<Utf8PathBuf>,
    ) -> Result<()> {
        let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory: {dir}"))?;

        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read entry in {dir}"))?;
            let Ok(path) = Utf8PathBuf::try_from(entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
                continue;
            };
            if !self.include_hidden && path.file_name().is_some_and(|name| name.starts_with('.')) {
                continue;
            }

            let mut file_type = entry
                .file_type()
                .with_context(|| format!("Failed to stat {path}"))?;
            if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(target) if target.is_file() => file_type = target.file_type(),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::debug!(path = %path, error = %e, "skipping dangling symlink");
                        continue;
                    }
                }
            }

            let relative = path.strip_prefix(root).unwrap_or(path.as_path()).to_path_buf();
            if file_type.is_dir() {
                if self.should_descend(&relative) {
                    self.walk_directory(root, &path, files)?;
                }
            } else if file_type.is_file() && self.should_include(&relative) {
                files.push(relative);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "= Doc\n").unwrap();
    }

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_default_selection_is_recursive_and_sorted() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        touch(&root, "z.adoc");
        touch(&root, "docs/b.adoc");
        touch(&root, "docs/a.adoc");
        touch(&root, "docs/deep/nested/c.adoc");
        touch(&root, "docs/notes.txt");
        touch(&root, "README.md");

        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        let files = selector.select_files(&root).unwrap();

        assert_eq!(
            files,
            [
                "docs/a.adoc",
                "docs/b.adoc",
                "docs/deep/nested/c.adoc",
                "z.adoc"
            ]
            .map(Utf8PathBuf::from)
        );
    }

    #[test]
    fn test_default_excludes_are_pruned() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        touch(&root, "guide.adoc");
        touch(&root, "node_modules/pkg/README.adoc");
        touch(&root, "target/doc/out.adoc");
        touch(&root, "sub/target/x.adoc");

        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        let files = selector.select_files(&root).unwrap();

        assert_eq!(files, [Utf8PathBuf::from("guide.adoc")]);
    }

    #[test]
    fn test_custom_include_and_exclude() {
        let selector =
            DocumentSelector::new("docs/**/*.adoc", &["**/drafts/**".to_string()]).unwrap();

        assert!(selector.should_include(Utf8Path::new("docs/guide.adoc")));
        assert!(selector.should_include(Utf8Path::new("docs/api/index.adoc")));
        assert!(!selector.should_include(Utf8Path::new("guide.adoc")));
        assert!(!selector.should_include(Utf8Path::new("docs/drafts/wip.adoc")));
    }

    #[test]
    fn test_empty_tree_selects_nothing() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        assert!(selector.select_files(&root).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_selection_error() {
        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        let err = selector
            .select_files(Utf8Path::new("/nonexistent/adocheck/root"))
            .unwrap_err();
        assert!(matches!(err, AdocheckError::Selection { .. }));
    }

    #[test]
    fn test_hidden_entries_are_skipped_by_default() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        touch(&root, "guide.adoc");
        touch(&root, ".hidden.adoc");
        touch(&root, ".github/tmpl.adoc");
        touch(&root, "docs/.cache/page.adoc");

        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        let files = selector.select_files(&root).unwrap();

        assert_eq!(files, [Utf8PathBuf::from("guide.adoc")]);
    }

    #[test]
    fn test_include_naming_a_dot_directory_selects_it() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        touch(&root, ".github/tmpl.adoc");
        touch(&root, "guide.adoc");

        let selector = DocumentSelector::new(".github/*.adoc", &[]).unwrap();
        let files = selector.select_files(&root).unwrap();

        assert_eq!(files, [Utf8PathBuf::from(".github/tmpl.adoc")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_selected_but_directories_not_entered() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        let outside = TempDir::new().unwrap();
        let outside_root = utf8_root(&outside);
        touch(&outside_root, "shared.adoc");
        touch(&outside_root, "tree/nested.adoc");

        touch(&root, "guide.adoc");
        symlink(outside_root.join("shared.adoc"), root.join("linked.adoc")).unwrap();
        symlink(outside_root.join("tree"), root.join("linked-dir")).unwrap();
        symlink(root.join("gone.adoc"), root.join("dangling.adoc")).unwrap();

        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        let files = selector.select_files(&root).unwrap();

        assert_eq!(
            files,
            ["guide.adoc", "linked.adoc"].map(Utf8PathBuf::from)
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_skipped_not_fatal() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        touch(&root, "guide.adoc");
        fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff.adoc")), "= Doc\n").unwrap();

        let selector = DocumentSelector::from_config(&DoctestConfig::default()).unwrap();
        let files = selector.select_files(&root).unwrap();

        assert_eq!(files, [Utf8PathBuf::from("guide.adoc")]);
    }

    #[test]
    fn test_invalid_glob() {
        let err = DocumentSelector::new("docs/[", &[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "doctest.include"));
    }
}
