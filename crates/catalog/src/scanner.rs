use crate::error::{CatalogError, Result};
use crate::types::{Catalog, FileEntry};
use ignore::WalkBuilder;
use memotree_outline::{Language, Outline, OutlineExtractor};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Scanner producing the per-project structure catalog.
///
/// The exclusion set is the only filter: a file is dropped when any
/// component of its root-relative path matches an excluded segment name.
pub struct ProjectScanner {
    root: PathBuf,
    exclude: HashSet<String>,
}

impl ProjectScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: HashSet::new(),
        }
    }

    /// Set the folder-segment names to exclude at any depth
    pub fn exclude_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Walk the root and extract the outline of every matching source file.
    ///
    /// A file that fails extraction yields an entry with an empty outline
    /// and a diagnostic instead of aborting the scan.
    pub fn scan(&self) -> Result<Catalog> {
        let root = self
            .root
            .canonicalize()
            .map_err(|e| CatalogError::InvalidRoot(format!("{}: {e}", self.root.display())))?;

        let mut catalog = Catalog::default();

        let filter_root = root.clone();
        let exclude = self.exclude.clone();
        let mut builder = WalkBuilder::new(&root);
        builder
            // the exclusion set is the contract; no gitignore or hidden-file
            // filtering on top of it
            .standard_filters(false)
            .filter_entry(move |entry| !is_excluded(entry.path(), &filter_root, &exclude));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !Language::from_path(path).supports_outline() {
                        continue;
                    }

                    let Ok(relative) = path.strip_prefix(&root) else {
                        continue;
                    };
                    let folder = match relative.parent() {
                        Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
                        Some(parent) => parent.to_string_lossy().into_owned(),
                        None => ".".to_string(),
                    };
                    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                        continue;
                    };

                    let (outline, diagnostic) = match extract_outline(path) {
                        Ok(outline) => (outline, None),
                        Err(e) => {
                            log::warn!("Failed to extract {}: {e}", path.display());
                            (Outline::default(), Some(e.to_string()))
                        }
                    };

                    catalog.insert(
                        folder,
                        file_name.to_string(),
                        FileEntry {
                            outline,
                            path: path.to_path_buf(),
                            diagnostic,
                        },
                    );
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::info!(
            "Cataloged {} source files ({} with diagnostics)",
            catalog.file_count(),
            catalog.diagnostic_count()
        );
        Ok(catalog)
    }
}

fn extract_outline(path: &Path) -> memotree_outline::Result<Outline> {
    let mut extractor = OutlineExtractor::for_path(path)?;
    extractor.extract_file(path)
}

fn is_excluded(path: &Path, root: &Path, exclude: &HashSet<String>) -> bool {
    if exclude.is_empty() {
        return false;
    }
    if let Ok(relative) = path.strip_prefix(root) {
        for component in relative.components() {
            if let std::path::Component::Normal(name) = component {
                if exclude.contains(name.to_string_lossy().as_ref()) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn groups_by_folder_and_file() {
        let temp = tempdir().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("a.py"),
            "def foo():\n    pass\n\nclass Bar:\n    def m(self):\n        pass\n",
        )
        .unwrap();
        fs::write(temp.path().join("top.py"), "def entry():\n    pass\n").unwrap();

        let catalog = ProjectScanner::new(temp.path()).scan().unwrap();

        let pkg_files = &catalog.folders["pkg"];
        let entry = &pkg_files["a.py"];
        assert_eq!(entry.outline.functions, vec!["foo"]);
        assert_eq!(entry.outline.classes[0].name, "Bar");
        assert_eq!(entry.outline.classes[0].methods, vec!["m"]);
        assert!(entry.path.is_absolute());

        // top-level files land under "."
        assert!(catalog.folders["."].contains_key("top.py"));
        assert_eq!(catalog.file_count(), 2);
    }

    #[test]
    fn excluded_segments_pruned_at_any_depth() {
        let temp = tempdir().unwrap();
        let deep = temp.path().join("src").join("__pycache__").join("deep");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("cached.py"), "def hidden():\n    pass\n").unwrap();
        fs::write(temp.path().join("keep.py"), "def kept():\n    pass\n").unwrap();

        let catalog = ProjectScanner::new(temp.path())
            .exclude_segments(["__pycache__"])
            .scan()
            .unwrap();

        assert_eq!(catalog.file_count(), 1);
        assert!(catalog.folders["."].contains_key("keep.py"));
    }

    #[test]
    fn excluded_segment_matches_file_name_component() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("skipme.py"), "def f():\n    pass\n").unwrap();
        fs::write(temp.path().join("other.py"), "def g():\n    pass\n").unwrap();

        let catalog = ProjectScanner::new(temp.path())
            .exclude_segments(["skipme.py"])
            .scan()
            .unwrap();

        assert_eq!(catalog.file_count(), 1);
        assert!(catalog.folders["."].contains_key("other.py"));
    }

    #[test]
    fn parse_failure_isolated_per_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.py"), "def broken(:\n    pass\n").unwrap();
        fs::write(temp.path().join("good.py"), "def fine():\n    pass\n").unwrap();

        let catalog = ProjectScanner::new(temp.path()).scan().unwrap();

        let bad = &catalog.folders["."]["bad.py"];
        assert!(bad.outline.is_empty());
        assert!(bad.diagnostic.is_some());

        let good = &catalog.folders["."]["good.py"];
        assert_eq!(good.outline.functions, vec!["fine"]);
        assert!(good.diagnostic.is_none());
        assert_eq!(catalog.diagnostic_count(), 1);
    }

    #[test]
    fn non_source_files_ignored() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.txt"), "not code").unwrap();
        fs::write(temp.path().join("app.py"), "def run():\n    pass\n").unwrap();

        let catalog = ProjectScanner::new(temp.path()).scan().unwrap();

        assert_eq!(catalog.file_count(), 1);
        assert!(catalog.folders["."].contains_key("app.py"));
    }

    #[test]
    fn missing_root_is_invalid() {
        let result = ProjectScanner::new("/definitely/not/here").scan();
        assert!(matches!(result, Err(CatalogError::InvalidRoot(_))));
    }
}
