use memotree_catalog::Catalog;
use memotree_memo::{canonical_key, ScopeKind};

/// Render the catalog as an indented text listing, folder by folder.
///
/// With `with_keys`, each declaration line is followed by its canonical
/// annotation key so annotation files can be assembled against the listing.
pub fn render_catalog(catalog: &Catalog, with_keys: bool) -> String {
    let mut lines = Vec::new();

    for (folder, files) in &catalog.folders {
        lines.push(format!("📁 {folder}"));
        for (file_name, entry) in files {
            lines.push(format!("  📄 {file_name}"));
            if with_keys {
                lines.push(format!(
                    "      key: {}",
                    canonical_key(&entry.path, ScopeKind::File, file_name, None)
                ));
            }
            if let Some(diag) = &entry.diagnostic {
                lines.push(format!("      ⚠ {diag}"));
            }

            for function in &entry.outline.functions {
                lines.push(format!("    def {function}()"));
                if with_keys {
                    lines.push(format!(
                        "      key: {}",
                        canonical_key(&entry.path, ScopeKind::Function, function, None)
                    ));
                }
            }

            for class in &entry.outline.classes {
                lines.push(format!("    class {}:", class.name));
                if with_keys {
                    lines.push(format!(
                        "      key: {}",
                        canonical_key(&entry.path, ScopeKind::Class, &class.name, None)
                    ));
                }
                for method in &class.methods {
                    lines.push(format!("      def {method}()"));
                    if with_keys {
                        lines.push(format!(
                            "        key: {}",
                            canonical_key(
                                &entry.path,
                                ScopeKind::Method,
                                method,
                                Some(&class.name)
                            )
                        ));
                    }
                }
            }
        }
    }

    lines.join("\n")
}
