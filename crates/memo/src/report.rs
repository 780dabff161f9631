use crate::error::Result;
use crate::key::{decode_key, ScopeKind};
use std::path::Path;

/// Format the annotation map into the exported plain-text report, with
/// paths rendered relative to the current working directory.
///
/// Input order is the insertion order used for functions, classes, and
/// methods within each file block.
pub fn format_report<'a, I>(annotations: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let base = std::env::current_dir()?;
    Ok(format_report_from(annotations, &base))
}

/// Format the annotation map against an explicit base directory.
///
/// Whitespace-only memos, keys without the canonical prefix, keys with
/// fewer than three segments, and method keys without a parent are all
/// dropped silently. A stored path outside `base` renders absolute.
pub fn format_report_from<'a, I>(annotations: I, base: &Path) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut groups: Vec<(String, FileGroup)> = Vec::new();

    for (key, memo) in annotations {
        if memo.trim().is_empty() {
            continue;
        }
        let Some(scope) = decode_key(key) else {
            log::debug!("Skipping undecodable annotation key: {key}");
            continue;
        };

        // a method is addressable only through its class; reject before
        // any group exists so the entry leaves no empty file block behind
        if scope.kind == ScopeKind::Method && scope.parent.is_none() {
            continue;
        }

        let group = file_group(&mut groups, &scope.path);
        match scope.kind {
            ScopeKind::File => group.file_memo = Some(memo.to_string()),
            ScopeKind::Function => upsert(&mut group.functions, &scope.name, memo),
            ScopeKind::Class => group.class_entry(&scope.name).memo = Some(memo.to_string()),
            ScopeKind::Method => {
                let Some(parent) = scope.parent.as_deref() else {
                    continue;
                };
                upsert(&mut group.class_entry(parent).methods, &scope.name, memo);
            }
        }
    }

    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut lines = Vec::new();
    for (path, group) in &groups {
        let rel = match Path::new(path).strip_prefix(base) {
            Ok(rel) => rel.display().to_string(),
            // stored path is outside the base; keep it absolute
            Err(_) => path.clone(),
        };
        lines.push(format!("📄 {rel}"));

        if let Some(memo) = &group.file_memo {
            lines.push(format!("  📌 {memo}"));
        }
        for (name, memo) in &group.functions {
            lines.push(format!("  [FUNC] {name}() : {memo}"));
        }
        for class in &group.classes {
            lines.push(format!(
                "  [CLASS] {} : {}",
                class.name,
                class.memo.as_deref().unwrap_or_default()
            ));
            for (name, memo) in &class.methods {
                lines.push(format!("    └── def {name}() : {memo}"));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Memos of one file, grouped by declaration hierarchy. Built with explicit
/// find-or-insert so grouping never materializes phantom entries.
#[derive(Debug, Default)]
struct FileGroup {
    file_memo: Option<String>,
    functions: Vec<(String, String)>,
    classes: Vec<ClassGroup>,
}

#[derive(Debug)]
struct ClassGroup {
    name: String,
    memo: Option<String>,
    methods: Vec<(String, String)>,
}

impl FileGroup {
    fn class_entry(&mut self, name: &str) -> &mut ClassGroup {
        if let Some(idx) = self.classes.iter().position(|c| c.name == name) {
            &mut self.classes[idx]
        } else {
            self.classes.push(ClassGroup {
                name: name.to_string(),
                memo: None,
                methods: Vec::new(),
            });
            self.classes.last_mut().unwrap()
        }
    }
}

fn file_group<'a>(groups: &'a mut Vec<(String, FileGroup)>, path: &str) -> &'a mut FileGroup {
    if let Some(idx) = groups.iter().position(|(p, _)| p == path) {
        &mut groups[idx].1
    } else {
        groups.push((path.to_string(), FileGroup::default()));
        &mut groups.last_mut().unwrap().1
    }
}

/// Last write wins, first position kept
fn upsert(entries: &mut Vec<(String, String)>, name: &str, memo: &str) {
    if let Some(entry) = entries.iter_mut().find(|(n, _)| n == name) {
        entry.1 = memo.to_string();
    } else {
        entries.push((name.to_string(), memo.to_string()));
    }
}
