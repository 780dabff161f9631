use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use uuid::Uuid;

/// Prefix shared by canonical and UI keys
pub const CANONICAL_PREFIX: &str = "memo_";

const DELIMITER: &str = "::";

/// Granularity of an annotatable declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    File,
    Function,
    Class,
    Method,
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::File => "file",
            ScopeKind::Function => "function",
            ScopeKind::Class => "class",
            ScopeKind::Method => "method",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file" => Some(ScopeKind::File),
            "function" => Some(ScopeKind::Function),
            "class" => Some(ScopeKind::Class),
            "method" => Some(ScopeKind::Method),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotatable unit of structure. Identity is exactly the tuple
/// (path, kind, name, parent); `parent` names the enclosing class and is
/// meaningful only for methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclScope {
    pub path: String,
    pub kind: ScopeKind,
    pub name: String,
    pub parent: Option<String>,
}

/// Encode a declaration scope as its persisted canonical key.
///
/// `path` must already be absolute and canonical. Components are joined
/// with `::` unescaped; a path or identifier containing `::` will not
/// decode back unambiguously.
pub fn canonical_key(path: &Path, kind: ScopeKind, name: &str, parent: Option<&str>) -> String {
    let mut parts = vec![path.to_string_lossy().into_owned(), kind.as_str().to_string(), name.to_string()];
    if let Some(parent) = parent {
        parts.push(parent.to_string());
    }
    format!("{CANONICAL_PREFIX}{}", parts.join(DELIMITER))
}

/// Decode a canonical key back into a declaration scope.
///
/// Returns `None` for keys without the prefix, with fewer than three
/// segments, or with an unknown kind segment; callers treat those as noise
/// to skip, not as errors. The fourth segment is the parent only when there
/// are exactly four.
pub fn decode_key(key: &str) -> Option<DeclScope> {
    let raw = key.strip_prefix(CANONICAL_PREFIX)?;
    let parts: Vec<&str> = raw.split(DELIMITER).collect();
    if parts.len() < 3 {
        return None;
    }

    let kind = ScopeKind::parse(parts[1])?;
    let parent = if parts.len() == 4 {
        Some(parts[3].to_string())
    } else {
        None
    };

    Some(DeclScope {
        path: parts[0].to_string(),
        kind,
        name: parts[2].to_string(),
        parent,
    })
}

/// Session-scoped registry handing out unique, opaque UI keys.
///
/// Collisions within the registry's lifetime are avoided by random
/// suffixing; the set of used keys is never pruned.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    used: HashSet<String>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a widget key from identity parts, guaranteed unused so far
    /// within this registry.
    pub fn ui_key(&mut self, parts: &[&str]) -> String {
        let normalized: Vec<String> = parts
            .iter()
            .map(|part| part.replace('/', "_").replace(' ', "_"))
            .collect();
        let base = format!("{CANONICAL_PREFIX}{}", normalized.join("_"));

        let mut key = base.clone();
        while self.used.contains(&key) {
            let suffix = Uuid::new_v4().simple().to_string();
            key = format!("{base}_{}", &suffix[..8]);
        }
        self.used.insert(key.clone());
        key
    }

    /// Number of keys handed out so far
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
