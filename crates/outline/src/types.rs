use serde::{Deserialize, Serialize};

/// Declaration outline of one source file: module-level functions plus
/// classes with their directly declared methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level function names, in declaration order
    pub functions: Vec<String>,
    /// Classes in declaration order; duplicate names merge into the first
    /// occurrence with later methods appended
    pub classes: Vec<ClassOutline>,
}

/// One class and the methods declared directly in its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOutline {
    pub name: String,
    /// Method names in declaration order
    pub methods: Vec<String>,
}

impl Outline {
    /// Record a top-level function
    pub fn push_function(&mut self, name: impl Into<String>) {
        self.functions.push(name.into());
    }

    /// Record a class, merging with an existing entry of the same name
    pub fn class_entry(&mut self, name: &str) -> &mut ClassOutline {
        if let Some(idx) = self.classes.iter().position(|c| c.name == name) {
            &mut self.classes[idx]
        } else {
            self.classes.push(ClassOutline {
                name: name.to_string(),
                methods: Vec::new(),
            });
            self.classes.last_mut().unwrap()
        }
    }

    /// Look up a class by name
    pub fn class(&self, name: &str) -> Option<&ClassOutline> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// True when the file declared nothing at either level
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_classes_merge() {
        let mut outline = Outline::default();
        outline.class_entry("Bar").methods.push("a".into());
        outline.class_entry("Baz").methods.push("x".into());
        outline.class_entry("Bar").methods.push("b".into());

        assert_eq!(outline.classes.len(), 2);
        assert_eq!(outline.classes[0].name, "Bar");
        assert_eq!(outline.classes[0].methods, vec!["a", "b"]);
    }

    #[test]
    fn empty_outline() {
        let outline = Outline::default();
        assert!(outline.is_empty());
        assert!(outline.class("Bar").is_none());
    }
}
