use crate::error::{OutlineError, Result};
use crate::language::Language;
use crate::types::Outline;
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// AST-based extractor for the two-level declaration outline
pub struct OutlineExtractor {
    parser: Parser,
    language: Language,
}

impl OutlineExtractor {
    /// Create new extractor for a language
    pub fn new(language: Language) -> Result<Self> {
        if !language.supports_outline() {
            return Err(OutlineError::unsupported_language(language.as_str()));
        }

        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| OutlineError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, language })
    }

    /// Create an extractor picking the language from the file extension
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Language::from_path(path))
    }

    /// Read and extract the outline of a source file
    pub fn extract_file(&mut self, path: &Path) -> Result<Outline> {
        let content = fs::read_to_string(path)?;
        self.extract(&content)
    }

    /// Parse source text and collect its declaration outline.
    ///
    /// A file that does not parse cleanly is an error; no partial outline
    /// is produced for malformed input.
    pub fn extract(&mut self, content: &str) -> Result<Outline> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| OutlineError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(OutlineError::parse("Source contains syntax errors"));
        }

        let mut outline = Outline::default();
        match self.language {
            Language::Python => Self::collect_python(content, root, &mut outline),
            Language::Rust => Self::collect_rust(content, root, &mut outline),
            Language::JavaScript | Language::TypeScript => {
                Self::collect_js(content, root, &mut outline);
            }
            // new() rejects Unknown
            Language::Unknown => {}
        }

        log::debug!(
            "Extracted {} functions, {} classes",
            outline.functions.len(),
            outline.classes.len()
        );
        Ok(outline)
    }

    /// Collect module-level declarations from Python code
    fn collect_python(content: &str, root: Node, outline: &mut Outline) {
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            // ast reports decorated definitions as direct children
            let child = Self::unwrap_decorated(child);

            match child.kind() {
                "function_definition" => {
                    if let Some(name) = Self::node_name(content, child) {
                        outline.push_function(name);
                    }
                }
                "class_definition" => {
                    Self::collect_python_class(content, child, outline);
                }
                _ => {}
            }
        }
    }

    /// Collect methods declared directly in a Python class body
    fn collect_python_class(content: &str, class_node: Node, outline: &mut Outline) {
        let Some(class_name) = Self::node_name(content, class_node) else {
            return;
        };
        let class = outline.class_entry(&class_name);

        let mut cursor = class_node.walk();
        for child in class_node.children(&mut cursor) {
            if child.kind() != "block" {
                continue;
            }
            let mut body_cursor = child.walk();
            for member in child.children(&mut body_cursor) {
                let member = Self::unwrap_decorated(member);
                if member.kind() == "function_definition" {
                    if let Some(name) = Self::node_name(content, member) {
                        class.methods.push(name);
                    }
                }
            }
        }
    }

    /// Collect module-level declarations from Rust code. Impl targets fill
    /// the class level; methods come from the impl body's function items.
    fn collect_rust(content: &str, root: Node, outline: &mut Outline) {
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "function_item" => {
                    if let Some(name) = Self::node_name(content, child) {
                        outline.push_function(name);
                    }
                }
                "impl_item" => {
                    Self::collect_impl_methods(content, child, outline);
                }
                _ => {}
            }
        }
    }

    /// Collect function items declared directly in an impl block
    fn collect_impl_methods(content: &str, impl_node: Node, outline: &mut Outline) {
        let Some(target) = Self::extract_impl_target(content, impl_node) else {
            return;
        };
        // Multiple impl blocks for one type merge into one class entry
        let class = outline.class_entry(&target);

        let mut cursor = impl_node.walk();
        for child in impl_node.children(&mut cursor) {
            if child.kind() != "declaration_list" {
                continue;
            }
            let mut decl_cursor = child.walk();
            for member in child.children(&mut decl_cursor) {
                if member.kind() == "function_item" {
                    if let Some(name) = Self::node_name(content, member) {
                        class.methods.push(name);
                    }
                }
            }
        }
    }

    /// Extract the target type name of an impl block
    fn extract_impl_target(content: &str, impl_node: Node) -> Option<String> {
        let type_node = impl_node.child_by_field_name("type")?;
        match type_node.kind() {
            // Simple type: impl MyStruct
            "type_identifier" => Some(Self::node_text(content, type_node).to_string()),

            // Generic type: impl<T> MyStruct<T>
            // Qualified path: impl module::MyStruct
            "generic_type" | "scoped_type_identifier" => {
                let mut cursor = type_node.walk();
                for child in type_node.children(&mut cursor) {
                    if child.kind() == "type_identifier" {
                        return Some(Self::node_text(content, child).to_string());
                    }
                }
                None
            }

            _ => None,
        }
    }

    /// Collect module-level declarations from JavaScript/TypeScript code
    fn collect_js(content: &str, root: Node, outline: &mut Outline) {
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            // exported declarations are still module-level declarations
            let child = Self::unwrap_export(child);

            match child.kind() {
                "function_declaration" => {
                    if let Some(name) = Self::node_name(content, child) {
                        outline.push_function(name);
                    }
                }
                "class_declaration" => {
                    Self::collect_js_class(content, child, outline);
                }
                _ => {}
            }
        }
    }

    /// Collect method definitions declared directly in a JS/TS class body
    fn collect_js_class(content: &str, class_node: Node, outline: &mut Outline) {
        let Some(class_name) = Self::node_name(content, class_node) else {
            return;
        };
        let class = outline.class_entry(&class_name);

        let mut cursor = class_node.walk();
        for child in class_node.children(&mut cursor) {
            if child.kind() != "class_body" {
                continue;
            }
            let mut body_cursor = child.walk();
            for member in child.children(&mut body_cursor) {
                if member.kind() == "method_definition" {
                    if let Some(name) = Self::node_name(content, member) {
                        class.methods.push(name);
                    }
                }
            }
        }
    }

    /// Step through a Python decorated_definition to the definition inside
    fn unwrap_decorated(node: Node) -> Node {
        if node.kind() == "decorated_definition" {
            if let Some(inner) = node.child_by_field_name("definition") {
                return inner;
            }
        }
        node
    }

    /// Step through a JS/TS export_statement to the declaration inside
    fn unwrap_export(node: Node) -> Node {
        if node.kind() == "export_statement" {
            if let Some(inner) = node.child_by_field_name("declaration") {
                return inner;
            }
        }
        node
    }

    /// Extract the declared name from an AST node
    fn node_name(content: &str, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            // Different languages use different node kinds for names
            let is_name_node = matches!(
                child.kind(),
                "identifier" | "name" | "type_identifier" | "property_identifier"
            );

            if is_name_node {
                return Some(Self::node_text(content, child).to_string());
            }
        }
        None
    }

    fn node_text<'a>(content: &'a str, node: Node) -> &'a str {
        &content[node.start_byte()..node.end_byte()]
    }
}
