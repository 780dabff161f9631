//! # Memotree Outline
//!
//! Declaration outline extraction for annotatable source structure.
//!
//! ## Pipeline
//!
//! ```text
//! Source File
//!     │
//!     ├──> Language Detection (from extension)
//!     │
//!     ├──> Tree-sitter Parsing → AST
//!     │
//!     └──> Outline Collection
//!          ├─> Module-level functions
//!          └─> Classes with directly declared methods
//! ```
//!
//! The model is deliberately two levels deep: declarations directly under
//! the module, and declarations directly under a class body. A function
//! nested inside another function, or a class inside a function, never
//! appears in the outline.
//!
//! ## Example
//!
//! ```rust
//! use memotree_outline::{Language, OutlineExtractor};
//!
//! let code = r#"
//! def foo():
//!     pass
//!
//! class Bar:
//!     def m(self):
//!         pass
//! "#;
//!
//! let mut extractor = OutlineExtractor::new(Language::Python).unwrap();
//! let outline = extractor.extract(code).unwrap();
//! assert_eq!(outline.functions, vec!["foo"]);
//! assert_eq!(outline.classes[0].name, "Bar");
//! ```

mod error;
mod extractor;
mod language;
mod types;

pub use error::{OutlineError, Result};
pub use extractor::OutlineExtractor;
pub use language::Language;
pub use types::{ClassOutline, Outline};
