//! # Memotree Catalog
//!
//! Project-wide structure collection.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Walk (excluded segments pruned at any depth)
//!     │      └─> Source files
//!     │
//!     ├──> Outline Extractor (per file, failures isolated)
//!     │      └─> Declaration outlines
//!     │
//!     └──> Catalog
//!            └─> folder → file name → entry
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use memotree_catalog::{ProjectScanner, Result};
//!
//! fn main() -> Result<()> {
//!     let catalog = ProjectScanner::new(".")
//!         .exclude_segments(["__pycache__", ".venv"])
//!         .scan()?;
//!
//!     for (folder, files) in &catalog.folders {
//!         println!("{folder}: {} files", files.len());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod scanner;
mod types;

pub use error::{CatalogError, Result};
pub use scanner::ProjectScanner;
pub use types::{Catalog, FileEntry};
