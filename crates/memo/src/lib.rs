//! # Memotree Memo
//!
//! Annotation identity and report assembly.
//!
//! Two key kinds exist side by side:
//!
//! - the *canonical key* (`memo_<path>::<kind>::<name>[::<parent>]`) is
//!   decodable and is the one persisted and exported;
//! - the *UI key* is an opaque, session-local widget id whose only promise
//!   is uniqueness within one [`KeyRegistry`].
//!
//! The report formatter consumes a flat canonical-key → text mapping and
//! rebuilds the file/function/class/method hierarchy purely from the key
//! contents, so it needs no live catalog and stale keys still render.

mod error;
mod key;
mod report;

pub use error::{MemoError, Result};
pub use key::{canonical_key, decode_key, DeclScope, KeyRegistry, ScopeKind, CANONICAL_PREFIX};
pub use report::{format_report, format_report_from};
