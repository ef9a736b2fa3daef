//! BibTeX output: key derivation and entry serialization.
//!
//! The export side of the crate produces [`BookRecord`](crate::BookRecord)s;
//! this side turns them into text: a document-unique key per record, a
//! rendered entry per record, and a LaTeX harness that cites everything
//! once.

mod keys;
mod latex;
mod write;

pub use keys::CitationKey;

pub(crate) use keys::KeyAllocator;
pub(crate) use latex::test_document;
pub(crate) use write::{render_document, render_entry};
