//! Rich-text document model.
//!
//! A post body is a tree of [`DocumentNode`]s under a [`RichText`] root. The
//! content source builds the tree from its JSON wire format (see [`wire`]),
//! and renderers walk it without mutating it.

mod node;
pub mod wire;

pub use node::*;
pub use wire::{document_from_value, node_from_value, parse_document};
