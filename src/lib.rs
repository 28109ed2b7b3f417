//! Syntax-classification core for an m4-style macro processor.
//!
//! This crate owns a per-character classification table that drives a
//! tokenizer living outside this crate: for every byte of input it answers
//! "which lexical role does this byte play" (escape, macro-name character,
//! whitespace, quote delimiter, comment delimiter, ...), and it reconciles
//! the two user-facing configuration surfaces that can both touch that
//! table -- the general `changesyntax` category reassignment, and the
//! legacy `changequote`/`changecom` delimiter installers.
//!
//! What lives here: the [`category::Category`] codes and the table that
//! maps each of 256 bytes to one, the `changesyntax` verbs
//! ([`changesyntax::Action`]), the quote/comment installers, the derived
//! `is_single_quotes`/`is_single_comments`/`is_macro_escaped` predicates, and
//! the quote-age safety token with its cache.
//!
//! What does not: the tokenizer itself, the macro expander, input streams,
//! builtin dispatch, diagnostics. Those are collaborators that consume this
//! crate's queries and cached quote pairs.
//!
//! The crate builds as both an ordinary `rlib` and a `staticlib`; the
//! [`ffi`] module is the thin C ABI surface a C-hosted macro processor (this
//! component's historical deployment shape) links against, generated into a
//! header by `build.rs` via `cbindgen`.
pub mod category;
mod changesyntax;
mod checks;
pub mod errors;
pub mod ffi;
mod quote_age;
mod quotes;
mod table;

pub use category::{code_for_key, Category};
pub use changesyntax::Action;
pub use errors::{SyntaxResult, UnknownKey};
pub use quote_age::QuotePairView;
pub use table::{DelimiterPair, SyntaxTable};
