//! The one error this crate's safe API can return: an unrecognized
//! `changesyntax` category key. Modeled as a small `Copy` marker rather than
//! a boxed dynamic error, since there is exactly one failure mode to carry
//! (SPEC_FULL.md ##7, ##10.1).
use std::fmt;

pub type SyntaxResult<T> = Result<T, UnknownKey>;

/// `code_for_key`/`changesyntax` return this when `key` names no known
/// category. No state is changed when this is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownKey(pub u8);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown changesyntax category key {:?}", self.0 as char)
    }
}

impl std::error::Error for UnknownKey {}
