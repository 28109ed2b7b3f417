//! The syntax table itself: the default and current 256-entry classification
//! vectors, the owned quote/comment delimiter pairs, the three derived
//! booleans, and the attribute-mutation primitives that every higher-level
//! verb or installer builds on.
use crate::category::Category;

#[cfg(feature = "logging")]
use log::trace;

/// A single byte's ASCII role for the purposes of building the default
/// vector. Fixed to a portable definition per the REDESIGN FLAGS note,
/// rather than the host locale's `isspace`/`isalpha`/`isdigit`.
fn is_ascii_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0c /* FF */ | 0x0b /* VT */)
}

fn is_ascii_alpha_or_underscore(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// The left/right (or begin/end) strings of a quote or comment delimiter
/// pair. Arbitrary bytes, not necessarily valid UTF-8.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelimiterPair {
    pub left: Vec<u8>,
    pub right: Vec<u8>,
}

impl DelimiterPair {
    fn new(left: &[u8], right: &[u8]) -> Self {
        Self {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    /// True iff both sides are exactly one byte.
    pub fn is_single_byte(&self) -> bool {
        self.left.len() == 1 && self.right.len() == 1
    }
}

/// Default left/right quote, matching GNU m4's historical `` ` ``/`'`.
pub const DEF_LQUOTE: &[u8] = b"`";
pub const DEF_RQUOTE: &[u8] = b"'";
/// Default begin/end comment, `#` to end of line.
pub const DEF_BCOMM: &[u8] = b"#";
pub const DEF_ECOMM: &[u8] = b"\n";

/// One long-lived classification table, owned by the macro-processor
/// instance that created it. See the module-level docs in `lib.rs` for the
/// invariants this type upholds.
pub struct SyntaxTable {
    /// Computed once at construction; never mutated again (I5).
    pub(crate) default: [Category; 256],
    /// Mutated in place by `changesyntax` verbs and the quote/comment
    /// installers.
    pub(crate) current: [Category; 256],
    pub(crate) quote: DelimiterPair,
    pub(crate) comm: DelimiterPair,
    pub(crate) is_single_quotes: bool,
    pub(crate) is_single_comments: bool,
    pub(crate) is_macro_escaped: bool,
    /// Saturating count of arbitrary-syntax changes since the last reset.
    pub(crate) syntax_age: u16,
    pub(crate) quote_age: u32,
    /// Backing storage for the non-allocating quote-cache reconstruction
    /// path (see `quote_age.rs`).
    pub(crate) cache_bytes: [u8; 2],
    /// Memoized copy used by the zero-age quote-cache path; cleared by
    /// `invalidate_quote_cache`.
    pub(crate) cached_quote: Option<DelimiterPair>,
}

impl SyntaxTable {
    /// Build the default classification vector per the table in
    /// SPEC_FULL.md ##4.1: punctuation first, then whitespace, alphabetics,
    /// digits, and everything else as OTHER.
    fn build_default() -> [Category; 256] {
        let mut table = [Category::OTHER; 256];
        for (byte, entry) in table.iter_mut().enumerate() {
            let byte = byte as u8;
            *entry = match byte {
                b'(' => Category::OPEN,
                b')' => Category::CLOSE,
                b',' => Category::COMMA,
                b'$' => Category::DOLLAR,
                b'{' => Category::LBRACE,
                b'}' => Category::RBRACE,
                b'`' => Category::LQUOTE,
                b'#' => Category::BCOMM,
                _ if is_ascii_whitespace(byte) => Category::SPACE,
                _ if is_ascii_alpha_or_underscore(byte) => Category::ALPHA,
                _ if byte.is_ascii_digit() => Category::NUM,
                _ => Category::OTHER,
            };
        }
        table
    }

    /// Create a table with default categories and default quote/comment
    /// delimiters, all derived flags set to their defaults, and a non-zero
    /// baseline quote age.
    pub fn new() -> Self {
        let default = Self::build_default();
        let mut table = Self {
            current: default,
            default,
            quote: DelimiterPair::default(),
            comm: DelimiterPair::default(),
            is_single_quotes: false,
            is_single_comments: false,
            is_macro_escaped: false,
            syntax_age: 0,
            quote_age: 0,
            cache_bytes: [0; 2],
            cached_quote: None,
        };
        table.reset_to_defaults();
        table
    }

    /// Re-install every default delimiter and derived flag. Used both by
    /// `new` and by `changesyntax`'s reset verb with a null key
    /// (SPEC_FULL.md ##4.1, ##4.3).
    pub(crate) fn reset_to_defaults(&mut self) {
        self.current = self.default;
        self.quote = DelimiterPair::new(DEF_LQUOTE, DEF_RQUOTE);
        self.comm = DelimiterPair::new(DEF_BCOMM, DEF_ECOMM);
        self.add_attribute(self.quote.right[0], Category::RQUOTE);
        self.add_attribute(self.comm.right[0], Category::ECOMM);
        self.is_single_quotes = true;
        self.is_single_comments = true;
        self.is_macro_escaped = false;
        self.set_quote_age(true, false);
        self.invalidate_quote_cache();
    }

    /// `add(byte, code)`: OR a mask bit in, or replace the basis while
    /// preserving mask bits.
    pub(crate) fn add_attribute(&mut self, byte: u8, code: Category) -> Category {
        let entry = &mut self.current[byte as usize];
        if code.is_mask() {
            *entry |= code;
        } else {
            *entry = (*entry & Category::BASIS_MASK.complement()) | code;
        }
        let entry = *entry;
        #[cfg(feature = "logging")]
        trace!("set syntax {byte:#04o} {:?} = {entry:?}", byte as char);
        entry
    }

    /// `remove(byte, code)`: clear the mask bit(s). Only legal for masks.
    pub(crate) fn remove_attribute(&mut self, byte: u8, code: Category) -> Category {
        debug_assert!(code.is_mask(), "remove_attribute called with a basis code");
        let entry = &mut self.current[byte as usize];
        *entry &= !code;
        let entry = *entry;
        #[cfg(feature = "logging")]
        trace!("unset syntax {byte:#04o} {:?} = {entry:?}", byte as char);
        entry
    }

    /// `classify(table, byte) -> entry`: the full current entry (basis OR
    /// masks) for `byte`.
    pub fn classify(&self, byte: u8) -> Category {
        self.current[byte as usize]
    }

    /// `has_category(table, byte, code_mask) -> bool`: the hot-path query
    /// the tokenizer calls once per input byte.
    #[inline]
    pub fn has_category(&self, byte: u8, code_mask: Category) -> bool {
        self.current[byte as usize].intersects(code_mask)
    }

    pub fn is_single_quotes(&self) -> bool {
        self.is_single_quotes
    }

    pub fn is_single_comments(&self) -> bool {
        self.is_single_comments
    }

    pub fn is_macro_escaped(&self) -> bool {
        self.is_macro_escaped
    }

    pub fn get_quotes(&self) -> &DelimiterPair {
        &self.quote
    }

    pub fn get_comments(&self) -> &DelimiterPair {
        &self.comm
    }

    pub fn get_lquote(&self) -> &[u8] {
        &self.quote.left
    }

    pub fn get_rquote(&self) -> &[u8] {
        &self.quote.right
    }

    pub fn get_bcomm(&self) -> &[u8] {
        &self.comm.left
    }

    pub fn get_ecomm(&self) -> &[u8] {
        &self.comm.right
    }
}

impl Default for SyntaxTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vector_matches_the_policy_table() {
        let t = SyntaxTable::new();
        assert_eq!(t.classify(b'('), Category::OPEN);
        assert_eq!(t.classify(b')'), Category::CLOSE);
        assert_eq!(t.classify(b','), Category::COMMA);
        assert_eq!(t.classify(b'$'), Category::DOLLAR);
        assert_eq!(t.classify(b'{'), Category::LBRACE);
        assert_eq!(t.classify(b'}'), Category::RBRACE);
        assert_eq!(t.classify(b'#'), Category::BCOMM);
        assert_eq!(t.classify(b'_'), Category::ALPHA);
        assert_eq!(t.classify(b'7'), Category::NUM);
        assert_eq!(t.classify(0), Category::OTHER);
    }

    #[test]
    fn backtick_and_quote_are_lquote_rquote_by_default() {
        let t = SyntaxTable::new();
        assert!(t.has_category(b'`', Category::LQUOTE));
        assert!(t.has_category(b'\'', Category::RQUOTE));
    }

    #[test]
    fn newline_is_space_and_ecomm_by_default() {
        let t = SyntaxTable::new();
        assert!(t.has_category(b'\n', Category::SPACE));
        assert!(t.has_category(b'\n', Category::ECOMM));
    }

    #[test]
    fn every_byte_has_exactly_one_basis_category() {
        let t = SyntaxTable::new();
        for byte in 0..=255u8 {
            let basis = t.classify(byte) & Category::BASIS_MASK;
            assert_eq!(basis.bits().count_ones(), 1, "byte {byte:#04x}");
        }
    }

    #[test]
    fn default_vector_is_never_mutated() {
        let mut t = SyntaxTable::new();
        let before = t.default;
        t.add_attribute(b'x', Category::ESCAPE);
        t.remove_attribute(b'\'', Category::RQUOTE);
        assert_eq!(t.default, before);
    }

    #[test]
    fn add_mask_preserves_basis() {
        let mut t = SyntaxTable::new();
        t.add_attribute(b'x', Category::RQUOTE);
        assert_eq!(t.classify(b'x'), Category::ALPHA | Category::RQUOTE);
    }

    #[test]
    fn add_basis_replaces_basis_but_keeps_masks() {
        let mut t = SyntaxTable::new();
        t.add_attribute(b'\n', Category::ALPHA);
        assert_eq!(t.classify(b'\n'), Category::ALPHA | Category::ECOMM);
    }
}
