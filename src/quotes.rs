//! The legacy `changequote`/`changecom` installers (SPEC_FULL.md ##4.4).
//! These override the general syntax table for the delimiter bytes; they
//! are the only callers allowed to shift a byte *into* LQUOTE/BCOMM when
//! single-delimiter mode is in effect.
use crate::category::Category;
use crate::table::{DelimiterPair, SyntaxTable, DEF_BCOMM, DEF_ECOMM, DEF_LQUOTE, DEF_RQUOTE};

#[cfg(feature = "logging")]
use log::trace;

/// Categories that disqualify a byte from serving as a single-character
/// quote delimiter: those bases take precedence over LQUOTE in the
/// tokenizer, so installing LQUOTE there would never be observed.
const QUOTE_PRECEDENCE_BLOCKERS: Category = Category::from_bits_retain(
    Category::IGNORE.bits() | Category::ESCAPE.bits() | Category::ALPHA.bits() | Category::NUM.bits(),
);

/// Same, for comment delimiters -- LQUOTE additionally outranks BCOMM.
const COMMENT_PRECEDENCE_BLOCKERS: Category = Category::from_bits_retain(
    QUOTE_PRECEDENCE_BLOCKERS.bits() | Category::LQUOTE.bits(),
);

/// Apply the POSIX-ish argument-defaulting rules shared by `set_quotes` and
/// `set_comment`: `None` for the first argument means "use both defaults";
/// otherwise a missing or empty second argument falls back to `default_rq`.
fn resolve_pair(first: Option<&[u8]>, second: Option<&[u8]>, default_lq: &[u8], default_rq: &[u8]) -> (Vec<u8>, Vec<u8>) {
    match first {
        None => (default_lq.to_vec(), default_rq.to_vec()),
        Some(lq) => {
            let rq = match second {
                None => default_rq.to_vec(),
                Some(rq) if !lq.is_empty() && rq.is_empty() => default_rq.to_vec(),
                Some(rq) => rq.to_vec(),
            };
            (lq.to_vec(), rq)
        }
    }
}

impl SyntaxTable {
    /// `set_quotes(table, lq_bytes, rq_bytes)`.
    pub fn set_quotes(&mut self, lq: Option<&[u8]>, rq: Option<&[u8]>) {
        let (lq, rq) = resolve_pair(lq, rq, DEF_LQUOTE, DEF_RQUOTE);

        #[cfg(feature = "logging")]
        trace!("changequote {:?} {:?}", String::from_utf8_lossy(&lq), String::from_utf8_lossy(&rq));

        if self.quote.left == lq && self.quote.right == rq {
            return;
        }
        self.quote = DelimiterPair { left: lq, right: rq };

        self.is_single_quotes = self.quote.is_single_byte()
            && !self.has_category(self.quote.left[0], QUOTE_PRECEDENCE_BLOCKERS);

        for byte in 0u16..=255 {
            let byte = byte as u8;
            if self.has_category(byte, Category::LQUOTE) {
                let default_basis = self.default[byte as usize].basis();
                let restore = if default_basis == Category::LQUOTE {
                    Category::OTHER
                } else {
                    default_basis
                };
                self.add_attribute(byte, restore);
            }
            self.remove_attribute(byte, Category::RQUOTE);
        }
        if self.is_single_quotes {
            self.add_attribute(self.quote.left[0], Category::LQUOTE);
            self.add_attribute(self.quote.right[0], Category::RQUOTE);
        }
        if self.is_macro_escaped {
            self.check_is_macro_escaped();
        }
        self.set_quote_age(false, false);
        self.invalidate_quote_cache();
    }

    /// `set_comment(table, bc_bytes, ec_bytes)`.
    pub fn set_comment(&mut self, bc: Option<&[u8]>, ec: Option<&[u8]>) {
        let (bc, ec) = match bc {
            None => (Vec::new(), Vec::new()),
            Some(_) => resolve_pair(bc, ec, b"", DEF_ECOMM),
        };

        #[cfg(feature = "logging")]
        trace!("changecom {:?} {:?}", String::from_utf8_lossy(&bc), String::from_utf8_lossy(&ec));

        if self.comm.left == bc && self.comm.right == ec {
            return;
        }
        self.comm = DelimiterPair { left: bc, right: ec };

        self.is_single_comments = self.comm.is_single_byte()
            && !self.has_category(self.comm.left[0], COMMENT_PRECEDENCE_BLOCKERS);

        for byte in 0u16..=255 {
            let byte = byte as u8;
            if self.has_category(byte, Category::BCOMM) {
                let default_basis = self.default[byte as usize].basis();
                let restore = if default_basis == Category::BCOMM {
                    Category::OTHER
                } else {
                    default_basis
                };
                self.add_attribute(byte, restore);
            }
            self.remove_attribute(byte, Category::ECOMM);
        }
        if self.is_single_comments {
            self.add_attribute(self.comm.left[0], Category::BCOMM);
            self.add_attribute(self.comm.right[0], Category::ECOMM);
        }
        if self.is_macro_escaped {
            self.check_is_macro_escaped();
        }
        self.set_quote_age(false, false);
        self.invalidate_quote_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_quotes_none_restores_defaults() {
        let mut t = SyntaxTable::new();
        t.set_quotes(Some(b"<<"), Some(b">>"));
        t.set_quotes(None, None);
        assert_eq!(t.get_lquote(), DEF_LQUOTE);
        assert_eq!(t.get_rquote(), DEF_RQUOTE);
        assert!(t.is_single_quotes());
    }

    #[test]
    fn set_quotes_missing_right_defaults_to_apostrophe() {
        let mut t = SyntaxTable::new();
        t.set_quotes(Some(b"x"), None);
        assert_eq!(t.get_lquote(), b"x");
        assert_eq!(t.get_rquote(), b"'");
    }

    #[test]
    fn set_quotes_multichar_disables_single_quotes_and_quote_age() {
        let mut t = SyntaxTable::new();
        t.set_quotes(Some(b"<<"), Some(b">>"));
        assert!(!t.is_single_quotes());
        assert_eq!(t.quote_age(), 0);
        assert!(!t.has_category(b'`', Category::LQUOTE));
    }

    #[test]
    fn set_quotes_empty_disables_quoting() {
        let mut t = SyntaxTable::new();
        t.set_quotes(Some(b""), Some(b""));
        assert!(t.get_lquote().is_empty());
        assert!(t.get_rquote().is_empty());
        assert!(!t.is_single_quotes());
        assert_eq!(t.quote_age(), 0);
    }

    #[test]
    fn set_quotes_to_brackets_relocates_lquote_rquote() {
        let mut t = SyntaxTable::new();
        t.set_quotes(Some(b"["), Some(b"]"));
        assert!(t.has_category(b'[', Category::LQUOTE));
        assert!(t.has_category(b']', Category::RQUOTE));
        assert!(!t.has_category(b'`', Category::LQUOTE));
        assert!(t.is_single_quotes());
        let age = t.quote_age();
        assert_eq!((age >> 8) & 0xff, u32::from(b'['));
        assert_eq!(age & 0xff, u32::from(b']'));
    }

    #[test]
    fn set_quotes_is_a_no_op_when_pair_is_unchanged() {
        let mut t = SyntaxTable::new();
        let age_before = t.quote_age();
        let lq = t.get_lquote().to_vec();
        let rq = t.get_rquote().to_vec();
        t.set_quotes(Some(&lq), Some(&rq));
        assert_eq!(t.quote_age(), age_before);
    }

    #[test]
    fn set_comment_none_disables_comments() {
        let mut t = SyntaxTable::new();
        t.set_comment(None, None);
        assert!(t.get_bcomm().is_empty());
        assert!(t.get_ecomm().is_empty());
        assert!(!t.is_single_comments());
        assert!(!t.has_category(b'#', Category::BCOMM));
    }

    #[test]
    fn set_comment_missing_end_defaults_to_newline() {
        let mut t = SyntaxTable::new();
        t.set_comment(Some(b"x"), None);
        assert_eq!(t.get_bcomm(), b"x");
        assert_eq!(t.get_ecomm(), b"\n");
    }
}
