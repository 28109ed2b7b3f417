//! Derived-boolean checkers (SPEC_FULL.md ##4.5). Each only does work while
//! its flag is currently `true`; once cleared, only a full reset or an
//! installer can set it again.
use crate::category::Category;
use crate::table::SyntaxTable;

impl SyntaxTable {
    /// `check_is_single_quotes`.
    pub(crate) fn check_is_single_quotes(&mut self) -> bool {
        if !self.is_single_quotes {
            return false;
        }
        debug_assert!(self.quote.is_single_byte());

        if self.has_category(self.quote.left[0], Category::LQUOTE)
            && self.has_category(self.quote.right[0], Category::RQUOTE)
        {
            return true;
        }

        let mut lquote = None;
        let mut rquote = None;
        for byte in 0u16..=255 {
            let byte = byte as u8;
            if self.has_category(byte, Category::LQUOTE) {
                if lquote.is_none() {
                    lquote = Some(byte);
                } else {
                    self.is_single_quotes = false;
                    break;
                }
            }
            if self.has_category(byte, Category::RQUOTE) {
                if rquote.is_none() {
                    rquote = Some(byte);
                } else {
                    self.is_single_quotes = false;
                    break;
                }
            }
        }

        match (lquote, rquote) {
            (Some(l), Some(r)) if self.is_single_quotes => {
                self.quote.left[0] = l;
                self.quote.right[0] = r;
            }
            _ => self.is_single_quotes = false,
        }
        self.is_single_quotes
    }

    /// `check_is_single_comments`.
    pub(crate) fn check_is_single_comments(&mut self) -> bool {
        if !self.is_single_comments {
            return false;
        }
        debug_assert!(self.comm.is_single_byte());

        if self.has_category(self.comm.left[0], Category::BCOMM)
            && self.has_category(self.comm.right[0], Category::ECOMM)
        {
            return true;
        }

        let mut bcomm = None;
        let mut ecomm = None;
        for byte in 0u16..=255 {
            let byte = byte as u8;
            if self.has_category(byte, Category::BCOMM) {
                if bcomm.is_none() {
                    bcomm = Some(byte);
                } else {
                    self.is_single_comments = false;
                    break;
                }
            }
            if self.has_category(byte, Category::ECOMM) {
                if ecomm.is_none() {
                    ecomm = Some(byte);
                } else {
                    self.is_single_comments = false;
                    break;
                }
            }
        }

        match (bcomm, ecomm) {
            (Some(b), Some(e)) if self.is_single_comments => {
                self.comm.left[0] = b;
                self.comm.right[0] = e;
            }
            _ => self.is_single_comments = false,
        }
        self.is_single_comments
    }

    /// `check_is_macro_escaped`.
    pub(crate) fn check_is_macro_escaped(&mut self) -> bool {
        self.is_macro_escaped = (0u16..=255).any(|b| self.classify(b as u8).basis() == Category::ESCAPE);
        self.is_macro_escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quotes_survives_unrelated_mutation() {
        let mut t = SyntaxTable::new();
        t.add_attribute(b'x', Category::ESCAPE);
        assert!(t.check_is_single_quotes());
    }

    #[test]
    fn single_quotes_false_once_already_false() {
        let mut t = SyntaxTable::new();
        t.is_single_quotes = false;
        // No bearer scan happens; it stays false even if the table would
        // otherwise qualify.
        assert!(!t.check_is_single_quotes());
    }

    #[test]
    fn single_quotes_picks_up_relocated_single_bearer() {
        let mut t = SyntaxTable::new();
        // Move LQUOTE to a different byte entirely, leaving exactly one bearer.
        t.current[b'`' as usize] = Category::OTHER;
        t.add_attribute(b'[', Category::LQUOTE);
        assert!(t.check_is_single_quotes());
        assert_eq!(t.quote.left, vec![b'[']);
    }

    #[test]
    fn single_quotes_false_with_two_bearers() {
        let mut t = SyntaxTable::new();
        t.add_attribute(b'[', Category::LQUOTE);
        assert!(!t.check_is_single_quotes());
    }

    #[test]
    fn macro_escaped_true_iff_some_byte_is_escape() {
        let mut t = SyntaxTable::new();
        assert!(!t.check_is_macro_escaped());
        t.add_attribute(b'\\', Category::ESCAPE);
        assert!(t.check_is_macro_escaped());
    }
}
