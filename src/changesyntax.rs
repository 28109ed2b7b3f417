//! The four `changesyntax` verbs (SPEC_FULL.md ##4.3): add, subtract, set,
//! and per-category reset.
use crate::category::{code_for_key, Category};
use crate::errors::{SyntaxResult, UnknownKey};
use crate::table::SyntaxTable;

#[cfg(feature = "logging")]
use log::trace;

/// The mutation verb `changesyntax` applies to the bytes named by its
/// argument string. There is no variant for "disable quoting"/"disable
/// comments" here -- those are the installers in `quotes.rs`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `+`: OR the category onto each named byte.
    Add,
    /// `-`: remove the category from each named byte.
    Subtract,
    /// `=`: the named bytes are now the *only* bearers of the category.
    Set,
    /// the null action byte: restore the category to its default bearers.
    Reset,
}

impl Action {
    /// Maps the C `action_byte` values accepted by `m4_set_syntax`. Any
    /// other byte is a contract violation for the caller, not user input
    /// (SPEC_FULL.md ##7) -- the FFI boundary asserts on it rather than
    /// returning a sentinel.
    pub fn from_byte(byte: u8) -> Option<Action> {
        match byte {
            b'+' => Some(Action::Add),
            b'-' => Some(Action::Subtract),
            b'=' => Some(Action::Set),
            0 => Some(Action::Reset),
            _ => None,
        }
    }
}

impl SyntaxTable {
    /// `changesyntax(table, key_byte, action_byte, bytes)`.
    ///
    /// Returns the category acted on, or `UnknownKey` if `key` names no
    /// category (no state changes in that case).
    pub fn changesyntax(&mut self, key: u8, action: Action, chars: &[u8]) -> SyntaxResult<Category> {
        let code = code_for_key(key).ok_or(UnknownKey(key))?;

        #[cfg(feature = "logging")]
        trace!("changesyntax key={:?} action={action:?} code={code:?}", key as char);

        match action {
            Action::Add => self.add_syntax_set(chars, code),
            Action::Subtract => self.subtract_syntax_set(chars, code),
            Action::Set => self.set_syntax_set(chars, code),
            Action::Reset => self.reset_syntax_set(code),
        }
        self.set_quote_age(false, true);
        self.invalidate_quote_cache();
        Ok(code)
    }

    fn add_syntax_set(&mut self, chars: &[u8], code: Category) {
        if chars.is_empty() {
            return;
        }
        if code == Category::ESCAPE {
            self.is_macro_escaped = true;
        }
        for &byte in chars {
            self.add_attribute(byte, code);
        }
    }

    fn subtract_syntax_set(&mut self, chars: &[u8], code: Category) {
        if chars.is_empty() {
            return;
        }
        for &byte in chars {
            if code.is_mask() {
                self.remove_attribute(byte, code);
            } else if self.has_category(byte, code) {
                self.add_attribute(byte, Category::OTHER);
            }
        }

        match code {
            Category::ESCAPE => {
                if self.is_macro_escaped {
                    self.check_is_macro_escaped();
                }
            }
            Category::LQUOTE | Category::RQUOTE => {
                if self.is_single_quotes {
                    self.check_is_single_quotes();
                }
            }
            Category::BCOMM | Category::ECOMM => {
                if self.is_single_comments {
                    self.check_is_single_comments();
                }
            }
            _ => {}
        }
    }

    fn set_syntax_set(&mut self, chars: &[u8], code: Category) {
        for byte in 0u16..=255 {
            let byte = byte as u8;
            if code == Category::RQUOTE || code == Category::ECOMM {
                self.remove_attribute(byte, code);
            } else if self.has_category(byte, code) {
                self.add_attribute(byte, Category::OTHER);
            }
        }
        for &byte in chars {
            self.add_attribute(byte, code);
        }
        self.check_is_macro_escaped();
        self.check_is_single_quotes();
        self.check_is_single_comments();
    }

    fn reset_syntax_set(&mut self, code: Category) {
        for byte in 0u16..=255 {
            let byte = byte as u8;
            if code == Category::RQUOTE {
                if byte == b'\'' {
                    self.add_attribute(byte, Category::RQUOTE);
                } else {
                    self.remove_attribute(byte, Category::RQUOTE);
                }
            } else if code == Category::ECOMM {
                if byte == b'\n' {
                    self.add_attribute(byte, Category::ECOMM);
                } else {
                    self.remove_attribute(byte, Category::ECOMM);
                }
            } else if self.default[byte as usize] == code || self.has_category(byte, code) {
                self.add_attribute(byte, self.default[byte as usize]);
            }
        }
        self.check_is_macro_escaped();
        self.check_is_single_quotes();
        self.check_is_single_comments();
    }
}
