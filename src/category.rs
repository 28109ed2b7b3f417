//! The per-byte category codes used by the syntax table (`m4.h`'s
//! `M4_SYNTAX_*` family) and the single-character key that `changesyntax`
//! uses to name one of them.
//!
//! Categories come in two flavors that share one bitset:
//!
//!   * *basis* categories are mutually exclusive -- a byte has exactly one.
//!     They occupy one bit apiece so "replace the basis" is "clear
//!     `BASIS_MASK`, OR in one basis bit".
//!   * *mask* categories (`RQUOTE`, `ECOMM`) are independent overlay bits
//!     that can coexist with any basis, e.g. `\n` is `SPACE | ECOMM` by
//!     default.
use bitflags::bitflags;

bitflags! {
    /// One table entry: exactly one basis bit, plus zero or more mask bits.
    #[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
    #[repr(transparent)]
    pub struct Category: u32 {
        /// Deleted from input before lexing. Accepted by [`code_for_key`]
        /// and by `add`/`subtract`, but no installer in this crate ever
        /// assigns it to a byte -- the tokenizer that would honor it is
        /// out of scope here.
        const IGNORE = 1 << 0;
        /// Any byte with no special meaning.
        const OTHER  = 1 << 1;
        /// Whitespace, ignored when leading macro arguments.
        const SPACE  = 1 << 2;
        /// Opens the macro argument list.
        const OPEN   = 1 << 3;
        /// Closes the macro argument list.
        const CLOSE  = 1 << 4;
        /// Separates macro arguments.
        const COMMA  = 1 << 5;
        /// Indicates a macro argument reference in user macro bodies.
        const DOLLAR = 1 << 6;
        /// Starts an extended macro argument reference (`${1}`).
        const LBRACE = 1 << 7;
        /// Ends an extended macro argument reference.
        const RBRACE = 1 << 8;
        /// A single byte that is a macro name by itself. Accepted by
        /// [`code_for_key`]; no installer assigns it.
        const ACTIVE = 1 << 9;
        /// Prefixes macro names when macro escaping is enabled.
        const ESCAPE = 1 << 10;
        /// Can start and continue a macro name.
        const ALPHA  = 1 << 11;
        /// Can continue (but not start) a macro name.
        const NUM    = 1 << 12;
        /// A single-character left quote delimiter.
        const LQUOTE = 1 << 13;
        /// A single-character begin-comment delimiter.
        const BCOMM  = 1 << 14;
        /// Mask: a single-character right quote delimiter.
        const RQUOTE = 1 << 15;
        /// Mask: a single-character end-comment delimiter.
        const ECOMM  = 1 << 16;
    }
}

impl Category {
    /// Union of every basis bit. Assigning a new basis means clearing this
    /// mask first and OR-ing in exactly one basis bit.
    pub const BASIS_MASK: Category = Category::from_bits_retain(
        Self::IGNORE.bits()
            | Self::OTHER.bits()
            | Self::SPACE.bits()
            | Self::OPEN.bits()
            | Self::CLOSE.bits()
            | Self::COMMA.bits()
            | Self::DOLLAR.bits()
            | Self::LBRACE.bits()
            | Self::RBRACE.bits()
            | Self::ACTIVE.bits()
            | Self::ESCAPE.bits()
            | Self::ALPHA.bits()
            | Self::NUM.bits()
            | Self::LQUOTE.bits()
            | Self::BCOMM.bits(),
    );

    /// Union of every mask (overlay) bit.
    pub const MASKS: Category = Category::from_bits_retain(Self::RQUOTE.bits() | Self::ECOMM.bits());

    /// True if `self` is (only) one of the overlay mask categories.
    pub fn is_mask(self) -> bool {
        !self.is_empty() && Self::MASKS.contains(self)
    }

    /// The basis bit carried by this entry, with mask bits stripped.
    pub fn basis(self) -> Category {
        self & Self::BASIS_MASK
    }
}

/// The key -> category mapping consulted by `changesyntax`.
///
/// Mirrors the `m4_syntax_code` switch: sorted the same way the categories
/// are declared above. Any key not listed here yields `None`, which the FFI
/// boundary lowers to the C `-1` sentinel.
pub fn code_for_key(key: u8) -> Option<Category> {
    match key {
        b'I' | b'i' => Some(Category::IGNORE),
        b'@' => Some(Category::ESCAPE),
        b'W' | b'w' => Some(Category::ALPHA),
        b'L' | b'l' => Some(Category::LQUOTE),
        b'B' | b'b' => Some(Category::BCOMM),
        b'O' | b'o' => Some(Category::OTHER),
        b'D' | b'd' => Some(Category::NUM),
        b'$' => Some(Category::DOLLAR),
        b'{' => Some(Category::LBRACE),
        b'}' => Some(Category::RBRACE),
        b'S' | b's' => Some(Category::SPACE),
        b'A' | b'a' => Some(Category::ACTIVE),
        b'(' => Some(Category::OPEN),
        b')' => Some(Category::CLOSE),
        b',' => Some(Category::COMMA),
        b'R' | b'r' => Some(Category::RQUOTE),
        b'E' | b'e' => Some(Category::ECOMM),
        _ => None,
    }
}
