//! The C ABI surface (SPEC_FULL.md ##6, ##10.2). Thin `extern "C"`
//! wrappers over [`crate::table::SyntaxTable`], following the same shape as
//! a Bitvec-style opaque handle: an owning raw pointer returned by a
//! `_create` function, consumed by every other call, freed by `_delete`.
//!
//! Contract violations (SPEC_FULL.md ##7) -- a null table handle, an action
//! byte outside `{+, -, =, '\0'}`, a null byte-string pointer paired with a
//! non-zero length -- are asserted on here, not reported through a return
//! value: they are programmer errors in the calling macro processor, not
//! user input.
use std::slice;

use libc::{c_char, c_int, c_uint};

use crate::category::Category;
use crate::changesyntax::Action;
use crate::table::SyntaxTable;

/// A borrowed byte range handed across the FFI boundary. `ptr` is null iff
/// `len` is zero.
#[repr(C)]
pub struct BytesView {
    pub ptr: *const u8,
    pub len: c_uint,
}

impl BytesView {
    fn of(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            BytesView { ptr: std::ptr::null(), len: 0 }
        } else {
            BytesView { ptr: bytes.as_ptr(), len: bytes.len() as c_uint }
        }
    }

    fn empty() -> Self {
        BytesView { ptr: std::ptr::null(), len: 0 }
    }
}

/// A left/right delimiter pair, returned by value rather than as a pointer
/// into the table's storage -- the table may relocate or drop the backing
/// `Vec<u8>`s on the next mutating call, so there is no stable address to
/// hand out.
#[repr(C)]
pub struct PairView {
    pub left: BytesView,
    pub right: BytesView,
}

unsafe fn opt_slice<'a>(ptr: *const u8, len: c_uint) -> Option<&'a [u8]> {
    if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(ptr, len as usize))
    }
}

/// `m4_syntax_create() -> table`.
#[no_mangle]
pub extern "C" fn m4_syntax_create() -> *mut SyntaxTable {
    Box::into_raw(Box::new(SyntaxTable::new()))
}

/// `m4_syntax_delete(table)`. No-op on a null pointer.
///
/// # Safety
/// `table` must be either null or a pointer previously returned by
/// [`m4_syntax_create`] and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn m4_syntax_delete(table: *mut SyntaxTable) {
    if !table.is_null() {
        drop(Box::from_raw(table));
    }
}

/// `classify(table, byte) -> code`.
///
/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_syntax_classify(table: *const SyntaxTable, byte: u8) -> Category {
    assert!(!table.is_null(), "m4_syntax_classify: null table");
    (*table).classify(byte)
}

/// `has_category(table, byte, code_mask) -> bool`.
///
/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_has_syntax(table: *const SyntaxTable, byte: u8, code_mask: Category) -> bool {
    assert!(!table.is_null(), "m4_has_syntax: null table");
    (*table).has_category(byte, code_mask)
}

/// `m4_syntax_code(key) -> code, or -1 if unknown`.
#[no_mangle]
pub extern "C" fn m4_syntax_code(key: c_char) -> c_int {
    match crate::category::code_for_key(key as u8) {
        Some(code) => code.bits() as c_int,
        None => -1,
    }
}

/// `m4_set_syntax(table, key, action, chars, len) -> code, or -1 if key is
/// unknown`.
///
/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`]. `chars` must be
/// non-null and point to at least `len` readable bytes. `action` must be one
/// of `+`, `-`, `=`, or the null byte.
#[no_mangle]
pub unsafe extern "C" fn m4_set_syntax(
    table: *mut SyntaxTable,
    key: c_char,
    action: c_char,
    chars: *const u8,
    len: c_uint,
) -> c_int {
    assert!(!table.is_null(), "m4_set_syntax: null table");
    assert!(!chars.is_null(), "m4_set_syntax: null byte string");
    let action = Action::from_byte(action as u8).expect("m4_set_syntax: invalid action byte");
    let chars = slice::from_raw_parts(chars, len as usize);
    match (*table).changesyntax(key as u8, action, chars) {
        Ok(code) => code.bits() as c_int,
        Err(_) => -1,
    }
}

/// `set_quotes(table, lq, lq_len, rq, rq_len)`. A null `lq`/`rq` pointer
/// means "use the default", matching the safe API's `Option<&[u8]>`.
///
/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`]. Non-null
/// `lq`/`rq` must point to at least `lq_len`/`rq_len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn m4_set_quotes(
    table: *mut SyntaxTable,
    lq: *const u8,
    lq_len: c_uint,
    rq: *const u8,
    rq_len: c_uint,
) {
    assert!(!table.is_null(), "m4_set_quotes: null table");
    (*table).set_quotes(opt_slice(lq, lq_len), opt_slice(rq, rq_len));
}

/// `set_comment(table, bc, bc_len, ec, ec_len)`.
///
/// # Safety
/// Same obligations as [`m4_set_quotes`].
#[no_mangle]
pub unsafe extern "C" fn m4_set_comment(
    table: *mut SyntaxTable,
    bc: *const u8,
    bc_len: c_uint,
    ec: *const u8,
    ec_len: c_uint,
) {
    assert!(!table.is_null(), "m4_set_comment: null table");
    (*table).set_comment(opt_slice(bc, bc_len), opt_slice(ec, ec_len));
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_is_syntax_single_quotes(table: *const SyntaxTable) -> bool {
    assert!(!table.is_null(), "m4_is_syntax_single_quotes: null table");
    (*table).is_single_quotes()
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_is_syntax_single_comments(table: *const SyntaxTable) -> bool {
    assert!(!table.is_null(), "m4_is_syntax_single_comments: null table");
    (*table).is_single_comments()
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_is_syntax_macro_escaped(table: *const SyntaxTable) -> bool {
    assert!(!table.is_null(), "m4_is_syntax_macro_escaped: null table");
    (*table).is_macro_escaped()
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_get_syntax_lquote(table: *const SyntaxTable) -> BytesView {
    assert!(!table.is_null(), "m4_get_syntax_lquote: null table");
    BytesView::of((*table).get_lquote())
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_get_syntax_rquote(table: *const SyntaxTable) -> BytesView {
    assert!(!table.is_null(), "m4_get_syntax_rquote: null table");
    BytesView::of((*table).get_rquote())
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_get_syntax_bcomm(table: *const SyntaxTable) -> BytesView {
    assert!(!table.is_null(), "m4_get_syntax_bcomm: null table");
    BytesView::of((*table).get_bcomm())
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_get_syntax_ecomm(table: *const SyntaxTable) -> BytesView {
    assert!(!table.is_null(), "m4_get_syntax_ecomm: null table");
    BytesView::of((*table).get_ecomm())
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_get_syntax_quotes(table: *const SyntaxTable) -> PairView {
    assert!(!table.is_null(), "m4_get_syntax_quotes: null table");
    let quotes = (*table).get_quotes();
    PairView { left: BytesView::of(&quotes.left), right: BytesView::of(&quotes.right) }
}

/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_get_syntax_comments(table: *const SyntaxTable) -> PairView {
    assert!(!table.is_null(), "m4_get_syntax_comments: null table");
    let comments = (*table).get_comments();
    PairView { left: BytesView::of(&comments.left), right: BytesView::of(&comments.right) }
}

/// `quote_age(table) -> u32`.
///
/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4_quote_age(table: *const SyntaxTable) -> u32 {
    assert!(!table.is_null(), "m4_quote_age: null table");
    (*table).quote_age()
}

/// `quote_cache(table, want_quotes, age) -> pair, or an all-null/zero-length
/// pair when the caller does not want quoting applied`. `age` is normally a
/// value the caller captured earlier from [`m4_quote_age`]; passing it back
/// here is what lets the cache be decoded "independently of the current
/// quote delimiters" rather than from whatever the table holds right now.
///
/// # Safety
/// `table` must be a live pointer from [`m4_syntax_create`].
#[no_mangle]
pub unsafe extern "C" fn m4__quote_cache(table: *mut SyntaxTable, want_quotes: bool, age: c_uint) -> PairView {
    assert!(!table.is_null(), "m4__quote_cache: null table");
    match (*table).quote_cache(want_quotes, age as u32) {
        Some(view) => PairView { left: BytesView::of(view.left), right: BytesView::of(view.right) },
        None => PairView { left: BytesView::empty(), right: BytesView::empty() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_classify_delete_roundtrip() {
        let table = m4_syntax_create();
        unsafe {
            assert_eq!(m4_syntax_classify(table, b'('), Category::OPEN);
            assert!(m4_has_syntax(table, b'`', Category::LQUOTE));
            m4_syntax_delete(table);
        }
    }

    #[test]
    fn syntax_code_reports_minus_one_for_unknown_key() {
        assert_eq!(m4_syntax_code(b'z' as c_char), -1);
        assert_eq!(m4_syntax_code(b'I' as c_char), Category::IGNORE.bits() as c_int);
    }

    #[test]
    fn set_syntax_roundtrip_and_unknown_key_sentinel() {
        let table = m4_syntax_create();
        unsafe {
            let code = m4_set_syntax(table, b'@' as c_char, b'+' as c_char, b"\\".as_ptr(), 1);
            assert_eq!(code, Category::ESCAPE.bits() as c_int);
            assert!(m4_has_syntax(table, b'\\', Category::ESCAPE));

            let unknown = m4_set_syntax(table, b'z' as c_char, b'+' as c_char, b"x".as_ptr(), 1);
            assert_eq!(unknown, -1);
            m4_syntax_delete(table);
        }
    }

    #[test]
    fn set_quotes_null_pointers_mean_defaults() {
        let table = m4_syntax_create();
        unsafe {
            m4_set_quotes(table, b"<".as_ptr(), 1, b">".as_ptr(), 1);
            assert!(m4_has_syntax(table, b'<', Category::LQUOTE));
            m4_set_quotes(table, std::ptr::null(), 0, std::ptr::null(), 0);
            assert!(m4_has_syntax(table, b'`', Category::LQUOTE));
            m4_syntax_delete(table);
        }
    }

    #[test]
    fn quote_cache_reports_empty_pair_when_quoting_not_wanted() {
        let table = m4_syntax_create();
        unsafe {
            let age = m4_quote_age(table);
            let pair = m4__quote_cache(table, false, age);
            assert!(pair.left.ptr.is_null());
            assert_eq!(pair.left.len, 0);
            m4_syntax_delete(table);
        }
    }

    #[test]
    fn quote_cache_decodes_the_age_passed_in_not_the_live_table_state() {
        let table = m4_syntax_create();
        unsafe {
            let stale_age = m4_quote_age(table);
            m4_set_quotes(table, b"[".as_ptr(), 1, b"]".as_ptr(), 1);
            assert_ne!(m4_quote_age(table), stale_age);

            let pair = m4__quote_cache(table, true, stale_age);
            let left = slice::from_raw_parts(pair.left.ptr, pair.left.len as usize);
            let right = slice::from_raw_parts(pair.right.ptr, pair.right.len as usize);
            assert_eq!(left, b"`");
            assert_eq!(right, b"'");
            m4_syntax_delete(table);
        }
    }

    #[test]
    fn get_syntax_quotes_reflects_current_pair() {
        let table = m4_syntax_create();
        unsafe {
            let pair = m4_get_syntax_quotes(table);
            let left = slice::from_raw_parts(pair.left.ptr, pair.left.len as usize);
            assert_eq!(left, b"`");
            m4_syntax_delete(table);
        }
    }
}
