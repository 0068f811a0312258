//! C ABI DLL for moninfo -- loadable by ctypes, C#, or any FFI consumer.
//!
//! All exported functions follow the convention:
//! - Return `i32` status code: `MONINFO_OK=0`, `MONINFO_ERROR=-1`
//! - String outputs allocated by Rust, freed via `moninfo_free_string()`
//! - Last error retrievable via `moninfo_last_error()`

use std::cell::RefCell;
use std::ffi::{c_char, CString};
use std::ptr;

use moninfo_core::MonitorRow;

pub const MONINFO_OK: i32 = 0;
pub const MONINFO_ERROR: i32 = -1;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Serialize rows for a C string.  NUL padding stays in the values; JSON
/// escapes it as `\u0000`, so the C string itself has no interior NULs.
fn rows_to_c_json(rows: &[MonitorRow]) -> Result<CString, String> {
    let json = serde_json::to_string(rows).map_err(|e| format!("JSON serialization failed: {e}"))?;
    CString::new(json).map_err(|e| format!("CString conversion failed: {e}"))
}

/// Retrieve the last error message (thread-local).
///
/// Returns a pointer valid until the next moninfo_* call on this thread.
/// Returns null if no error has occurred.
#[no_mangle]
pub extern "C" fn moninfo_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Free a string previously allocated by a moninfo_* function.
///
/// # Safety
///
/// `ptr` must be a pointer returned by a moninfo_* function or null.
#[no_mangle]
pub unsafe extern "C" fn moninfo_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Collect the monitor rows as a JSON array string.
///
/// An empty array is still a success.  If the WMI query could not run, the
/// reason is left in `moninfo_last_error()`; if WMI simply reported no
/// monitors, the last error is null.
///
/// # Safety
///
/// `out_json` must be a valid pointer to a `*mut c_char`.
/// On success, `*out_json` is set to a heap-allocated JSON C string.
/// Caller must free with `moninfo_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn moninfo_monitors(out_json: *mut *mut c_char) -> i32 {
    if out_json.is_null() {
        set_last_error("out_json is null");
        return MONINFO_ERROR;
    }

    clear_last_error();
    let rows = match moninfo_core::try_collect_monitors() {
        Ok(rows) => rows,
        Err(e) => {
            set_last_error(&e.to_string());
            Vec::new()
        }
    };

    match rows_to_c_json(&rows) {
        Ok(cstr) => {
            unsafe { *out_json = cstr.into_raw() };
            MONINFO_OK
        }
        Err(msg) => {
            set_last_error(&msg);
            MONINFO_ERROR
        }
    }
}
