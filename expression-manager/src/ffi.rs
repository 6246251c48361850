use libc::{c_char, c_int, size_t};

/// Returned when the input or output pointer is null or the input is not UTF-8.
pub const EM_INVALID_ARGUMENT: c_int = -1;
/// Returned when the result and its NUL terminator do not fit the output buffer.
pub const EM_BUFFER_TOO_SMALL: c_int = -2;

unsafe fn read_input<'a>(input: *const c_char) -> Option<&'a str> {
    if input.is_null() {
        return None;
    }

    std::ffi::CStr::from_ptr(input).to_str().ok()
}

/// Copies `result` into the caller's buffer followed by a NUL byte. When it
/// does not fit, the buffer is left holding an empty string.
unsafe fn fill_output_buffer(output: *mut c_char, output_len: size_t, result: &str) -> c_int {
    if output.is_null() {
        return EM_INVALID_ARGUMENT;
    }

    let output = std::slice::from_raw_parts_mut(output as *mut u8, output_len);
    if result.len() >= output.len() {
        if let Some(first) = output.first_mut() {
            *first = 0;
        }
        return EM_BUFFER_TOO_SMALL;
    }

    output[..result.len()].copy_from_slice(result.as_bytes());
    output[result.len()] = 0;
    c_int::try_from(result.len()).unwrap_or(c_int::MAX)
}

unsafe fn convert_into(
    input: *const c_char,
    output: *mut c_char,
    output_len: size_t,
    convert: fn(&str) -> String,
) -> c_int {
    let Some(input) = read_input(input) else {
        if !output.is_null() && output_len > 0 {
            *output = 0;
        }
        return EM_INVALID_ARGUMENT;
    };

    fill_output_buffer(output, output_len, &convert(input))
}

/// Check whether the brackets of the expression are balanced.
///
/// # Returns
///
/// `1` if balanced, `0` if not, [`EM_INVALID_ARGUMENT`] if `input` is null or not UTF-8.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn em_is_balanced(input: *const c_char) -> c_int {
    match read_input(input) {
        Some(input) => c_int::from(crate::is_balanced(input)),
        None => EM_INVALID_ARGUMENT,
    }
}

/// Convert an infix expression to postfix.
///
/// # Arguments
///
/// * `input` - The infix expression.
/// * `output` - The buffer to write the postfix expression (or `invalid`) to.
/// * `output_len` - The length of the output buffer, including room for the NUL terminator.
///
/// # Returns
///
/// The number of bytes written, excluding the NUL terminator, or a negative `EM_*` code.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated string. `output` must be null or valid
/// for writes of `output_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn em_infix_to_postfix(
    input: *const c_char,
    output: *mut c_char,
    output_len: size_t,
) -> c_int {
    convert_into(input, output, output_len, crate::infix_to_postfix)
}

/// Convert a postfix expression to fully parenthesized infix.
///
/// See [`em_infix_to_postfix`] for the meaning of the arguments and return value.
///
/// # Safety
///
/// Same requirements as [`em_infix_to_postfix`].
#[no_mangle]
pub unsafe extern "C" fn em_postfix_to_infix(
    input: *const c_char,
    output: *mut c_char,
    output_len: size_t,
) -> c_int {
    convert_into(input, output, output_len, crate::postfix_to_infix)
}

/// Evaluate a postfix expression, writing the decimal result (or `invalid`).
///
/// See [`em_infix_to_postfix`] for the meaning of the arguments and return value.
///
/// # Safety
///
/// Same requirements as [`em_infix_to_postfix`].
#[no_mangle]
pub unsafe extern "C" fn em_postfix_evaluate(
    input: *const c_char,
    output: *mut c_char,
    output_len: size_t,
) -> c_int {
    convert_into(input, output, output_len, crate::postfix_evaluate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    fn call(
        f: unsafe extern "C" fn(*const c_char, *mut c_char, size_t) -> c_int,
        input: &str,
        output_len: usize,
    ) -> (c_int, String) {
        let input = CString::new(input).unwrap();
        let mut output = vec![0x7f as c_char; output_len.max(1)];
        let written = unsafe { f(input.as_ptr(), output.as_mut_ptr(), output_len) };
        let text = if output_len > 0 {
            unsafe { CStr::from_ptr(output.as_ptr()) }
                .to_string_lossy()
                .into_owned()
        } else {
            String::new()
        };
        (written, text)
    }

    #[test]
    fn test_ffi_conversions() {
        assert_eq!(
            call(em_infix_to_postfix, "3 + 4 * 2", 64),
            (9, "3 4 2 * +".to_string())
        );
        assert_eq!(
            call(em_postfix_to_infix, "3 4 2 * +", 64),
            (17, "( 3 + ( 4 * 2 ) )".to_string())
        );
        assert_eq!(call(em_postfix_evaluate, "3 4 +", 64), (1, "7".to_string()));
        assert_eq!(
            call(em_postfix_evaluate, "10 0 /", 64),
            (7, "invalid".to_string())
        );
    }

    #[test]
    fn test_ffi_buffer_too_small() {
        assert_eq!(
            call(em_infix_to_postfix, "3 + 4 * 2", 9),
            (EM_BUFFER_TOO_SMALL, String::new())
        );
        assert_eq!(
            call(em_infix_to_postfix, "3 + 4 * 2", 10),
            (9, "3 4 2 * +".to_string())
        );
        assert_eq!(
            call(em_postfix_evaluate, "3 4 +", 0),
            (EM_BUFFER_TOO_SMALL, String::new())
        );
    }

    #[test]
    fn test_ffi_null_pointers() {
        let mut output = [0 as c_char; 16];
        unsafe {
            assert_eq!(em_is_balanced(std::ptr::null()), EM_INVALID_ARGUMENT);
            assert_eq!(
                em_postfix_evaluate(std::ptr::null(), output.as_mut_ptr(), output.len()),
                EM_INVALID_ARGUMENT
            );
            let input = CString::new("1 2 +").unwrap();
            assert_eq!(
                em_postfix_evaluate(input.as_ptr(), std::ptr::null_mut(), 16),
                EM_INVALID_ARGUMENT
            );
        }
    }

    #[test]
    fn test_ffi_is_balanced() {
        let balanced = CString::new("{ ( 1 ) }").unwrap();
        let unbalanced = CString::new("{ ( 1 } )").unwrap();
        unsafe {
            assert_eq!(em_is_balanced(balanced.as_ptr()), 1);
            assert_eq!(em_is_balanced(unbalanced.as_ptr()), 0);
        }
    }
}
