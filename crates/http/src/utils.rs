//! Utility macros shared by the codec and connection layers.

/// Returns early with `$error` when `$predicate` does not hold.
///
/// This reads like `assert!`, but yields an error instead of panicking, which
/// keeps the parsing code flat.
///
/// ```ignore
/// ensure!(header_count <= MAX_HEADER_NUM, ParseError::too_many_headers(MAX_HEADER_NUM));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
