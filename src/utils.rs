//! String helpers shared by the OS wrappers.

use std::fmt::Display;

/// Encode `s` as UTF-16 with a trailing NUL, ready for wide Win32 APIs.
#[must_use]
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode UTF-16 up to the first NUL. Unpaired surrogates become U+FFFD.
#[must_use]
pub fn from_wide(wide: &[u16]) -> String {
    let end = wide.iter().position(|&u| u == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..end])
}

/// Concatenate every argument's `Display` output, with no separator.
#[must_use]
pub fn stringify(args: &[&dyn Display]) -> String {
    args.iter().map(ToString::to_string).collect()
}
