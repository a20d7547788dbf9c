// SPDX-License-Identifier: MIT OR Apache-2.0
//! Argument helpers shared by `ssh` and `scp` invocations.

/// Flag enabling compression for `ssh` and `scp`.
///
/// `CompressionLevel` only applies to SSHv1. SSHv2 negotiates DEFLATE at
/// level 6 on its own, so no level is passed.
#[must_use]
pub const fn compression_argument() -> &'static str {
    "-C"
}

/// Option limiting connection time (not transfer time or process lifetime).
///
/// `timeout` is in seconds.
///
/// # Panics
///
/// Panics if `timeout` is zero. Callers must validate user input before
/// reaching this point.
#[must_use]
pub fn timeout_argument(timeout: u32) -> String {
    assert!(timeout >= 1, "invalid timeout value: {timeout}");
    format!("-oConnectTimeout={timeout}")
}
