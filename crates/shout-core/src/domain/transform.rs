//! The uppercase transform applied by the server to every payload.

/// Uppercases every ASCII lowercase letter in `payload` in place.
///
/// All other bytes (digits, punctuation, control bytes, and anything
/// non-ASCII) pass through unchanged. The function is pure, deterministic,
/// and idempotent: applying it twice yields the same bytes as applying it
/// once.
///
/// # Examples
///
/// ```rust
/// use shout_core::domain::transform::shout;
///
/// let mut payload = b"abcDef".to_vec();
/// shout(&mut payload);
/// assert_eq!(payload, b"ABCDEF");
/// ```
pub fn shout(payload: &mut [u8]) {
    payload.make_ascii_uppercase();
}
