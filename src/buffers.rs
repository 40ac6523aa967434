//! # Fixed-capacity engine buffers
//!
//! The engine writes its results into caller-owned storage whose capacity is fixed by the
//! operation being invoked. This module provides the two kinds of storage it expects:
//!
//! - [`CharBuffer`], a zero-initialized, NUL-terminated byte slot used for diagnostics
//!   ([`ErrorBuffer`], 256 bytes), star and object names ([`NameBuffer`], 41 bytes) and
//!   paths / version strings ([`PathBuffer`], 256 bytes).
//! - [`Scratch`], the numeric result array of one operation family paired with its
//!   diagnostic buffer.
//!
//! ## Invariants
//!
//! - A freshly built buffer is entirely zeroed, so nothing from a previous call can leak.
//! - The last byte of a [`CharBuffer`] is never written by this crate: any string read back
//!   is at most `N - 1` bytes long, even if the engine forgot the terminator.
//! - Strings longer than `N - 1` bytes are cut at a UTF-8 character boundary.
use std::ffi::c_char;

use serde::{Deserialize, Serialize};

use crate::constants::{PATH_LEN, SERR_LEN, STAR_NAME_LEN};
use crate::sweph_errors::SwephError;

/// Diagnostic message buffer (`serr`)
pub type ErrorBuffer = CharBuffer<SERR_LEN>;
/// Star / object name slot, rewritten in place by the engine
pub type NameBuffer = CharBuffer<STAR_NAME_LEN>;
/// Path and version string buffer
pub type PathBuffer = CharBuffer<PATH_LEN>;

/// What to do with a name that does not fit in its fixed-capacity slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOverflow {
    /// Cut the name to the slot capacity and carry on (logged at `warn` level).
    #[default]
    Truncate,
    /// Refuse the whole request with [`SwephError::NameTooLong`].
    Reject,
}

/// Zero-initialized, NUL-terminated character storage of `N` bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct CharBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for CharBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for CharBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CharBuffer<{N}>({:?})", self.to_string_lossy())
    }
}

impl<const N: usize> CharBuffer<N> {
    /// Number of content bytes that fit before the terminator.
    pub const MAX_CONTENT: usize = N - 1;

    /// A buffer filled with NUL bytes.
    pub fn new() -> Self {
        CharBuffer { bytes: [0; N] }
    }

    /// Build a buffer holding `s`, cut to capacity if needed.
    ///
    /// Return
    /// ----------
    /// * The buffer and a flag telling whether `s` had to be truncated.
    pub fn from_str_truncated(s: &str) -> (Self, bool) {
        let mut buffer = Self::new();
        let truncated = buffer.write_str(s);
        (buffer, truncated)
    }

    /// Build a buffer holding `s`, applying `policy` when it does not fit.
    ///
    /// Arguments
    /// -----------------
    /// * `s`: the text to copy in.
    /// * `policy`: [`NameOverflow::Truncate`] keeps a shortened copy,
    ///   [`NameOverflow::Reject`] returns [`SwephError::NameTooLong`].
    ///
    /// A name holding a NUL byte is refused with [`SwephError::NameContainsNul`] under either
    /// policy: the engine would stop reading at the NUL.
    pub fn from_str_with(s: &str, policy: NameOverflow) -> Result<Self, SwephError> {
        if s.contains('\0') {
            return Err(SwephError::NameContainsNul(s.replace('\0', "\\0")));
        }
        if s.len() > Self::MAX_CONTENT && policy == NameOverflow::Reject {
            return Err(SwephError::NameTooLong {
                name: s.to_string(),
                capacity: N,
            });
        }
        let (buffer, truncated) = Self::from_str_truncated(s);
        if truncated {
            tracing::warn!(
                name = s,
                kept = %buffer.to_string_lossy(),
                capacity = N,
                "name truncated to buffer capacity"
            );
        }
        Ok(buffer)
    }

    /// Replace the content with `s`, zeroing everything else.
    ///
    /// Returns `true` when `s` was truncated.
    pub fn write_str(&mut self, s: &str) -> bool {
        self.bytes = [0; N];
        let mut end = s.len().min(Self::MAX_CONTENT);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.bytes[..end].copy_from_slice(&s.as_bytes()[..end]);
        end < s.len()
    }

    /// Read the content up to the first NUL, never past `N - 1` bytes.
    pub fn to_string_lossy(&self) -> String {
        let content = &self.bytes[..Self::MAX_CONTENT];
        let end = content.iter().position(|&b| b == 0).unwrap_or(content.len());
        String::from_utf8_lossy(&content[..end]).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes[0] == 0
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.bytes.as_ptr().cast()
    }

    pub fn as_mut_ptr(&mut self) -> *mut c_char {
        self.bytes.as_mut_ptr().cast()
    }
}

/// Per-call storage for one numeric output family plus its diagnostic buffer.
///
/// A new `Scratch` is built for every element of a batch; it is never reused.
#[derive(Debug, Clone)]
pub struct Scratch<const W: usize> {
    pub values: [f64; W],
    pub serr: ErrorBuffer,
}

impl<const W: usize> Scratch<W> {
    pub fn zeroed() -> Self {
        Scratch {
            values: [0.0; W],
            serr: ErrorBuffer::new(),
        }
    }
}

#[cfg(test)]
mod buffers_test {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = NameBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.to_string_lossy(), "");
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_short_name_is_kept() {
        let (buffer, truncated) = NameBuffer::from_str_truncated("Aldebaran");
        assert!(!truncated);
        assert_eq!(buffer.to_string_lossy(), "Aldebaran");
        assert!(buffer.as_bytes()[9..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_name_is_cut_to_capacity() {
        let long = "x".repeat(60);
        let (buffer, truncated) = NameBuffer::from_str_truncated(&long);
        assert!(truncated);
        assert_eq!(buffer.to_string_lossy(), "x".repeat(40));
        assert_eq!(buffer.as_bytes()[40], 0);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 39 ASCII bytes followed by a two-byte character straddling the limit
        let name = format!("{}é", "a".repeat(39));
        let (buffer, truncated) = NameBuffer::from_str_truncated(&name);
        assert!(truncated);
        assert_eq!(buffer.to_string_lossy(), "a".repeat(39));
    }

    #[test]
    fn test_reject_policy() {
        let long = "y".repeat(41);
        let err = NameBuffer::from_str_with(&long, NameOverflow::Reject).unwrap_err();
        assert_eq!(
            err,
            SwephError::NameTooLong {
                name: long,
                capacity: 41
            }
        );

        let ok = NameBuffer::from_str_with("Sirius", NameOverflow::Reject).unwrap();
        assert_eq!(ok.to_string_lossy(), "Sirius");
    }

    #[test]
    fn test_interior_nul_is_refused() {
        for policy in [NameOverflow::Truncate, NameOverflow::Reject] {
            let err = NameBuffer::from_str_with("Sirius\0garbage", policy).unwrap_err();
            assert_eq!(
                err,
                SwephError::NameContainsNul("Sirius\\0garbage".to_string())
            );
        }
    }

    #[test]
    fn test_unterminated_content_is_bounded() {
        let mut buffer = ErrorBuffer::new();
        buffer.as_bytes_mut().fill(b'z');
        let read = buffer.to_string_lossy();
        assert_eq!(read.len(), 255);
    }

    #[test]
    fn test_rewrite_clears_previous_content() {
        let (mut buffer, _) = NameBuffer::from_str_truncated("Betelgeuse,alOri");
        buffer.write_str("Rigel");
        assert_eq!(buffer.to_string_lossy(), "Rigel");
        assert!(buffer.as_bytes()[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_scratch_is_zeroed() {
        let scratch = Scratch::<6>::zeroed();
        assert_eq!(scratch.values, [0.0; 6]);
        assert!(scratch.serr.is_empty());
    }
}
