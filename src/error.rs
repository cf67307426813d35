//! Error type shared by every transform backend.

/// Errors reported by [`crate::fft::AudioFftImpl`] implementations.
///
/// All variants describe caller mistakes: once an engine has been
/// initialized with a valid size, transforms over correctly sized buffers
/// never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// The requested transform size is zero, one, or not a power of two.
    InvalidSize(usize),
    /// A transform was requested before the engine was initialized.
    Uninitialized,
    /// A buffer does not have the length required by the initialized size.
    MismatchedLengths { expected: usize, actual: usize },
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::InvalidSize(size) => write!(
                f,
                "transform size {size} is invalid, expected a power of two >= 2"
            ),
            FftError::Uninitialized => write!(f, "transform used before init()"),
            FftError::MismatchedLengths { expected, actual } => write!(
                f,
                "buffer length mismatch, expected {expected}, got {actual}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_values() {
        let msg = FftError::MismatchedLengths {
            expected: 5,
            actual: 4,
        }
        .to_string();
        assert!(msg.contains('5') && msg.contains('4'));
        assert!(FftError::InvalidSize(12).to_string().contains("12"));
    }
}
