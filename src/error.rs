use thiserror::Error;

/// Errors that can occur while decoding a network or compact encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid multi-width encoding size: {0} is not one of 1, 2, 3, 4, 5 or 8")]
    InvalidSize(usize),

    #[error("Buffer too short: need at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },
}

/// Errors that can occur while writing an encoding into a caller-provided buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Output buffer too small: need at least {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Fail with [`DecodeError::BufferTooShort`] unless `bytes` holds `expected` bytes.
pub(crate) fn ensure_input(bytes: &[u8], expected: usize) -> DecodeResult<()> {
    if bytes.len() < expected {
        tracing::debug!(expected, actual = bytes.len(), "decode input too short");
        return Err(DecodeError::BufferTooShort {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Fail with [`EncodeError::BufferTooSmall`] unless `buf` can hold `expected` bytes.
pub(crate) fn ensure_output(buf: &[u8], expected: usize) -> EncodeResult<()> {
    if buf.len() < expected {
        tracing::debug!(expected, actual = buf.len(), "encode output buffer too small");
        return Err(EncodeError::BufferTooSmall {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}
