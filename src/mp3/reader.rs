//! Bounds-checked byte access
//!
//! Every read the frame code performs goes through [`read_byte`], so running
//! off the end of a buffer is an ordinary `Err` instead of a panic.

use thiserror::Error;

/// A read was attempted at or past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position {position} is out of range for a buffer of {len} bytes")]
pub struct OutOfRange {
    pub position: usize,
    pub len: usize,
}

/// Read the byte at `position`.
pub fn read_byte(data: &[u8], position: usize) -> Result<u8, OutOfRange> {
    data.get(position).copied().ok_or(OutOfRange {
        position,
        len: data.len(),
    })
}

/// Read `N` consecutive bytes starting at `position`.
pub fn read_array<const N: usize>(data: &[u8], position: usize) -> Result<[u8; N], OutOfRange> {
    let mut out = [0u8; N];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = read_byte(data, position.saturating_add(i))?;
    }
    Ok(out)
}
