//! ID3v2 tag skipping
//!
//! ID3v2 header: "ID3" (3) + version (2) + flags (1) + size (4) = 10 bytes.
//! The size is a synchsafe integer: 7 significant bits per byte, so a tag can
//! never contain something that looks like a frame sync word.

use super::reader::read_array;
use tracing::debug;

/// Length of the fixed ID3v2 tag header.
pub const ID3V2_HEADER_LEN: usize = 10;

const ID3V2_MAGIC: &[u8; 3] = b"ID3";

/// Offset at which audio data begins.
///
/// Returns 0 when the buffer has no leading ID3v2 tag (or is too short to
/// hold a tag header). The returned offset is not checked against the buffer
/// length; a tag that claims more bytes than exist just leaves nothing to scan.
pub fn audio_start(data: &[u8]) -> usize {
    if data.len() < ID3V2_HEADER_LEN {
        return 0;
    }

    let header: [u8; ID3V2_HEADER_LEN] = match read_array(data, 0) {
        Ok(h) => h,
        Err(_) => return 0,
    };

    if &header[..3] != ID3V2_MAGIC {
        return 0;
    }

    let size = synchsafe_size([header[6], header[7], header[8], header[9]]);
    debug!(tag_size = size, "skipping ID3v2 tag");
    ID3V2_HEADER_LEN + size as usize
}

/// Reassemble a synchsafe 28-bit size.
///
/// The bytes are combined as stored; the top bit of each is expected to be
/// zero and is not masked.
pub fn synchsafe_size(bytes: [u8; 4]) -> u32 {
    ((bytes[0] as u32) << 21)
        | ((bytes[1] as u32) << 14)
        | ((bytes[2] as u32) << 7)
        | bytes[3] as u32
}
