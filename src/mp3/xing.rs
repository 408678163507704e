//! Xing/Info header extraction
//!
//! Encoders like LAME put a VBR info header inside the first audio frame.
//! It declares how many frames and bytes the stream holds. That claim is
//! reported next to the scanned count and never used to change it.

use super::frame::{FrameHeader, HEADER_LEN};
use super::reader::read_array;
use super::scan::FrameScan;

const FLAG_FRAMES: u32 = 0x01;
const FLAG_BYTES: u32 = 0x02;
const FLAG_TOC: u32 = 0x04;
const FLAG_QUALITY: u32 = 0x08;

const TOC_LEN: usize = 100;

/// How far past the Xing/Info fields to look for an encoder tag
const ENCODER_SEARCH_LEN: usize = 50;

/// Information read from a Xing (VBR) or Info (CBR) header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VbrInfo {
    /// `true` for a Xing header, `false` for Info
    pub is_vbr: bool,
    /// Total frames declared by the encoder
    pub total_frames: Option<u32>,
    /// Total bytes declared by the encoder
    pub total_bytes: Option<u32>,
    /// Encoder version string, e.g. "LAME3.100" or "Lavc58.54"
    pub encoder: Option<String>,
}

impl VbrInfo {
    /// Read the Xing/Info header from the first frame found by `scan`.
    pub fn extract(data: &[u8], scan: &FrameScan) -> Option<Self> {
        let (offset, header) = scan.first_frame?;
        Self::from_frame(data, offset, &header)
    }

    /// Read the Xing/Info header inside the frame at `offset`.
    ///
    /// The search is confined to the frame body so a marker in later audio
    /// data is never picked up.
    pub fn from_frame(data: &[u8], offset: usize, header: &FrameHeader) -> Option<Self> {
        let start = offset.checked_add(HEADER_LEN)?;
        let end = offset
            .saturating_add(header.frame_size as usize)
            .min(data.len());
        let body = data.get(start..end)?;

        let (pos, is_vbr) = match (find_pattern(body, b"Xing"), find_pattern(body, b"Info")) {
            (Some(x), _) => (x, true),
            (_, Some(i)) => (i, false),
            _ => return None,
        };

        let mut info = VbrInfo {
            is_vbr,
            ..Default::default()
        };

        let flags = match read_array::<4>(body, pos + 4) {
            Ok(bytes) => u32::from_be_bytes(bytes),
            Err(_) => return Some(info),
        };
        let mut cursor = pos + 8;

        if flags & FLAG_FRAMES != 0 {
            info.total_frames = read_array::<4>(body, cursor).ok().map(u32::from_be_bytes);
            cursor += 4;
        }
        if flags & FLAG_BYTES != 0 {
            info.total_bytes = read_array::<4>(body, cursor).ok().map(u32::from_be_bytes);
            cursor += 4;
        }
        if flags & FLAG_TOC != 0 {
            cursor += TOC_LEN;
        }
        if flags & FLAG_QUALITY != 0 {
            cursor += 4;
        }

        info.encoder = encoder_tag(body, cursor);
        Some(info)
    }
}

/// Encoder tag that immediately follows the Xing/Info fields
fn encoder_tag(body: &[u8], from: usize) -> Option<String> {
    let region = body.get(from..)?;
    let region = &region[..region.len().min(ENCODER_SEARCH_LEN)];

    // LAME writes a 9-byte version, Lavc a 12-byte one
    let (pos, len) = find_pattern(region, b"LAME")
        .map(|p| (p, 9))
        .or_else(|| find_pattern(region, b"Lavc").map(|p| (p, 12)))?;

    let end = (pos + len).min(region.len());
    let version = std::str::from_utf8(&region[pos..end]).ok()?;
    Some(version.trim_end_matches('\0').to_string())
}

fn find_pattern(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
