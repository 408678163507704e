//! Frame scanning
//!
//! One forward pass over the buffer. The cursor starts after any ID3v2 tag
//! and moves in one of two ways:
//!
//! - frame-by-frame, jumping `frame_size` bytes after each accepted header
//! - byte-by-byte, when the bytes under the cursor are not a usable header
//!
//! A jump is taken even when the header at the landing position does not
//! check out (VBR streams, padding drift, corruption); the byte-level search
//! then recovers on the next iteration.

use super::frame::{FrameHeader, HEADER_LEN};
use super::tag;
use tracing::{debug, trace};

/// Outcome of scanning one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameScan {
    pub frame_count: usize,
    /// Offset where the scan started (past any ID3v2 tag)
    pub audio_start: usize,
    /// Offset and header of the first accepted frame
    pub first_frame: Option<(usize, FrameHeader)>,
    /// Accepted frames whose successor was confirmed by lookahead
    pub locked_frames: usize,
    /// Bytes stepped over one at a time while searching for a header
    pub resync_bytes: usize,
    /// The last counted frame ran past the end of the buffer
    pub truncated_tail: bool,
}

impl FrameScan {
    /// Estimated playback time, from the first frame's sample rate.
    pub fn duration_secs(&self) -> f64 {
        match self.first_frame {
            Some((_, header)) => self.frame_count as f64 * header.duration_secs(),
            None => 0.0,
        }
    }
}

/// Count the MPEG-1 Layer III frames in `data`.
///
/// Never fails: buffers with no recognizable frames, including empty ones,
/// give 0.
pub fn count_frames(data: &[u8]) -> usize {
    scan(data).frame_count
}

/// Scan `data` and collect the frame count with some bookkeeping about how
/// it was reached.
pub fn scan(data: &[u8]) -> FrameScan {
    let len = data.len();
    let mut stats = FrameScan {
        audio_start: tag::audio_start(data),
        ..Default::default()
    };

    // A header needs 4 bytes; the loop also wants at least one byte beyond
    let end = len.saturating_sub(HEADER_LEN);
    let mut cursor = stats.audio_start;

    while cursor < end {
        let frame = match FrameHeader::parse(data, cursor) {
            Some(frame) if frame.is_plausible() => frame,
            Some(frame) => {
                trace!(cursor, frame_size = frame.frame_size, "implausible frame size");
                stats.resync_bytes += 1;
                cursor += 1;
                continue;
            }
            None => {
                stats.resync_bytes += 1;
                cursor += 1;
                continue;
            }
        };

        if stats.first_frame.is_none() {
            stats.first_frame = Some((cursor, frame));
        }

        let frame_size = frame.frame_size as usize;

        // Frame runs past the end: count it if a header's worth remains
        if cursor + frame_size > len {
            if len - cursor >= HEADER_LEN {
                stats.frame_count += 1;
                stats.truncated_tail = true;
            }
            break;
        }

        stats.frame_count += 1;
        let next = cursor + frame_size;
        if next >= end {
            break;
        }

        match FrameHeader::parse(data, next) {
            Some(lookahead) if lookahead.is_plausible() => stats.locked_frames += 1,
            _ => trace!(cursor = next, "lookahead found no header, trusting frame size"),
        }
        cursor = next;
    }

    debug!(
        frames = stats.frame_count,
        audio_start = stats.audio_start,
        locked = stats.locked_frames,
        resync_bytes = stats.resync_bytes,
        truncated_tail = stats.truncated_tail,
        "frame scan complete"
    );

    stats
}
