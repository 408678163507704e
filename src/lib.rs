//! Count MPEG-1 Layer III frames in raw byte streams.
//!
//! ```
//! let mut data = vec![0xFF, 0xFB, 0x90, 0x00];
//! data.resize(417, 0);
//! assert_eq!(mp3count::count_frames(&data), 1);
//! ```
//!
//! [`count_frames`] is the whole core: give it bytes, get back how many
//! frames they hold. It skips a leading ID3v2 tag, resynchronizes past junk,
//! and never fails. The [`analyzer`], [`report`] and [`config`] modules wrap
//! it for the `mp3count` command line tool.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod mp3;
pub mod report;

pub use error::{Error, Result};
pub use mp3::{count_frames, scan, FrameHeader, FrameScan};
