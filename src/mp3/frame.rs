//! MP3 frame header parsing
//!
//! MP3 frames start with a sync word (11 bits of 1s) followed by header info.
//! Frame header structure (4 bytes):
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//!
//! A = sync (11 bits)
//! B = MPEG version (2 bits): 00=2.5, 01=reserved, 10=2, 11=1
//! C = Layer (2 bits): 00=reserved, 01=III, 10=II, 11=I
//! D = Protection bit (CRC)
//! E = Bitrate index (4 bits)
//! F = Sample rate index (2 bits)
//! G = Padding bit
//! H = Private bit
//! I..M = Channel mode, mode extension, copyright, original, emphasis
//!
//! Only MPEG-1 Layer III headers are accepted. Everything after the padding
//! bit is ignored.

use super::reader::read_array;

/// Size of a frame header in bytes.
pub const HEADER_LEN: usize = 4;

/// Smallest frame size the scanner treats as a real frame.
pub const MIN_FRAME_SIZE: u32 = 4;

/// Largest frame size the scanner treats as a real frame.
pub const MAX_FRAME_SIZE: u32 = 1440;

/// MPEG-1 Layer III always carries 1152 samples per frame.
pub const SAMPLES_PER_FRAME: u32 = 1152;

const VERSION_MPEG1: u8 = 0b11;
const LAYER_III: u8 = 0b01;

// Index 0 = free, 15 = bad
const BITRATES_V1_L3: [u32; 16] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0];

// Index 3 = reserved
const SAMPLE_RATES_V1: [u32; 4] = [44100, 48000, 32000, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub bitrate_index: u8,
    pub sample_rate_index: u8,
    /// Bitrate in kbps
    pub bitrate: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub padding: bool,
    /// Whole frame length in bytes, header included
    pub frame_size: u32,
}

impl FrameHeader {
    /// Parse the frame header starting at `position` in `data`.
    ///
    /// Returns `None` when fewer than four bytes remain or when any header
    /// field is invalid. The frame size is not range-checked here; see
    /// [`FrameHeader::is_plausible`].
    pub fn parse(data: &[u8], position: usize) -> Option<Self> {
        let header: [u8; HEADER_LEN] = read_array(data, position).ok()?;
        Self::from_bytes(header)
    }

    /// Decode a 4-byte header.
    pub fn from_bytes(header: [u8; HEADER_LEN]) -> Option<Self> {
        // Check sync word (11 bits of 1s)
        if header[0] != 0xFF || (header[1] & 0xE0) != 0xE0 {
            return None;
        }

        // MPEG version (bits 4-3 of byte 1)
        if (header[1] >> 3) & 0x03 != VERSION_MPEG1 {
            return None;
        }

        // Layer (bits 2-1 of byte 1)
        if (header[1] >> 1) & 0x03 != LAYER_III {
            return None;
        }

        // Bitrate index (bits 7-4 of byte 2)
        let bitrate_index = (header[2] >> 4) & 0x0F;
        let bitrate = BITRATES_V1_L3[bitrate_index as usize];
        if bitrate == 0 {
            return None; // Free or bad bitrate
        }

        // Sample rate index (bits 3-2 of byte 2)
        let sample_rate_index = (header[2] >> 2) & 0x03;
        let sample_rate = SAMPLE_RATES_V1[sample_rate_index as usize];
        if sample_rate == 0 {
            return None;
        }

        // Padding (bit 1 of byte 2)
        let padding = (header[2] & 0x02) != 0;

        let frame_size = 144 * bitrate * 1000 / sample_rate + u32::from(padding);

        Some(FrameHeader {
            bitrate_index,
            sample_rate_index,
            bitrate,
            sample_rate,
            padding,
            frame_size,
        })
    }

    /// Whether the declared size is within the range of a real frame.
    ///
    /// Sizes outside `[MIN_FRAME_SIZE, MAX_FRAME_SIZE]` come from sync words
    /// that happened to appear inside audio data.
    pub fn is_plausible(&self) -> bool {
        (MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&self.frame_size)
    }

    pub fn samples_per_frame(&self) -> u32 {
        SAMPLES_PER_FRAME
    }

    /// Playback time of one frame in seconds.
    pub fn duration_secs(&self) -> f64 {
        f64::from(SAMPLES_PER_FRAME) / f64::from(self.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // FRAME HEADER STRUCTURE
    // ==========================================================================
    //
    // ┌─────────┬───────┬───────┬───────┬────────┬────────┬─────┬─────┬──────────┐
    // │ Sync    │Version│ Layer │Protect│Bitrate │SampRate│Pad  │Priv │ (unused) │
    // │11 bits  │2 bits │2 bits │1 bit  │4 bits  │2 bits  │1 bit│1 bit│ 8 bits   │
    // └─────────┴───────┴───────┴───────┴────────┴────────┴─────┴─────┴──────────┘
    //
    // VERSION: 00=MPEG2.5, 10=MPEG2, 11=MPEG1 (01 is reserved). Only 11 passes.
    // LAYER: 01=Layer3, 10=Layer2, 11=Layer1 (00 is reserved). Only 01 passes.
    // ==========================================================================

    /// MPEG1 Layer3 128kbps 44.1kHz stereo
    ///
    /// - 0xFF: First 8 bits of sync word (all 1s)
    /// - 0xFB: Remaining sync (111), MPEG1 (11), Layer3 (01), no CRC (1)
    /// - 0x90: Bitrate index 9 (1001) = 128kbps, Sample rate 0 (00) = 44100Hz, no padding (0)
    /// - 0x00: Stereo, no mode ext, not copyrighted, original, no emphasis
    fn valid_mp3_header() -> [u8; 4] {
        [0xFF, 0xFB, 0x90, 0x00]
    }

    #[test]
    fn test_parse_valid_header_128kbps() {
        let parsed = FrameHeader::from_bytes(valid_mp3_header()).expect("Should parse valid header");

        assert_eq!(parsed.bitrate_index, 9);
        assert_eq!(parsed.sample_rate_index, 0);
        assert_eq!(parsed.bitrate, 128);
        assert_eq!(parsed.sample_rate, 44100);
        assert!(!parsed.padding);
        assert_eq!(parsed.samples_per_frame(), 1152);
    }

    #[test]
    fn test_parse_at_position() {
        let mut data = vec![0x00, 0x11, 0x22];
        data.extend(valid_mp3_header());
        assert!(FrameHeader::parse(&data, 0).is_none());
        let parsed = FrameHeader::parse(&data, 3).expect("Should parse at offset 3");
        assert_eq!(parsed.frame_size, 417);
    }

    #[test]
    fn test_parse_needs_four_bytes() {
        let data = [0xFF, 0xFB, 0x90];
        assert!(FrameHeader::parse(&data, 0).is_none());
        assert!(FrameHeader::parse(&valid_mp3_header(), 1).is_none());
        assert!(FrameHeader::parse(&[], 0).is_none());
    }

    #[test]
    fn test_parse_invalid_sync() {
        assert!(FrameHeader::from_bytes([0x00, 0x00, 0x00, 0x00]).is_none());

        // 0xFF 0x00 = 11111111 00000000, but we need 11111111 111xxxxx
        assert!(FrameHeader::from_bytes([0xFF, 0x00, 0x90, 0x00]).is_none());

        // 0xFE: one sync bit missing in the first byte
        assert!(FrameHeader::from_bytes([0xFE, 0xFB, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_parse_rejects_other_versions() {
        // 0xE8 = 111 01 00 0: reserved version
        assert!(FrameHeader::from_bytes([0xFF, 0xE8 | 0x02, 0x90, 0x00]).is_none());
        // 0xF3 = 111 10 01 1: MPEG2 Layer3
        assert!(FrameHeader::from_bytes([0xFF, 0xF3, 0x90, 0x00]).is_none());
        // 0xE3 = 111 00 01 1: MPEG2.5 Layer3
        assert!(FrameHeader::from_bytes([0xFF, 0xE3, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_parse_rejects_other_layers() {
        // 0xF9 = 111 11 00 1: reserved layer
        assert!(FrameHeader::from_bytes([0xFF, 0xF9, 0x90, 0x00]).is_none());
        // 0xFD = 111 11 10 1: Layer2
        assert!(FrameHeader::from_bytes([0xFF, 0xFD, 0x90, 0x00]).is_none());
        // 0xFF = 111 11 11 1: Layer1
        assert!(FrameHeader::from_bytes([0xFF, 0xFF, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_parse_invalid_bitrate() {
        // Index 15 (0xF in upper nibble of byte 2)
        assert!(FrameHeader::from_bytes([0xFF, 0xFB, 0xF0, 0x00]).is_none());
        // Index 0 (free format)
        assert!(FrameHeader::from_bytes([0xFF, 0xFB, 0x00, 0x00]).is_none());
    }

    #[test]
    fn test_parse_invalid_sample_rate() {
        // 0x9C = 1001 11 00: bitrate 9, sample rate = 11 (reserved)
        assert!(FrameHeader::from_bytes([0xFF, 0xFB, 0x9C, 0x00]).is_none());
    }

    #[test]
    fn test_protection_bit_ignored() {
        // 0xFA: CRC-protected frame, same fields otherwise
        let parsed = FrameHeader::from_bytes([0xFF, 0xFA, 0x90, 0x00]).expect("Should parse");
        assert_eq!(parsed.frame_size, 417);
    }

    // ==========================================================================
    // FRAME SIZE CALCULATION
    // ==========================================================================
    //
    //   frame_size = floor(144 * bitrate * 1000 / sample_rate) + padding
    //
    // 128kbps at 44100Hz: 144 * 128000 / 44100 = 417.95... → 417 bytes
    // ==========================================================================

    #[test]
    fn test_frame_size_calculation() {
        let parsed = FrameHeader::from_bytes(valid_mp3_header()).expect("Should parse");
        assert_eq!(parsed.frame_size, 417);
        assert!(parsed.is_plausible());
    }

    #[test]
    fn test_frame_size_with_padding() {
        // 0x92 = 0x90 | 0x02 = 128kbps with padding
        let parsed = FrameHeader::from_bytes([0xFF, 0xFB, 0x92, 0x00]).expect("Should parse");
        assert!(parsed.padding);
        assert_eq!(parsed.frame_size, 418);
    }

    #[test]
    fn test_frame_size_other_sample_rates() {
        // 128kbps @ 48000Hz: 144 * 128000 / 48000 = 384
        let parsed = FrameHeader::from_bytes([0xFF, 0xFB, 0x94, 0x00]).expect("Should parse");
        assert_eq!(parsed.sample_rate, 48000);
        assert_eq!(parsed.frame_size, 384);

        // 128kbps @ 32000Hz: 144 * 128000 / 32000 = 576
        let parsed = FrameHeader::from_bytes([0xFF, 0xFB, 0x98, 0x00]).expect("Should parse");
        assert_eq!(parsed.sample_rate, 32000);
        assert_eq!(parsed.frame_size, 576);
    }

    #[test]
    fn test_largest_and_smallest_frames() {
        // 320kbps @ 32000Hz with padding: 1440 + 1 = 1441, just past the limit
        let parsed = FrameHeader::from_bytes([0xFF, 0xFB, 0xEA, 0x00]).expect("Should parse");
        assert_eq!(parsed.frame_size, 1441);
        assert!(!parsed.is_plausible());

        // Same without padding sits exactly on the limit
        let parsed = FrameHeader::from_bytes([0xFF, 0xFB, 0xE8, 0x00]).expect("Should parse");
        assert_eq!(parsed.frame_size, 1440);
        assert!(parsed.is_plausible());

        // 32kbps @ 48000Hz: 96 bytes
        let parsed = FrameHeader::from_bytes([0xFF, 0xFB, 0x14, 0x00]).expect("Should parse");
        assert_eq!(parsed.frame_size, 96);
        assert!(parsed.is_plausible());
    }

    #[test]
    fn test_frame_duration() {
        let parsed = FrameHeader::from_bytes(valid_mp3_header()).expect("Should parse");
        // 1152 / 44100 ≈ 26.1ms
        assert!((parsed.duration_secs() - 0.026_122).abs() < 1e-5);
    }

    #[test]
    fn test_bitrate_index_table_mpeg1_layer3() {
        let test_cases = [
            (0x10, 32),   // Index 1
            (0x20, 40),   // Index 2
            (0x30, 48),   // Index 3
            (0x40, 56),   // Index 4
            (0x50, 64),   // Index 5
            (0x60, 80),   // Index 6
            (0x70, 96),   // Index 7
            (0x80, 112),  // Index 8
            (0x90, 128),  // Index 9
            (0xA0, 160),  // Index 10
            (0xB0, 192),  // Index 11
            (0xC0, 224),  // Index 12
            (0xD0, 256),  // Index 13
            (0xE0, 320),  // Index 14
        ];

        for (byte2, expected_bitrate) in test_cases {
            let parsed = FrameHeader::from_bytes([0xFF, 0xFB, byte2, 0x00])
                .unwrap_or_else(|| panic!("Should parse header with byte 0x{:02X}", byte2));
            assert_eq!(
                parsed.bitrate, expected_bitrate,
                "Byte 0x{:02X} should give {}kbps",
                byte2, expected_bitrate
            );
        }
    }
}
