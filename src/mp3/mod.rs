pub mod frame;
pub mod reader;
pub mod scan;
pub mod tag;
pub mod xing;

pub use frame::FrameHeader;
pub use reader::OutOfRange;
pub use scan::{count_frames, scan, FrameScan};
pub use xing::VbrInfo;
