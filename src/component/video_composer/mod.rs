//! 影片批次合成元件
//!
//! 為資料夾內每個影片加上固定的片頭與片尾，並使用 ffmpeg 重新編碼

mod batch;
mod concat_command;
mod main;

pub use batch::{
    BatchComposer, ComposeJob, ComposeSummary, DURATION_TOLERANCE_SECONDS, duplicate_outputs,
};
pub use concat_command::{ClipSource, ConcatCommand, EncodeOptions, combined_output_path};
pub use main::VideoComposer;
