//! 文件複製元件
//!
//! 將一份範本文件依日期區間標籤複製成多份檔案

mod date_ranges;
mod duplicator;
mod main;

pub use date_ranges::{DATE_FORMAT, MAX_PERIODS, biweekly_ranges, parse_date};
pub use duplicator::{DuplicationReport, duplicate_with_labels, labeled_copy_path};
pub use main::DocDuplicator;
