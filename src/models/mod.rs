//! # 数据模型模块
//!
//! 批量转换使用的核心数据结构。
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/` 使用
//! - 子模块: work_item

pub mod work_item;

pub use work_item::{progress_percent, ConversionOutcome, WorkItem};
