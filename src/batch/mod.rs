//! # 批量处理模块
//!
//! 后台批量转换与输入文件收集。
//!
//! ## 功能
//! - 展开输入路径为文件列表
//! - 单线程顺序转换，事件推送
//! - 协作式取消
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `converters/` 执行单文件转换

pub mod cancel;
pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchEvent, BatchRunner, RunState};
