//! # formats 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/formats.rs`

use crate::formats::Category;

use clap::{Args, ValueEnum};

/// 类别过滤
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CategoryFilter {
    Documents,
    Images,
    Audio,
    Video,
}

impl From<CategoryFilter> for Category {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::Documents => Category::Documents,
            CategoryFilter::Images => Category::Images,
            CategoryFilter::Audio => Category::Audio,
            CategoryFilter::Video => Category::Video,
        }
    }
}

/// formats 子命令参数
#[derive(Args, Debug)]
pub struct FormatsArgs {
    /// Only list one category
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryFilter>,

    /// Include advertised pairs that cannot actually be converted
    #[arg(long, default_value_t = false)]
    pub all: bool,
}
