//! # convert 子命令 CLI 定义
//!
//! 批量转换文件到目标格式，输出文件名沿用输入文件名，仅替换扩展名。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::Args;
use std::path::PathBuf;

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input files or directories
    #[arg(required_unless_present = "manifest")]
    pub inputs: Vec<PathBuf>,

    /// Target format extension (e.g. pdf, .jpg)
    #[arg(short, long, required_unless_present = "manifest")]
    pub to: Option<String>,

    /// Output directory (defaults to the configured output_directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Comma-separated glob patterns applied to files found in directories
    #[arg(short, long, default_value = "*")]
    pub pattern: String,

    /// CSV file with 'input,format' columns listing extra work items
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Queue pairs that are not in the supported table instead of skipping them
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Stop the batch after the first failed file
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}
