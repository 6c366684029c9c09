//! # config 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/config.rs`

use clap::{Args, Subcommand};

/// config 主命令参数
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// config 子命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print all settings and the settings file location
    Show,

    /// Print one setting
    Get {
        /// Setting key (e.g. output_directory)
        key: String,
    },

    /// Change one setting and save immediately
    Set {
        /// Setting key (e.g. output_directory, ffmpeg_path, pdf2docx_path)
        key: String,
        /// New value
        value: String,
    },
}
