//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `settings.rs`, `batch/`, `formats/`, `utils/`
//! - 子模块: convert, formats, config

pub mod config;
pub mod convert;
pub mod formats;

use crate::cli::Commands;
use crate::error::Result;
use crate::settings::{default_settings_path, Settings};

use std::path::PathBuf;

/// 执行命令；`settings_path` 为空时使用默认设置文件
pub fn run(cmd: Commands, settings_path: Option<PathBuf>) -> Result<()> {
    let path = settings_path.unwrap_or_else(default_settings_path);
    log::debug!("Using settings file {}", path.display());
    let mut settings = Settings::load(path);

    match cmd {
        Commands::Convert(args) => convert::execute(args, &settings),
        Commands::Formats(args) => formats::execute(args),
        Commands::Config(args) => config::execute(args, &mut settings),
    }
}
