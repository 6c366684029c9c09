//! # fileconv - 批量文件格式转换工具
//!
//! 把文档、图像、音频、视频文件批量转换为其他格式，单一可执行文件。
//!
//! ## 子命令
//! - `convert` - 批量转换文件
//! - `formats` - 列出支持的格式组合
//! - `config`  - 查看或修改持久化设置
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/      (后台批量执行器)
//!   │     ├── converters/ (格式调度与单文件转换)
//!   │     ├── formats/    (格式能力表)
//!   │     └── models/     (数据模型)
//!   ├── settings.rs (持久化设置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod converters;
mod error;
mod formats;
mod models;
mod settings;
mod utils;

use clap::Parser;
use cli::Cli;

/// 初始化日志；设置了 RUST_LOG 时以其为准
fn setup_logging(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp_secs();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    setup_logging(cli.log_level.to_filter());

    if let Err(e) = commands::run(cli.command, cli.settings) {
        log::debug!("{:?}", e);
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
