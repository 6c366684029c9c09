//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `convert`: 批量文件格式转换
//! - `formats`: 列出支持的格式组合
//! - `config`: 查看或修改持久化设置（嵌套子命令）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert, formats, config

pub mod config;
pub mod convert;
pub mod formats;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fileconv - 批量文件格式转换工具
#[derive(Parser)]
#[command(name = "fileconv")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batch file format converter for documents, images, audio and video", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (RUST_LOG takes precedence when set)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "FILECONV_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert files to another format
    Convert(convert::ConvertArgs),

    /// List supported conversions
    Formats(formats::FormatsArgs),

    /// Show or change persistent settings
    Config(config::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "fileconv",
            "--log-level",
            "info",
            "convert",
            "a.png",
            "b.png",
            "--to",
            "JPG",
            "-o",
            "/tmp/out",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert_eq!(args.to.as_deref(), Some("JPG"));
                assert_eq!(args.output, Some(PathBuf::from("/tmp/out")));
                assert!(!args.recursive);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_requires_target_or_manifest() {
        assert!(Cli::try_parse_from(["fileconv", "convert", "a.png"]).is_err());
        assert!(Cli::try_parse_from(["fileconv", "convert", "--manifest", "jobs.csv"]).is_ok());
    }

    #[test]
    fn test_parse_config_set() {
        let cli =
            Cli::try_parse_from(["fileconv", "config", "set", "output_directory", "/srv"]).unwrap();
        match cli.command {
            Commands::Config(args) => match args.command {
                config::ConfigCommands::Set { key, value } => {
                    assert_eq!(key, "output_directory");
                    assert_eq!(value, "/srv");
                }
                _ => panic!("expected set"),
            },
            _ => panic!("expected config"),
        }
    }
}
