//! # 统一错误处理模块
//!
//! 定义 fileconv 的所有错误类型，使用 `thiserror` 派生。
//!
//! - [`FileconvError`]: 程序内部统一错误，各转换器与命令使用
//! - [`ConversionError`]: 单文件转换边界错误，由调度器产生，批量执行器消费
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// fileconv 统一错误类型
#[derive(Error, Debug)]
pub enum FileconvError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 转换错误
    // ─────────────────────────────────────────────────────────────
    #[error("Conversion from {from} to {to} is not supported.")]
    UnsupportedConversion { from: String, to: String },

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Audio(#[from] symphonia::core::errors::Error),

    #[error("{0}")]
    Wav(#[from] hound::Error),

    #[error("Invalid DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("Input is not valid UTF-8 text: {path}")]
    InvalidText { path: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("{command} is not installed. {hint}")]
    CommandNotFound { command: String, hint: String },

    #[error("{command} error: {stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数与配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to save settings: {path}\nReason: {reason}")]
    SettingsError { path: String, reason: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, FileconvError>;

/// 单文件转换失败
///
/// 所有变体都携带输入文件的显示名（不含目录），`Display` 统一以
/// `Failed to convert <name>: ` 开头。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// 输入/输出扩展名组合没有对应的处理器
    #[error("Failed to convert {file}: Conversion from {from} to {to} is not supported.")]
    UnsupportedConversion {
        file: String,
        from: String,
        to: String,
    },

    /// 可选的外部能力未安装
    #[error("Failed to convert {file}: {reason}")]
    CapabilityUnavailable { file: String, reason: String },

    /// 底层编解码器 / 文档库 / 文件系统失败
    #[error("Failed to convert {file}: {reason}")]
    UnderlyingLibraryFailure { file: String, reason: String },
}

impl ConversionError {
    /// 将内部错误归类为边界错误，并标记文件名
    pub fn from_failure(file: &str, err: FileconvError) -> Self {
        let file = file.to_string();
        match err {
            FileconvError::UnsupportedConversion { from, to } => {
                ConversionError::UnsupportedConversion { file, from, to }
            }
            e @ FileconvError::CommandNotFound { .. } => ConversionError::CapabilityUnavailable {
                file,
                reason: e.to_string(),
            },
            e => ConversionError::UnderlyingLibraryFailure {
                file,
                reason: failure_text(&e),
            },
        }
    }
}

/// 展开 source 链，I/O 包装错误只显示路径时补上底层原因
fn failure_text(err: &FileconvError) -> String {
    match err {
        FileconvError::FileReadError { path, source }
        | FileconvError::FileWriteError { path, source } => format!("{}: {}", path, source),
        other => other.to_string(),
    }
}
