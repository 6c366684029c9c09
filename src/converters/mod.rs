//! # 格式调度器
//!
//! 根据输入、输出路径的扩展名（不区分大小写，只看末尾扩展名）选择处理器：
//!
//! ```text
//! 图像 (.png .jpg .jpeg .bmp .gif .tiff)  → raster::convert_image
//! 音频 (.mp3 .wav .ogg .flac)             → audio::convert_audio
//! 视频 (.mp4 .avi .mov .mkv)              → video::remux_video
//! .docx → .pdf                            → document::docx_to_pdf
//! .pdf  → .docx                           → document::pdf_to_docx
//! 文本类 → 文本类                          → text::copy_text
//! 文本类 → .pdf                           → text::text_to_pdf
//! 其他                                    → UnsupportedConversion
//! ```
//!
//! 任何底层错误都包装为 [`ConversionError`]，并标记输入文件名。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `formats/` 的能力表
//! - 子模块: raster, audio, video, document, text, pdf, tools

pub mod audio;
pub mod document;
pub mod pdf;
pub mod raster;
pub mod text;
pub mod tools;
pub mod video;

pub use tools::ToolConfig;

use crate::error::{ConversionError, FileconvError, Result};
use crate::formats::{extension_of, resolve_handler, Handler};

use std::path::Path;

/// 单文件转换接口
///
/// 批量执行器只依赖这个接口，便于替换或在测试中注入。
pub trait Converter: Send {
    fn convert(&self, input_path: &Path, output_path: &Path) -> std::result::Result<(), ConversionError>;
}

/// 按扩展名分派的格式调度器
#[derive(Debug, Clone, Default)]
pub struct FormatDispatcher {
    tools: ToolConfig,
}

impl FormatDispatcher {
    pub fn new(tools: ToolConfig) -> Self {
        Self { tools }
    }

    fn dispatch(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let input_ext = extension_of(input_path);
        let output_ext = extension_of(output_path);

        let handler = resolve_handler(&input_ext, &output_ext).ok_or_else(|| {
            FileconvError::UnsupportedConversion {
                from: input_ext.clone(),
                to: output_ext.clone(),
            }
        })?;
        log::debug!(
            "{} -> {} via {:?}",
            input_path.display(),
            output_path.display(),
            handler
        );

        match handler {
            Handler::ImageReencode => raster::convert_image(input_path, output_path),
            Handler::AudioReencode => audio::convert_audio(input_path, output_path, &self.tools),
            Handler::VideoRemux => video::remux_video(input_path, output_path, &self.tools),
            Handler::DocxToPdf => document::docx_to_pdf(input_path, output_path),
            Handler::PdfToDocx => document::pdf_to_docx(input_path, output_path, &self.tools),
            Handler::TextCopy => text::copy_text(input_path, output_path),
            Handler::TextToPdf => text::text_to_pdf(input_path, output_path),
        }
    }
}

impl Converter for FormatDispatcher {
    fn convert(&self, input_path: &Path, output_path: &Path) -> std::result::Result<(), ConversionError> {
        self.dispatch(input_path, output_path).map_err(|e| {
            let name = input_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| input_path.display().to_string());
            ConversionError::from_failure(&name, e)
        })
    }
}
