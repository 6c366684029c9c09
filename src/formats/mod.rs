//! # 格式能力表
//!
//! 唯一的 `(输入扩展名, 输出扩展名) → 处理器` 映射。调度器只通过
//! [`resolve_handler`] 决定调用哪个转换例程；对外公布的
//! [`SupportedFormatTable`] 用同一函数过滤，避免两张表各自维护而漂移。
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs`（调度）和 `commands/`（提供可选项）使用
//! - 无外部模块依赖

pub mod table;

pub use table::SupportedFormatTable;

use std::fmt;
use std::path::Path;

/// 图像输入扩展名
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".gif", ".tiff"];

/// 音频输入扩展名
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".ogg", ".flac"];

/// 视频输入扩展名
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv"];

/// 纯文本类扩展名
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".py", ".json", ".csv", ".xml", ".html", ".md", ".rtf", ".log", ".ini", ".yaml",
    ".yml",
];

/// 格式类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Documents,
    Images,
    Audio,
    Video,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Documents => write!(f, "Documents"),
            Category::Images => write!(f, "Images"),
            Category::Audio => write!(f, "Audio"),
            Category::Video => write!(f, "Video"),
        }
    }
}

/// 转换处理器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// 解码后重新编码到目标图像容器
    ImageReencode,
    /// 解码为 PCM 后重新编码
    AudioReencode,
    /// 复制音视频流到新容器（不重编码）
    VideoRemux,
    /// DOCX 段落逐行输出为 PDF
    DocxToPdf,
    /// 交给外部工具重建 DOCX
    PdfToDocx,
    /// UTF-8 文本复制
    TextCopy,
    /// 文本逐行分页输出为 PDF
    TextToPdf,
}

/// 规范化扩展名：小写并带前导点（`JPG` / `.JPG` → `.jpg`）
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// 取路径末尾扩展名（小写，带点）；无扩展名时返回空串
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// 是否为纯文本类扩展名
pub fn is_text(ext: &str) -> bool {
    TEXT_EXTENSIONS.contains(&ext)
}

/// 按输入扩展名、再按输出扩展名查找处理器
///
/// 两个参数都必须已规范化（见 [`normalize_extension`]）。图像、音频、视频
/// 只在同一类别内转换；目标容器能否容纳源编码由底层库在转换时判断。
/// 类别列表之外的目标扩展名（如 `.m4a`、`.webm`）一律返回 `None`，
/// 即使 ffmpeg 本身能写出这些容器：可选目标只限于公布表中的扩展名。
pub fn resolve_handler(input_ext: &str, output_ext: &str) -> Option<Handler> {
    if within(IMAGE_EXTENSIONS, input_ext, output_ext) {
        return Some(Handler::ImageReencode);
    }
    if within(AUDIO_EXTENSIONS, input_ext, output_ext) {
        return Some(Handler::AudioReencode);
    }
    if within(VIDEO_EXTENSIONS, input_ext, output_ext) {
        return Some(Handler::VideoRemux);
    }
    match (input_ext, output_ext) {
        (".docx", ".pdf") => Some(Handler::DocxToPdf),
        (".pdf", ".docx") => Some(Handler::PdfToDocx),
        (i, o) if is_text(i) && is_text(o) => Some(Handler::TextCopy),
        (i, ".pdf") if is_text(i) => Some(Handler::TextToPdf),
        _ => None,
    }
}

fn within(family: &[&str], input_ext: &str, output_ext: &str) -> bool {
    family.contains(&input_ext) && family.contains(&output_ext)
}
