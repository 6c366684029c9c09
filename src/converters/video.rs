//! # 视频重新封装
//!
//! 用 ffmpeg 把音视频流原样复制到新容器（`-c:v copy -c:a copy`），
//! 不做重编码。目标容器不支持源编码时 ffmpeg 报错，原样上报。
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 调用
//! - 使用 `converters/tools.rs`

use super::tools::{run_tool, ToolConfig};
use crate::error::Result;

use std::ffi::OsStr;
use std::path::Path;

const FFMPEG_HINT: &str = "Please install FFmpeg and make sure it is on PATH.";

/// 视频重新封装，已存在的输出文件被覆盖
pub fn remux_video(input_path: &Path, output_path: &Path, tools: &ToolConfig) -> Result<()> {
    run_tool(
        tools.ffmpeg.as_os_str(),
        remux_args(input_path, output_path),
        FFMPEG_HINT,
    )
}

fn remux_args<'a>(input_path: &'a Path, output_path: &'a Path) -> Vec<&'a OsStr> {
    vec![
        OsStr::new("-y"),
        OsStr::new("-loglevel"),
        OsStr::new("error"),
        OsStr::new("-i"),
        input_path.as_os_str(),
        OsStr::new("-c:v"),
        OsStr::new("copy"),
        OsStr::new("-c:a"),
        OsStr::new("copy"),
        output_path.as_os_str(),
    ]
}
