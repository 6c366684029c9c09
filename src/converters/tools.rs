//! # 外部命令调用
//!
//! 视频封装、非 WAV 音频编码、PDF → DOCX 重建交给外部程序完成。
//! 程序不存在时返回 `CommandNotFound`（调度器归类为能力缺失），
//! 非零退出时返回 `CommandFailed` 并附带 stderr。
//!
//! ## 依赖关系
//! - 被 `converters/audio.rs`, `converters/video.rs`, `converters/document.rs` 使用

use crate::error::{FileconvError, Result};

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// 外部工具位置，由设置文件提供
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub ffmpeg: PathBuf,
    pub pdf2docx: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            pdf2docx: PathBuf::from("pdf2docx"),
        }
    }
}

/// 运行外部程序直到结束
///
/// `hint` 用于程序缺失时的提示文本。
pub fn run_tool<I, S>(program: &OsStr, args: I, hint: &str) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let name = program.to_string_lossy().to_string();
    log::debug!("Running external tool: {}", name);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FileconvError::CommandNotFound {
                    command: name.clone(),
                    hint: hint.to_string(),
                }
            } else {
                FileconvError::CommandFailed {
                    command: name.clone(),
                    stderr: e.to_string(),
                }
            }
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(FileconvError::CommandFailed {
            command: name,
            stderr: last_lines(&stderr, 5),
        })
    }
}

/// ffmpeg 会输出大量横幅信息，只保留末尾几行
fn last_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_command_not_found() {
        let err = run_tool(
            OsStr::new("fileconv-definitely-missing-tool"),
            ["--version"],
            "Install it.",
        )
        .unwrap_err();
        match err {
            FileconvError::CommandNotFound { command, hint } => {
                assert_eq!(command, "fileconv-definitely-missing-tool");
                assert_eq!(hint, "Install it.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_lines() {
        let text = "banner\n\nline1\nline2\nline3\n";
        assert_eq!(last_lines(text, 2), "line2\nline3");
        assert_eq!(last_lines("", 3), "");
    }
}
