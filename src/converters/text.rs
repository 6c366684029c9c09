//! # 纯文本转换
//!
//! - 文本 → 文本: UTF-8 解码后重新编码，统一换行符为 `\n`
//! - 文本 → PDF: 每个输入行一行，去掉行尾空白，交给 `pdf.rs` 分页
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 调用
//! - 使用 `converters/pdf.rs`

use super::pdf::{render_lines, TEXT_LINE_HEIGHT};
use crate::error::{FileconvError, Result};

use std::fs;
use std::path::Path;

/// 按 UTF-8 读取文本，`\r\n` 与单独的 `\r` 统一为 `\n`
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| FileconvError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FileconvError::InvalidText {
        path: path.display().to_string(),
    })?;
    Ok(normalize_newlines(&text))
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// 文本复制
pub fn copy_text(input_path: &Path, output_path: &Path) -> Result<()> {
    let text = read_text(input_path)?;
    fs::write(output_path, text).map_err(|e| FileconvError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 文本 → PDF
pub fn text_to_pdf(input_path: &Path, output_path: &Path) -> Result<()> {
    let text = read_text(input_path)?;
    let lines: Vec<String> = text_lines(&text);
    render_lines(&lines, TEXT_LINE_HEIGHT, output_path)
}

/// 一行一项，去掉行尾空白；末尾换行不产生额外空行
fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_content() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("config.yaml");
        let b = dir.path().join("config.txt");
        let back = dir.path().join("config_back.yaml");
        let content = "name: demo\nitems:\n  - α\n  - β\n";
        fs::write(&a, content).unwrap();

        copy_text(&a, &b).unwrap();
        copy_text(&b, &back).unwrap();

        assert_eq!(fs::read_to_string(&back).unwrap(), content);
    }

    #[test]
    fn test_line_endings_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("dos.txt");
        let b = dir.path().join("dos.md");
        fs::write(&a, "one\r\ntwo\rthree\n").unwrap();

        copy_text(&a, &b).unwrap();

        assert_eq!(fs::read_to_string(&b).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("latin1.txt");
        fs::write(&a, [0x66, 0x6f, 0xff, 0x6f]).unwrap();

        let err = copy_text(&a, &dir.path().join("out.txt")).unwrap_err();
        assert!(matches!(err, FileconvError::InvalidText { .. }));
    }

    #[test]
    fn test_text_lines_trim_trailing_whitespace() {
        assert_eq!(
            text_lines("def f():  \n    return 1\t\n\n"),
            vec!["def f():", "    return 1", ""]
        );
    }

    #[test]
    fn test_text_to_pdf_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("script.py");
        let out = dir.path().join("script.pdf");
        fs::write(&a, "print('hi')\n").unwrap();

        text_to_pdf(&a, &out).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
