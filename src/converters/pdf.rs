//! # 简易 PDF 分页输出
//!
//! 把若干行文本按固定版式写到 U.S. Letter 页面上：
//!
//! ```text
//! 页面 612 × 792 pt，左边距 72 pt
//! 首行基线距顶 72 pt，每行下移固定行高
//! 绘制前若基线低于底边距 72 pt，则换页
//! ```
//!
//! 不保留字体、图片或富文本格式。版式计算（[`layout_lines`]）与渲染分开，
//! 渲染使用 `printpdf` 内置 Helvetica 12 pt。
//!
//! ## 依赖关系
//! - 被 `converters/text.rs` 和 `converters/document.rs` 使用
//! - 使用 `printpdf` crate

use crate::error::{FileconvError, Result};

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// U.S. Letter 宽度（pt）
pub const PAGE_WIDTH: f32 = 612.0;
/// U.S. Letter 高度（pt）
pub const PAGE_HEIGHT: f32 = 792.0;
/// 上、下、左边距（pt）
pub const MARGIN: f32 = 72.0;
/// DOCX 段落行高（pt）
pub const DOCX_LINE_HEIGHT: f32 = 20.0;
/// 纯文本行高（pt）
pub const TEXT_LINE_HEIGHT: f32 = 16.0;
/// 字号（pt）
pub const FONT_SIZE: f32 = 12.0;

/// 已定位的一行
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// 基线距页面底边的距离（PDF 坐标）
    pub y: f32,
    pub text: String,
}

/// 计算分页；没有任何行时返回一张空白页
pub fn layout_lines<S: AsRef<str>>(lines: &[S], line_height: f32) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        if y < MARGIN {
            pages.push(Vec::new());
            y = PAGE_HEIGHT - MARGIN;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                y,
                text: line.as_ref().to_string(),
            });
        }
        y -= line_height;
    }

    pages
}

/// 分页并写出 PDF，已存在的文件被覆盖
pub fn render_lines<S: AsRef<str>>(lines: &[S], line_height: f32, output_path: &Path) -> Result<()> {
    let pages = layout_lines(lines, line_height);
    let title = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let width = Mm::from(Pt(PAGE_WIDTH));
    let height = Mm::from(Pt(PAGE_HEIGHT));
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    for (index, page_lines) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Layer 1")
        };
        let current = doc.get_page(page).get_layer(layer);
        for line in page_lines.iter().filter(|l| !l.text.is_empty()) {
            current.use_text(
                line.text.clone(),
                FONT_SIZE,
                Mm::from(Pt(MARGIN)),
                Mm::from(Pt(line.y)),
                &font,
            );
        }
    }

    let file = File::create(output_path).map_err(|e| FileconvError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_paragraphs_fit_one_page() {
        let pages = layout_lines(&["Intro", "Body", "Outro"], DOCX_LINE_HEIGHT);
        assert_eq!(pages.len(), 1);

        let offsets: Vec<f32> = pages[0].iter().map(|l| PAGE_HEIGHT - l.y).collect();
        assert_eq!(offsets, vec![72.0, 92.0, 112.0]);
        assert_eq!(pages[0][2].text, "Outro");
    }

    #[test]
    fn test_page_break_below_bottom_margin() {
        // 720, 700, ..., 80 共 33 行在第一页；下一行 60 < 72 换页
        let lines: Vec<String> = (0..40).map(|i| format!("line {}", i)).collect();
        let pages = layout_lines(&lines, DOCX_LINE_HEIGHT);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 33);
        assert_eq!(pages[0].last().unwrap().y, 80.0);
        assert_eq!(pages[1][0].y, PAGE_HEIGHT - MARGIN);
        assert_eq!(pages[1][0].text, "line 33");
    }

    #[test]
    fn test_text_line_height_packs_more_lines() {
        let lines = vec![""; 50];
        let pages = layout_lines(&lines, TEXT_LINE_HEIGHT);
        // 720 - 16k >= 72 → k <= 40.5，共 41 行
        assert_eq!(pages[0].len(), 41);
        assert_eq!(pages[1].len(), 9);
    }

    #[test]
    fn test_empty_input_yields_blank_page() {
        let pages = layout_lines::<&str>(&[], TEXT_LINE_HEIGHT);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_render_writes_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("notes.pdf");
        render_lines(&["hello", "world"], TEXT_LINE_HEIGHT, &out).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
