//! # 文档转换
//!
//! - DOCX → PDF: 读取 `word/document.xml`，每个段落 (`w:p`) 输出一行
//! - PDF → DOCX: 交给外部 `pdf2docx` 重建；未安装时报告能力缺失
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 调用
//! - 使用 `converters/pdf.rs`, `converters/tools.rs`
//! - 使用 `zip` 与 `quick-xml` 解析 DOCX

use super::pdf::{render_lines, DOCX_LINE_HEIGHT};
use super::tools::{run_tool, ToolConfig};
use crate::error::{FileconvError, Result};

use quick_xml::events::Event;
use quick_xml::Reader;
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const PDF2DOCX_HINT: &str = "Please install it with 'pip install pdf2docx'.";

/// DOCX → PDF
pub fn docx_to_pdf(input_path: &Path, output_path: &Path) -> Result<()> {
    let paragraphs = read_docx_paragraphs(input_path)?;
    render_lines(&paragraphs, DOCX_LINE_HEIGHT, output_path)
}

/// PDF → DOCX（外部工具）
pub fn pdf_to_docx(input_path: &Path, output_path: &Path, tools: &ToolConfig) -> Result<()> {
    run_tool(
        tools.pdf2docx.as_os_str(),
        [
            OsStr::new("convert"),
            input_path.as_os_str(),
            output_path.as_os_str(),
        ],
        PDF2DOCX_HINT,
    )
}

/// 读取 DOCX 主文档中所有段落的纯文本
pub fn read_docx_paragraphs(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| FileconvError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file)?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)?
        .read_to_string(&mut xml)
        .map_err(|e| FileconvError::FileReadError {
            path: format!("{}:{}", path.display(), DOCUMENT_PART),
            source: e,
        })?;
    parse_paragraphs(&xml)
}

/// 解析 WordprocessingML 段落
///
/// `w:t` 取文本，`w:tab` 记为制表符，`w:br`/`w:cr` 记为空格。
/// 段落属性 (`w:pPr`) 中的制表位定义不计入文本。
/// 表格单元格内的段落同样按出现顺序输出。
/// 嵌套在段落内的段落（文本框 `w:txbxContent`）不输出，也不并入外层段落；
/// `mc:Fallback` 子树整体跳过。
pub fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut para_depth = 0usize;
    let mut fallback_depth = 0usize;
    let mut in_text = false;
    let mut in_props = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Fallback" => fallback_depth += 1,
                _ if fallback_depth > 0 => {}
                b"p" => {
                    if para_depth == 0 {
                        current.clear();
                    }
                    para_depth += 1;
                }
                b"pPr" => in_props = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(_) if in_props || fallback_depth > 0 => {}
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if para_depth == 0 => paragraphs.push(String::new()),
                b"tab" if para_depth == 1 => current.push('\t'),
                b"br" | b"cr" if para_depth == 1 => current.push(' '),
                _ => {}
            },
            Event::Text(t) if in_text && para_depth == 1 => {
                current.push_str(&t.unescape()?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                _ if fallback_depth > 0 => {}
                b"t" => in_text = false,
                b"pPr" => in_props = false,
                b"p" => {
                    para_depth = para_depth.saturating_sub(1);
                    if para_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// 生成只含若干段落的最小 DOCX
    pub(crate) fn write_docx(path: &Path, paragraphs: &[&str]) {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, p))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        );

        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_parse_runs_tabs_and_entities() {
        let xml = r#"<w:document xmlns:w="w"><w:body>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs><w:jc w:val="left"/></w:pPr><w:r><w:t>Fish &amp; </w:t></w:r><w:r><w:t>Chips</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>
</w:body></w:document>"#;
        let paragraphs = parse_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Fish & Chips", "", "a\tb c"]);
    }

    #[test]
    fn test_whitespace_outside_text_runs_is_ignored() {
        let xml = "<w:document xmlns:w=\"w\"><w:body><w:p>\n  <w:r>\n <w:t>x</w:t></w:r>\n</w:p></w:body></w:document>";
        assert_eq!(parse_paragraphs(xml).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_text_box_does_not_split_outer_paragraph() {
        let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Before box</w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:t>Inside</w:t></w:r></w:p></w:txbxContent></w:r><w:r><w:t> after box</w:t></w:r></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(
            parse_paragraphs(xml).unwrap(),
            vec!["Before box after box", "Next"]
        );
    }

    #[test]
    fn test_alternate_content_fallback_is_skipped() {
        let xml = r#"<w:document xmlns:w="w" xmlns:mc="mc" xmlns:v="v"><w:body>
<w:p><w:r><w:t>Caption: </w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p><w:p/></w:txbxContent></v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t>done</w:t></w:r></w:p>
<w:p/>
</w:body></w:document>"#;
        assert_eq!(parse_paragraphs(xml).unwrap(), vec!["Caption: done", ""]);
    }

    #[test]
    fn test_read_generated_docx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        write_docx(&path, &["Summary", "Findings", "Next steps"]);

        let paragraphs = read_docx_paragraphs(&path).unwrap();
        assert_eq!(paragraphs, vec!["Summary", "Findings", "Next steps"]);
    }

    #[test]
    fn test_docx_to_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.docx");
        let output = dir.path().join("report.pdf");
        write_docx(&input, &["One", "Two", "Three"]);

        docx_to_pdf(&input, &output).unwrap();

        assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fake.docx");
        std::fs::write(&input, "plain text").unwrap();

        let err = read_docx_paragraphs(&input).unwrap_err();
        assert!(matches!(err, FileconvError::Zip(_)));
    }

    #[test]
    fn test_pdf2docx_missing() {
        let tools = ToolConfig {
            pdf2docx: "fileconv-missing-pdf2docx".into(),
            ..ToolConfig::default()
        };
        let err = pdf_to_docx(Path::new("a.pdf"), Path::new("a.docx"), &tools).unwrap_err();
        assert!(err.to_string().contains("pip install pdf2docx"));
    }
}
