//! # 对外公布的格式表
//!
//! 按类别列出"输入扩展名 → 可选输出扩展名"，供前端生成可选项。
//! 表内容是静态的；[`SupportedFormatTable::dispatchable`] 用调度器的
//! 规则过滤掉实际无法转换的组合。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs`、`commands/formats.rs` 使用
//! - 使用 `formats/mod.rs` 的 `resolve_handler`

use super::{resolve_handler, Category};

/// 单个输入扩展名及其有序的目标扩展名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEntry {
    pub input: String,
    pub outputs: Vec<String>,
}

/// 类别 → 条目列表（保持插入顺序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedFormatTable {
    categories: Vec<(Category, Vec<FormatEntry>)>,
}

fn entry(input: &str, outputs: &[&str]) -> FormatEntry {
    FormatEntry {
        input: input.to_string(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
    }
}

impl SupportedFormatTable {
    /// 内置公布表
    pub fn builtin() -> Self {
        let documents = vec![
            entry(".docx", &[".pdf"]),
            entry(".pdf", &[".docx"]),
            entry(".txt", &[".pdf", ".docx"]),
            entry(".py", &[".txt", ".pdf"]),
            entry(".json", &[".txt", ".pdf"]),
        ];
        let images = vec![
            entry(".png", &[".jpg", ".jpeg", ".bmp", ".gif", ".tiff"]),
            entry(".jpg", &[".png", ".bmp", ".gif", ".tiff"]),
            entry(".jpeg", &[".png", ".bmp", ".gif", ".tiff"]),
            entry(".bmp", &[".png", ".jpg", ".jpeg", ".gif", ".tiff"]),
            entry(".gif", &[".png", ".jpg", ".jpeg", ".bmp", ".tiff"]),
            entry(".tiff", &[".png", ".jpg", ".jpeg", ".bmp", ".gif"]),
        ];
        let audio = vec![
            entry(".mp3", &[".wav", ".ogg", ".flac"]),
            entry(".wav", &[".mp3", ".ogg", ".flac"]),
            entry(".ogg", &[".mp3", ".wav", ".flac"]),
            entry(".flac", &[".mp3", ".wav", ".ogg"]),
        ];
        let video = vec![
            entry(".mp4", &[".avi", ".mov", ".mkv"]),
            entry(".avi", &[".mp4", ".mov", ".mkv"]),
            entry(".mov", &[".mp4", ".avi", ".mkv"]),
            entry(".mkv", &[".mp4", ".avi", ".mov"]),
        ];

        Self {
            categories: vec![
                (Category::Documents, documents),
                (Category::Images, images),
                (Category::Audio, audio),
                (Category::Video, video),
            ],
        }
    }

    /// 仅保留调度器能处理的组合；输出为空的条目整体移除
    pub fn dispatchable(&self) -> Self {
        let categories = self
            .categories
            .iter()
            .map(|(category, entries)| {
                let entries = entries
                    .iter()
                    .filter_map(|e| {
                        let outputs: Vec<String> = e
                            .outputs
                            .iter()
                            .filter(|o| resolve_handler(&e.input, o).is_some())
                            .cloned()
                            .collect();
                        if outputs.is_empty() {
                            None
                        } else {
                            Some(FormatEntry {
                                input: e.input.clone(),
                                outputs,
                            })
                        }
                    })
                    .collect();
                (*category, entries)
            })
            .collect();
        Self { categories }
    }

    /// 遍历 (类别, 条目)
    pub fn iter(&self) -> impl Iterator<Item = (Category, &FormatEntry)> {
        self.categories
            .iter()
            .flat_map(|(c, entries)| entries.iter().map(move |e| (*c, e)))
    }

    /// 某个输入扩展名可选的输出扩展名
    pub fn outputs_for(&self, input_ext: &str) -> Option<&[String]> {
        self.iter()
            .find(|(_, e)| e.input == input_ext)
            .map(|(_, e)| e.outputs.as_slice())
    }

    /// 组合是否在表中
    pub fn offers(&self, input_ext: &str, output_ext: &str) -> bool {
        self.outputs_for(input_ext)
            .map(|outs| outs.iter().any(|o| o == output_ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = SupportedFormatTable::builtin();
        assert_eq!(
            table.outputs_for(".mp3").unwrap(),
            &[".wav".to_string(), ".ogg".to_string(), ".flac".to_string()]
        );
        assert!(table.offers(".png", ".jpg"));
        assert!(!table.offers(".png", ".png"));
        assert!(table.outputs_for(".exe").is_none());
    }

    #[test]
    fn test_dispatchable_drops_pairs_the_dispatcher_rejects() {
        let table = SupportedFormatTable::builtin();
        assert!(table.offers(".txt", ".docx"));

        let usable = table.dispatchable();
        assert!(!usable.offers(".txt", ".docx"));
        assert!(usable.offers(".txt", ".pdf"));
        assert!(usable.offers(".pdf", ".docx"));
    }

    #[test]
    fn test_every_dispatchable_pair_resolves() {
        let usable = SupportedFormatTable::builtin().dispatchable();
        for (_, e) in usable.iter() {
            for o in &e.outputs {
                assert!(resolve_handler(&e.input, o).is_some(), "{} -> {}", e.input, o);
            }
        }
    }
}
