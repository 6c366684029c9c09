//! # 批量转换数据模型
//!
//! - [`WorkItem`]: 一个待转换文件及其目标扩展名
//! - [`ConversionOutcome`]: 单文件转换结果
//! - [`progress_percent`]: 批量进度百分比
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `commands/convert.rs` 使用
//! - 使用 `formats/` 规范化扩展名

use crate::formats::normalize_extension;
use std::path::{Path, PathBuf};

/// 待转换条目，入队后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    input_path: PathBuf,
    output_format: String,
}

impl WorkItem {
    /// `output_format` 可带或不带前导点，统一存为 `.ext` 小写形式
    pub fn new(input_path: impl Into<PathBuf>, output_format: &str) -> Self {
        Self {
            input_path: input_path.into(),
            output_format: normalize_extension(output_format),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    /// 输入文件名（不含目录）
    pub fn display_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }

    /// 输出路径：`output_dir/<输入文件名去扩展名><output_format>`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        output_dir.join(format!("{}{}", stem, self.output_format))
    }
}

/// 单文件转换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success,
    Failure(String),
}

/// `round(100 * completed / total)`，半数向上取整；`total == 0` 时为 100
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_extension() {
        let item = WorkItem::new("/photos/holiday.final.PNG", "JPG");
        assert_eq!(item.output_format(), ".jpg");
        assert_eq!(
            item.output_path(Path::new("/out")),
            PathBuf::from("/out/holiday.final.jpg")
        );
        assert_eq!(item.display_name(), "holiday.final.PNG");
    }

    #[test]
    fn test_output_path_without_extension() {
        let item = WorkItem::new("notes", ".pdf");
        assert_eq!(item.output_path(Path::new("out")), PathBuf::from("out/notes.pdf"));
    }

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(1, 2), 50);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(0, 5), 0);
    }

    #[test]
    fn test_progress_percent_is_monotonic() {
        for total in 1..50 {
            let values: Vec<u8> = (1..=total).map(|k| progress_percent(k, total)).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(*values.last().unwrap(), 100);
        }
    }
}
