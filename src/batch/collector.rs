//! # 文件收集器
//!
//! 把命令行给出的输入路径展开为待转换文件列表。
//!
//! ## 功能
//! - 单文件原样保留（不做模式过滤）
//! - 目录按 glob 模式匹配文件名（逗号分隔多模式，不区分大小写）
//! - 可选递归目录搜索
//! - 结果保持输入顺序，同一目录内按路径排序，去重
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{FileconvError, Result};

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径（文件或目录）
    inputs: Vec<PathBuf>,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器，默认匹配所有文件
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != "*")
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    FileconvError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件；不存在的输入路径报错
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for input in &self.inputs {
            if input.is_file() {
                if seen.insert(input.clone()) {
                    files.push(input.clone());
                }
            } else if input.is_dir() {
                for path in self.walk(input) {
                    if seen.insert(path.clone()) {
                        files.push(path);
                    }
                }
            } else {
                return Err(FileconvError::FileNotFound {
                    path: input.display().to_string(),
                });
            }
        }

        Ok(files)
    }

    fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        found.sort();
        found
    }

    /// 检查文件名是否匹配任一模式；无模式时全部匹配
    fn matches_patterns(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };
        self.patterns
            .iter()
            .any(|p| p.matches_with(filename, options))
    }
}
