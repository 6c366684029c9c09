//! # 设置管理
//!
//! 扁平键值 JSON 文件，启动时读取，每次修改立即写回。
//! 文件缺失、损坏或不是 JSON 对象时回退到默认值，不向调用方报错。
//!
//! ```json
//! {
//!     "output_directory": "/home/user",
//!     "ffmpeg_path": "ffmpeg",
//!     "pdf2docx_path": "pdf2docx"
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `serde_json` 读写，`dirs` 定位默认路径

use crate::converters::ToolConfig;
use crate::error::{FileconvError, Result};

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const OUTPUT_DIRECTORY: &str = "output_directory";
pub const FFMPEG_PATH: &str = "ffmpeg_path";
pub const PDF2DOCX_PATH: &str = "pdf2docx_path";

/// 默认设置文件路径：`<config_dir>/fileconv/settings.json`
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fileconv")
        .join("settings.json")
}

/// 持久化的键值设置
#[derive(Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Settings {
    /// 读取设置文件，失败时使用默认值
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    log::warn!("Settings file {} is not a JSON object, using defaults", path.display());
                    Self::defaults()
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                    Self::defaults()
                }
            },
            Err(_) => Self::defaults(),
        };
        Self { path, values }
    }

    fn defaults() -> Map<String, Value> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let mut map = Map::new();
        map.insert(
            OUTPUT_DIRECTORY.to_string(),
            Value::String(home.display().to_string()),
        );
        map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取字符串值；非字符串值按 JSON 文本返回
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// 设置并立即写回文件
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.save()
    }

    /// 写回文件（缩进 4 空格），必要时创建父目录
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FileconvError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(&self.values, &mut ser).map_err(|e| {
            FileconvError::SettingsError {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        fs::write(&self.path, buf).map_err(|e| FileconvError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// 所有键值（按键排序）
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .values
            .keys()
            .filter_map(|k| self.get(k).map(|v| (k.clone(), v)))
            .collect();
        entries.sort();
        entries
    }

    /// 默认输出目录
    pub fn output_directory(&self) -> PathBuf {
        self.get(OUTPUT_DIRECTORY)
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// 外部工具位置
    pub fn tools(&self) -> ToolConfig {
        let defaults = ToolConfig::default();
        ToolConfig {
            ffmpeg: self
                .get(FFMPEG_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.ffmpeg),
            pdf2docx: self
                .get(PDF2DOCX_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf2docx),
        }
    }
}
