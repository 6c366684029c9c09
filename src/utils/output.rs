//! # 美化输出工具
//!
//! 统一的终端输出样式，每行以彩色标签开头。错误输出到 stderr，其余到 stdout。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 行首标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Ok,
    Err,
    Warn,
    Info,
    Skip,
    Done,
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Ok => "[OK]",
            Tag::Err => "[ERR]",
            Tag::Warn => "[WARN]",
            Tag::Info => "[*]",
            Tag::Skip => "[SKIP]",
            Tag::Done => "[DONE]",
        }
    }

    fn styled(self) -> ColoredString {
        let label = self.label();
        match self {
            Tag::Ok | Tag::Done => label.green().bold(),
            Tag::Err => label.red().bold(),
            Tag::Warn => label.yellow().bold(),
            Tag::Info => label.blue().bold(),
            Tag::Skip => label.dimmed(),
        }
    }
}

/// 带标签的一行文本
pub fn tagged(tag: Tag, msg: &str) -> String {
    format!("{} {}", tag.styled(), msg)
}

pub fn print_success(msg: &str) {
    println!("{}", tagged(Tag::Ok, msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", tagged(Tag::Err, msg));
}

pub fn print_warning(msg: &str) {
    println!("{}", tagged(Tag::Warn, msg));
}

pub fn print_info(msg: &str) {
    println!("{}", tagged(Tag::Info, msg));
}

/// 打印跳过消息（不在支持表中的组合）
pub fn print_skip(msg: &str) {
    println!("{}", tagged(Tag::Skip, msg));
}

/// 打印批次汇总
pub fn print_done(msg: &str) {
    println!("{}", tagged(Tag::Done, msg));
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印 `key = value` 行，用于设置列表
pub fn print_key_value(key: &str, value: &str) {
    println!("  {:<16} {}", key.cyan(), value);
}
