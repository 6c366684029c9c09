//! # formats 命令实现
//!
//! 以表格列出每个输入扩展名可转换到的目标扩展名。
//! 默认只列出调度器实际能处理的组合，`--all` 显示完整公布表。
//!
//! ## 依赖关系
//! - 使用 `cli/formats.rs` 定义的参数
//! - 使用 `formats/` 的 `SupportedFormatTable`

use crate::cli::formats::FormatsArgs;
use crate::error::Result;
use crate::formats::{Category, SupportedFormatTable};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 表格行
#[derive(Debug, Clone, Tabled)]
struct FormatRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Input")]
    input: String,
    #[tabled(rename = "Outputs")]
    outputs: String,
}

/// 执行 formats 命令
pub fn execute(args: FormatsArgs) -> Result<()> {
    let builtin = SupportedFormatTable::builtin();
    let table = if args.all {
        builtin
    } else {
        builtin.dispatchable()
    };

    let rows = build_rows(&table, args.category.map(Category::from));
    if rows.is_empty() {
        output::print_warning("No conversions available");
        return Ok(());
    }

    let title = if args.all {
        "Advertised Conversions"
    } else {
        "Supported Conversions"
    };
    output::print_header(title);
    println!("{}", Table::new(&rows));

    Ok(())
}

fn build_rows(table: &SupportedFormatTable, category: Option<Category>) -> Vec<FormatRow> {
    table
        .iter()
        .filter(|(c, _)| category.map_or(true, |wanted| *c == wanted))
        .map(|(c, entry)| FormatRow {
            category: c.to_string(),
            input: entry.input.clone(),
            outputs: entry.outputs.join(" "),
        })
        .collect()
}
