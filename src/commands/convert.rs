//! # convert 命令实现
//!
//! 批量转换文件格式。
//!
//! ## 功能
//! - 展开输入文件/目录（glob 模式、可选递归）
//! - 可选 CSV 清单（`input,format` 两列）追加条目
//! - 不在支持表中的组合默认跳过，`--force` 时照常入队
//! - 后台执行批次，按事件驱动进度条，失败信息打印在进度条上方
//! - `--fail-fast` 时首个失败后请求停止，当前条目之后不再转换
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`, `formats/`, `models/`, `settings.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::runner::{FAILURE_STATUS_MS, PERSISTENT_STATUS_MS};
use crate::batch::{BatchEvent, BatchRunner, FileCollector, RunState};
use crate::cli::convert::ConvertArgs;
use crate::converters::FormatDispatcher;
use crate::error::{FileconvError, Result};
use crate::formats::{extension_of, normalize_extension, SupportedFormatTable};
use crate::models::WorkItem;
use crate::settings::Settings;
use crate::utils::{output, progress};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CSV 清单中的一行
#[derive(Debug, Deserialize)]
struct ManifestRow {
    input: PathBuf,
    format: String,
}

/// 批次汇总
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    processed: usize,
    failed: usize,
}

/// 执行 convert 命令
pub fn execute(args: ConvertArgs, settings: &Settings) -> Result<()> {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| settings.output_directory());
    if !output_dir.is_dir() {
        return Err(FileconvError::DirectoryNotFound {
            path: output_dir.display().to_string(),
        });
    }

    let requested = build_work_items(&args)?;
    let (items, skipped) = if args.force {
        (requested, Vec::new())
    } else {
        partition_supported(requested, &SupportedFormatTable::builtin().dispatchable())
    };

    for item in &skipped {
        output::print_skip(&format!(
            "{} -> {} is not a supported conversion",
            item.input_path().display(),
            item.output_format()
        ));
    }

    if items.is_empty() {
        output::print_warning("Nothing to convert");
        return Ok(());
    }

    output::print_header(&format!("Converting {} file(s)", items.len()));
    output::print_info(&format!("Output directory: {}", output_dir.display()));

    let runner = BatchRunner::new(items, &output_dir)
        .with_converter(FormatDispatcher::new(settings.tools()));
    let handle = runner.start()?;

    let pb = progress::create_percent_bar("Starting");
    let mut summary = Summary::default();

    for event in handle.events().iter() {
        match event {
            BatchEvent::Progress(percent) => {
                summary.processed += 1;
                pb.set_position(u64::from(percent));
            }
            BatchEvent::Status {
                message,
                timeout_ms,
            } => {
                if timeout_ms == FAILURE_STATUS_MS {
                    summary.failed += 1;
                    pb.suspend(|| output::print_error(&message));
                    if args.fail_fast {
                        handle.stop();
                    }
                } else if timeout_ms == PERSISTENT_STATUS_MS {
                    pb.set_message(message);
                } else {
                    log::info!("{}", message);
                }
            }
            BatchEvent::Completed => {
                log::debug!("Batch ended in state {:?}", handle.state());
                break;
            }
        }
    }

    let state = handle.join()?;
    pb.finish_with_message("Done");

    let verb = if state == RunState::Stopped {
        "Stopped after"
    } else {
        "Processed"
    };
    output::print_done(&format!(
        "{} {} file(s) into '{}' ({} failed)",
        verb,
        summary.processed,
        output_dir.display(),
        summary.failed
    ));

    Ok(())
}

/// 由命令行输入和清单生成条目
fn build_work_items(args: &ConvertArgs) -> Result<Vec<WorkItem>> {
    let mut items = Vec::new();

    if !args.inputs.is_empty() {
        let target = args.to.as_deref().ok_or_else(|| {
            FileconvError::InvalidArgument("--to is required when input paths are given".to_string())
        })?;
        let target = normalize_extension(target);
        if target == "." {
            return Err(FileconvError::InvalidArgument(
                "Target format must not be empty".to_string(),
            ));
        }

        let files = FileCollector::new(args.inputs.clone())
            .with_pattern(&args.pattern)?
            .recursive(args.recursive)
            .collect()?;
        items.extend(files.into_iter().map(|f| WorkItem::new(f, &target)));
    }

    if let Some(manifest) = &args.manifest {
        items.extend(read_manifest(manifest)?);
    }

    Ok(items)
}

/// 读取 CSV 清单；相对路径相对于清单所在目录
fn read_manifest(path: &Path) -> Result<Vec<WorkItem>> {
    if !path.is_file() {
        return Err(FileconvError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut items = Vec::new();
    for row in rdr.deserialize::<ManifestRow>() {
        let row = row?;
        let input = if row.input.is_absolute() {
            row.input
        } else {
            base.join(row.input)
        };
        items.push(WorkItem::new(input, &row.format));
    }

    log::debug!("Read {} item(s) from {}", items.len(), path.display());
    Ok(items)
}

/// 拆分为 (支持的, 跳过的)
fn partition_supported(
    items: Vec<WorkItem>,
    table: &SupportedFormatTable,
) -> (Vec<WorkItem>, Vec<WorkItem>) {
    items
        .into_iter()
        .partition(|item| table.offers(&extension_of(item.input_path()), item.output_format()))
}
