//! # config 命令实现
//!
//! 查看和修改持久化设置，修改后立即写回设置文件。
//!
//! ## 依赖关系
//! - 使用 `cli/config.rs` 定义的参数
//! - 使用 `settings.rs`

use crate::cli::config::{ConfigArgs, ConfigCommands};
use crate::error::{FileconvError, Result};
use crate::settings::{Settings, OUTPUT_DIRECTORY};
use crate::utils::output;

use std::path::Path;

/// 执行 config 命令
pub fn execute(args: ConfigArgs, settings: &mut Settings) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            output::print_header("Settings");
            output::print_info(&format!("File: {}", settings.path().display()));
            for (key, value) in settings.entries() {
                output::print_key_value(&key, &value);
            }
        }
        ConfigCommands::Get { key } => {
            let value = settings.get(&key).ok_or_else(|| {
                FileconvError::InvalidArgument(format!("Setting '{}' is not set", key))
            })?;
            println!("{}", value);
        }
        ConfigCommands::Set { key, value } => {
            if key == OUTPUT_DIRECTORY && !Path::new(&value).is_dir() {
                output::print_warning(&format!(
                    "Directory '{}' does not exist yet; conversions will fail until it is created",
                    value
                ));
            }
            settings.set(&key, &value)?;
            output::print_success(&format!("{} = {}", key, value));
        }
    }

    Ok(())
}
