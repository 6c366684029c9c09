//! # 批量执行器
//!
//! 在单独的后台线程上按顺序转换条目，通过 channel 推送事件。
//!
//! ## 功能
//! - 严格按输入顺序逐个转换，不并行
//! - 单个条目失败只产生一条状态消息，不中断批次
//! - 每个条目结束后推送进度百分比
//! - 协作式取消：只在条目之间检查
//! - 每次运行恰好一个 `Completed` 事件，且总是最后一个
//!
//! ## 事件顺序
//! ```text
//! Status("(1/N) Converting a...", 0)
//! [Status("Failed to convert a: ...", 8000)]
//! Progress(round(100 * 1 / N))
//! ...
//! Status("Conversion process finished.", 5000)   // 仅非空且未被停止
//! Completed
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `converters/` 的 `Converter` 接口
//! - 使用 `crossbeam` channel 传递事件

use super::cancel::CancellationToken;
use crate::converters::{Converter, FormatDispatcher};
use crate::error::{FileconvError, Result};
use crate::models::{progress_percent, ConversionOutcome, WorkItem};

use crossbeam::channel::{self, Receiver, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// 持续显示直到被替换
pub const PERSISTENT_STATUS_MS: u64 = 0;
/// 单文件失败消息的建议显示时长
pub const FAILURE_STATUS_MS: u64 = 8_000;
/// 批次结束消息的建议显示时长
pub const FINISHED_STATUS_MS: u64 = 5_000;

/// 批次结束时的状态消息
pub const FINISHED_MESSAGE: &str = "Conversion process finished.";

/// 执行器推送的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// 进度百分比 (0..=100)
    Progress(u8),
    /// 状态消息；`timeout_ms == 0` 表示持续显示
    Status { message: String, timeout_ms: u64 },
    /// 终止事件
    Completed,
}

impl BatchEvent {
    fn status(message: impl Into<String>, timeout_ms: u64) -> Self {
        BatchEvent::Status {
            message: message.into(),
            timeout_ms,
        }
    }
}

/// 运行状态：`Idle → Running → {Stopped | Completed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunState {
    Idle = 0,
    Running = 1,
    Stopped = 2,
    Completed = 3,
}

impl RunState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunState::Running,
            2 => RunState::Stopped,
            3 => RunState::Completed,
            _ => RunState::Idle,
        }
    }
}

/// 批量执行器
///
/// 一次性使用：`run` / `start` 消耗自身，新批次需要新实例。
pub struct BatchRunner {
    items: Vec<WorkItem>,
    output_dir: PathBuf,
    converter: Box<dyn Converter>,
    token: CancellationToken,
    state: Arc<AtomicU8>,
}

impl BatchRunner {
    /// 使用默认格式调度器创建执行器
    ///
    /// `output_dir` 必须已存在，执行器不会创建它。
    pub fn new(items: Vec<WorkItem>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            items,
            output_dir: output_dir.into(),
            converter: Box::new(FormatDispatcher::default()),
            token: CancellationToken::new(),
            state: Arc::new(AtomicU8::new(RunState::Idle as u8)),
        }
    }

    /// 替换单文件转换实现
    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// 获取取消令牌，`cancel()` 后执行器在下一个条目前停止
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    fn set_state(&self, state: RunState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// 在后台线程启动批次
    pub fn start(self) -> Result<BatchHandle> {
        let (tx, rx): (Sender<BatchEvent>, Receiver<BatchEvent>) = channel::unbounded();
        let token = self.cancellation_token();
        let state = Arc::clone(&self.state);
        self.set_state(RunState::Running);

        let worker = thread::Builder::new()
            .name("conversion-worker".to_string())
            .spawn(move || {
                self.run(|event| {
                    // 接收端已关闭时丢弃事件，批次照常完成
                    let _ = tx.send(event);
                })
            })
            .map_err(|e| FileconvError::Other(format!("Failed to spawn conversion worker: {}", e)))?;

        Ok(BatchHandle {
            events: rx,
            token,
            state,
            worker,
        })
    }

    /// 在当前线程执行整个批次，通过 `emit` 推送事件
    pub fn run<F>(self, mut emit: F) -> RunState
    where
        F: FnMut(BatchEvent),
    {
        self.set_state(RunState::Running);
        let total = self.items.len();
        log::info!("Conversion worker started with {} files.", total);

        if total == 0 {
            log::info!("No files to convert.");
            self.set_state(RunState::Completed);
            emit(BatchEvent::Completed);
            return RunState::Completed;
        }

        let mut stopped = false;
        for (index, item) in self.items.iter().enumerate() {
            if self.token.is_cancelled() {
                log::warn!("Conversion worker stopped early after {} of {} files.", index, total);
                stopped = true;
                break;
            }

            emit(BatchEvent::status(
                format!("({}/{}) Converting {}...", index + 1, total, item.display_name()),
                PERSISTENT_STATUS_MS,
            ));

            if let ConversionOutcome::Failure(message) = self.convert_item(item) {
                emit(BatchEvent::status(message, FAILURE_STATUS_MS));
            }

            emit(BatchEvent::Progress(progress_percent(index + 1, total)));
        }

        let final_state = if stopped {
            RunState::Stopped
        } else {
            log::info!("Conversion worker finished.");
            emit(BatchEvent::status(FINISHED_MESSAGE, FINISHED_STATUS_MS));
            RunState::Completed
        };
        // 先更新状态，收到 Completed 的一方读到的是终态
        self.set_state(final_state);
        emit(BatchEvent::Completed);
        final_state
    }

    /// 转换单个条目；输出路径已存在时直接覆盖
    pub fn convert_item(&self, item: &WorkItem) -> ConversionOutcome {
        let output_path = item.output_path(&self.output_dir);
        log::info!(
            "Converting {} to {}",
            item.input_path().display(),
            output_path.display()
        );

        match self.converter.convert(item.input_path(), &output_path) {
            Ok(()) => {
                log::info!("Saved: {}", output_path.display());
                ConversionOutcome::Success
            }
            Err(e) => {
                log::warn!("{}", e);
                ConversionOutcome::Failure(e.to_string())
            }
        }
    }
}

/// 后台批次的控制句柄
pub struct BatchHandle {
    events: Receiver<BatchEvent>,
    token: CancellationToken,
    state: Arc<AtomicU8>,
    worker: JoinHandle<RunState>,
}

impl BatchHandle {
    /// 事件接收端；收到 `Completed` 后不再有事件
    pub fn events(&self) -> &Receiver<BatchEvent> {
        &self.events
    }

    /// 请求停止，当前条目仍会转换完毕
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// 等待后台线程结束
    pub fn join(self) -> Result<RunState> {
        self.worker
            .join()
            .map_err(|_| FileconvError::Other("Conversion worker panicked".to_string()))
    }
}
