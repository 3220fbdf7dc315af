//! 尽力而为的后台任务派发。
//!
//! 通过 [`BackgroundTasks::spawn`] 派发的任务不会被调用方等待，任务失败只会写入日志，
//! 永远不会出现在调用方的返回值中。

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinSet;

#[derive(Clone, Default)]
pub struct BackgroundTasks {
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 派发一个后台任务，`label` 用于失败时的日志
    pub fn spawn<F, E>(&self, label: &'static str, task: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        // 回收已完成的任务
        while tasks.try_join_next().is_some() {}

        tasks.spawn(async move {
            if let Err(e) = task.await {
                tracing::warn!(task = label, error = %e, "Background task failed");
            }
        });
    }

    /// 等待目前已派发的所有任务结束
    pub async fn wait_idle(&self) {
        let mut drained = {
            let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *tasks)
        };

        while let Some(result) = drained.join_next().await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Background task panicked");
            }
        }
    }
}
