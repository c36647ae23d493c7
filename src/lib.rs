//! 本地化消息文件同步库
//!
//! 以参考语言文件的键结构为准，补齐其它语言文件中缺失的键，修正对象/非对象的类型冲突，
//! 已有译文从不覆盖，多余的键从不删除。

pub mod cli;
pub mod messages;
pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::reconcile::{reconcile, Correction, ReconcileReport};
pub use model::sync_core::{
    run_sync, run_sync_with, FileOutcome, FileReport, RunSummary, SyncConfig, SyncError,
};
pub use model::tree::{NodeKind, Tree};
