//! 命令行参数与控制台输出

use std::path::PathBuf;

use clap::Parser;

use crate::messages::{
    MSG_LOAD_FAILED, MSG_PROCESSING, MSG_SAVE_FAILED, MSG_UNCHANGED, MSG_UPDATED,
    MSG_WOULD_UPDATE,
};
use crate::model::sync_core::{
    FileOutcome, FileReport, SyncConfig, DEFAULT_REFERENCE_PATH, DEFAULT_TARGET_GLOB,
};

#[derive(Parser, Debug)]
#[command(
    name = "locale_sync",
    version,
    about = "以参考语言文件为准，补齐其它本地化 JSON 文件中缺失的键"
)]
pub struct Cli {
    /// 参考（源）语言文件
    #[arg(long, default_value = DEFAULT_REFERENCE_PATH)]
    pub reference: PathBuf,

    /// 目标文件匹配模式（目录部分为字面路径，文件名支持 * 和 ?）
    #[arg(long, default_value = DEFAULT_TARGET_GLOB)]
    pub targets: String,

    /// 只报告需要的修改，不写回文件
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// 以 JSON 输出运行汇总
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> SyncConfig {
        SyncConfig {
            reference_path: self.reference.clone(),
            target_glob: self.targets.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// 单个文件的文本进度行
pub fn render_file_report(report: &FileReport) -> Vec<String> {
    let path = report.path.display();
    let mut lines = vec![format!("{} {}...", MSG_PROCESSING, path)];
    for c in report.outcome.corrections() {
        lines.push(format!("    ! {}", c));
    }
    lines.push(match &report.outcome {
        FileOutcome::Updated { .. } => format!("  - {} {}", MSG_UPDATED, path),
        FileOutcome::WouldUpdate { .. } => format!("  - {} {}", MSG_WOULD_UPDATE, path),
        FileOutcome::Unchanged => format!("  - {} {}", MSG_UNCHANGED, path),
        FileOutcome::LoadFailed { error } => format!("  - {} {}: {}", MSG_LOAD_FAILED, path, error),
        FileOutcome::SaveFailed { error } => format!("  - {} {}: {}", MSG_SAVE_FAILED, path, error),
    });
    lines
}
