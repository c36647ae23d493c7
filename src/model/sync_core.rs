//! 同步主流程：加载参考文件，逐个对齐目标文件，仅在有变更时写回

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::messages::{
    MSG_LOAD_FAILED, MSG_PROCESSING, MSG_SAVE_FAILED, MSG_UNCHANGED, MSG_UPDATED,
    MSG_WOULD_UPDATE,
};
use crate::model::reconcile::{reconcile, Correction};
use crate::model::tree::{collect_key_paths, NodeKind, Tree};
use crate::utils::fs::{enumerate_targets, read_json_file, write_json_file};

pub const DEFAULT_REFERENCE_PATH: &str = "messages/en.json";
pub const DEFAULT_TARGET_GLOB: &str = "messages/*.json";

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("根节点必须是对象，实际为 {0}")]
    NotAnObject(NodeKind),
    #[error("目录遍历失败: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("目标匹配模式无效: {0}")]
    Pattern(String),
    #[error("参考文件 {} 不可用: {source}", .path.display())]
    Reference {
        path: PathBuf,
        #[source]
        source: Box<SyncError>,
    },
}

/// 运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub reference_path: PathBuf,
    pub target_glob: String,
    /// 只对齐并报告，不写回
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            target_glob: DEFAULT_TARGET_GLOB.to_string(),
            dry_run: false,
        }
    }
}

/// 单个目标文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Updated {
        added: Vec<String>,
        corrections: Vec<Correction>,
    },
    WouldUpdate {
        added: Vec<String>,
        corrections: Vec<Correction>,
    },
    Unchanged,
    LoadFailed {
        error: String,
    },
    SaveFailed {
        error: String,
    },
}

impl FileOutcome {
    pub fn corrections(&self) -> &[Correction] {
        match self {
            FileOutcome::Updated { corrections, .. }
            | FileOutcome::WouldUpdate { corrections, .. } => corrections,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// 整次运行的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub reference: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, report: FileReport) {
        match report.outcome {
            FileOutcome::Updated { .. } | FileOutcome::WouldUpdate { .. } => self.updated += 1,
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::LoadFailed { .. } | FileOutcome::SaveFailed { .. } => self.failed += 1,
        }
        self.files.push(report);
    }
}

/// 加载参考树；失败时整次运行终止
pub fn load_reference(path: &Path) -> Result<Tree, SyncError> {
    read_json_file(path).map_err(|e| SyncError::Reference {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// 对齐单个目标文件，有变更时通过 `save` 写回。单个文件的任何失败都转为结果，不向上传播
pub fn sync_file<S>(source: &Tree, path: &Path, dry_run: bool, mut save: S) -> FileOutcome
where
    S: FnMut(&Path, &Tree) -> Result<(), SyncError>,
{
    tracing::info!("{} {}", MSG_PROCESSING, path.display());
    let mut target = match read_json_file(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("{} {}: {}", MSG_LOAD_FAILED, path.display(), e);
            return FileOutcome::LoadFailed {
                error: e.to_string(),
            };
        }
    };

    let report = reconcile(source, &mut target);
    if !report.changed() {
        tracing::info!("{} {}", MSG_UNCHANGED, path.display());
        return FileOutcome::Unchanged;
    }
    tracing::debug!("{} 新增键: {:?}", path.display(), report.added);

    if dry_run {
        tracing::info!("{} {}（演练模式，未写回）", MSG_WOULD_UPDATE, path.display());
        return FileOutcome::WouldUpdate {
            added: report.added,
            corrections: report.corrections,
        };
    }

    if let Err(e) = save(path, &target) {
        tracing::error!("{} {}: {}", MSG_SAVE_FAILED, path.display(), e);
        return FileOutcome::SaveFailed {
            error: e.to_string(),
        };
    }
    tracing::info!(
        "{} {}：新增 {} 处，修正 {} 处",
        MSG_UPDATED,
        path.display(),
        report.added.len(),
        report.corrections.len()
    );
    FileOutcome::Updated {
        added: report.added,
        corrections: report.corrections,
    }
}

/// 执行一次完整同步。每处理完一个目标文件调用一次 `on_file`
pub fn run_sync<F>(config: &SyncConfig, on_file: F) -> Result<RunSummary, SyncError>
where
    F: FnMut(&FileReport),
{
    run_sync_with(config, write_json_file, on_file)
}

/// 同 [`run_sync`]，目标文件的写回由 `save` 完成
pub fn run_sync_with<S, F>(
    config: &SyncConfig,
    mut save: S,
    mut on_file: F,
) -> Result<RunSummary, SyncError>
where
    S: FnMut(&Path, &Tree) -> Result<(), SyncError>,
    F: FnMut(&FileReport),
{
    let source = load_reference(&config.reference_path)?;
    let targets = enumerate_targets(&config.target_glob, &config.reference_path)?;
    tracing::info!(
        "参考文件 {} 加载完成，共 {} 个目标文件",
        config.reference_path.display(),
        targets.len()
    );
    tracing::debug!("参考文件共 {} 个键路径", collect_key_paths(&source).len());

    let mut summary = RunSummary {
        reference: config.reference_path.clone(),
        dry_run: config.dry_run,
        ..RunSummary::default()
    };
    for path in targets {
        let outcome = sync_file(&source, &path, config.dry_run, &mut save);
        let report = FileReport { path, outcome };
        on_file(&report);
        summary.record(report);
    }
    Ok(summary)
}
