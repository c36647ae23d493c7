//! 键结构对齐：以参考树为准，把缺失的键补进目标树
//!
//! 只新增，不覆盖已有的叶子值（译文保留）。唯一的覆盖情形是参考树在某路径上是对象、
//! 而目标树在同一路径上不是对象，此时整体替换为参考子树并记录一次结构修正。
//! 目标树中多出的键保持不动。

use serde::Serialize;
use serde_json::Value;

use crate::messages::{MSG_TARGET_WAS, MSG_TYPE_MISMATCH};
use crate::model::tree::{join_path, NodeKind, Tree};

/// 一次结构修正：目标在 `path` 处原为 `found` 类型，已被参考对象覆盖
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub path: String,
    pub found: NodeKind,
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} {} -> {}",
            MSG_TYPE_MISMATCH,
            self.path,
            MSG_TARGET_WAS,
            self.found,
            NodeKind::Object
        )
    }
}

/// 对齐结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// 新插入的键路径（缺失的整棵子树只记其根路径）
    pub added: Vec<String>,
    pub corrections: Vec<Correction>,
}

impl ReconcileReport {
    /// 目标树是否被修改
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.corrections.is_empty()
    }
}

/// 将 `source` 中存在而 `target` 中缺失的键路径补齐到 `target`（原地修改）
pub fn reconcile(source: &Tree, target: &mut Tree) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    merge_missing(source, target, "", &mut report);
    report
}

fn merge_missing(source: &Tree, target: &mut Tree, path: &str, report: &mut ReconcileReport) {
    for (key, value) in source {
        let current_path = join_path(path, key);

        let Some(slot) = target.get_mut(key) else {
            target.insert(key.clone(), value.clone());
            report.added.push(current_path);
            continue;
        };

        // 参考值为叶子（标量或数组）时从不覆盖目标
        let Value::Object(source_child) = value else {
            continue;
        };

        match slot {
            Value::Object(target_child) => {
                merge_missing(source_child, target_child, &current_path, report);
            }
            other => {
                let correction = Correction {
                    path: current_path,
                    found: NodeKind::of(other),
                };
                tracing::warn!("{}", correction);
                *other = value.clone();
                report.corrections.push(correction);
            }
        }
    }
}
