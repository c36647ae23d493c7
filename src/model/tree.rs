//! 消息树（Tree）：本地化 JSON 文档的内存表示，以及按点分路径展开的键索引

use serde::Serialize;
use serde_json::{Map, Value};

/// 一个 JSON 对象文档：键保持首次插入顺序（serde_json `preserve_order`）
pub type Tree = Map<String, Value>;

/// JSON 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Bool => "bool",
            NodeKind::Null => "null",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 拼接点分键路径（根层级无前缀）
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// 按深度优先顺序列出树中所有键路径及其类型。
///
/// 数组视为叶子，不展开其元素。
pub fn collect_key_paths(tree: &Tree) -> Vec<(String, NodeKind)> {
    let mut out = Vec::new();
    fn walk(out: &mut Vec<(String, NodeKind)>, map: &Tree, path: &str) {
        for (k, child) in map {
            let child_path = join_path(path, k);
            out.push((child_path.clone(), NodeKind::of(child)));
            if let Value::Object(inner) = child {
                walk(out, inner, &child_path);
            }
        }
    }
    walk(&mut out, tree, "");
    out
}

/// 按点分路径查找值（键本身含 '.' 时无法寻址）
#[cfg(test)]
pub(crate) fn lookup<'a>(tree: &'a Tree, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let first = parts.next()?;
    let mut cur = tree.get(first)?;
    for part in parts {
        cur = cur.as_object()?.get(part)?;
    }
    Some(cur)
}
