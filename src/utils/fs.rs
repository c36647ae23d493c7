//! IO helper: JSON 消息文件的读取、写回与目标文件枚举

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use walkdir::WalkDir;

use crate::model::sync_core::SyncError;
use crate::model::tree::{NodeKind, Tree};

/// 从文件读取JSON对象
pub fn read_json_file(p: &Path) -> Result<Tree, SyncError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    match v {
        Value::Object(map) => Ok(map),
        other => Err(SyncError::NotAnObject(NodeKind::of(&other))),
    }
}

/// 将JSON对象保存到文件（两空格缩进，非ASCII字符原样输出）
pub fn write_json_file(p: &Path, tree: &Tree) -> Result<(), SyncError> {
    let f = File::create(p)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, tree)?;
    w.flush()?;
    Ok(())
}

/// 文件名通配模式：`*` 匹配任意长度字符，`?` 匹配单个字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    dir: PathBuf,
    name: Vec<char>,
}

impl FilePattern {
    /// 解析 `<目录>/<文件名模式>`，目录部分不含通配符
    pub fn parse(glob: &str) -> Result<Self, SyncError> {
        let path = Path::new(glob);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| SyncError::Pattern(format!("缺少文件名部分: {}", glob)))?;
        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if dir.to_string_lossy().contains(['*', '?']) {
            return Err(SyncError::Pattern(format!("目录部分不支持通配符: {}", glob)));
        }
        Ok(Self {
            dir,
            name: name.chars().collect(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let text: Vec<char> = file_name.chars().collect();
        // 隐藏文件只能由以 '.' 开头的模式匹配
        if text.first() == Some(&'.') && self.name.first() != Some(&'.') {
            return false;
        }
        // 贪心匹配 + 回溯到最近的 '*'
        let (mut p, mut t) = (0usize, 0usize);
        let mut star: Option<(usize, usize)> = None;
        while t < text.len() {
            match self.name.get(p) {
                Some('*') => {
                    star = Some((p, t));
                    p += 1;
                }
                Some(&c) if c == '?' || c == text[t] => {
                    p += 1;
                    t += 1;
                }
                _ => match star {
                    Some((sp, st)) => {
                        p = sp + 1;
                        t = st + 1;
                        star = Some((sp, st + 1));
                    }
                    None => return false,
                },
            }
        }
        self.name[p..].iter().all(|&c| c == '*')
    }
}

/// 枚举匹配 `target_glob` 的目标文件（不递归），排除参考文件，按文件名排序
pub fn enumerate_targets(target_glob: &str, reference: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let pattern = FilePattern::parse(target_glob)?;
    let reference = reference
        .canonicalize()
        .unwrap_or_else(|_| reference.to_path_buf());

    let mut out = Vec::new();
    for entry in WalkDir::new(pattern.dir())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !pattern.matches(name) {
            continue;
        }
        let path = entry.into_path();
        let same = path
            .canonicalize()
            .map(|c| c == reference)
            .unwrap_or(false);
        if same {
            tracing::debug!("跳过参考文件: {}", path.display());
            continue;
        }
        out.push(path);
    }
    tracing::debug!("匹配到 {} 个目标文件: {}", out.len(), target_glob);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn tree(v: Value) -> Tree {
        match v {
            Value::Object(m) => m,
            _ => panic!("测试夹具必须是对象"),
        }
    }

    #[test]
    fn test_read_json_file_preserves_order() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("de.json");
        fs::write(&p, r#"{"z": 1, "a": {"y": "ü", "b": 2}}"#).unwrap();

        let t = read_json_file(&p).unwrap();
        let keys: Vec<&str> = t.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(t["a"], json!({"y": "ü", "b": 2}));
    }

    #[test]
    fn test_read_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_json_file(&dir.path().join("nope.json")),
            Err(SyncError::Io(_))
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"broken": json"#).unwrap();
        assert!(matches!(read_json_file(&bad), Err(SyncError::Parse(_))));
    }

    #[test]
    fn test_read_non_object_root() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("list.json");
        fs::write(&p, "[1, 2]").unwrap();
        assert!(matches!(
            read_json_file(&p),
            Err(SyncError::NotAnObject(NodeKind::Array))
        ));
    }

    #[test]
    fn test_write_two_space_indent_and_literal_unicode() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("zh.json");
        let t = tree(json!({"title": "标题", "nav": {"home": "首页"}}));

        write_json_file(&p, &t).unwrap();

        let text = fs::read_to_string(&p).unwrap();
        assert_eq!(
            text,
            "{\n  \"title\": \"标题\",\n  \"nav\": {\n    \"home\": \"首页\"\n  }\n}"
        );
    }

    #[test]
    fn test_pattern_parse() {
        let pat = FilePattern::parse("messages/*.json").unwrap();
        assert_eq!(pat.dir(), Path::new("messages"));

        let bare = FilePattern::parse("*.json").unwrap();
        assert_eq!(bare.dir(), Path::new("."));

        assert!(matches!(
            FilePattern::parse("mess*/x.json"),
            Err(SyncError::Pattern(_))
        ));
    }

    #[test]
    fn test_pattern_matches() {
        let pat = FilePattern::parse("m/*.json").unwrap();
        assert!(pat.matches("de.json"));
        assert!(!pat.matches("de.json.bak"));
        assert!(!pat.matches("de.txt"));

        let q = FilePattern::parse("m/??.json").unwrap();
        assert!(q.matches("fr.json"));
        assert!(!q.matches("fra.json"));

        let multi = FilePattern::parse("m/*-*.json").unwrap();
        assert!(multi.matches("pt-BR.json"));
        assert!(!multi.matches("pt.json"));
    }

    #[test]
    fn test_pattern_skips_hidden_files() {
        let pat = FilePattern::parse("m/*.json").unwrap();
        assert!(!pat.matches(".draft.json"));
        assert!(!pat.matches(".json"));

        let hidden = FilePattern::parse("m/.*.json").unwrap();
        assert!(hidden.matches(".draft.json"));
    }

    #[test]
    fn test_enumerate_targets_excludes_reference_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["fr.json", "en.json", "de.json", "notes.txt", ".draft.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let glob = format!("{}/*.json", dir.path().display());
        let found = enumerate_targets(&glob, &dir.path().join("en.json")).unwrap();

        let names: Vec<String> = found
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["de.json", "fr.json"]);
    }

    #[test]
    fn test_enumerate_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let glob = format!("{}/absent/*.json", dir.path().display());
        let result = enumerate_targets(&glob, &dir.path().join("en.json"));
        assert!(matches!(result, Err(SyncError::Walk(_))));
    }
}
