//! 控制台与日志文案（消除魔法值）

pub const MSG_PROCESSING: &str = "处理";
pub const MSG_UPDATED: &str = "已更新";
pub const MSG_WOULD_UPDATE: &str = "需要更新";
pub const MSG_UNCHANGED: &str = "无需更改";
pub const MSG_LOAD_FAILED: &str = "读取失败";
pub const MSG_SAVE_FAILED: &str = "写入失败";
pub const MSG_TYPE_MISMATCH: &str = "类型不匹配已覆盖";
pub const MSG_TARGET_WAS: &str = "目标为";
