use crate::error::{GofileError, Result};

pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// 默认的重试预算。任意非负整数都是合法预算，0 表示首次网络失败即终止。
pub fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// 解析来自环境变量等文本来源的重试预算。
pub fn parse_max_retries(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| GofileError::config(format!("invalid max retries value {raw:?}: {e}")))
}
