use crate::api::{AccountDetails, Tier};

/// 缓存的账户信息：根目录 id 与等级。
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AccountInfo {
    pub root_folder: String,
    pub tier: Tier,
}

impl From<&AccountDetails> for AccountInfo {
    fn from(details: &AccountDetails) -> Self {
        AccountInfo {
            root_folder: details.root_folder.clone(),
            tier: details.tier,
        }
    }
}

/// 一次瞬时失败后的处理结论。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RetryVerdict {
    /// 可以立即重发；`attempt` 为已消耗的重试次数。
    Retry { attempt: u32 },
    /// 预算耗尽，计数器已归零。
    Exhausted,
}

/// 会话独占的可变状态，只通过 `&mut Session` 修改。
#[derive(Debug)]
pub(crate) struct SessionState {
    token: String,
    account: Option<AccountInfo>,
    retry_count: u32,
}

impl SessionState {
    pub(crate) fn new(token: String) -> Self {
        Self {
            token,
            account: None,
            retry_count: 0,
        }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// 更换 token 同时丢弃旧 token 对应的账户缓存。
    pub(crate) fn replace_token(&mut self, token: String) {
        self.token = token;
        self.account = None;
    }

    pub(crate) fn account(&self) -> Option<&AccountInfo> {
        self.account.as_ref()
    }

    pub(crate) fn set_account(&mut self, account: AccountInfo) {
        self.account = Some(account);
    }

    pub(crate) fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub(crate) fn reset_retries(&mut self) {
        self.retry_count = 0;
    }

    /// 记录一次瞬时失败；计数到达上限时归零并判定为耗尽。
    pub(crate) fn register_failure(&mut self, max_retries: u32) -> RetryVerdict {
        self.retry_count += 1;
        if self.retry_count >= max_retries {
            self.retry_count = 0;
            RetryVerdict::Exhausted
        } else {
            RetryVerdict::Retry {
                attempt: self.retry_count,
            }
        }
    }
}
