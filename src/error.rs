//! Gofile 客户端的统一错误类型。
//!
//! 每一次远程调用的失败都会落到 [`GofileError`] 的某个分支上，
//! 分支本身携带操作名、相关 id 与状态码，调用方无需开启详细日志即可定位问题。

use crate::api::TransportError;
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// 远程 API 的各个调用，用于错误与日志上下文。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetServer,
    UploadFile,
    GetContent,
    DownloadContent,
    CreateAccount,
    CreateFolder,
    GetAccountDetails,
    CopyContent,
    SetOption,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetServer => "getServer",
            Operation::UploadFile => "uploadFile",
            Operation::GetContent => "getContent",
            Operation::DownloadContent => "downloadContent",
            Operation::CreateAccount => "createAccount",
            Operation::CreateFolder => "createFolder",
            Operation::GetAccountDetails => "getAccountDetails",
            Operation::CopyContent => "copyContent",
            Operation::SetOption => "setOption",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP 200 但 payload status 不是 `"ok"` 的已知业务失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftFailureKind {
    /// 当前没有可用的上传服务器，通常是服务端宕机或负载过高。
    NoServer,
}

impl SoftFailureKind {
    /// 按操作查表；未登记的组合返回 `None`，交由通用失败处理。
    pub fn for_status(operation: Operation, payload_status: &str) -> Option<Self> {
        match (operation, payload_status) {
            (Operation::GetServer, "noServer") => Some(SoftFailureKind::NoServer),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SoftFailureKind::NoServer => {
                "no server was available, the gofile api is probably down or under heavy load"
            }
        }
    }
}

impl fmt::Display for SoftFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Error, Debug)]
pub enum GofileError {
    /// HTTP 401/403：token 无效或账户等级不足，从不重试。
    #[error("invalid token while calling {operation} (HTTP {status}); this call may require a premium account")]
    Unauthorized { operation: Operation, status: u16 },

    /// 创建账户时被限流（HTTP 429），从不重试。
    #[error("rate limited (too many requests) while calling {operation}")]
    RateLimited { operation: Operation },

    /// 已知的业务软失败，例如暂无可用服务器。
    #[error("{operation} failed: {kind}")]
    SoftFailure {
        operation: Operation,
        kind: SoftFailureKind,
    },

    /// 其余所有状态码与 payload status 组合。
    #[error(
        "error while {context} ({operation}): response code {status}, status {}",
        .payload_status.as_deref().unwrap_or("<missing>")
    )]
    OperationFailed {
        operation: Operation,
        context: String,
        status: u16,
        payload_status: Option<String>,
    },

    /// 连续的网络层失败耗尽了重试预算；计数器此时已归零。
    #[error("max retries hit while {context}")]
    RetryExhausted {
        operation: Operation,
        context: String,
        #[source]
        source: TransportError,
    },

    /// 收到了响应，但内容无法解析或缺少必要字段。
    #[error("invalid response from {operation} (HTTP {status}): {reason}")]
    InvalidResponse {
        operation: Operation,
        status: u16,
        reason: String,
    },

    /// 待上传的本地文件不可读。该错误从不重试。
    #[error("cannot read upload source {}: {source}", .path.display())]
    UploadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl GofileError {
    pub(crate) fn invalid_response(
        operation: Operation,
        status: u16,
        reason: impl Into<String>,
    ) -> Self {
        GofileError::InvalidResponse {
            operation,
            status,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        GofileError::Config(message.into())
    }

    /// 触发该错误的远程操作；本地错误返回 `None`。
    pub fn operation(&self) -> Option<Operation> {
        match self {
            GofileError::Unauthorized { operation, .. }
            | GofileError::RateLimited { operation }
            | GofileError::SoftFailure { operation, .. }
            | GofileError::OperationFailed { operation, .. }
            | GofileError::RetryExhausted { operation, .. }
            | GofileError::InvalidResponse { operation, .. } => Some(*operation),
            GofileError::UploadSource { .. } | GofileError::Config(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GofileError::Unauthorized { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GofileError::RateLimited { .. })
    }

    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, GofileError::RetryExhausted { .. })
    }
}

pub type Result<T> = std::result::Result<T, GofileError>;
