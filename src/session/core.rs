use super::state::{RetryVerdict, SessionState};
use crate::{
    api::{response, ApiRequest, ApiResponse, HttpTransport, Tier, Transport, TransportError},
    error::{GofileError, Operation, Result},
    settings::SessionConfig,
};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// 与 Gofile API 通信的有状态句柄。
///
/// 持有 token、缓存的根目录与账户等级，以及重试计数器。所有远程调用都走同一条路径：
/// 构造请求、发送、按状态码与 payload status 分类、瞬时失败时在预算内重发。
///
/// 会话不是线程安全的共享对象：所有会修改状态的调用都需要 `&mut self`，
/// 需要并发时请每个线程持有一个会话，或在外部加锁。
pub struct Session<T: Transport = HttpTransport> {
    pub(crate) transport: T,
    pub(crate) config: SessionConfig,
    pub(crate) state: SessionState,
}

impl Session<HttpTransport> {
    /// 未提供 token 时先创建 guest 账户，然后拉取账户信息。
    pub fn new(max_retries: u32, raw_output: bool, token: Option<String>) -> Result<Self> {
        let mut config = SessionConfig::default()
            .with_max_retries(max_retries)
            .with_raw_output(raw_output);
        config.token = token;
        Self::with_config(config)
    }

    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout, config.upload_timeout)
            .map_err(|e| GofileError::config(format!("failed to build HTTP client: {e}")))?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(config: SessionConfig, transport: T) -> Result<Self> {
        let config = config.validate()?;
        let token = config.token.clone();
        let mut session = Self {
            transport,
            config,
            state: SessionState::new(token.clone().unwrap_or_default()),
        };
        if token.is_none() {
            let token = session.create_account_token()?;
            session.state.replace_token(token);
        }
        session.refresh_account_info()?;
        Ok(session)
    }

    pub fn token(&self) -> &str {
        self.state.token()
    }

    /// 缓存的根目录 id；更换 token 后且尚未刷新成功时为 `None`。
    pub fn root_folder(&self) -> Option<&str> {
        self.state
            .account()
            .map(|account| account.root_folder.as_str())
    }

    pub fn tier(&self) -> Option<Tier> {
        self.state.account().map(|account| account.tier)
    }

    pub fn is_guest(&self) -> bool {
        self.tier() == Some(Tier::Guest)
    }

    pub fn is_standard(&self) -> bool {
        self.tier() == Some(Tier::Standard)
    }

    pub fn is_premium(&self) -> bool {
        self.tier() == Some(Tier::Premium)
    }

    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    pub fn raw_output(&self) -> bool {
        self.config.raw_output
    }

    pub fn retry_count(&self) -> u32 {
        self.state.retry_count()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(crate) fn wants_raw(&self, raw: Option<bool>) -> bool {
        raw.unwrap_or(self.config.raw_output)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_base)
    }

    /// 发送请求直到拿到任意 HTTP 响应，或重试预算耗尽。
    /// 拿到响应即视为 API 可达，计数器归零；本地文件打不开、响应体读取失败都不重试。
    pub(crate) fn dispatch(
        &mut self,
        operation: Operation,
        context: &str,
        request: &ApiRequest,
    ) -> Result<ApiResponse> {
        loop {
            debug!(
                operation = %operation,
                method = %request.method,
                url = %request.url,
                "sending request"
            );
            match self.transport.send(request) {
                Ok(response) => {
                    self.state.reset_retries();
                    debug!(operation = %operation, status = response.status, "received response");
                    return Ok(response);
                }
                Err(TransportError::Io { path, source }) => {
                    warn!(
                        operation = %operation,
                        path = %path.display(),
                        "upload source unreadable while {context}"
                    );
                    return Err(GofileError::UploadSource { path, source });
                }
                Err(TransportError::Body { status, reason }) => {
                    self.state.reset_retries();
                    warn!(
                        operation = %operation,
                        status,
                        "unreadable response body while {context}"
                    );
                    return Err(GofileError::invalid_response(
                        operation,
                        status,
                        format!("failed to read response body: {reason}"),
                    ));
                }
                Err(err) => match self.state.register_failure(self.config.max_retries) {
                    RetryVerdict::Retry { attempt } => {
                        warn!(
                            operation = %operation,
                            attempt,
                            max_retries = self.config.max_retries,
                            error = %err,
                            "transient failure while {context}; retrying"
                        );
                    }
                    RetryVerdict::Exhausted => {
                        warn!(operation = %operation, error = %err, "max retries hit while {context}");
                        return Err(GofileError::RetryExhausted {
                            operation,
                            context: context.to_string(),
                            source: err,
                        });
                    }
                },
            }
        }
    }

    /// `dispatch` 加上 JSON 分类，成功时返回完整 payload。
    pub(crate) fn call(
        &mut self,
        operation: Operation,
        context: &str,
        request: &ApiRequest,
    ) -> Result<Value> {
        let response = self.dispatch(operation, context, request)?;
        response::classify(operation, context, response::Reply::decode(&response))
    }
}

impl<T: Transport> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_base", &self.config.api_base)
            .field("token", &"<redacted>")
            .field("root_folder", &self.root_folder())
            .field("tier", &self.tier())
            .field("max_retries", &self.config.max_retries)
            .field("retry_count", &self.state.retry_count())
            .finish()
    }
}
