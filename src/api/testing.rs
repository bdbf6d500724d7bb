//! 测试用的脚本化 transport：按顺序回放预置响应并记录每个请求。

use super::client::{ApiRequest, ApiResponse, RequestBody, Transport, TransportError};
use crate::{session::Session, settings::SessionConfig};
use serde_json::{json, Value};
use std::{cell::RefCell, collections::VecDeque, io, path::PathBuf, rc::Rc};

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    requests: Vec<ApiRequest>,
}

#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    inner: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, status: u16, payload: Value) {
        self.push_bytes(status, payload.to_string().into_bytes());
    }

    pub(crate) fn push_bytes(&self, status: u16, body: Vec<u8>) {
        self.inner
            .borrow_mut()
            .replies
            .push_back(Ok(ApiResponse { status, body }));
    }

    pub(crate) fn push_unreachable(&self, times: u32) {
        let mut script = self.inner.borrow_mut();
        for _ in 0..times {
            script.replies.push_back(Err(TransportError::Unreachable(
                "connection refused".to_string(),
            )));
        }
    }

    /// 模拟发送时打不开待上传文件。
    pub(crate) fn push_io_error(&self, path: impl Into<PathBuf>) {
        self.inner.borrow_mut().replies.push_back(Err(TransportError::Io {
            path: path.into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }));
    }

    /// 模拟收到状态行后响应体读取中断。
    pub(crate) fn push_body_error(&self, status: u16) {
        self.inner.borrow_mut().replies.push_back(Err(TransportError::Body {
            status,
            reason: "connection reset".to_string(),
        }));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().requests.clone()
    }

    pub(crate) fn clear_requests(&self) {
        self.inner.borrow_mut().requests.clear();
    }

    pub(crate) fn remaining(&self) -> usize {
        self.inner.borrow().replies.len()
    }

    pub(crate) fn query_value(&self, index: usize, key: &str) -> Option<String> {
        match &self.inner.borrow().requests.get(index)?.body {
            RequestBody::Query(pairs) => pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    pub(crate) fn last_query_value(&self, key: &str) -> Option<String> {
        let last = self.inner.borrow().requests.len().checked_sub(1)?;
        self.query_value(last, key)
    }

    pub(crate) fn json_body(&self, index: usize) -> Option<Value> {
        match &self.inner.borrow().requests.get(index)?.body {
            RequestBody::Json(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut script = self.inner.borrow_mut();
        script.requests.push(request.clone());
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {} {}", request.method, request.url))
    }
}

/// 成功响应的标准外壳。
pub(crate) fn ok(data: Value) -> Value {
    json!({"status": "ok", "data": data})
}

pub(crate) fn ok_empty() -> Value {
    json!({"status": "ok", "data": {}})
}

/// 已登录的 guest 会话（根目录 `root-folder`），请求记录已清空。
pub(crate) fn guest_session() -> (Session<ScriptedTransport>, ScriptedTransport) {
    guest_session_with(SessionConfig::default())
}

pub(crate) fn guest_session_with(
    config: SessionConfig,
) -> (Session<ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    transport.push_json(200, ok(json!({"rootFolder": "root-folder", "tier": "guest"})));
    let session = Session::with_transport(config.with_token("guest-token"), transport.clone())
        .expect("scripted session should bootstrap");
    transport.clear_requests();
    (session, transport)
}
