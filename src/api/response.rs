use super::client::ApiResponse;
use crate::error::{GofileError, Operation, Result, SoftFailureKind};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 解码后的响应：状态码加上（可能缺失的）JSON payload。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reply {
    pub status: u16,
    pub payload: Option<Value>,
}

impl Reply {
    /// 非 JSON 的响应体（例如网关错误页）记为 `None`，由分类逻辑决定如何处理。
    pub(crate) fn decode(response: &ApiResponse) -> Self {
        Self {
            status: response.status,
            payload: serde_json::from_slice(&response.body).ok(),
        }
    }

    pub(crate) fn payload_status(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|payload| payload.get("status"))
            .and_then(Value::as_str)
    }
}

/// 按 (HTTP 状态码, payload status) 把响应映射成成功 payload 或具体错误。
pub(crate) fn classify(operation: Operation, context: &str, reply: Reply) -> Result<Value> {
    let payload_status = reply.payload_status().map(str::to_string);
    match reply.status {
        200 => match payload_status.as_deref() {
            Some("ok") => reply.payload.ok_or_else(|| {
                GofileError::invalid_response(operation, 200, "missing JSON payload")
            }),
            Some(status) => match SoftFailureKind::for_status(operation, status) {
                Some(kind) => Err(GofileError::SoftFailure { operation, kind }),
                None => Err(failed(operation, context, &reply)),
            },
            None if reply.payload.is_none() => Err(GofileError::invalid_response(
                operation,
                200,
                "response body is not valid JSON",
            )),
            None => Err(failed(operation, context, &reply)),
        },
        401 | 403 => Err(GofileError::Unauthorized {
            operation,
            status: reply.status,
        }),
        429 if operation == Operation::CreateAccount => {
            Err(GofileError::RateLimited { operation })
        }
        _ => Err(failed(operation, context, &reply)),
    }
}

fn failed(operation: Operation, context: &str, reply: &Reply) -> GofileError {
    GofileError::OperationFailed {
        operation,
        context: context.to_string(),
        status: reply.status,
        payload_status: reply.payload_status().map(str::to_string),
    }
}

/// 把 payload 中的 `data` 字段反序列化为具体结构。
pub(crate) fn data<D: DeserializeOwned>(operation: Operation, payload: &Value) -> Result<D> {
    let data = payload
        .get("data")
        .cloned()
        .ok_or_else(|| GofileError::invalid_response(operation, 200, "missing data field"))?;
    serde_json::from_value(data).map_err(|e| {
        GofileError::invalid_response(operation, 200, format!("failed to parse data: {e}"))
    })
}
