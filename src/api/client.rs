use super::models::UploadSource;
use reqwest::{
    blocking::{multipart, Client},
    redirect::Policy,
    Method,
};
use std::{fs::File, io, path::PathBuf, time::Duration};
use thiserror::Error;

/// `HttpTransport` 内部的两个客户端（API 控制请求、上传请求）都由这里创建，
/// 两者只在超时上不同；重定向最多跟随 10 次。
pub fn build_blocking_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .build()
}

/// 发送失败。只有 `Http` 与 `Unreachable`（没有拿到任何 HTTP 响应：DNS、连接被拒、超时等）
/// 是瞬时错误，会话会在预算内重试；`Io` 与 `Body` 直接上报。
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to open {} for upload: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 已收到状态行，但读取响应体失败。
    #[error("failed to read response body (HTTP {status}): {reason}")]
    Body { status: u16, reason: String },

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Query(Vec<(String, String)>),
    Json(serde_json::Value),
    Multipart(MultipartBody),
}

/// 上传请求体：若干文本字段加一个名为 `file` 的文件分段。
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub file: UploadSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn get_with_query(url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: RequestBody::Query(query),
        }
    }

    pub fn put_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            body: RequestBody::Json(body),
        }
    }

    pub fn post_multipart(url: impl Into<String>, body: MultipartBody) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: RequestBody::Multipart(body),
        }
    }
}

/// 原始响应；JSON 解析与状态分类由会话完成。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// 发送一次请求。返回 `Err` 仅表示没有拿到响应；
/// 任何状态码（包括 4xx/5xx）都应作为 `Ok` 交回。
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// 基于 `reqwest::blocking` 的默认实现。
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    upload_client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, upload_timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_blocking_client(timeout)?,
            upload_client: build_blocking_client(upload_timeout)?,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let client = match request.body {
            RequestBody::Multipart(_) => &self.upload_client,
            _ => &self.client,
        };
        let mut builder = client.request(request.method.clone(), &request.url);
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Query(pairs) => builder.query(pairs),
            RequestBody::Json(value) => builder.json(value),
            // 每次发送都重新打开文件，重试时从头开始流式上传。
            RequestBody::Multipart(body) => builder.multipart(build_form(body)?),
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Body {
                status,
                reason: e.to_string(),
            })?
            .to_vec();
        Ok(ApiResponse { status, body })
    }
}

fn build_form(body: &MultipartBody) -> Result<multipart::Form, TransportError> {
    let mut form = multipart::Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }

    let part = match &body.file {
        UploadSource::Path(path) => {
            let io_err = |source| TransportError::Io {
                path: path.clone(),
                source,
            };
            let file = File::open(path).map_err(io_err)?;
            let length = file.metadata().map_err(io_err)?.len();
            multipart::Part::reader_with_length(file, length)
        }
        UploadSource::Bytes { data, .. } => multipart::Part::bytes(data.clone()),
    };
    Ok(form.part("file", part.file_name(body.file.file_name())))
}
