use serde::Deserialize;
use serde_json::{Map, Value};
use std::{fmt, path::PathBuf};

/// 单次调用的返回：整理后的结果，或未经处理的原始 JSON。
#[derive(Clone, Debug, PartialEq)]
pub enum Output<T> {
    Shaped(T),
    Raw(Value),
}

impl<T> Output<T> {
    pub fn is_raw(&self) -> bool {
        matches!(self, Output::Raw(_))
    }

    pub fn shaped(self) -> Option<T> {
        match self {
            Output::Shaped(value) => Some(value),
            Output::Raw(_) => None,
        }
    }

    pub fn raw(self) -> Option<Value> {
        match self {
            Output::Raw(value) => Some(value),
            Output::Shaped(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Output<U> {
        match self {
            Output::Shaped(value) => Output::Shaped(f(value)),
            Output::Raw(value) => Output::Raw(value),
        }
    }
}

/// 账户等级。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Guest,
    Standard,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Guest => "guest",
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `getAccountDetails` 的 data 部分；除根目录与等级外的字段原样保留。
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub root_folder: String,
    pub tier: Tier,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `getContent` 的整理结果。
#[derive(Clone, Debug, PartialEq)]
pub enum FolderContent {
    /// 文件夹内恰好一个子项时，直接返回该子项的字节内容。
    File(Vec<u8>),
    /// 零个或多个子项：子项 id 列表与 id 到条目的映射，均未经修改。
    Children {
        childs: Vec<String>,
        contents: Map<String, Value>,
    },
}

/// 创建文件夹时顺带设置的选项，每一项都是一次独立的 setOption 调用。
#[derive(Clone, Debug, PartialEq)]
pub struct FolderOptions {
    pub public: bool,
    pub password: Option<String>,
    pub expiration: Option<i64>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Default for FolderOptions {
    fn default() -> Self {
        Self {
            public: true,
            password: None,
            expiration: None,
            description: None,
            tags: None,
        }
    }
}

impl FolderOptions {
    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn expiration(mut self, unix_timestamp: i64) -> Self {
        self.expiration = Some(unix_timestamp);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// 按固定顺序展开为待设置的选项：public、password、expire、tags、description。
    pub(crate) fn to_content_options(&self) -> Vec<ContentOption> {
        let mut options = vec![ContentOption::Public(self.public)];
        if let Some(password) = &self.password {
            options.push(ContentOption::Password(password.clone()));
        }
        if let Some(expiration) = self.expiration {
            options.push(ContentOption::Expire(expiration));
        }
        if let Some(tags) = &self.tags {
            options.push(ContentOption::Tags(tags.clone()));
        }
        if let Some(description) = &self.description {
            options.push(ContentOption::Description(description.clone()));
        }
        options
    }
}

/// setOption 支持的选项；值类型由枚举本身约束。
/// 除 `DirectLink` 只能作用于文件外，其余选项都要求目标是文件夹。
#[derive(Clone, Debug, PartialEq)]
pub enum ContentOption {
    Public(bool),
    Password(String),
    Description(String),
    /// 过期时间，unix 时间戳（秒）。
    Expire(i64),
    Tags(Vec<String>),
    DirectLink(bool),
}

impl ContentOption {
    pub fn name(&self) -> &'static str {
        match self {
            ContentOption::Public(_) => "public",
            ContentOption::Password(_) => "password",
            ContentOption::Description(_) => "description",
            ContentOption::Expire(_) => "expire",
            ContentOption::Tags(_) => "tags",
            ContentOption::DirectLink(_) => "directLink",
        }
    }

    /// 线上格式：布尔值写成 `"true"`/`"false"`，标签按输入顺序以逗号拼接。
    pub fn wire_value(&self) -> Value {
        match self {
            ContentOption::Public(flag) | ContentOption::DirectLink(flag) => {
                Value::String(flag.to_string())
            }
            ContentOption::Password(text) | ContentOption::Description(text) => {
                Value::String(text.clone())
            }
            ContentOption::Expire(timestamp) => Value::from(*timestamp),
            ContentOption::Tags(tags) => Value::String(tags.join(",")),
        }
    }
}

/// 待上传的文件来源。
#[derive(Clone, Debug, PartialEq)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes { file_name: String, data: Vec<u8> },
}

impl UploadSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        UploadSource::Path(path.into())
    }

    pub fn bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        UploadSource::Bytes {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            UploadSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.bin".to_string()),
            UploadSource::Bytes { file_name, .. } => file_name.clone(),
        }
    }
}
