use crate::error::{GofileError, Result};
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.gofile.io";
/// 上传地址模板，`{server}` 会被替换成 getServer 返回的服务器名。
pub const DEFAULT_UPLOAD_URL_TEMPLATE: &str = "https://{server}.gofile.io/uploadFile";
const SERVER_PLACEHOLDER: &str = "{server}";

/// 校验控制类接口的基础地址，并去掉末尾的 `/`。
pub fn normalize_api_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(GofileError::config("api base url cannot be empty"));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|e| GofileError::config(format!("invalid api base url {trimmed:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GofileError::config(format!(
            "api base url must use http or https, got {}",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_upload_template(template: &str) -> Result<()> {
    if !template.contains(SERVER_PLACEHOLDER) {
        return Err(GofileError::config(format!(
            "upload url template must contain {SERVER_PLACEHOLDER}: {template:?}"
        )));
    }
    Ok(())
}

pub fn upload_url(template: &str, server: &str) -> String {
    template.replace(SERVER_PLACEHOLDER, server)
}
