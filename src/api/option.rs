use super::{
    client::{ApiRequest, Transport},
    models::{ContentOption, Output},
};
use crate::{
    error::{Operation, Result},
    session::Session,
};
use serde_json::json;
use tracing::debug;

impl<T: Transport> Session<T> {
    /// 为一个 content id 设置单个选项。
    ///
    /// 目标类型由服务端校验：`DirectLink` 只接受文件，其余选项只接受文件夹。
    pub fn set_option(
        &mut self,
        content_id: &str,
        option: &ContentOption,
        raw: Option<bool>,
    ) -> Result<Output<()>> {
        let body = json!({
            "token": self.token(),
            "contentId": content_id,
            "option": option.name(),
            "value": option.wire_value(),
        });
        let request = ApiRequest::put_json(self.endpoint("setOption"), body);
        let context = format!("setting option {} for content id {content_id}", option.name());
        debug!(content_id, option = option.name(), "applying content option");

        let payload = self.call(Operation::SetOption, &context, &request)?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        Ok(Output::Shaped(()))
    }
}
