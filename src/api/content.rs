use super::{
    client::{ApiRequest, Transport},
    models::{FolderContent, Output},
    response,
};
use crate::{
    error::{GofileError, Operation, Result},
    session::Session,
};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct ContentData {
    #[serde(default)]
    childs: Vec<String>,
    #[serde(default)]
    contents: Map<String, Value>,
}

impl<T: Transport> Session<T> {
    /// 读取文件夹内容。
    /// - 恰好一个子项时，顺着该子项的 `directLink` 下载并返回其字节内容。
    /// - 否则原样返回子项列表与映射。
    pub fn get_content(
        &mut self,
        content_id: &str,
        raw: Option<bool>,
    ) -> Result<Output<FolderContent>> {
        let request = ApiRequest::get_with_query(
            self.endpoint("getContent"),
            vec![
                ("token".to_string(), self.token().to_string()),
                ("contentId".to_string(), content_id.to_string()),
            ],
        );
        let context = format!("getting contents of {content_id}");
        let payload = self.call(Operation::GetContent, &context, &request)?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }

        let data: ContentData = response::data(Operation::GetContent, &payload)?;
        if data.childs.len() != 1 {
            return Ok(Output::Shaped(FolderContent::Children {
                childs: data.childs,
                contents: data.contents,
            }));
        }

        let child_id = &data.childs[0];
        let link = data
            .contents
            .get(child_id)
            .and_then(|entry| entry.get("directLink"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GofileError::invalid_response(
                    Operation::GetContent,
                    200,
                    format!("child {child_id} of {content_id} has no directLink"),
                )
            })?;
        let bytes = self.download_link(link, &format!("downloading {child_id} from {content_id}"))?;
        Ok(Output::Shaped(FolderContent::File(bytes)))
    }

    fn download_link(&mut self, link: &str, context: &str) -> Result<Vec<u8>> {
        let request = ApiRequest::get(link);
        let response = self.dispatch(Operation::DownloadContent, context, &request)?;
        match response.status {
            200..=299 => Ok(response.body),
            401 | 403 => Err(GofileError::Unauthorized {
                operation: Operation::DownloadContent,
                status: response.status,
            }),
            status => Err(GofileError::OperationFailed {
                operation: Operation::DownloadContent,
                context: context.to_string(),
                status,
                payload_status: None,
            }),
        }
    }
}
