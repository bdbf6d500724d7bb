use super::{
    client::{ApiRequest, Transport},
    models::Output,
};
use crate::{
    error::{Operation, Result},
    session::Session,
};
use serde_json::json;

impl<T: Transport> Session<T> {
    /// 把若干内容复制到目标文件夹。源 id 按输入顺序以逗号拼接。
    pub fn copy_content<I, S>(
        &mut self,
        sources: I,
        destination: &str,
        raw: Option<bool>,
    ) -> Result<Output<()>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources = sources
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let body = json!({
            "token": self.token(),
            "contentsId": sources,
            "folderIdDest": destination,
        });
        let request = ApiRequest::put_json(self.endpoint("copyContent"), body);
        let context = format!("copying content from {sources} to {destination}");

        let payload = self.call(Operation::CopyContent, &context, &request)?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        Ok(Output::Shaped(()))
    }
}
