use super::{
    client::{ApiRequest, Transport},
    models::Output,
    response,
};
use crate::{
    error::{Operation, Result},
    session::Session,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ServerData {
    server: String,
}

impl<T: Transport> Session<T> {
    /// 获取当前可用的上传服务器名（例如 `store4`）。
    /// 服务端返回 `noServer` 时得到 [`SoftFailureKind::NoServer`](crate::SoftFailureKind::NoServer)。
    pub fn get_server(&mut self, raw: Option<bool>) -> Result<Output<String>> {
        let payload = self.server_payload()?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        Ok(Output::Shaped(shape_server(&payload)?))
    }

    pub(crate) fn server_name(&mut self) -> Result<String> {
        let payload = self.server_payload()?;
        shape_server(&payload)
    }

    fn server_payload(&mut self) -> Result<Value> {
        let request = ApiRequest::get(self.endpoint("getServer"));
        self.call(Operation::GetServer, "getting available server", &request)
    }
}

fn shape_server(payload: &Value) -> Result<String> {
    let data: ServerData = response::data(Operation::GetServer, payload)?;
    Ok(data.server)
}
