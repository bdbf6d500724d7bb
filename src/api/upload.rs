use super::{
    client::{ApiRequest, MultipartBody, Transport},
    models::{FolderOptions, Output, UploadSource},
    response,
};
use crate::{
    error::{GofileError, Operation, Result},
    session::Session,
    settings::upload_url,
};
use serde::Deserialize;
use std::{fs::File, io};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadData {
    download_page: String,
}

impl<T: Transport> Session<T> {
    /// 上传文件，返回公开的下载页地址。
    /// - `folder_id` 为空时先在根目录下新建文件夹（名称取 `folder_name` 或随机生成，
    ///   并应用 `options`），文件上传到这个新文件夹。
    /// - 指定了 `folder_id` 时 `folder_name` 与 `options` 不生效。
    /// - 上传服务器每次调用时通过 getServer 动态选择。
    pub fn upload_file(
        &mut self,
        source: UploadSource,
        folder_id: Option<&str>,
        folder_name: Option<&str>,
        options: &FolderOptions,
        raw: Option<bool>,
    ) -> Result<Output<String>> {
        check_source(&source)?;

        let folder_id = match folder_id {
            Some(id) => id.to_string(),
            None => self.create_folder_with_options(folder_name, None, options)?.0,
        };
        let server = self.server_name()?;
        let url = upload_url(&self.config.upload_url_template, &server);
        let file_name = source.file_name();

        let body = MultipartBody {
            fields: vec![
                ("token".to_string(), self.token().to_string()),
                ("folderId".to_string(), folder_id.clone()),
            ],
            file: source,
        };
        let request = ApiRequest::post_multipart(url, body);
        let context = format!("uploading file ({file_name}) to {folder_id}");

        let payload = self.call(Operation::UploadFile, &context, &request)?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        let data: UploadData = response::data(Operation::UploadFile, &payload)?;
        info!(folder_id = %folder_id, server = %server, "file uploaded");
        Ok(Output::Shaped(data.download_page))
    }
}

/// 在发出任何请求之前确认本地文件能以只读方式打开。
fn check_source(source: &UploadSource) -> Result<()> {
    let UploadSource::Path(path) = source else {
        return Ok(());
    };
    let unreadable = |source| GofileError::UploadSource {
        path: path.clone(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;
    let metadata = file.metadata().map_err(unreadable)?;
    if !metadata.is_file() {
        return Err(GofileError::UploadSource {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}
