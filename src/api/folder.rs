use super::{
    client::{ApiRequest, Transport},
    models::{FolderOptions, Output},
    response,
};
use crate::{
    error::{Operation, Result},
    session::Session,
};
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const FOLDER_NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz1234567890";
const FOLDER_NAME_LEN: usize = 5;

#[derive(Debug, Deserialize)]
struct CreateFolderData {
    id: String,
}

impl<T: Transport> Session<T> {
    /// 创建文件夹并依次应用 `options`，返回新文件夹 id。
    /// - `parent_id` 为空时放在会话缓存的根目录下。
    /// - `name` 为空时生成 5 位小写字母数字的随机名。
    ///
    /// 选项逐个调用 setOption，任一失败直接返回错误，已创建的文件夹不会回滚。
    pub fn create_folder(
        &mut self,
        name: Option<&str>,
        parent_id: Option<&str>,
        options: &FolderOptions,
        raw: Option<bool>,
    ) -> Result<Output<String>> {
        let (folder_id, payload) = self.create_folder_with_options(name, parent_id, options)?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        Ok(Output::Shaped(folder_id))
    }

    /// 返回新文件夹 id 与创建接口的原始 payload。
    pub(crate) fn create_folder_with_options(
        &mut self,
        name: Option<&str>,
        parent_id: Option<&str>,
        options: &FolderOptions,
    ) -> Result<(String, Value)> {
        let parent_id = match parent_id {
            Some(id) => id.to_string(),
            None => self.root_folder_id()?,
        };
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| random_folder_name(&mut rand::thread_rng()));

        let body = json!({
            "token": self.token(),
            "folderName": name,
            "parentFolderId": parent_id,
        });
        let request = ApiRequest::put_json(self.endpoint("createFolder"), body);
        let context = format!("creating folder {name} (parent folder id: {parent_id})");

        let payload = self.call(Operation::CreateFolder, &context, &request)?;
        let data: CreateFolderData = response::data(Operation::CreateFolder, &payload)?;
        debug!(folder_id = %data.id, parent_id = %parent_id, "folder created");

        self.apply_folder_options(&data.id, options)?;
        Ok((data.id, payload))
    }

    fn apply_folder_options(&mut self, folder_id: &str, options: &FolderOptions) -> Result<()> {
        for option in options.to_content_options() {
            self.set_option(folder_id, &option, Some(false))?;
        }
        Ok(())
    }
}

pub(crate) fn random_folder_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..FOLDER_NAME_LEN)
        .filter_map(|_| FOLDER_NAME_ALPHABET.choose(&mut *rng))
        .map(|&byte| char::from(byte))
        .collect()
}
