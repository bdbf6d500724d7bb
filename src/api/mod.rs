mod account;
mod client;
mod content;
mod copy;
mod folder;
mod models;
mod option;
pub(crate) mod response;
mod server;
mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    build_blocking_client, ApiRequest, ApiResponse, HttpTransport, MultipartBody, RequestBody,
    Transport, TransportError,
};
pub use models::{
    AccountDetails, ContentOption, FolderContent, FolderOptions, Output, Tier, UploadSource,
};
