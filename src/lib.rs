//! 阻塞式的 Gofile API 客户端。
//!
//! 入口是 [`Session`]：构造时创建（或复用）账户并缓存根目录与等级，
//! 之后的每个调用都遵循同一套发送、分类、重试流程。
//!
//! ```no_run
//! use gofile_session::{FolderOptions, Session, UploadSource};
//!
//! let mut session = Session::new(5, false, None)?;
//! let page = session.upload_file(
//!     UploadSource::path("report.pdf"),
//!     None,
//!     Some("reports"),
//!     &FolderOptions::default().tags(["q3", "finance"]),
//!     None,
//! )?;
//! println!("{:?}", page.shaped());
//! # Ok::<(), gofile_session::GofileError>(())
//! ```

pub mod api;
pub mod error;
pub mod session;
pub mod settings;

pub use api::{
    AccountDetails, ContentOption, FolderContent, FolderOptions, HttpTransport, Output, Tier,
    Transport, TransportError, UploadSource,
};
pub use error::{GofileError, Operation, Result, SoftFailureKind};
pub use session::Session;
pub use settings::SessionConfig;
