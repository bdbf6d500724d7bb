pub mod endpoints;
pub mod retries;
pub mod session_config;

pub use endpoints::{upload_url, DEFAULT_API_BASE, DEFAULT_UPLOAD_URL_TEMPLATE};
pub use retries::{default_max_retries, DEFAULT_MAX_RETRIES};
pub use session_config::SessionConfig;
