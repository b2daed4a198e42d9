//! HTTPS file transfer client

pub mod constants;
pub mod download;
pub mod logger;
pub mod transport;
pub mod upload;

pub use download::FileDownloader;
pub use upload::FileUploader;
