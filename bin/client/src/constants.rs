/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "configs/client.yaml";

/// Overall timeout applied to every request, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// MIME type sent for the uploaded part
pub const UPLOAD_MIME_TYPE: &str = "application/octet-stream";
