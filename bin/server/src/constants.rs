/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "configs/server.yaml";

/// Body returned for a method an endpoint does not accept
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Body returned when the `file` part exceeds `max_file_size`
pub const FILE_TOO_LARGE: &str = "File too large";

/// An oversized upload is read until it passes this multiple of
/// `max_file_size`; beyond that the connection is closed unread
pub const UPLOAD_DRAIN_FACTOR: u64 = 4;
