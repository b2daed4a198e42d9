/// Upload endpoint path
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Download endpoint path
pub const DOWNLOAD_ENDPOINT: &str = "/download";

/// Health check endpoint path
pub const HEALTH_ENDPOINT: &str = "/health";

/// `status` reported by a healthy server
pub const HEALTH_STATUS_OK: &str = "ok";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Query parameter naming the file to download
pub const DOWNLOAD_QUERY_PARAM: &str = "file";
