pub const INDEX_TEXT: &str = "Social Media Performance Analysis API";

/// Informational root endpoint
pub async fn index_handler() -> &'static str {
    INDEX_TEXT
}
