pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use extractor::SafeIDI64;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;

/// 将落盘文件路径转换为对外可访问的媒体 URL
pub fn media_url(file_path: String) -> String {
    let prefix = crate::config::AppConfig::get()
        .media
        .url_prefix
        .trim_end_matches('/')
        .to_string();
    let path = file_path.trim_start_matches('/');
    format!("{prefix}/{path}")
}
