pub mod request_id;
pub mod request_log;
