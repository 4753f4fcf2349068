pub mod dispatch;
pub mod error;
pub mod status_codes;
