pub mod http;
pub mod slack_api;
pub mod slack_events;
