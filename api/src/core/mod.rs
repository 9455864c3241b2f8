pub mod app_state;
pub mod channels;
pub mod http;
