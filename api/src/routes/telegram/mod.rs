pub mod telegram_request;
pub mod telegram_route;
