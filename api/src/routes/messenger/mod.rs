pub mod messenger_request;
pub mod messenger_route;
