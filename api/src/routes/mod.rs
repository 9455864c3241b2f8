pub mod chat;
pub mod health_route;
pub mod messenger;
pub mod stats;
pub mod telegram;
