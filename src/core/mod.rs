pub mod config;
pub mod dispatch;
pub mod health;
pub mod message;
pub mod mock;
pub mod session;
