pub mod ack;
pub mod auth;
pub mod food;
pub mod lenient;
pub mod order;
