pub mod auth;
pub mod foods;
pub mod health;
pub mod orders;
