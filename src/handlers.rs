pub mod auth;
pub mod cart;
pub mod health;
pub mod posts;
pub mod products;
pub mod social;
pub mod users;
