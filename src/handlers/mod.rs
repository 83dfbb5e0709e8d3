pub mod car;
pub mod health;
