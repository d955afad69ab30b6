pub mod campaign;
pub mod health;
