//! API route handlers

pub mod drinks;
pub mod health;
