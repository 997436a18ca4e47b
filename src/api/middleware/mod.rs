// src/api/middleware/mod.rs
pub mod auth;
