// src/models/mod.rs
pub mod mensaje;
pub mod registro;
pub mod usuario;
