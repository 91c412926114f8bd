// src/services/mod.rs
pub mod mensaje_service;
pub mod registro_service;
pub mod usuario_service;
pub mod validation;
