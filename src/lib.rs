// src/lib.rs

// --- Declaração dos Módulos ---
pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod models;
pub mod services;
pub mod state;
pub mod templates;
pub mod web;
