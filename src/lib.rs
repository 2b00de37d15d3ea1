//! Course recommendation service
//!
//! Recommends a next course to a student either from the marks of similar
//! students (collaborative filtering) or from a raw mark matched against
//! course averages (content-based filtering). All derived data is computed
//! once at startup and served read-only.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
