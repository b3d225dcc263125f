//! # TodoStack API Server Library
//!
//! This library provides the core functionality for the TodoStack API
//! server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Admin audit logging
//! - `routes`: API route handlers
//! - `weather`: External weather feed client

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod weather;
