//! Confectionery API library.
//!
//! JSON CRUD service for customers, cakes and the orders linking them.
//! The binary in `main.rs` wires configuration, tracing and a store engine
//! around the router built here; tests drive the same router over
//! [`db::MemoryStore`].
//!
//! # Layers
//!
//! - `routes` - axum handlers: decode, validate, call a service, respond
//! - `schemas` - request/response shapes and field rules
//! - `services` - uniqueness and reference checks per resource
//! - `db` - store capability traits with `PostgreSQL` and in-memory engines
//! - `error` - `AppError` and the JSON error envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod services;
pub mod state;
