//! REST API server — content routes, DTOs, error mapping, and OpenAPI documentation.

pub mod config;
pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
