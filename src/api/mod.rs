//! API Module
//!
//! HTTP handlers and routing for the cache REST API.
//!
//! # Endpoints
//! - `GET /` - Usage page
//! - `POST /api/cache/set?key=K` - Store the request body under a key
//! - `GET /api/cache/get?key=K` - Retrieve a value by key
//! - `DELETE /api/cache/delete?key=K` - Delete a key
//! - `GET /api/cache/stats` - Server and cache information
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
