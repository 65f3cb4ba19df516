//! Server-side API backend.
//!
//! This module contains the dashboard's HTTP API: session-gated routes that forward
//! requests to the evict bot API and to third-party music, email and captcha services,
//! the Discord login flow that issues sessions, and the SQLite-backed verification stores.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, session guard, error shaping
//! - **Service Layer** (`service/`) - Upstream forwarding and verification orchestration
//! - **Data Layer** (`data/`) - SeaORM repositories for the verification stores
//! - **Model Layer** (`model/`) - Session user, upstream payloads and store records
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session access and the session guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, config)
//! - **Startup** (`startup`) - Initialization of database, sessions, clients and server
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Purge job for expired verification store rows
//!
//! # Request Flow
//!
//! 1. **Router** receives the request and routes it to a controller
//! 2. **Controller** runs the session guard; unauthenticated requests stop here with 401
//! 3. **Service** validates input, calls the upstream API(s) and reshapes the JSON
//! 4. **Controller** maps failures onto the route's error body and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
