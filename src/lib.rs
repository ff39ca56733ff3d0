//! Configuration and proxy gateway: config documents, directory browsing over a
//! graph engine and a vector-engine proxy, gated by resource-path authorization
//! against an external policy service.

pub mod api;
pub mod app;
pub mod authz;
pub mod config;
pub mod configs;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
