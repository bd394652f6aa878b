pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod filter;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
