//! dirserve - static file and directory listing server
//!
//! Core library for HTTP request handling and filesystem resolution.

pub mod cli;
pub mod config;
pub mod files;
pub mod http;
pub mod server;
