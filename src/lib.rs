pub mod command_handler;
pub mod commands;
pub mod config;
pub mod error;
pub mod http_server;
pub mod platform;
pub mod prefix_store;
