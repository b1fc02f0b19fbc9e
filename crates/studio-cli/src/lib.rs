#![deny(warnings)]
pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod logging;
pub mod store;
