//! Library exports for marshall, shared between the binary and tests.

pub mod app;
pub mod config;
pub mod dialog;
pub mod error;
pub mod models;
pub mod notify;
pub mod request;
pub mod session;
pub mod startup;
pub mod storage;
pub mod tasks;
pub mod utils;
