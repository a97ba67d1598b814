pub mod config;
pub mod data;
pub mod format;
pub mod forwarder;
pub mod workflow;
