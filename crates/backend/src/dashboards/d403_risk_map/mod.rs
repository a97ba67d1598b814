pub mod fallback;
pub mod geo;
pub mod service;
