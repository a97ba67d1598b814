pub mod mapper;
pub mod normalizer;
pub mod raw;
pub mod service;
