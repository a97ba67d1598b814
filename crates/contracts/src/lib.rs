//! Общие DTO между backend и dashboard-клиентом

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
pub mod usecases;
