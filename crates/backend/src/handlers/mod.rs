pub mod a026_merchant_config;
pub mod d402_returns_intelligence;
pub mod d403_risk_map;
pub mod d404_returns_report;
pub mod u508_simulate_return;
pub mod webhook_events;
