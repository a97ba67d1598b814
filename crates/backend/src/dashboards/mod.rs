pub mod d402_returns_intelligence;
pub mod d403_risk_map;
pub mod d404_returns_report;
