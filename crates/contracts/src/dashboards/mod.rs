pub mod d402_returns_intelligence;
pub mod d403_risk_map;
