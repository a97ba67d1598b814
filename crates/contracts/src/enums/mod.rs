pub mod risk_tier;
