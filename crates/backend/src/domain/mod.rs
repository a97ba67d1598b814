pub mod a025_return_judgment;
pub mod a026_merchant_config;
