pub mod executor;
pub mod payload;

pub use executor::SimulateReturnExecutor;
