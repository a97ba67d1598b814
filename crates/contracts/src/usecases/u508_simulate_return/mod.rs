pub mod request;
pub mod response;

pub use request::{Scenario, SimulateReturnRequest};
pub use response::{ReturnEventPayload, SimulateReturnResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct SimulateReturn;

impl UseCaseMetadata for SimulateReturn {
    fn usecase_index() -> &'static str {
        "u508"
    }

    fn usecase_name() -> &'static str {
        "simulate_return"
    }

    fn display_name() -> &'static str {
        "Simulate return request"
    }

    fn description() -> &'static str {
        "Builds a synthetic return.requested event and forwards it to the merchant's automation URL"
    }
}
