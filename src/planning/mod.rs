//! Planning attribute aggregation over the three EPI layers.

mod aggregator;
mod function;

pub use aggregator::PlanningAggregator;
pub use function::{handle_function, FunctionRequest, FunctionResponse};
