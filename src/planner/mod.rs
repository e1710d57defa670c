//! Order-book walk: sizing a sale so that its proceeds, net of fees, cover a
//! funding target.

pub mod policy;
pub mod types;
pub mod walk;

pub use policy::{Precision, round_down, round_up, to_fixed};
pub use types::PlannerConfig;
pub use walk::FillPlanner;
