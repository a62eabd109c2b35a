// Application layer: the lineup use case built on the domain solver interface

pub mod decode;
pub mod feasibility;
pub mod formulation;
pub mod optimizer;

pub use decode::decode;
pub use feasibility::{check_roster_possible, minimum_roster, require_stat, MinimumRoster};
pub use formulation::{formulate, LineupModel};
pub use optimizer::{available_years, LineupOptimizer, LineupRequest};
