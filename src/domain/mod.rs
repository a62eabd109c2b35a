// Domain module: solver vocabulary, player data and lineups

pub mod lineup;
pub mod models;
pub mod player;
pub mod solver_service;
pub mod value_objects;

pub use lineup::*;
pub use models::*;
pub use player::*;
pub use solver_service::*;
pub use value_objects::*;
