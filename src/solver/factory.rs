use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};
use crate::solver::HighsSolver;
use std::sync::Arc;

#[cfg(feature = "coin-cbc")]
use crate::solver::CoinCbcSolver;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend
    pub fn create(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto | SolverBackend::Highs => Ok(Arc::new(HighsSolver::new())),
            #[cfg(feature = "coin-cbc")]
            SolverBackend::Cbc => Ok(Arc::new(CoinCbcSolver::new())),
            #[cfg(not(feature = "coin-cbc"))]
            SolverBackend::Cbc => Err(SolverError::SolverNotAvailable(
                "COIN-OR CBC support was not compiled in (enable the `coin-cbc` feature)"
                    .to_string(),
            )),
        }
    }
}
