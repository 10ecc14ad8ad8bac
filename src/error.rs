use good_lp::ResolutionError;
use thiserror::Error;

/// Crate-wide error type.
///
/// Input-validation errors are raised at construction time; solver errors are
/// propagated from the backend without retry.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Time series misaligned: {0}")]
    IndexMismatch(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown use case: {0}")]
    UnknownUseCase(String),
    #[error("Unknown objective mode: {0}")]
    UnknownObjective(String),
    #[error("Unknown solver backend: {0}")]
    UnknownSolver(String),
    #[error("Unknown bid side: {0}")]
    UnknownBidSide(String),
    #[error("Problem is infeasible")]
    Infeasible,
    #[error("Problem is unbounded")]
    Unbounded,
    #[error("Solver failure: {0}")]
    Solver(String),
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl DispatchError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DispatchError::InvalidInput(msg.into())
    }

    pub fn index_mismatch(msg: impl Into<String>) -> Self {
        DispatchError::IndexMismatch(msg.into())
    }

    /// True for errors reported by the solver backend (as opposed to errors
    /// caught while validating inputs or configuration).
    pub fn is_solver_error(&self) -> bool {
        matches!(
            self,
            DispatchError::Infeasible
                | DispatchError::Unbounded
                | DispatchError::Solver(_)
                | DispatchError::UnknownSolver(_)
        )
    }
}

impl From<ResolutionError> for DispatchError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Unbounded => DispatchError::Unbounded,
            ResolutionError::Infeasible => DispatchError::Infeasible,
            ResolutionError::Other(msg) => DispatchError::Solver(msg.to_string()),
            ResolutionError::Str(msg) => DispatchError::Solver(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = DispatchError::index_mismatch("solar generation has 3 steps, demand has 4");
        assert_eq!(
            err.to_string(),
            "Time series misaligned: solar generation has 3 steps, demand has 4"
        );

        let err = DispatchError::UnknownUseCase("hom".to_string());
        assert_eq!(err.to_string(), "Unknown use case: hom");
    }

    #[test]
    fn test_resolution_error_mapping() {
        let err: DispatchError = ResolutionError::Infeasible.into();
        assert!(matches!(err, DispatchError::Infeasible));
        assert!(err.is_solver_error());

        let err: DispatchError = ResolutionError::Str("numerical trouble".to_string()).into();
        assert_eq!(err.to_string(), "Solver failure: numerical trouble");

        let err = DispatchError::invalid_input("horizon is empty");
        assert!(!err.is_solver_error());
    }
}
