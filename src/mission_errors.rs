use thiserror::Error;

#[derive(Error, Debug)]
pub enum MissionError {
    #[error("Invalid access analysis parameter: {0}")]
    InvalidAccessParameter(String),

    #[error("Invalid orbit: {0}")]
    InvalidOrbit(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unexpected state returned during crossing refinement: {0}")]
    UnexpectedState(String),

    #[error("No Sun-synchronous solution: {0}")]
    NoSunSyncSolution(String),

    #[error("Frame conversion failed: {0}")]
    FrameConversionError(String),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Unable to build the worker thread pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

impl PartialEq for MissionError {
    fn eq(&self, other: &Self) -> bool {
        use MissionError::*;
        match (self, other) {
            (InvalidAccessParameter(a), InvalidAccessParameter(b)) => a == b,
            (InvalidOrbit(a), InvalidOrbit(b)) => a == b,
            (InvalidArgument(a), InvalidArgument(b)) => a == b,
            (UnexpectedState(a), UnexpectedState(b)) => a == b,
            (NoSunSyncSolution(a), NoSunSyncSolution(b)) => a == b,
            (FrameConversionError(a), FrameConversionError(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,

            // the pool error carries no comparable payload
            (ThreadPoolError(_), ThreadPoolError(_)) => true,

            _ => false,
        }
    }
}
