#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimingError {
    #[error("CAN-TIMING - unable to read `{0}`")]
    ConfigReadFailed(String),
    #[error("CAN-TIMING - configuration parse failed, reason: {0}")]
    ConfigParseFailed(String),
    #[error("CAN-TIMING - capability profile: {0} not found")]
    ProfileNotFound(String),

    #[error("CAN-TIMING - no timing found for bitrate: {bitrate} sample point: {sample_point}%")]
    SolutionNotFound { bitrate: f64, sample_point: f64 },
    #[error("CAN-TIMING - search cancelled")]
    Cancelled,

    #[error("CAN-TIMING - register field out of range: {0}")]
    RegisterOutOfRange(String),
}
