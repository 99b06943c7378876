/// Error taxonomy for the validation core.
///
/// Collaborator failures (forecast/market fetches) never appear here - the
/// core only ever sees `None` or an empty listing from a failed collaborator
/// and treats both as ordinary absence of data.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Validation window exhausted: all {0} days already collected")]
    WindowExhausted(u32),

    #[error("Run incomplete: {completed}/{window} days collected")]
    RunIncomplete { completed: u32, window: u32 },

    #[error("No opportunities recorded over the validation window")]
    EmptyRun,
}
