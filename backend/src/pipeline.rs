use crate::error::ApiError;
use crate::state::{AppState, Outcome};
use crate::validator;
use log::{error, info};
use shared::Match;

/// Who initiated this trip through the pipeline. Probe traffic must stay
/// invisible to the client-facing counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Origin {
    Client,
    Probe,
}

/// Validate, classify, and account for one uploaded byte stream. Both the
/// upload handler and the health probe go through here; the counters move
/// only for client-originated attempts.
pub fn process_image(state: &AppState, bytes: &[u8], origin: Origin) -> Result<Vec<Match>, ApiError> {
    let result = run(state, bytes);
    if origin == Origin::Client {
        state.counters.record(match result {
            Ok(_) => Outcome::Success,
            Err(_) => Outcome::Fail,
        });
    }
    result
}

fn run(state: &AppState, bytes: &[u8]) -> Result<Vec<Match>, ApiError> {
    let image = validator::decode(bytes).map_err(|e| {
        info!("Rejected upload: {e}");
        ApiError::InvalidImage
    })?;

    state.adapter.classify(&image).map_err(|e| {
        error!("Classification failed: {e}");
        ApiError::Classification
    })
}
