use crate::pipeline::{self, Origin};
use crate::state::AppState;
use log::warn;
use shared::HealthStatus;

/// Known-good sample the probe replays through the upload pipeline.
const PROBE_IMAGE: &[u8] = include_bytes!("../fixtures/probe.png");

/// Derives current classifier health by running the real validate+classify
/// pipeline against the bundled sample, in-process and tagged as a probe so
/// the usage counters never move. Recomputed fresh on every call.
pub fn check(state: &AppState) -> HealthStatus {
    match pipeline::process_image(state, PROBE_IMAGE, Origin::Probe) {
        Ok(_) => HealthStatus::Ok,
        Err(e) => {
            warn!("Health probe failed: {e}");
            HealthStatus::Error
        }
    }
}
