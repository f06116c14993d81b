use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::state::TrackerState;

/// Load tracker state from a JSON file.
///
/// A missing file is a fresh tracker. Duplicate item or entry ids keep
/// the last occurrence.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<TrackerState> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting fresh");
        return Ok(TrackerState::new());
    }

    let content = fs::read_to_string(path)?;
    let mut state: TrackerState = serde_json::from_str(&content)?;
    state.normalize();
    Ok(state)
}

/// Save tracker state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &TrackerState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path.as_ref(), json)?;
    tracing::debug!(path = %path.as_ref().display(), "saved state");
    Ok(())
}
