use std::{env, path::PathBuf};

pub const PROGRAM_NAME: &str = "jsonbatch";
pub const PROGRAM_LOG_LEVEL: &str = "JSONBATCH_LOG_LEVEL";
pub const JOURNAL_DISABLED_ENV: &str = "JSONBATCH_HISTORY";
pub const JOURNAL_FILE_NAME: &str = "dispatch.log";
pub const PROGRAM_LOG_FILE: &str = "JSONBATCH_LOG_FILE";

/// Directory holding persistent state such as the dispatch journal.
pub fn state_dir() -> Option<PathBuf> {
    // Check XDG_STATE_HOME first (Linux)
    if let Ok(xdg_state) = env::var("XDG_STATE_HOME")
        && !xdg_state.is_empty()
    {
        return Some(PathBuf::from(xdg_state).join(PROGRAM_NAME));
    }

    // Fall back to dirs crate
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join(PROGRAM_NAME))
}
