mod config;
pub mod journal;
pub mod logging;

pub use config::{
    JOURNAL_DISABLED_ENV, JOURNAL_FILE_NAME, PROGRAM_LOG_FILE, PROGRAM_LOG_LEVEL, PROGRAM_NAME,
    state_dir,
};

pub use logging::init;
