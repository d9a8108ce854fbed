pub mod load;
pub mod save;
pub mod types;

pub use types::{
    CaptureSettings, Config, DEFAULT_DATE_RANGES, DocDuplicatorSettings, Language,
    MAX_RECENT_PATHS, UserSettings, VideoComposerSettings,
};
