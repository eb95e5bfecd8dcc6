//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{LevelDef, TuningFile};

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

pub const TUNING_FILE: &str = "tuning.ron";
pub const LEVEL_FILE: &str = "level.ron";

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct. `file` only labels errors.
pub fn parse_single<T>(contents: &str, file: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct from disk.
pub fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&contents, &file_name)
}

/// Everything read from the data directory. A file that fails to load is
/// replaced by the built-in defaults and its error is kept.
#[derive(Debug, Default)]
pub struct LoadedContent {
    pub tuning: TuningFile,
    pub level: LevelDef,
    pub errors: Vec<ContentLoadError>,
}

/// Load tuning.ron and level.ron from `base_path`.
pub fn load_all_content(base_path: &Path) -> LoadedContent {
    let mut content = LoadedContent::default();

    match load_single_file::<TuningFile>(&base_path.join(TUNING_FILE)) {
        Ok(tuning) => content.tuning = tuning,
        Err(e) => content.errors.push(e),
    }
    match load_single_file::<LevelDef>(&base_path.join(LEVEL_FILE)) {
        Ok(level) => content.level = level,
        Err(e) => content.errors.push(e),
    }

    content
}
