use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Track {
    /// Stable identifier, unique within one scan.
    pub id: String,
    pub path: PathBuf,
    pub length: Option<Duration>,
}
