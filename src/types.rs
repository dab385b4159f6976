use chrono::{DateTime, Local};
use std::path::PathBuf;

/// One directory on the card or in the archive, annotated with the
/// filesystem birth time and (once derived) the date key used for matching.
#[derive(Debug, Clone)]
pub struct PhotoDir {
    pub path: PathBuf,
    pub name: String,
    pub created: DateTime<Local>,
    pub date_key: Option<String>,
}
