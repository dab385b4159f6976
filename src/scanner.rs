use crate::datekey;
use crate::types::PhotoDir;
use chrono::{DateTime, Local};
use log::warn;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Card-side listing of a DCIM folder. Every entry carries a date key
/// (name prefix when the name embeds one, birth time otherwise).
#[must_use]
pub fn card_dirs(folder: &Path) -> Vec<PhotoDir> {
    let mut dirs = subfolders(folder);
    for dir in &mut dirs {
        dir.date_key = Some(datekey::card_key(&dir.name, &dir.created));
    }
    dirs
}

/// Archive-side listing of the local year directory. Only names long enough
/// to embed a date get a key; the rest never match anything.
#[must_use]
pub fn archive_dirs(folder: &Path) -> Vec<PhotoDir> {
    let mut dirs = subfolders(folder);
    for dir in &mut dirs {
        dir.date_key = datekey::name_key(&dir.name);
    }
    dirs
}

/// Immediate child directories of `folder`, in OS listing order. An
/// unreadable folder yields an empty list, an unreadable child is skipped;
/// both are warnings, never fatal.
fn subfolders(folder: &Path) -> Vec<PhotoDir> {
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                // The error may belong to a single child entry rather than
                // the folder itself; name whichever path it carries
                let at = err.path().unwrap_or(folder);
                warn!("can't read \"{}\": {err}", at.display());
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            let metadata = match e.metadata() {
                Ok(m) => m,
                Err(err) => {
                    warn!("can't stat dir \"{}\": {err}", e.path().display());
                    return None;
                }
            };

            Some(PhotoDir {
                path: e.path().to_path_buf(),
                name: e.file_name().to_string_lossy().to_string(),
                created: creation_time(&metadata),
                date_key: None,
            })
        })
        .collect()
}

fn creation_time(metadata: &std::fs::Metadata) -> DateTime<Local> {
    // exfat reports a birth time, but the archive may sit on a filesystem
    // that does not; mtime is the closest stand-in there. UNIX_EPOCH as the
    // last resort keeps such entries out of the "newest first" window.
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
        .into()
}
