use crate::types::PhotoDir;
use std::collections::HashSet;

/// Acquisitions already present in the archive, keyed by derived date key.
/// Entries without a key are never inserted, so an unset key on either side
/// can never produce a false "already copied".
#[derive(Debug, Default)]
pub struct ArchiveIndex {
    keys: HashSet<String>,
}

impl ArchiveIndex {
    #[must_use]
    pub fn new(archive_dirs: &[PhotoDir]) -> Self {
        ArchiveIndex {
            keys: archive_dirs
                .iter()
                .filter_map(|d| d.date_key.clone())
                .collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, candidate: &PhotoDir) -> bool {
        candidate
            .date_key
            .as_ref()
            .is_some_and(|key| self.keys.contains(key))
    }
}
