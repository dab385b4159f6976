use crate::matcher::ArchiveIndex;
use crate::types::PhotoDir;
use colored::Colorize;
use human_bytes::human_bytes;
use log::warn;
use std::fs;
use std::path::Path;

/// Copies up to `max_count` not-yet-archived folders into `dest_root`.
/// Candidates are processed newest-first by birth time, not in OS listing
/// order; already-archived folders are announced but do not consume the
/// count.
pub fn copy_new_dirs(
    mut card_dirs: Vec<PhotoDir>,
    archive: &ArchiveIndex,
    dest_root: &Path,
    max_count: usize,
) {
    card_dirs.sort_by(|a, b| b.created.cmp(&a.created));

    let mut copied = 0;

    for dir in &card_dirs {
        if copied >= max_count {
            break;
        }

        if archive.contains(dir) {
            println!("{}: {}", dir.name, "already copied".yellow());
        } else {
            copy_photo_dir(dir, dest_root);
            copied += 1;
        }
    }
}

/// Copies one card folder into `dest_root`, named by its date key. Files
/// land in a hidden staging directory that is renamed into place when the
/// job ends, so an interrupted run never leaves a directory the matcher
/// would mistake for a finished copy; the next run just retries.
pub fn copy_photo_dir(src: &PhotoDir, dest_root: &Path) {
    let Some(key) = src.date_key.as_deref() else {
        warn!("\"{}\" has no date key, not copying", src.path.display());
        return;
    };

    let dest = dest_root.join(key);
    if dest.exists() {
        warn!("destination \"{}\" already exists", dest.display());
        return;
    }

    let files = match list_files(&src.path) {
        Some(files) => files,
        None => return,
    };

    let staging = dest_root.join(format!(".{key}.incoming"));
    if staging.exists()
        && let Err(err) = fs::remove_dir_all(&staging)
    {
        warn!("can't clear stale \"{}\": {err}", staging.display());
        return;
    }
    if let Err(err) = fs::create_dir_all(&staging) {
        warn!("can't create dir \"{}\": {err}", staging.display());
        return;
    }

    if !files.is_empty() {
        println!("{} -> {}:", src.name.cyan(), key);
    }

    for file_name in &files {
        let from = src.path.join(file_name);
        let to = staging.join(file_name);

        match fs::copy(&from, &to) {
            Ok(bytes) => println!(
                "  {} ({})",
                file_name.to_string_lossy(),
                human_bytes(bytes as f64).green()
            ),
            Err(err) => warn!("can't copy \"{}\": {err}", from.display()),
        }
    }

    if let Err(err) = fs::rename(&staging, &dest) {
        warn!("can't finalize \"{}\": {err}", dest.display());
    }
}

/// Top-level regular files of a source folder, in OS listing order. Nested
/// directories are skipped without comment.
fn list_files(folder: &Path) -> Option<Vec<std::ffi::OsString>> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("can't read dir \"{}\": {err}", folder.display());
            return None;
        }
    };

    let files = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("can't read entry in \"{}\": {err}", folder.display());
                None
            }
        })
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name())
        .collect();

    Some(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn make_src(root: &Path, name: &str, files: &[(&str, &[u8])]) -> PhotoDir {
        let path = root.join(name);
        fs::create_dir(&path).unwrap();
        for (file_name, contents) in files {
            fs::write(path.join(file_name), contents).unwrap();
        }
        PhotoDir {
            path,
            name: name.to_string(),
            created: Local::now(),
            date_key: crate::datekey::name_key(name),
        }
    }

    #[test]
    fn test_copies_all_files_byte_identical() {
        let card = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let src = make_src(
            card.path(),
            "20240116",
            &[("IMG_1.JPG", b"first"), ("IMG_2.JPG", b"second")],
        );

        copy_photo_dir(&src, archive.path());

        let dest = archive.path().join("20240116");
        assert_eq!(fs::read(dest.join("IMG_1.JPG")).unwrap(), b"first");
        assert_eq!(fs::read(dest.join("IMG_2.JPG")).unwrap(), b"second");
        assert!(!archive.path().join(".20240116.incoming").exists());
    }

    #[test]
    fn test_empty_source_creates_empty_destination() {
        let card = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let src = make_src(card.path(), "20240117", &[]);

        copy_photo_dir(&src, archive.path());

        let dest = archive.path().join("20240117");
        assert!(dest.is_dir());
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }

    #[test]
    fn test_nested_directories_are_skipped() {
        let card = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let src = make_src(card.path(), "20240118", &[("IMG_1.JPG", b"x")]);
        fs::create_dir(src.path.join("THUMBS")).unwrap();

        copy_photo_dir(&src, archive.path());

        let dest = archive.path().join("20240118");
        assert!(dest.join("IMG_1.JPG").is_file());
        assert!(!dest.join("THUMBS").exists());
    }

    #[test]
    fn test_existing_destination_is_untouched() {
        let card = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let src = make_src(card.path(), "20240119", &[("IMG_1.JPG", b"new")]);

        let dest = archive.path().join("20240119");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("KEEP.JPG"), b"old").unwrap();

        copy_photo_dir(&src, archive.path());

        assert_eq!(fs::read(dest.join("KEEP.JPG")).unwrap(), b"old");
        assert!(!dest.join("IMG_1.JPG").exists());
    }

    #[test]
    fn test_stale_staging_directory_is_replaced() {
        let card = tempfile::tempdir().unwrap();
        let archive = tempfile::tempdir().unwrap();
        let src = make_src(card.path(), "20240120", &[("IMG_1.JPG", b"fresh")]);

        // Leftover from a run that died mid-copy
        let staging = archive.path().join(".20240120.incoming");
        fs::create_dir(&staging).unwrap();
        fs::write(staging.join("IMG_0.JPG"), b"stale").unwrap();

        copy_photo_dir(&src, archive.path());

        let dest = archive.path().join("20240120");
        assert!(dest.join("IMG_1.JPG").is_file());
        assert!(!dest.join("IMG_0.JPG").exists());
        assert!(!staging.exists());
    }

    #[test]
    fn test_copy_new_dirs_respects_count_and_skips_matched() {
        let card = tempfile::tempdir().unwrap();
        let archive_root = tempfile::tempdir().unwrap();

        let mut newest = make_src(card.path(), "20240123", &[("A.JPG", b"a")]);
        let mut archived = make_src(card.path(), "20240122", &[("B.JPG", b"b")]);
        let mut older = make_src(card.path(), "20240121", &[("C.JPG", b"c")]);
        newest.created = Local.with_ymd_and_hms(2024, 1, 23, 10, 0, 0).unwrap();
        archived.created = Local.with_ymd_and_hms(2024, 1, 22, 10, 0, 0).unwrap();
        older.created = Local.with_ymd_and_hms(2024, 1, 21, 10, 0, 0).unwrap();

        let index = ArchiveIndex::new(&[PhotoDir {
            path: PathBuf::from("/archive/2024/20240122_event"),
            name: "20240122_event".to_string(),
            created: Local::now(),
            date_key: Some("20240122".to_string()),
        }]);

        // Scrambled input order; the loop sorts for itself
        copy_new_dirs(
            vec![archived, older, newest],
            &index,
            archive_root.path(),
            2,
        );

        // The matched folder neither copies nor consumes the budget
        assert!(archive_root.path().join("20240123").is_dir());
        assert!(!archive_root.path().join("20240122").exists());
        assert!(archive_root.path().join("20240121").is_dir());
    }

    #[test]
    fn test_copy_new_dirs_picks_newest_regardless_of_input_order() {
        let card = tempfile::tempdir().unwrap();
        let archive_root = tempfile::tempdir().unwrap();

        let mut oldest = make_src(card.path(), "20240110", &[("A.JPG", b"a")]);
        let mut middle = make_src(card.path(), "20240111", &[("B.JPG", b"b")]);
        let mut newest = make_src(card.path(), "20240112", &[("C.JPG", b"c")]);
        oldest.created = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        middle.created = Local.with_ymd_and_hms(2024, 1, 11, 9, 0, 0).unwrap();
        newest.created = Local.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).unwrap();

        // Oldest first, as a worst-case enumeration order
        copy_new_dirs(
            vec![oldest, middle, newest],
            &ArchiveIndex::new(&[]),
            archive_root.path(),
            1,
        );

        assert!(archive_root.path().join("20240112").is_dir());
        assert!(!archive_root.path().join("20240111").exists());
        assert!(!archive_root.path().join("20240110").exists());
    }
}
