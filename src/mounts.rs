use log::warn;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("failed to run mount: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("mount exited with {0}")]
    Failed(std::process::ExitStatus),
}

/// Mount points of every attached exfat volume, in the order the OS reports
/// them. Cards show up here; internal disks do not.
pub fn exfat_mount_points() -> Result<Vec<String>, MountError> {
    let output = Command::new("mount").args(["-t", "exfat"]).output()?;

    if !output.status.success() {
        return Err(MountError::Failed(output.status));
    }

    Ok(parse_mount_output(&String::from_utf8_lossy(&output.stdout)))
}

/// `mount` prints one volume per line, e.g.
/// `/dev/disk4s1 on /Volumes/CARD (exfat, local, nodev)`. The third field is
/// the mount point; lines without one are skipped, not fatal.
fn parse_mount_output(out: &str) -> Vec<String> {
    let mut mount_points = Vec::new();

    for line in out.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            warn!("can't parse mount line: \"{line}\"");
            continue;
        }

        mount_points.push(fields[2].to_string());
    }

    mount_points
}
