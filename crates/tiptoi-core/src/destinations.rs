//! Candidate download directories: removable volumes plus the downloads folder.

use std::path::{Path, PathBuf};

use crate::DestinationOption;

/// Mount-point prefixes that indicate removable media on macOS and Linux desktops.
pub const REMOVABLE_PREFIXES: &[&str] = &["/Volumes/", "/media/", "/run/media/"];

/// Source of destination options, queried each time an audio file is chosen.
pub trait DestinationResolver: Send {
    /// Removable volumes in mount-table order, then the downloads folder last.
    fn resolve(&self) -> Vec<DestinationOption>;
}

/// Reads the host's mount table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDestinations;

impl DestinationResolver for SystemDestinations {
    fn resolve(&self) -> Vec<DestinationOption> {
        let mounts = match system_mounts() {
            Ok(mounts) => mounts,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read mount table");
                Vec::new()
            }
        };
        let mut options = removable_destinations(&mounts);
        tracing::debug!(removable = options.len(), "resolved destinations");
        options.push(DestinationOption::downloads(
            default_downloads_dir().display().to_string(),
        ));
        options
    }
}

#[cfg(target_os = "linux")]
fn system_mounts() -> std::io::Result<Vec<PathBuf>> {
    let table = std::fs::read_to_string("/proc/self/mounts")?;
    Ok(parse_mount_table(&table))
}

#[cfg(target_os = "macos")]
fn system_mounts() -> std::io::Result<Vec<PathBuf>> {
    // Every entry under /Volumes is a mount point.
    let mut mounts: Vec<PathBuf> = std::fs::read_dir("/Volumes")?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    mounts.sort();
    Ok(mounts)
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn system_mounts() -> std::io::Result<Vec<PathBuf>> {
    Ok(Vec::new())
}

/// Mount points from `/proc/mounts`-formatted text, in table order.
pub fn parse_mount_table(table: &str) -> Vec<PathBuf> {
    table
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(|field| PathBuf::from(unescape_mount_field(field)))
        .collect()
}

/// Decode the octal escapes (`\040` for space etc.) the kernel uses in mount fields.
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1..i + 4].iter().all(|b| (b'0'..=b'7').contains(b))
        {
            let digits = &field[i + 1..i + 4];
            if let Ok(value) = u8::from_str_radix(digits, 8) {
                out.push(value);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// One option per mount under a removable-media prefix, labelled by leaf name.
pub fn removable_destinations(mounts: &[PathBuf]) -> Vec<DestinationOption> {
    mounts
        .iter()
        .filter(|mount| is_removable(mount))
        .filter_map(|mount| {
            let label = mount.file_name()?.to_string_lossy().to_string();
            Some(DestinationOption::volume(label, mount.display().to_string()))
        })
        .collect()
}

fn is_removable(mount: &Path) -> bool {
    let path = mount.to_string_lossy();
    REMOVABLE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix) && path.len() > prefix.len())
}

/// The user's downloads folder, falling back to `~/Downloads` and then `.`.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}
