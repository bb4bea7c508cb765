use crate::error::SaveError;
use crate::timestamp::format_unix_timestamp;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_BACKUPS: usize = 5;

/// Copy the existing save file into `saves/backups/savegame_<timestamp>.json`
/// before it gets overwritten, then prune to the 5 most recent backups.
/// A missing save file is not an error — there is nothing to back up yet.
pub fn create_backup(save_path: &Path, backup_dir: &Path) -> Result<(), SaveError> {
    if !save_path.exists() {
        return Ok(());
    }

    fs::create_dir_all(backup_dir)?;
    let backup_path = backup_dir.join(backup_filename());
    fs::copy(save_path, &backup_path)?;
    log::info!("created save backup: {}", backup_path.display());

    cleanup_old_backups(backup_dir)?;
    Ok(())
}

fn backup_filename() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let stamp = format_unix_timestamp(secs).replace(['-', ':', 'T'], "");
    format!("savegame_{stamp}.json")
}

/// Keep only the `MAX_BACKUPS` lexicographically-latest backups; the
/// `YYYYMMDDHHMMSS` filename stamp sorts chronologically by construction,
/// so this needs no filesystem metadata (mtime can lie across copies).
fn cleanup_old_backups(backup_dir: &Path) -> Result<(), SaveError> {
    let mut backups: Vec<PathBuf> = fs::read_dir(backup_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("savegame_") && n.ends_with(".json"))
                .unwrap_or(false)
        })
        .collect();

    backups.sort();
    for stale in backups.iter().rev().skip(MAX_BACKUPS) {
        fs::remove_file(stale)?;
        log::debug!("removed old backup: {}", stale.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn cleanup_keeps_only_most_recent_five() {
        let dir = std::env::temp_dir().join(format!("persistence_backup_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for i in 0..8u32 {
            let mut f = File::create(dir.join(format!("savegame_2024010100000{i}.json"))).unwrap();
            writeln!(f, "{{}}").unwrap();
        }
        cleanup_old_backups(&dir).unwrap();
        let remaining: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(remaining.len(), MAX_BACKUPS);
        fs::remove_dir_all(&dir).unwrap();
    }
}
