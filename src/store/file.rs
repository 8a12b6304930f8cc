//! Preference store backed by one JSON file per group

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::{PrefGroup, PreferenceStore, StoreError};

/// Directory of `<group>.json` files.
///
/// Commits write a temp file, fsync it and rename it over the previous
/// contents, so a reader sees either the old group or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn group_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl PreferenceStore for FileStore {
    fn read_group(&self, name: &str) -> Result<PrefGroup, StoreError> {
        let path = self.group_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preferences file at {}, using empty group", path.display());
                return Ok(PrefGroup::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    fn commit_group(&mut self, name: &str, group: &PrefGroup) -> Result<(), StoreError> {
        let final_path = self.group_path(name);
        let tmp_path = self.dir.join(format!("{}.json.tmp", name));

        let json = serde_json::to_string_pretty(group)?;

        if let Err(e) = write_and_rename(&tmp_path, &final_path, json.as_bytes()) {
            match fs::remove_file(&tmp_path) {
                Ok(()) => debug!("Removed {} after failed commit", tmp_path.display()),
                Err(rm) if rm.kind() == ErrorKind::NotFound => {}
                Err(rm) => warn!("Failed to remove {}: {}", tmp_path.display(), rm),
            }
            return Err(e.into());
        }

        debug!("Committed group '{}' to {}", name, final_path.display());
        Ok(())
    }
}

fn write_and_rename(tmp_path: &Path, final_path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, final_path)
}
