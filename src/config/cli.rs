use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

impl Storage for LocalStorage {
    /// Writes into a `.part` sibling first and renames it over the destination.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let part_path = partial_path(&full_path);
        if let Err(e) =
            fs::write(&part_path, data).and_then(|_| fs::rename(&part_path, &full_path))
        {
            let _ = fs::remove_file(&part_path);
            return Err(e.into());
        }

        Ok(full_path.display().to_string())
    }
}
