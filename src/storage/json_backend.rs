use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{CoreError, Result};
use crate::ledger::Ledger;

use super::{default_base_dir, ensure_dir, StorageBackend};

const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed document store: one JSON document per named ledger, written
/// atomically via a temp file and rename.
#[derive(Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = root.unwrap_or_else(default_base_dir);
        ensure_dir(&base)?;
        let ledgers_dir = base.join("ledgers");
        ensure_dir(&ledgers_dir)?;
        Ok(Self { ledgers_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(CoreError::StorageError(format!(
                "ledger `{}` not found at {}",
                name,
                path.display()
            )));
        }
        let data = fs::read_to_string(&path)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        Ok(ledger)
    }

    fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
