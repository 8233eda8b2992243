use chrono::{Local, NaiveDateTime};
use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    book::AddressBook,
    core::utils::{ensure_dir, PathResolver},
    errors::ContactError,
};

use super::{Result, StorageBackend};

const BOOK_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Stores each address book as pretty-printed JSON under `<root>/books`, with
/// rolling timestamped backups under `<root>/backups/<name>`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let books_dir = PathResolver::books_dir_in(&root);
        let backups_dir = PathResolver::backup_dir_in(&root);
        ensure_dir(&books_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    /// Resolves a backup file name inside the book's backup directory. Names
    /// that would escape it are rejected.
    pub fn backup_path(&self, name: &str, backup_name: &str) -> Result<PathBuf> {
        if backup_name.is_empty()
            || backup_name.contains(['/', '\\'])
            || matches!(backup_name, "." | "..")
        {
            return Err(ContactError::Storage(format!(
                "invalid backup name `{}`",
                backup_name
            )));
        }
        Ok(self.backup_dir(name).join(backup_name))
    }

    fn next_backup_path(&self, name: &str, note: Option<&str>) -> Result<PathBuf> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let stem = canonical_name(name);
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let label = sanitize_backup_note(note)
            .map(|label| format!("_{label}"))
            .unwrap_or_default();

        let existing: Vec<String> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        // The sequence is unique per stamp regardless of the note.
        let taken = |prefix: &str| {
            existing.iter().any(|name| {
                name.strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('.') || rest.starts_with('_'))
            })
        };

        let mut sequence = 1;
        loop {
            let stamp = if sequence == 1 {
                timestamp.clone()
            } else {
                format!("{timestamp}-{sequence}")
            };
            let prefix = format!("{stem}_{stamp}");
            if !taken(&prefix) {
                return Ok(dir.join(format!("{prefix}{label}.{BOOK_EXTENSION}")));
            }
            sequence += 1;
        }
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let backup_path = self.next_backup_path(name, None)?;
        fs::copy(path, &backup_path)?;
        tracing::debug!(backup = %backup_path.display(), "backed up previous book file");
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        for entry in backups.iter().skip(self.retention) {
            let path = self.backup_dir(name).join(entry);
            if let Err(err) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &AddressBook, name: &str) -> Result<PathBuf> {
        let path = self.book_path(name);
        self.backup_existing_file(name, &path)?;
        save_book_to_path(book, &path)?;
        tracing::info!(book = name, contacts = book.len(), "saved address book");
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<AddressBook> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(ContactError::Storage(format!(
                "address book `{}` not found",
                name
            )));
        }
        let book = load_book_from_path(&path)?;
        tracing::debug!(book = name, contacts = book.len(), "loaded address book");
        Ok(book)
    }

    fn exists(&self, name: &str) -> bool {
        self.book_path(name).exists()
    }

    fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), BOOK_EXTENSION))
    }

    fn backup(&self, book: &AddressBook, name: &str, note: Option<&str>) -> Result<PathBuf> {
        let path = self.next_backup_path(name, note)?;
        save_book_to_path(book, &path)?;
        self.prune_backups(name)?;
        tracing::info!(backup = %path.display(), "created backup");
        Ok(path)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let stem = canonical_name(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        entries.sort_by_cached_key(|entry| Reverse((backup_order(&stem, entry), entry.clone())));
        Ok(entries)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<AddressBook> {
        let backup_path = self.backup_path(name, backup_name)?;
        if !backup_path.exists() {
            return Err(ContactError::Storage(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let book = load_book_from_path(&backup_path)?;
        save_book_to_path(&book, &self.book_path(name))?;
        tracing::info!(book = name, backup = backup_name, "restored backup");
        Ok(book)
    }
}

/// Writes `book` as JSON next to `path` and renames it into place, so a failed
/// write never truncates the existing file.
pub fn save_book_to_path(book: &AddressBook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<AddressBook> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
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
        "addressbook".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Sort key for `<stem>_<YYYYmmdd>_<HHMMSS>[-<seq>][_<note>].json`.
fn backup_order(stem: &str, file_name: &str) -> Option<(NaiveDateTime, u32)> {
    let rest = file_name
        .strip_suffix(&format!(".{BOOK_EXTENSION}"))?
        .strip_prefix(stem)?
        .strip_prefix('_')?;
    let mut segments = rest.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    let (clock, sequence) = match time.split_once('-') {
        Some((clock, seq)) => (clock, seq.parse().ok()?),
        None => (time, 1),
    };
    let stamp = NaiveDateTime::parse_from_str(&format!("{date}{clock}"), "%Y%m%d%H%M%S").ok()?;
    Some((stamp, sequence))
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

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
