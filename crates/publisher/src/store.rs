use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::error::{PublisherError, Result};

/// Flat-file persistence for the subscriber set.
///
/// One URL per line with a trailing newline, no header, rewritten in full on
/// every mutation. Write ordering follows the sorted set, so the file
/// contents are deterministic for any given subscriber set.
pub struct SubscriberStore {
    path: PathBuf,
}

impl SubscriberStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file line-by-line, creating it empty if absent.
    ///
    /// Blank lines are skipped, so a trailing newline (or none) is
    /// tolerated. Any read error other than not-found is returned.
    pub fn load(&self) -> Result<BTreeSet<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::write(&self.path, "").map_err(|source| self.persistence_error(source))?;
                info!(path = %self.path.display(), "created empty subscribers file");
                String::new()
            }
            Err(source) => return Err(self.persistence_error(source)),
        };

        let mut subscribers = BTreeSet::new();
        for line in contents.lines().filter(|line| !line.is_empty()) {
            info!(url = %line, "loaded subscriber");
            subscribers.insert(line.to_string());
        }

        Ok(subscribers)
    }

    /// Rewrite the backing file with the full subscriber set.
    pub fn persist(&self, subscribers: &BTreeSet<String>) -> Result<()> {
        let mut contents = String::new();
        for url in subscribers {
            contents.push_str(url);
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|source| self.persistence_error(source))?;

        debug!(
            path = %self.path.display(),
            count = subscribers.len(),
            "flushed subscribers to disk"
        );
        Ok(())
    }

    fn persistence_error(&self, source: io::Error) -> PublisherError {
        PublisherError::Persistence { path: self.path.clone(), source }
    }
}
