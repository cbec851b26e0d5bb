//! Survey Cache
//! Explicit memoization of loaded surveys, keyed on path and modification
//! time, owned by the host application.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::loader::{load_survey, LoaderError, SurveyData};

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    data: SurveyData,
}

/// Caches parsed surveys per input path.
///
/// An entry is reused while the file's modification time is unchanged;
/// [`SurveyCache::invalidate`] and [`SurveyCache::clear`] drop entries
/// explicitly.
#[derive(Debug, Default)]
pub struct SurveyCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl SurveyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reusing the cached table when the file is unchanged.
    pub fn load(&mut self, path: &Path) -> Result<&SurveyData, LoaderError> {
        let modified = modification_time(path)?;

        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) if entry.get().modified == modified => {
                debug!("survey cache hit for {}", path.display());
                Ok(&entry.into_mut().data)
            }
            Entry::Occupied(entry) => {
                let data = load_survey(path)?;
                let slot = entry.into_mut();
                *slot = CacheEntry { modified, data };
                Ok(&slot.data)
            }
            Entry::Vacant(entry) => {
                let data = load_survey(path)?;
                Ok(&entry.insert(CacheEntry { modified, data }).data)
            }
        }
    }

    /// Drop the entry for `path`. Returns whether one was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn modification_time(path: &Path) -> Result<SystemTime, LoaderError> {
    let metadata = fs::metadata(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            LoaderError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            LoaderError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    metadata.modified().map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs::File;
    use std::time::Duration;

    const HEADER: &str = "Timestamp,Mon,Tue,Wed,Thu,Fri,Sat,Satisfied,Challenges\n";

    fn one_row() -> String {
        format!("{HEADER}a1,Morning,,,,,,Yes,Pacing\n")
    }

    fn two_rows() -> String {
        format!("{HEADER}a1,Morning,,,,,,Yes,Pacing\na2,,Evening,,,,,No,Anxiety\n")
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn stamp(path: &Path, when: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(when)
            .unwrap();
    }

    #[test]
    fn reuses_entry_while_modification_time_is_unchanged() {
        let path = temp_path("availboard_cache_reuse.csv");
        let old = SystemTime::now() - Duration::from_secs(600);

        fs::write(&path, one_row()).unwrap();
        stamp(&path, old);

        let mut cache = SurveyCache::new();
        assert_eq!(cache.load(&path).unwrap().respondents(), 1);

        // Rewrite the file but restore the old stamp: the cache must not
        // notice the change.
        fs::write(&path, two_rows()).unwrap();
        stamp(&path, old);
        assert_eq!(cache.load(&path).unwrap().respondents(), 1);

        // An explicit invalidate forces the re-read.
        assert!(cache.invalidate(&path));
        assert_eq!(cache.load(&path).unwrap().respondents(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn reloads_when_the_file_changes_on_disk() {
        let path = temp_path("availboard_cache_reload.csv");

        fs::write(&path, one_row()).unwrap();
        stamp(&path, SystemTime::now() - Duration::from_secs(600));

        let mut cache = SurveyCache::new();
        assert_eq!(cache.load(&path).unwrap().respondents(), 1);

        // A fresh write moves the modification time forward.
        fs::write(&path, two_rows()).unwrap();
        assert_eq!(cache.load(&path).unwrap().respondents(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalidate_reports_whether_an_entry_existed() {
        let mut cache = SurveyCache::new();
        assert!(!cache.invalidate(Path::new("never-loaded.csv")));
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let mut cache = SurveyCache::new();
        let err = cache
            .load(&temp_path("availboard_cache_nope.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Missing { .. }));
    }
}
