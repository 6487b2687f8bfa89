//! On-disk cache of downloaded puzzle inputs

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;

/// Inputs are personal, so they are filed per user:
/// `{base_dir}/{user_id}/{year}_day{DD}.txt`
#[derive(Debug, Clone)]
pub struct InputCache {
    user_dir: PathBuf,
}

impl InputCache {
    pub fn new(mut base_dir: PathBuf, user_id: u64) -> Self {
        base_dir.push(user_id.to_string());
        Self { user_dir: base_dir }
    }

    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.user_dir.join(format!("{year}_day{day:02}.txt"))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Cached input, or `None` on a miss
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.user_dir).map_err(|e| {
            CacheError::DirCreation(format!("{}: {e}", self.user_dir.display()))
        })?;
        fs::write(self.cache_path(year, day), input)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_is_per_user_with_padded_day() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), 12345);

        assert_eq!(
            cache.cache_path(2020, 1),
            temp.path().join("12345").join("2020_day01.txt")
        );
        assert_eq!(
            cache.cache_path(2023, 25),
            temp.path().join("12345").join("2023_day25.txt")
        );
    }

    #[test]
    fn miss_then_write_then_hit() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), 7);

        assert!(!cache.contains(2023, 3));
        assert_eq!(cache.get(2023, 3).unwrap(), None);

        let input = "467..114..\n...*......\n";
        cache.put(2023, 3, input).unwrap();

        assert!(cache.contains(2023, 3));
        assert_eq!(cache.get(2023, 3).unwrap().as_deref(), Some(input));
        assert!(!cache.contains(2023, 4));
    }

    #[test]
    fn users_do_not_share_inputs() {
        let temp = TempDir::new().unwrap();
        let alice = InputCache::new(temp.path().to_path_buf(), 1);
        let bob = InputCache::new(temp.path().to_path_buf(), 2);

        alice.put(2020, 5, "FBFBBFFRLR\n").unwrap();
        assert!(alice.contains(2020, 5));
        assert!(!bob.contains(2020, 5));
    }

    #[test]
    fn unwritable_base_reports_dir_creation() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let cache = InputCache::new(blocker, 1);
        assert!(matches!(
            cache.put(2020, 1, "x"),
            Err(CacheError::DirCreation(_))
        ));
    }
}
