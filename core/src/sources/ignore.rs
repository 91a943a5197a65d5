use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::report::IgnoreList;

/// One entry per line: the first whitespace-separated token. Blank lines are skipped.
pub fn parse_ignore(source: &str) -> IgnoreList {
    IgnoreList::new(source.lines().filter_map(|line| line.split_whitespace().next()))
}

/// A missing ignore file is an empty list.
pub fn load_ignore(path: &Path) -> anyhow::Result<IgnoreList> {
    match fs::read_to_string(path) {
        Ok(source) => {
            let list = parse_ignore(&source);
            debug!("{} ignore entries from {}", list.len(), path.display());
            Ok(list)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("no ignore file at {}", path.display());
            Ok(IgnoreList::default())
        }
        Err(err) => {
            Err(err).with_context(|| format!("failed to read ignore file {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_token_per_line() {
        let list = parse_ignore("r1   # lab router\n\n  10.0.0.9\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("r1"));
        assert!(list.contains("10.0.0.9"));
        assert!(!list.contains("#"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let list = load_ignore(Path::new("/nonexistent/static.ignore")).unwrap();
        assert!(list.is_empty());
    }
}
