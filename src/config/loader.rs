use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::StepwiseConfig;
use crate::core::errors::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".stepwise.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and check it against [`StepwiseConfig::validate`].
pub fn parse_and_validate_config(contents: &str) -> Result<StepwiseConfig> {
    let config = toml::from_str::<StepwiseConfig>(contents)
        .map_err(|e| Error::Configuration(format!("failed to parse {CONFIG_FILE_NAME}: {e}")))?;
    config.validate().map_err(Error::Configuration)?;
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<StepwiseConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // A missing file just means keep looking
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %config_path.display(), error = %e, "failed to read config file");
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!(path = %config_path.display(), "loaded config");
            Some(config)
        }
        Err(e) => {
            warn!(path = %config_path.display(), "{e}. Using defaults.");
            None
        }
    }
}

/// `start` followed by its parents, at most `max_depth` directories in all.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Discover `.stepwise.toml` from `start` upwards.
///
/// Unreadable or invalid files are skipped with a warning; if nothing usable
/// is found the defaults apply.
pub fn discover_config(start: PathBuf) -> StepwiseConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                depth = MAX_TRAVERSAL_DEPTH,
                "no config found. Using default config."
            );
            StepwiseConfig::default()
        })
}

/// Discover configuration starting at the current directory.
pub fn load_config() -> StepwiseConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            warn!(error = %e, "failed to get current directory. Using default config.");
            StepwiseConfig::default()
        }
    }
}

/// Load an explicitly named configuration file. Every failure is an error
/// naming the file.
pub fn load_config_from(path: &Path) -> Result<StepwiseConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::file_system(
            format!("failed to read config file {}", path.display()),
            path,
            e,
        )
    })?;
    parse_and_validate_config(&contents).context(format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ancestors_are_bounded() {
        let start = PathBuf::from("/a/b/c/d");
        let dirs: Vec<PathBuf> = directory_ancestors(start, 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn discovers_config_in_a_parent_directory() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[symbols]\nunknowns = [\"t\"]\n",
        )
        .unwrap();
        let nested = root.path().join("one").join("two");
        fs::create_dir_all(&nested).unwrap();

        let config = discover_config(nested);
        assert_eq!(config.symbols.unknowns, vec!["t"]);
    }

    #[test]
    fn invalid_discovered_config_falls_back_to_defaults() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "symbols = 3").unwrap();
        let config = discover_config(root.path().to_path_buf());
        assert_eq!(config, StepwiseConfig::default());
    }

    #[test]
    fn explicit_config_errors_are_reported() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("missing.toml");
        assert!(matches!(
            load_config_from(&missing),
            Err(Error::FileSystem { .. })
        ));

        let invalid = root.path().join("invalid.toml");
        fs::write(&invalid, "[symbols]\nunknowns = []\n").unwrap();
        let err = load_config_from(&invalid).unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        let message = err.to_string();
        assert!(message.starts_with(&format!("loading {}", invalid.display())));
        assert!(message.contains("symbols.unknowns"));
    }
}
