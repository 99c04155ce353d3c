use std::{fs, path::Path};

use anyhow::Context as _;
use pushy_engine::{MatchConfig, MatchSeed};

/// Parses the JSON file at `path`; `file_kind` names the file in error messages.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {file_kind} file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {file_kind} file: {}", path.display()))
}

/// Reads the match rules from `path`, or returns the defaults.
pub fn read_match_config<P>(path: Option<P>) -> anyhow::Result<MatchConfig>
where
    P: AsRef<Path>,
{
    match path {
        Some(path) => read_json_file("match config", path),
        None => Ok(MatchConfig::default()),
    }
}

/// Uses the given seed, or draws a fresh one.
pub fn match_seed(seed: Option<u64>) -> MatchSeed {
    seed.map_or_else(rand::random, MatchSeed::from_u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("pushy-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_match_config() {
        let path = temp_file("config.json", r#"{ "spawn_interval": 5 }"#);
        let config = read_match_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.spawn_interval, 5);
        assert_eq!(config.initial_lives, MatchConfig::default().initial_lives);

        assert_eq!(
            read_match_config(None::<&Path>).unwrap(),
            MatchConfig::default()
        );
    }

    #[test]
    fn test_errors_name_the_file() {
        let path = temp_file("broken.json", "{ not json");
        let err = read_json_file::<MatchConfig, _>("match config", &path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("match config"), "{err}");

        let missing = std::env::temp_dir().join("pushy-missing-file.json");
        assert!(read_json_file::<MatchConfig, _>("match config", &missing).is_err());
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        assert_eq!(match_seed(Some(3)), MatchSeed::from_u64(3));
    }
}
