//! Sheet settings loaded from `config.toml`.

use directories::ProjectDirs;
use gridcalc_core::SheetConfig;
use std::path::PathBuf;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Load sheet settings from `config_file`, or from the user's config
/// directory when none is given.
///
/// Problems never fail the load: they come back as warnings next to the
/// default settings.
pub fn load_config(config_file: Option<&PathBuf>) -> (SheetConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (SheetConfig::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (SheetConfig::default(), warnings);
    }

    let config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<SheetConfig>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    let mut config = config.unwrap_or_default();
    if let Err(err) = config.validate() {
        warnings.push(format!("Ignoring grid size in {}: {}", path.display(), err));
        let defaults = SheetConfig::default();
        config.rows = defaults.rows;
        config.cols = defaults.cols;
    }
    (config, warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::Color;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write temp config");
        (dir, path)
    }

    #[test]
    fn load_config_reads_all_fields() {
        let (_dir, path) = write_config(
            r#"
rows = 10
cols = 4
default_color = "FF202020"
history_limit = 5
"#,
        );
        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!((config.rows, config.cols), (10, 4));
        assert_eq!(config.default_color, Color(0xFF20_2020));
        assert_eq!(config.history_limit, 5);
    }

    #[test]
    fn load_config_fills_missing_fields_with_defaults() {
        let (_dir, path) = write_config("rows = 3\n");
        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty());
        assert_eq!(config.rows, 3);
        assert_eq!(config.cols, SheetConfig::default().cols);
    }

    #[test]
    fn load_config_rejects_unknown_fields() {
        let (_dir, path) = write_config("rows = 3\nsheets = 2\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, SheetConfig::default());
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));
    }

    #[test]
    fn load_config_rejects_oversized_file() {
        let (_dir, path) = write_config(&"#".repeat(MAX_CONFIG_FILE_BYTES as usize + 1));
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, SheetConfig::default());
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("file too large") && w.contains("Refusing to read"))
        );
    }

    #[test]
    fn load_config_warns_on_missing_explicit_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, SheetConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn load_config_ignores_empty_grid() {
        let (_dir, path) = write_config("rows = 0\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config.rows, 50);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn load_config_ignores_oversized_grid() {
        let (_dir, path) = write_config("rows = 100000\ncols = 100000\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!((config.rows, config.cols), (50, 26));
        assert!(warnings.iter().any(|w| w.contains("Invalid grid size")), "{:?}", warnings);
    }
}
