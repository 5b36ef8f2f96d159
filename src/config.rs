use crate::error::{AdvisorError, Result};
use crate::types::config::AdvisorConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "smartsheti.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".smartsheti/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/smartsheti/config.toml";

/// Load the layered configuration rooted at `root`.
///
/// Layers merge in order global, project (or `explicit` when given), local.
/// Relative `[data]` paths are resolved against `root`. Returns the built-in
/// defaults when no layer exists.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<AdvisorConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<AdvisorConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(AdvisorError::ConfigParse(format!(
                "config file not found: {}",
                path.display()
            )));
        }
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    let project = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
    merge_file_if_exists(&mut merged, &project)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let mut cfg: AdvisorConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| AdvisorError::ConfigParse(e.to_string()))?;
    resolve_data_paths(&mut cfg, root);
    cfg.validate()?;
    tracing::debug!(
        top_n = cfg.top_n(),
        crops = ?cfg.crops_path(),
        pests = ?cfg.pests_path(),
        "configuration loaded"
    );
    Ok(cfg)
}

fn resolve_data_paths(cfg: &mut AdvisorConfig, root: &Path) {
    if let Some(data) = cfg.data.as_mut() {
        for path in [data.crops.as_mut(), data.pests.as_mut()].into_iter().flatten() {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AdvisorError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_defaults_when_no_layer_exists() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None, None).expect("load should not fail");
        assert_eq!(cfg.top_n(), 8);
        assert!(cfg.crops_path().is_none());
    }

    #[test]
    fn load_config_merges_global_project_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[advisor]
top_n = 4

[defaults]
humidity = 70.0
temperature = 28.0
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[data]
crops = "data/crops.json"

[defaults]
humidity = 55.0
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".smartsheti")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[advisor]
top_n = 6
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), None, Some(&global_path))
            .expect("load should succeed");

        assert_eq!(cfg.top_n(), 6);
        assert_eq!(cfg.reading_defaults().humidity, 55.0);
        assert_eq!(cfg.reading_defaults().temperature, 28.0);
        assert_eq!(
            cfg.crops_path().cloned(),
            Some(root.path().join("data/crops.json"))
        );
    }

    #[test]
    fn explicit_config_replaces_project_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[advisor]\ntop_n = 3\n",
        )
        .expect("project config should write");
        let explicit = root.path().join("other.toml");
        fs::write(&explicit, "[advisor]\ntop_n = 9\n").expect("explicit config should write");

        let cfg = load_config_with_global(root.path(), Some(&explicit), None)
            .expect("load should succeed");
        assert_eq!(cfg.top_n(), 9);
    }

    #[test]
    fn explicit_config_must_exist() {
        let root = TempDir::new().expect("root temp dir should be created");
        let missing = root.path().join("missing.toml");
        let err = load_config_with_global(root.path(), Some(&missing), None)
            .expect_err("missing explicit config should fail");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_layer_is_reported_with_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[advisor\n").expect("write");
        let err = load_config_with_global(root.path(), None, None)
            .expect_err("broken toml should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
