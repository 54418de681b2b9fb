use std::path::Path;

use serde_json::Value;

/// Read a YAML (or JSON) document into a generic value tree.
///
/// An empty file decodes to `null`.
pub fn read_document(path: &Path) -> eyre::Result<Value> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    parse_document(&contents).map_err(|e| eyre::eyre!("failed to parse {}: {e}", path.display()))
}

pub fn parse_document(contents: &str) -> Result<Value, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(contents)
}

/// Write `doc` as YAML via a temp file and rename, creating parent dirs.
pub fn write_yaml_atomic(path: &Path, doc: &Value) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("{} has no parent directory", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let yaml = serde_yaml::to_string(doc)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("{} has no file name", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = dir.join(tmp_name);

    std::fs::write(&tmp_path, yaml.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
