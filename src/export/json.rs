use crate::error::ExportError;
use crate::store::SiteStore;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Dumps the whole building tree as pretty-printed JSON.
pub fn export_json<P: AsRef<Path>>(store: &SiteStore, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(store.buildings())?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_serde_json() {
        let store = SiteStore::sample().unwrap();
        let dir = std::env::temp_dir().join("site-ledger-json-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");

        export_json(&store, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let buildings = parsed.as_array().unwrap();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0]["name"], "Tower A");
        assert_eq!(buildings[0]["floors"].as_array().unwrap().len(), 2);
    }
}
