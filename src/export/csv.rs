use crate::error::ExportError;
use crate::store::SiteStore;
use std::fs::File;
use std::path::Path;

/// Writes one row per company: the PO against what was billed so far.
pub fn export_csv<P: AsRef<Path>>(store: &SiteStore, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "Building",
        "Floor",
        "Company",
        "PO Number",
        "PO Value",
        "Total Amount",
    ])?;

    for building in store.buildings() {
        for floor in &building.floors {
            for company in &floor.companies {
                writer.write_record([
                    &building.name,
                    &floor.name,
                    &company.name,
                    &company.po_number,
                    &format!("{:.2}", company.po_value),
                    &format!("{:.2}", company.total_amount()),
                ])?;
            }
        }
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_one_row_per_company() {
        let store = SiteStore::sample().unwrap();
        let dir = std::env::temp_dir().join("site-ledger-csv-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        export_csv(&store, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3); // header + two companies
        assert_eq!(
            lines[0],
            "Building,Floor,Company,PO Number,PO Value,Total Amount"
        );
        assert_eq!(
            lines[1],
            "Tower A,Ground Floor,Acme Interiors,PO-1001,1000.00,600.00"
        );
    }
}
