//! Offense reference catalog.
//!
//! The catalog is loaded from the bundled CSV dataset once at startup and is
//! read-only for the process lifetime. It is constructed explicitly and
//! injected into whatever needs it, so tests can build one from in-memory
//! records instead of a file.

use crate::constants::CATALOG_REQUIRED_COLUMNS;
use crate::{DenunciaError, DenunciaResult};
use spoa_types::OffenseRecord;
use std::path::Path;

/// Read-only set of offense records keyed by `tipo_delito`.
///
/// Duplicate offense types are kept as-is; `lookup` returns every matching
/// record and consumers decide how to collapse them.
#[derive(Debug, Clone)]
pub struct OffenseCatalog {
    records: Vec<OffenseRecord>,
}

impl OffenseCatalog {
    /// Loads the catalog from a CSV dataset.
    ///
    /// The dataset must provide the columns named in
    /// [`CATALOG_REQUIRED_COLUMNS`]; any additional columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DenunciaError` if:
    /// - The file cannot be opened (`CatalogRead`)
    /// - A required column is absent (`CatalogMissingColumn`)
    /// - A row cannot be parsed, e.g. a non-integer deadline (`CatalogParse`)
    pub fn load(path: &Path) -> DenunciaResult<Self> {
        let file = std::fs::File::open(path).map_err(DenunciaError::CatalogRead)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(DenunciaError::CatalogParse)?
            .clone();
        for column in CATALOG_REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DenunciaError::CatalogMissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<OffenseRecord>() {
            records.push(row.map_err(DenunciaError::CatalogParse)?);
        }

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "loaded offense catalog"
        );

        Ok(Self { records })
    }

    /// Builds a catalog directly from records. Used by tests and anywhere the
    /// dataset does not come from a file.
    pub fn from_records(records: Vec<OffenseRecord>) -> Self {
        Self { records }
    }

    /// Distinct offense types in first-seen order. Drives the form's
    /// multi-select options.
    pub fn distinct_offense_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for record in &self.records {
            if !types.contains(&record.tipo_delito.as_str()) {
                types.push(&record.tipo_delito);
            }
        }
        types
    }

    /// Every record whose `tipo_delito` is in the given set, in dataset
    /// order. An empty input yields an empty output.
    pub fn lookup(&self, tipos: &[String]) -> Vec<&OffenseRecord> {
        self.records
            .iter()
            .filter(|r| tipos.iter().any(|t| *t == r.tipo_delito))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(contents: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("spoa.csv");
        fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let (_temp, path) = write_dataset(
            "tipo_delito,pena_establecida,limite_meses_dictar_pena,articulo\n\
             Hurto,4 a 8 años,12,239\n",
        );
        let catalog = OffenseCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.distinct_offense_types(), vec!["Hurto"]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = OffenseCatalog::load(&temp.path().join("nope.csv"));
        assert!(matches!(result, Err(DenunciaError::CatalogRead(_))));
    }

    #[test]
    fn test_load_missing_required_column() {
        let (_temp, path) = write_dataset("tipo_delito,pena_establecida\nHurto,4 a 8 años\n");
        let result = OffenseCatalog::load(&path);
        assert!(matches!(
            result,
            Err(DenunciaError::CatalogMissingColumn(ref c)) if c == "limite_meses_dictar_pena"
        ));
    }

    #[test]
    fn test_load_non_integer_deadline() {
        let (_temp, path) = write_dataset(
            "tipo_delito,pena_establecida,limite_meses_dictar_pena\n\
             Hurto,4 a 8 años,pronto\n",
        );
        let result = OffenseCatalog::load(&path);
        assert!(matches!(result, Err(DenunciaError::CatalogParse(_))));
    }

    #[test]
    fn test_distinct_offense_types_dedupes_in_first_seen_order() {
        let catalog = OffenseCatalog::from_records(vec![
            record("Hurto", "4 a 8 años", 12),
            record("Homicidio", "25 a 40 años", 6),
            record("Hurto", "2 a 4 años", 9),
        ]);
        assert_eq!(
            catalog.distinct_offense_types(),
            vec!["Hurto", "Homicidio"]
        );
    }

    #[test]
    fn test_lookup_empty_input() {
        let catalog = OffenseCatalog::from_records(vec![record("Hurto", "4 a 8 años", 12)]);
        assert!(catalog.lookup(&[]).is_empty());
    }

    #[test]
    fn test_lookup_returns_all_matches() {
        let catalog = OffenseCatalog::from_records(vec![
            record("Hurto", "4 a 8 años", 12),
            record("Homicidio", "25 a 40 años", 6),
            record("Hurto", "2 a 4 años", 9),
        ]);
        let matches = catalog.lookup(&["Hurto".to_string()]);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|r| r.tipo_delito == "Hurto"));
    }

    fn record(tipo: &str, pena: &str, meses: u32) -> OffenseRecord {
        OffenseRecord {
            tipo_delito: tipo.to_string(),
            pena_establecida: pena.to_string(),
            limite_meses_dictar_pena: meses,
        }
    }
}
