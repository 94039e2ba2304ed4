//! Constants used throughout the SPOA core crate.
//!
//! Column names and default paths live here so the storage boundary and the
//! binaries stay consistent.

/// Column order of the denuncia log, exactly as written to the header row.
pub const DENUNCIAS_COLUMNS: [&str; 8] = [
    "fecha_denuncia",
    "ciudad",
    "localidad",
    "cantidad_agresores",
    "asistencia_policial",
    "delitos",
    "tipo_arma",
    "descripcion",
];

/// Columns the offense reference dataset must provide. Extra columns are
/// ignored.
pub const CATALOG_REQUIRED_COLUMNS: [&str; 3] =
    ["tipo_delito", "pena_establecida", "limite_meses_dictar_pena"];

/// Default path of the offense reference dataset.
pub const DEFAULT_DATA_PATH: &str = "data/spoa.csv";

/// Default path of the denuncia log.
pub const DEFAULT_DENUNCIAS_PATH: &str = "denuncias_registradas.csv";

/// Sentinel rendered for an offense type with no usable penalty record.
pub const PENA_NO_ENCONTRADA: &str = "No encontrado";

/// Sentinel rendered when no matched record provides a sentencing deadline.
pub const PLAZO_NO_DISPONIBLE: &str = "No disponible";
