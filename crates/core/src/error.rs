#[derive(Debug, thiserror::Error)]
pub enum DenunciaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read offense dataset: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse offense dataset: {0}")]
    CatalogParse(csv::Error),
    #[error("offense dataset is missing required column: {0}")]
    CatalogMissingColumn(String),
    #[error("failed to open denuncia log: {0}")]
    StoreOpen(std::io::Error),
    #[error("failed to write denuncia log: {0}")]
    StoreWrite(csv::Error),
    #[error("failed to read denuncia log: {0}")]
    StoreRead(csv::Error),
    #[error("denuncia log has unexpected columns: expected [{expected}], found [{found}]")]
    StoreHeaderMismatch { expected: String, found: String },
}

pub type DenunciaResult<T> = std::result::Result<T, DenunciaError>;
