//! Append-only denuncia log.
//!
//! Submissions are appended as CSV rows in a fixed column order; the header
//! row is written when the file does not exist yet. Reading returns typed
//! records of raw string fields bound by explicit column-name lookup at this
//! boundary, so the display path never guesses at field positions. A file
//! whose header does not match the expected column set is rejected.
//!
//! Single expected writer at a time; no locking (accepted scope).

use crate::constants::DENUNCIAS_COLUMNS;
use crate::{DenunciaError, DenunciaResult};
use serde::Serialize;
use spoa_types::Denuncia;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// One previously appended row, each field as the raw string stored in the
/// log. The display path renders these verbatim; nothing is coerced back to
/// native types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredDenuncia {
    pub fecha_denuncia: String,
    pub ciudad: String,
    pub localidad: String,
    pub cantidad_agresores: String,
    pub asistencia_policial: String,
    pub delitos: String,
    pub tipo_arma: String,
    pub descripcion: String,
}

/// Append/read access to the denuncia log file.
#[derive(Debug, Clone)]
pub struct DenunciaStore {
    path: PathBuf,
}

impl DenunciaStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one denuncia as a CSV row, writing the header row first if the
    /// log does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DenunciaError` if the log cannot be opened (`StoreOpen`) or
    /// the row cannot be written (`StoreWrite`).
    pub fn append(&self, denuncia: &Denuncia) -> DenunciaResult<()> {
        let write_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(DenunciaError::StoreOpen)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer
                .write_record(DENUNCIAS_COLUMNS)
                .map_err(DenunciaError::StoreWrite)?;
        }

        writer
            .write_record([
                denuncia.fecha_denuncia.to_string(),
                denuncia.ciudad.clone(),
                denuncia.localidad.clone(),
                denuncia.cantidad_agresores.to_string(),
                denuncia.asistencia_label().to_string(),
                denuncia.delitos_joined(),
                denuncia.tipo_arma.label().to_string(),
                denuncia.descripcion.clone(),
            ])
            .map_err(DenunciaError::StoreWrite)?;

        writer.flush().map_err(DenunciaError::StoreOpen)?;

        tracing::info!(path = %self.path.display(), "appended denuncia");
        Ok(())
    }

    /// Reads every appended row in append order.
    ///
    /// A missing log file is the expected state before any submission and
    /// yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DenunciaError` if the log exists but cannot be opened
    /// (`StoreOpen`), its header differs from the expected column set
    /// (`StoreHeaderMismatch`), or a row cannot be read (`StoreRead`).
    pub fn read_all(&self) -> DenunciaResult<Vec<StoredDenuncia>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(DenunciaError::StoreOpen)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers().map_err(DenunciaError::StoreRead)?.clone();
        let header_mismatch = || DenunciaError::StoreHeaderMismatch {
            expected: DENUNCIAS_COLUMNS.join(", "),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        };
        if headers.len() != DENUNCIAS_COLUMNS.len() {
            return Err(header_mismatch());
        }

        let column = |name: &str| -> DenunciaResult<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| header_mismatch())
        };
        let fecha = column("fecha_denuncia")?;
        let ciudad = column("ciudad")?;
        let localidad = column("localidad")?;
        let cantidad = column("cantidad_agresores")?;
        let asistencia = column("asistencia_policial")?;
        let delitos = column("delitos")?;
        let arma = column("tipo_arma")?;
        let descripcion = column("descripcion")?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(DenunciaError::StoreRead)?;
            let field = |i: usize| record.get(i).unwrap_or_default().to_string();
            rows.push(StoredDenuncia {
                fecha_denuncia: field(fecha),
                ciudad: field(ciudad),
                localidad: field(localidad),
                cantidad_agresores: field(cantidad),
                asistencia_policial: field(asistencia),
                delitos: field(delitos),
                tipo_arma: field(arma),
                descripcion: field(descripcion),
            });
        }

        Ok(rows)
    }
}
