//! Typed binding of the intake form.
//!
//! The form posts `application/x-www-form-urlencoded` with a repeated
//! `delitos` key for the multi-select, so the handler receives the raw
//! key/value pairs and this module folds them into a typed submission. The
//! only enforced validation rule is a non-empty offense selection; the other
//! fields fall back to the form's defaults when absent.

use chrono::NaiveDate;
use spoa_types::{Denuncia, WeaponType};

/// Errors produced while binding the posted pairs.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Debe seleccionar al menos un delito.")]
    EmptyDelitos,
    #[error("fecha de denuncia inválida: {0}")]
    InvalidDate(String),
    #[error("cantidad de agresores inválida: {0}")]
    InvalidCount(String),
    #[error("tipo de arma desconocido: {0}")]
    InvalidWeapon(String),
}

/// A bound submission: the denuncia itself plus the per-request analysis
/// credential, which is used immediately and never stored.
#[derive(Debug)]
pub struct IntakeSubmission {
    pub denuncia: Denuncia,
    pub api_key: Option<String>,
}

impl IntakeSubmission {
    /// Folds the posted key/value pairs into a typed submission.
    ///
    /// Repeated `delitos` keys accumulate; the last value wins for every
    /// other key, matching browser behaviour for single-valued controls.
    ///
    /// # Errors
    ///
    /// `EmptyDelitos` when no offense type was selected (the submission must
    /// be aborted with nothing computed or persisted), or a parse error for
    /// a field the browser should have constrained.
    pub fn from_pairs(pairs: &[(String, String)], hoy: NaiveDate) -> Result<Self, FormError> {
        let mut delitos: Vec<String> = Vec::new();
        let mut fecha: Option<&str> = None;
        let mut ciudad = "";
        let mut localidad = "";
        let mut cantidad: Option<&str> = None;
        let mut asistencia = "Sí";
        let mut arma: Option<&str> = None;
        let mut descripcion = "";
        let mut api_key = "";

        for (key, value) in pairs {
            match key.as_str() {
                "delitos" => delitos.push(value.clone()),
                "fecha_denuncia" => fecha = Some(value),
                "ciudad" => ciudad = value,
                "localidad" => localidad = value,
                "cantidad_agresores" => cantidad = Some(value),
                "asistencia_policial" => asistencia = value,
                "tipo_arma" => arma = Some(value),
                "descripcion" => descripcion = value,
                "api_key" => api_key = value,
                _ => {}
            }
        }

        if delitos.is_empty() {
            return Err(FormError::EmptyDelitos);
        }

        let fecha_denuncia = match fecha.map(str::trim).filter(|f| !f.is_empty()) {
            Some(f) => f
                .parse::<NaiveDate>()
                .map_err(|_| FormError::InvalidDate(f.to_string()))?,
            None => hoy,
        };

        let cantidad_agresores = match cantidad.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => {
                let n = c
                    .parse::<u32>()
                    .map_err(|_| FormError::InvalidCount(c.to_string()))?;
                if n < 1 {
                    return Err(FormError::InvalidCount(c.to_string()));
                }
                n
            }
            None => 1,
        };

        let tipo_arma = match arma.map(str::trim).filter(|a| !a.is_empty()) {
            Some(a) => a
                .parse::<WeaponType>()
                .map_err(|_| FormError::InvalidWeapon(a.to_string()))?,
            None => WeaponType::default(),
        };

        let api_key = api_key.trim();

        Ok(Self {
            denuncia: Denuncia {
                fecha_denuncia,
                ciudad: ciudad.trim().to_string(),
                localidad: localidad.trim().to_string(),
                cantidad_agresores,
                asistencia_policial: asistencia == "Sí",
                tipo_arma,
                delitos,
                descripcion: descripcion.to_string(),
            },
            api_key: if api_key.is_empty() {
                None
            } else {
                Some(api_key.to_string())
            },
        })
    }
}
