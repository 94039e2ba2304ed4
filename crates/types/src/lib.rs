//! Domain model for the SPOA denuncia intake system.
//!
//! This crate defines the types shared by the catalog, the submission store
//! and the web layer:
//! - `OffenseRecord`: one row of the offense reference dataset
//! - `Denuncia`: a complaint as captured by the intake form
//! - `WeaponType`: the fixed weapon enumeration with its Spanish labels

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a weapon type from its label.
#[derive(Debug, thiserror::Error)]
pub enum WeaponTypeError {
    /// The input did not match any known weapon label
    #[error("unknown weapon type: {0}")]
    Unknown(String),
}

/// Weapon used during the reported incident.
///
/// The variants carry fixed Spanish display labels; those labels are also the
/// persisted form in the submission log, so parsing and display must stay
/// inverse to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponType {
    /// No weapon involved
    #[default]
    NoAplica,
    /// Knife or other bladed weapon
    ArmaBlanca,
    /// Firearm
    ArmaDeFuego,
    /// Blunt object
    ObjetoContundente,
    /// Anything else
    Otro,
}

impl WeaponType {
    /// All variants in the order the form presents them.
    pub const ALL: [WeaponType; 5] = [
        WeaponType::NoAplica,
        WeaponType::ArmaBlanca,
        WeaponType::ArmaDeFuego,
        WeaponType::ObjetoContundente,
        WeaponType::Otro,
    ];

    /// The Spanish display label, as shown in the form and stored in the log.
    pub fn label(&self) -> &'static str {
        match self {
            WeaponType::NoAplica => "No aplica",
            WeaponType::ArmaBlanca => "Arma blanca",
            WeaponType::ArmaDeFuego => "Arma de fuego",
            WeaponType::ObjetoContundente => "Objeto contundente",
            WeaponType::Otro => "Otro",
        }
    }
}

impl std::str::FromStr for WeaponType {
    type Err = WeaponTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponType::ALL
            .iter()
            .find(|w| w.label() == s)
            .copied()
            .ok_or_else(|| WeaponTypeError::Unknown(s.to_string()))
    }
}

impl std::fmt::Display for WeaponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for WeaponType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for WeaponType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the offense reference dataset.
///
/// Field names mirror the dataset's column headers so the CSV boundary can
/// bind them directly. Duplicate `tipo_delito` values are tolerated; consumers
/// take the first non-empty penalty and the minimum deadline across matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenseRecord {
    /// Offense category, the lookup key
    pub tipo_delito: String,
    /// Free-text statutory penalty description
    pub pena_establecida: String,
    /// Statutory deadline in months for issuing a sentence, counted from the
    /// complaint date
    pub limite_meses_dictar_pena: u32,
}

/// A complaint as captured by the intake form.
///
/// Immutable once appended to the submission log. `delitos` is guaranteed
/// non-empty by form validation before a `Denuncia` is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denuncia {
    pub fecha_denuncia: NaiveDate,
    pub ciudad: String,
    pub localidad: String,
    pub cantidad_agresores: u32,
    pub asistencia_policial: bool,
    pub tipo_arma: WeaponType,
    pub delitos: Vec<String>,
    pub descripcion: String,
}

impl Denuncia {
    /// The persisted form of the offense list: comma-space joined.
    pub fn delitos_joined(&self) -> String {
        self.delitos.join(", ")
    }

    /// The persisted form of the police-assistance answer.
    pub fn asistencia_label(&self) -> &'static str {
        if self.asistencia_policial { "Sí" } else { "No" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_label_roundtrip() {
        for weapon in WeaponType::ALL {
            let parsed: WeaponType = weapon.label().parse().unwrap();
            assert_eq!(parsed, weapon);
        }
    }

    #[test]
    fn test_weapon_unknown_label() {
        let parsed = "Catapulta".parse::<WeaponType>();
        assert!(matches!(parsed, Err(WeaponTypeError::Unknown(_))));
    }

    #[test]
    fn test_weapon_default_is_no_aplica() {
        assert_eq!(WeaponType::default(), WeaponType::NoAplica);
    }

    #[test]
    fn test_offense_record_deserializes_from_dataset_columns() {
        let json = r#"{
            "tipo_delito": "Hurto",
            "pena_establecida": "4 a 8 años",
            "limite_meses_dictar_pena": 12
        }"#;
        let record: OffenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tipo_delito, "Hurto");
        assert_eq!(record.limite_meses_dictar_pena, 12);
    }

    #[test]
    fn test_denuncia_joined_and_labels() {
        let denuncia = Denuncia {
            fecha_denuncia: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ciudad: "Bogotá".into(),
            localidad: "Chapinero".into(),
            cantidad_agresores: 2,
            asistencia_policial: true,
            tipo_arma: WeaponType::ArmaBlanca,
            delitos: vec!["Hurto".into(), "Lesiones personales".into()],
            descripcion: String::new(),
        };

        assert_eq!(denuncia.delitos_joined(), "Hurto, Lesiones personales");
        assert_eq!(denuncia.asistencia_label(), "Sí");
        assert_eq!(denuncia.tipo_arma.label(), "Arma blanca");
    }
}
