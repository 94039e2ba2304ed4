//! Sentencing estimates derived from the offense catalog.
//!
//! Recomputed fresh for every submission and held only in memory for
//! rendering; nothing here is persisted.

use crate::OffenseCatalog;
use chrono::{Days, NaiveDate};

/// Penalty line for one selected offense type. `pena` is `None` when no
/// catalog record provides a non-empty penalty for that type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondenaLine {
    pub tipo_delito: String,
    pub pena: Option<String>,
}

/// Deadline for issuing a sentence, pooled across every matched record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlazoSentencia {
    /// Smallest `limite_meses_dictar_pena` among all matched records
    pub limite_meses: u32,
    /// `fecha_denuncia + limite_meses × 30 days`
    pub fecha_limite: NaiveDate,
    /// `fecha_limite − today`; negative when the deadline already passed
    pub dias_restantes: i64,
}

/// The derived judicial estimate rendered on the summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceEstimate {
    pub condenas: Vec<CondenaLine>,
    /// `None` when no selected offense type matched any catalog record
    pub plazo: Option<PlazoSentencia>,
}

/// Computes the estimate for the selected offense types.
///
/// Per type, the penalty is the first non-empty `pena_establecida` among that
/// type's matches. The deadline is pooled: one minimum across the records
/// matched by the *whole* selection, not per type. `hoy` is injected so the
/// days-remaining arithmetic is deterministic under test.
pub fn estimate_sentencing(
    catalog: &OffenseCatalog,
    delitos: &[String],
    fecha_denuncia: NaiveDate,
    hoy: NaiveDate,
) -> SentenceEstimate {
    let matches = catalog.lookup(delitos);

    let condenas = delitos
        .iter()
        .map(|tipo| CondenaLine {
            tipo_delito: tipo.clone(),
            pena: matches
                .iter()
                .find(|r| r.tipo_delito == *tipo && !r.pena_establecida.trim().is_empty())
                .map(|r| r.pena_establecida.clone()),
        })
        .collect();

    let plazo = matches
        .iter()
        .map(|r| r.limite_meses_dictar_pena)
        .min()
        .map(|limite_meses| {
            let fecha_limite = fecha_denuncia
                .checked_add_days(Days::new(u64::from(limite_meses) * 30))
                .unwrap_or(NaiveDate::MAX);
            PlazoSentencia {
                limite_meses,
                fecha_limite,
                dias_restantes: (fecha_limite - hoy).num_days(),
            }
        });

    SentenceEstimate { condenas, plazo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoa_types::OffenseRecord;

    fn record(tipo: &str, pena: &str, meses: u32) -> OffenseRecord {
        OffenseRecord {
            tipo_delito: tipo.to_string(),
            pena_establecida: pena.to_string(),
            limite_meses_dictar_pena: meses,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pooled_minimum_across_selection() {
        let catalog = OffenseCatalog::from_records(vec![
            record("T1", "5 años", 6),
            record("T2", "2 años", 3),
        ]);
        let seleccion = vec!["T1".to_string(), "T2".to_string()];

        let estimate =
            estimate_sentencing(&catalog, &seleccion, date(2024, 1, 1), date(2024, 1, 1));

        let plazo = estimate.plazo.unwrap();
        assert_eq!(plazo.limite_meses, 3);
        assert_eq!(plazo.fecha_limite, date(2024, 1, 1) + chrono::Days::new(90));

        assert_eq!(estimate.condenas.len(), 2);
        assert_eq!(estimate.condenas[0].pena.as_deref(), Some("5 años"));
        assert_eq!(estimate.condenas[1].pena.as_deref(), Some("2 años"));
    }

    #[test]
    fn test_unmatched_type_gets_no_pena_and_no_plazo() {
        let catalog = OffenseCatalog::from_records(vec![record("Hurto", "4 a 8 años", 12)]);
        let seleccion = vec!["Secuestro".to_string()];

        let estimate =
            estimate_sentencing(&catalog, &seleccion, date(2024, 1, 1), date(2024, 1, 1));

        assert_eq!(estimate.condenas.len(), 1);
        assert_eq!(estimate.condenas[0].pena, None);
        assert!(estimate.plazo.is_none());
    }

    #[test]
    fn test_unmatched_type_does_not_affect_pooled_minimum() {
        let catalog = OffenseCatalog::from_records(vec![record("Hurto", "4 a 8 años", 12)]);
        let seleccion = vec!["Hurto".to_string(), "Secuestro".to_string()];

        let estimate =
            estimate_sentencing(&catalog, &seleccion, date(2024, 1, 1), date(2024, 1, 1));

        assert_eq!(estimate.plazo.unwrap().limite_meses, 12);
        assert_eq!(estimate.condenas[1].pena, None);
    }

    #[test]
    fn test_first_non_empty_pena_wins() {
        let catalog = OffenseCatalog::from_records(vec![
            record("Hurto", "", 12),
            record("Hurto", "4 a 8 años", 9),
            record("Hurto", "2 a 4 años", 15),
        ]);
        let seleccion = vec!["Hurto".to_string()];

        let estimate =
            estimate_sentencing(&catalog, &seleccion, date(2024, 1, 1), date(2024, 1, 1));

        assert_eq!(estimate.condenas[0].pena.as_deref(), Some("4 a 8 años"));
        // The empty-penalty record still participates in the pooled deadline.
        assert_eq!(estimate.plazo.unwrap().limite_meses, 9);
    }

    #[test]
    fn test_days_remaining_can_be_negative() {
        let catalog = OffenseCatalog::from_records(vec![record("Hurto", "4 a 8 años", 1)]);
        let seleccion = vec!["Hurto".to_string()];

        // Deadline 30 days after the complaint, observed 60 days later.
        let estimate =
            estimate_sentencing(&catalog, &seleccion, date(2024, 1, 1), date(2024, 3, 1));

        let plazo = estimate.plazo.unwrap();
        assert_eq!(plazo.fecha_limite, date(2024, 1, 31));
        assert_eq!(plazo.dias_restantes, -30);
    }

    #[test]
    fn test_days_remaining_counts_from_today() {
        let catalog = OffenseCatalog::from_records(vec![record("Hurto", "4 a 8 años", 2)]);
        let seleccion = vec!["Hurto".to_string()];

        let estimate =
            estimate_sentencing(&catalog, &seleccion, date(2024, 1, 1), date(2024, 1, 11));

        let plazo = estimate.plazo.unwrap();
        assert_eq!(plazo.fecha_limite, date(2024, 3, 1));
        assert_eq!(plazo.dias_restantes, 50);
    }
}
