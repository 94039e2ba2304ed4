//! HTML rendering for the intake surface.
//!
//! Every page is assembled server-side as a plain string; user-supplied text
//! is escaped before interpolation. The layout mirrors the fiscalía intake
//! look: header with optional logo, centred column, card-style sections.

use chrono::NaiveDate;
use spoa_core::constants::{PENA_NO_ENCONTRADA, PLAZO_NO_DISPONIBLE};
use spoa_core::{SentenceEstimate, StoredDenuncia};
use spoa_types::{Denuncia, WeaponType};

fn esc(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Shared page skeleton.
fn layout(body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Sistema Judicial SPOA</title>
<style>
body {{ font-family: sans-serif; max-width: 860px; margin: 0 auto; padding: 0 16px; color: #212121; }}
.titulo-logo {{ display: flex; align-items: center; justify-content: center; gap: 32px; margin: 24px 0; }}
.titulo-logo img {{ height: 80px; }}
.titulo-logo-text {{ font-size: 2.2rem; font-weight: bold; color: #1a237e; text-align: center; }}
.titulo-logo-text span {{ font-size: 1.2rem; font-weight: normal; }}
.cardilla {{ border: 1px solid #c5cae9; border-radius: 8px; padding: 16px 24px; margin: 16px 0; }}
.error {{ background: #ffebee; border: 1px solid #ef9a9a; padding: 12px; border-radius: 6px; }}
.exito {{ background: #e8f5e9; border: 1px solid #a5d6a7; padding: 12px; border-radius: 6px; }}
.info {{ background: #e3f2fd; border: 1px solid #90caf9; padding: 12px; border-radius: 6px; }}
.columnas {{ display: flex; gap: 24px; }}
.columnas > div {{ flex: 1; }}
label {{ display: block; margin-top: 12px; font-weight: bold; }}
input, select, textarea {{ width: 100%; box-sizing: border-box; padding: 6px; margin-top: 4px; }}
button {{ margin-top: 16px; padding: 10px 24px; background: #1a237e; color: white; border: none; border-radius: 6px; cursor: pointer; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #c5cae9; padding: 6px 10px; text-align: left; }}
th {{ background: #e8eaf6; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

fn header(logo_base64: Option<&str>) -> String {
    let logo = match logo_base64 {
        Some(b64) => format!(
            r#"<img src="data:image/png;base64,{b64}" alt="Logo Fiscalía" />"#
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="titulo-logo">
  {logo}
  <div class="titulo-logo-text">
    ⚖️ Sistema Judicial SPOA<br>
    <span>Bienvenido al sistema de gestión de denuncias judiciales</span>
  </div>
</div>"#
    )
}

/// The intake form page.
pub fn intake_page(logo_base64: Option<&str>, delitos: &[&str], hoy: NaiveDate) -> String {
    let delito_options: String = delitos
        .iter()
        .map(|d| format!(r#"<option value="{0}">{0}</option>"#, esc(d)))
        .collect();

    let arma_options: String = WeaponType::ALL
        .iter()
        .map(|w| {
            let selected = if *w == WeaponType::default() {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{0}"{selected}>{0}</option>"#, w.label())
        })
        .collect();

    let body = format!(
        r#"{header}
<h2>📄 Formulario de denuncia</h2>
<form method="post" action="/denuncias">
  <div class="columnas">
    <div>
      <label for="fecha_denuncia">Fecha de denuncia</label>
      <input type="date" id="fecha_denuncia" name="fecha_denuncia" value="{hoy}">
      <label for="ciudad">Ciudad</label>
      <input type="text" id="ciudad" name="ciudad">
      <label for="localidad">Localidad de la ciudad</label>
      <input type="text" id="localidad" name="localidad">
      <label for="cantidad_agresores">Cantidad de agresores</label>
      <input type="number" id="cantidad_agresores" name="cantidad_agresores" min="1" step="1" value="1">
      <label>¿Se obtuvo asistencia policial?</label>
      <label><input type="radio" name="asistencia_policial" value="Sí" checked> Sí</label>
      <label><input type="radio" name="asistencia_policial" value="No"> No</label>
    </div>
    <div>
      <label for="delitos">Delitos presentes en la denuncia</label>
      <select id="delitos" name="delitos" multiple size="8">{delito_options}</select>
      <label for="tipo_arma">Tipo de arma usada</label>
      <select id="tipo_arma" name="tipo_arma">{arma_options}</select>
      <label for="api_key">🔐 Clave API de Gemini (opcional)</label>
      <input type="password" id="api_key" name="api_key" autocomplete="off">
    </div>
  </div>
  <label for="descripcion">Descripción de la denuncia</label>
  <textarea id="descripcion" name="descripcion" rows="5"></textarea>
  <button type="submit">Registrar denuncia</button>
</form>
<p><a href="/denuncias">📁 Consultar denuncias registradas</a></p>"#,
        header = header(logo_base64),
    );
    layout(&body)
}

/// Inline validation failure: nothing was computed or persisted.
pub fn validation_error_page(logo_base64: Option<&str>, message: &str) -> String {
    let body = format!(
        r#"{header}
<div class="error">{message}</div>
<p><a href="/">Volver al formulario</a></p>"#,
        header = header(logo_base64),
        message = esc(message),
    );
    layout(&body)
}

/// What the analysis section of the summary should show.
pub enum AnalysisSection {
    /// No API key supplied; show the informational prompt
    NotRequested,
    /// Text returned by the analysis service, rendered verbatim (this
    /// includes embedded error bodies)
    Text(String),
}

/// The post-submission summary card, analysis section and persistence
/// confirmation (or the storage error, when the append failed).
pub fn summary_page(
    logo_base64: Option<&str>,
    denuncia: &Denuncia,
    estimate: &SentenceEstimate,
    analysis: &AnalysisSection,
    storage_error: Option<&str>,
) -> String {
    let condenas: String = estimate
        .condenas
        .iter()
        .map(|c| {
            format!(
                "{}: {}<br>",
                esc(&c.tipo_delito),
                esc(c.pena.as_deref().unwrap_or(PENA_NO_ENCONTRADA))
            )
        })
        .collect();

    let plazo = match &estimate.plazo {
        Some(p) => format!(
            "{} días (plazo máximo: {} meses desde la denuncia)",
            p.dias_restantes, p.limite_meses
        ),
        None => PLAZO_NO_DISPONIBLE.to_string(),
    };

    let analysis_html = match analysis {
        AnalysisSection::NotRequested => r#"<div class="info">Ingrese su clave API para obtener el análisis de Gemini.</div>"#.to_string(),
        AnalysisSection::Text(text) => format!(
            r#"<h4>🧠 Análisis de Gemini para la denuncia</h4><p>{}</p>"#,
            esc(text)
        ),
    };

    let persistence_html = match storage_error {
        None => r#"<div class="exito">Denuncia registrada y guardada correctamente.</div>"#.to_string(),
        Some(e) => format!(
            r#"<div class="error">No fue posible guardar la denuncia: {}</div>"#,
            esc(e)
        ),
    };

    let body = format!(
        r#"{header}
<div class="exito">Denuncia registrada correctamente.</div>
<div class="cardilla">
<h3>📋 Resumen de la denuncia</h3>
<ul>
  <li><strong>Fecha de denuncia:</strong> {fecha}</li>
  <li><strong>Ciudad:</strong> {ciudad}</li>
  <li><strong>Localidad:</strong> {localidad}</li>
  <li><strong>Cantidad de agresores:</strong> {cantidad}</li>
  <li><strong>Tipo de arma usada:</strong> {arma}</li>
  <li><strong>Asistencia policial:</strong> {asistencia}</li>
  <li><strong>Delitos presentes:</strong> {delitos}</li>
  <li><strong>Descripción:</strong> {descripcion}</li>
</ul>
<h4>🔎 Análisis judicial</h4>
<ul>
  <li><strong>Tiempo estimado de condena por delito:</strong><br> {condenas}</li>
  <li><strong>Plazo para dictar sentencia:</strong> {plazo}</li>
</ul>
</div>
{analysis_html}
{persistence_html}
<p><a href="/">Registrar otra denuncia</a> · <a href="/denuncias">Ver denuncias</a></p>"#,
        header = header(logo_base64),
        fecha = denuncia.fecha_denuncia,
        ciudad = esc(&denuncia.ciudad),
        localidad = esc(&denuncia.localidad),
        cantidad = denuncia.cantidad_agresores,
        arma = denuncia.tipo_arma.label(),
        asistencia = denuncia.asistencia_label(),
        delitos = esc(&denuncia.delitos_joined()),
        descripcion = esc(&denuncia.descripcion),
        plazo = esc(&plazo),
    );
    layout(&body)
}

/// The registered-denuncias table, or the empty-state message.
pub fn denuncias_page(logo_base64: Option<&str>, rows: &[StoredDenuncia]) -> String {
    let content = if rows.is_empty() {
        r#"<div class="info">No hay denuncias registradas aún.</div>"#.to_string()
    } else {
        let body_rows: String = rows
            .iter()
            .map(|r| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    esc(&r.fecha_denuncia),
                    esc(&r.ciudad),
                    esc(&r.localidad),
                    esc(&r.cantidad_agresores),
                    esc(&r.asistencia_policial),
                    esc(&r.delitos),
                    esc(&r.tipo_arma),
                    esc(&r.descripcion),
                )
            })
            .collect();
        format!(
            r#"<table>
<tr><th>Fecha</th><th>Ciudad</th><th>Localidad</th><th>Agresores</th><th>Asistencia policial</th><th>Delitos</th><th>Arma</th><th>Descripción</th></tr>
{body_rows}
</table>"#
        )
    };

    let body = format!(
        r#"{header}
<h2>📋 Repositorio de denuncias registradas</h2>
{content}
<p><a href="/">Volver al formulario</a></p>"#,
        header = header(logo_base64),
    );
    layout(&body)
}

/// Generic recoverable-error page (storage failures on the listing path).
pub fn error_page(logo_base64: Option<&str>, message: &str) -> String {
    let body = format!(
        r#"{header}
<div class="error">{message}</div>
<p><a href="/">Volver al formulario</a></p>"#,
        header = header(logo_base64),
        message = esc(message),
    );
    layout(&body)
}
