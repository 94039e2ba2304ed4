use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::get,
};
use base64::Engine as _;
use chrono::Local;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use spoa_analysis::{GeminiClient, GeminiConfig};
use spoa_core::{CoreConfig, DenunciaStore, OffenseCatalog, StoredDenuncia, estimate_sentencing};

mod form;
mod pages;

use form::{FormError, IntakeSubmission};
use pages::AnalysisSection;

/// Application state shared across handlers
///
/// The offense catalog is loaded once at startup and injected here; handlers
/// never reload it. The Gemini client is shared for connection reuse.
#[derive(Clone)]
struct AppState {
    catalog: Arc<OffenseCatalog>,
    store: DenunciaStore,
    gemini: Arc<GeminiClient>,
    logo_base64: Arc<Option<String>>,
}

impl AppState {
    fn logo(&self) -> Option<&str> {
        self.logo_base64.as_ref().as_deref()
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
struct DenunciaRow {
    fecha_denuncia: String,
    ciudad: String,
    localidad: String,
    cantidad_agresores: String,
    asistencia_policial: String,
    delitos: String,
    tipo_arma: String,
    descripcion: String,
}

impl From<StoredDenuncia> for DenunciaRow {
    fn from(row: StoredDenuncia) -> Self {
        Self {
            fecha_denuncia: row.fecha_denuncia,
            ciudad: row.ciudad,
            localidad: row.localidad,
            cantidad_agresores: row.cantidad_agresores,
            asistencia_policial: row.asistencia_policial,
            delitos: row.delitos,
            tipo_arma: row.tipo_arma,
            descripcion: row.descripcion,
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
struct ListDenunciasRes {
    denuncias: Vec<DenunciaRow>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, api_denuncias),
    components(schemas(HealthRes, ListDenunciasRes, DenunciaRow))
)]
struct ApiDoc;

/// Main entry point for the SPOA intake application
///
/// Starts the web server that renders the denuncia form, computes the
/// derived judicial estimates, optionally requests a Gemini analysis and
/// appends submissions to the denuncia log.
///
/// # Environment Variables
/// - `SPOA_ADDR`: server address (default: "0.0.0.0:3000")
/// - `SPOA_DATA_PATH`: offense reference dataset (default: "data/spoa.csv")
/// - `SPOA_DENUNCIAS_PATH`: denuncia log (default: "denuncias_registradas.csv")
/// - `SPOA_LOGO_PATH`: optional fiscalía logo embedded in the page header
/// - `GEMINI_API_URL`: override of the Gemini base URL (tests/self-hosting)
///
/// # Returns
/// * `Ok(())` - If the server runs to completion
/// * `Err(anyhow::Error)` - If startup fails, including a missing or
///   malformed offense dataset (fatal: the form cannot render without it)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("spoa=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SPOA_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let core_config = CoreConfig::from_env_values(
        std::env::var("SPOA_DATA_PATH").ok(),
        std::env::var("SPOA_DENUNCIAS_PATH").ok(),
    )?;
    let catalog = OffenseCatalog::load(core_config.data_path())?;
    let store = DenunciaStore::new(core_config.denuncias_path().to_path_buf());

    let gemini_config = match std::env::var("GEMINI_API_URL") {
        Ok(base_url) => GeminiConfig {
            base_url,
            ..GeminiConfig::default()
        },
        Err(_) => GeminiConfig::default(),
    };
    let gemini = GeminiClient::new(gemini_config)?;

    let logo_base64 = load_logo(std::env::var("SPOA_LOGO_PATH").ok());

    tracing::info!("++ Starting SPOA intake on {}", addr);

    let app = Router::new()
        .route("/", get(intake_form))
        .route("/denuncias", get(list_denuncias).post(submit_denuncia))
        .route("/health", get(health))
        .route("/api/denuncias", get(api_denuncias))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState {
            catalog: Arc::new(catalog),
            store,
            gemini: Arc::new(gemini),
            logo_base64: Arc::new(logo_base64),
        });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reads and base64-encodes the logo so pages can embed it inline. A missing
/// or unreadable logo is not an error; the header simply renders without it.
fn load_logo(path: Option<String>) -> Option<String> {
    let path = path?;
    match std::fs::read(&path) {
        Ok(bytes) => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        Err(e) => {
            tracing::warn!("could not read logo at {}: {}", path, e);
            None
        }
    }
}

/// Renders the intake form with the offense choices from the catalog.
async fn intake_form(State(state): State<AppState>) -> Html<String> {
    let hoy = Local::now().date_naive();
    Html(pages::intake_page(
        state.logo(),
        &state.catalog.distinct_offense_types(),
        hoy,
    ))
}

/// Handles a form submission: validate, estimate, optionally analyze,
/// persist, and render the summary.
///
/// The multi-select posts repeated `delitos` keys, so the body is taken as
/// raw pairs and bound by [`IntakeSubmission::from_pairs`]. An empty offense
/// selection aborts the pass before anything is computed or persisted. A
/// storage failure on the final append is rendered inline; the session
/// continues.
async fn submit_denuncia(
    State(state): State<AppState>,
    axum::extract::Form(pairs): axum::extract::Form<Vec<(String, String)>>,
) -> Html<String> {
    let hoy = Local::now().date_naive();

    let submission = match IntakeSubmission::from_pairs(&pairs, hoy) {
        Ok(submission) => submission,
        Err(e @ FormError::EmptyDelitos) => {
            tracing::warn!("submission rejected: empty offense selection");
            return Html(pages::validation_error_page(state.logo(), &e.to_string()));
        }
        Err(e) => {
            tracing::warn!("submission rejected: {}", e);
            return Html(pages::validation_error_page(
                state.logo(),
                &format!("Entrada no válida: {}", e),
            ));
        }
    };

    let denuncia = submission.denuncia;
    let estimate = estimate_sentencing(
        &state.catalog,
        &denuncia.delitos,
        denuncia.fecha_denuncia,
        hoy,
    );

    let analysis = match &submission.api_key {
        None => AnalysisSection::NotRequested,
        Some(api_key) => {
            let prompt = format!(
                "Analiza la siguiente denuncia judicial y proporciona un resumen, \
                 posibles recomendaciones y riesgos legales:\n{}",
                denuncia.descripcion
            );
            match state.gemini.analyze(api_key, &prompt).await {
                Ok(text) => AnalysisSection::Text(text),
                Err(e) => {
                    tracing::error!("Gemini analysis failed: {}", e);
                    AnalysisSection::Text(format!("Error: {}", e))
                }
            }
        }
    };

    let storage_error = match state.store.append(&denuncia) {
        Ok(()) => None,
        Err(e) => {
            tracing::error!("failed to append denuncia: {}", e);
            Some(e.to_string())
        }
    };

    Html(pages::summary_page(
        state.logo(),
        &denuncia,
        &estimate,
        &analysis,
        storage_error.as_deref(),
    ))
}

/// Renders every registered denuncia as a table, or the empty-state message.
async fn list_denuncias(State(state): State<AppState>) -> Html<String> {
    match state.store.read_all() {
        Ok(rows) => Html(pages::denuncias_page(state.logo(), &rows)),
        Err(e) => {
            tracing::error!("failed to read denuncia log: {}", e);
            Html(pages::error_page(
                state.logo(),
                &format!("No fue posible leer las denuncias registradas: {}", e),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Used for monitoring and load balancer health checks.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "SPOA is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/denuncias",
    responses(
        (status = 200, description = "List of registered denuncias", body = ListDenunciasRes),
        (status = 500, description = "Internal server error")
    )
)]
/// List all registered denuncias as JSON
///
/// Returns the denuncia log rows in append order, each field as the raw
/// string stored in the log.
async fn api_denuncias(
    State(state): State<AppState>,
) -> Result<Json<ListDenunciasRes>, (StatusCode, &'static str)> {
    match state.store.read_all() {
        Ok(rows) => Ok(Json(ListDenunciasRes {
            denuncias: rows.into_iter().map(DenunciaRow::from).collect(),
        })),
        Err(e) => {
            tracing::error!("failed to read denuncia log: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}
