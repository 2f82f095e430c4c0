use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use swasthya_core::config::namespace_from_env_value;
use swasthya_core::constants::DEFAULT_DATA_DIR;
use swasthya_core::guard::{self, Decision, Requirement};
use swasthya_core::{
    AuthGate, CoreConfig, Doctor, DomainStore, EmergencyQuery, NationalId, Patient, Role,
    SearchFilters, StoreError,
};

/// Application state shared across REST API handlers.
///
/// The store and the gate follow the core's single-user, run-to-completion
/// model: one lock each, taken for the duration of a handler.
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<DomainStore>>,
    gate: Arc<Mutex<AuthGate>>,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
struct LoginReq {
    /// National ID for patients, record id for doctors and admins
    identifier: String,
    password: String,
    /// One of "patient", "doctor", "admin"
    #[schema(value_type = String)]
    role: Role,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
struct SessionRes {
    #[schema(value_type = String)]
    role: Role,
    user_id: String,
    name: String,
    hospital: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        logout,
        session,
        update_profile,
        list_patients,
        create_patient,
        get_patient,
        update_patient,
        delete_patient,
        list_doctors,
        create_doctor,
        get_doctor,
        update_doctor,
        delete_doctor,
        emergency_lookup
    ),
    components(schemas(HealthRes, LoginReq, SessionRes))
)]
struct ApiDoc;

/// Main entry point for the Swasthya REST server.
///
/// # Environment Variables
/// - `SWASTHYA_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SWASTHYA_DATA_DIR`: Directory for store data (default: "swasthya_data")
/// - `SWASTHYA_NAMESPACE`: Snapshot namespace (default: "swasthya.dev.1")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swasthya=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SWASTHYA_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir =
        std::env::var("SWASTHYA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let namespace = namespace_from_env_value(std::env::var("SWASTHYA_NAMESPACE").ok())?;

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(data_dir), namespace)?);
    let store = DomainStore::initialise(cfg)?;

    tracing::info!("++ Starting Swasthya REST on {}", addr);

    let app = app(AppState {
        store: Arc::new(Mutex::new(store)),
        gate: Arc::new(Mutex::new(AuthGate::new())),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .route("/profile", put(update_profile))
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route("/emergency/:national_id", get(emergency_lookup))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, String);

fn store_error_response(e: StoreError) -> ApiError {
    match e {
        StoreError::InvalidInput(_)
        | StoreError::DuplicateId(_)
        | StoreError::DuplicateNationalId(_)
        | StoreError::TooManyEmergencyContacts { .. }
        | StoreError::Text(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        other => {
            tracing::error!("store operation failed: {other}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

/// Checks the session against a view requirement, mapping a redirect
/// decision to 401 with the login route a browser client would go to.
async fn require(state: &AppState, requirement: Requirement) -> Result<(), ApiError> {
    let gate = state.gate.lock().await;
    match guard::decide(gate.current(), requirement) {
        Decision::Render => Ok(()),
        Decision::Redirect(route) => Err((
            StatusCode::UNAUTHORIZED,
            format!("authentication required, log in at {route}"),
        )),
    }
}

/// Render if either requirement passes (doctor-or-admin edit paths).
async fn require_any(
    state: &AppState,
    requirements: &[Requirement],
) -> Result<(), ApiError> {
    let gate = state.gate.lock().await;
    for requirement in requirements {
        if guard::decide(gate.current(), *requirement) == Decision::Render {
            return Ok(());
        }
    }
    Err((
        StatusCode::UNAUTHORIZED,
        "authentication required".to_string(),
    ))
}

fn session_response(gate: &AuthGate) -> Option<SessionRes> {
    gate.current().map(|s| SessionRes {
        role: s.role,
        user_id: s.user.id().to_string(),
        name: s.user.name().to_string(),
        hospital: s.user.hospital().to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Swasthya is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Session established", body = SessionRes),
        (status = 401, description = "Invalid credentials")
    )
)]
/// Authenticate under a role and establish the process session.
///
/// Patients are matched by national ID, doctors and admins by record id.
/// A failed attempt leaves any existing session unchanged.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<SessionRes>, ApiError> {
    let store = state.store.lock().await;
    let mut gate = state.gate.lock().await;

    if gate.login(&store, &req.identifier, &req.password, req.role) {
        Ok(Json(
            session_response(&gate).expect("session set on successful login"),
        ))
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid credentials".into()))
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    )
)]
/// Clear the session unconditionally.
async fn logout(State(state): State<AppState>) -> StatusCode {
    state.gate.lock().await.logout();
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Active session", body = SessionRes),
        (status = 401, description = "No active session")
    )
)]
/// Describe the current session, if any.
async fn session(State(state): State<AppState>) -> Result<Json<SessionRes>, ApiError> {
    let gate = state.gate.lock().await;
    session_response(&gate)
        .map(Json)
        .ok_or((StatusCode::UNAUTHORIZED, "no active session".into()))
}

#[utoipa::path(
    put,
    path = "/profile",
    request_body = Object,
    responses(
        (status = 200, description = "Profile replaced, session refreshed"),
        (status = 400, description = "Record is not the current user's"),
        (status = 401, description = "Patient session required")
    )
)]
/// Replace the logged-in patient's own record and refresh the session's
/// view of it. Requires a patient session.
async fn update_profile(
    State(state): State<AppState>,
    Json(patient): Json<Patient>,
) -> Result<StatusCode, ApiError> {
    require(&state, Requirement::Role(Role::Patient)).await?;
    let mut store = state.store.lock().await;
    let mut gate = state.gate.lock().await;
    gate.update_current_profile(&mut store, patient)
        .map_err(store_error_response)?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/patients",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("national_id" = Option<String>, Query, description = "Exact national ID"),
        ("patient_id" = Option<String>, Query, description = "Exact record id"),
        ("phone" = Option<String>, Query, description = "Exact phone number"),
        ("blood_group" = Option<String>, Query, description = "Exact blood group"),
        ("hospital" = Option<String>, Query, description = "Exact hospital name")
    ),
    responses(
        (status = 200, description = "Matching patients", body = Object),
        (status = 401, description = "Authentication required")
    )
)]
/// List patients, optionally filtered. Requires any authenticated session.
async fn list_patients(
    State(state): State<AppState>,
    axum::extract::Query(filters): axum::extract::Query<SearchFilters>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    require(&state, Requirement::AnyAuthenticated).await?;
    let store = state.store.lock().await;
    Ok(Json(
        store.search_patients(&filters).into_iter().cloned().collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = Object,
    responses(
        (status = 201, description = "Patient created"),
        (status = 400, description = "Duplicate identifier or invalid record"),
        (status = 401, description = "Admin session required")
    )
)]
/// Create a patient record. Requires an admin session.
async fn create_patient(
    State(state): State<AppState>,
    Json(patient): Json<Patient>,
) -> Result<StatusCode, ApiError> {
    require(&state, Requirement::Role(Role::Admin)).await?;
    let mut store = state.store.lock().await;
    store.add_patient(patient).map_err(store_error_response)?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient record id")),
    responses(
        (status = 200, description = "Patient record", body = Object),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No such patient")
    )
)]
/// Fetch one patient by id. Requires any authenticated session.
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    require(&state, Requirement::AnyAuthenticated).await?;
    let store = state.store.lock().await;
    store
        .patient(&id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("no patient with id {id}")))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient record id")),
    request_body = Object,
    responses(
        (status = 200, description = "Patient replaced"),
        (status = 204, description = "No matching record, nothing replaced"),
        (status = 400, description = "Id mismatch or invalid record"),
        (status = 401, description = "Doctor or admin session required")
    )
)]
/// Replace a patient record whole. Requires a doctor or admin session.
///
/// An unknown id is the store's silent no-op, reported as 204.
async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patient): Json<Patient>,
) -> Result<StatusCode, ApiError> {
    require_any(
        &state,
        &[
            Requirement::Role(Role::Doctor),
            Requirement::Role(Role::Admin),
        ],
    )
    .await?;
    if patient.id != id {
        return Err((
            StatusCode::BAD_REQUEST,
            "record id does not match path".into(),
        ));
    }
    let mut store = state.store.lock().await;
    let replaced = store.update_patient(patient).map_err(store_error_response)?;
    Ok(if replaced {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    })
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient record id")),
    responses(
        (status = 200, description = "Patient removed"),
        (status = 204, description = "No matching record"),
        (status = 401, description = "Admin session required")
    )
)]
/// Delete a patient by id. Requires an admin session. Idempotent.
async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&state, Requirement::Role(Role::Admin)).await?;
    let mut store = state.store.lock().await;
    let removed = store.delete_patient(&id).map_err(store_error_response)?;
    Ok(if removed {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    })
}

#[utoipa::path(
    get,
    path = "/doctors",
    responses(
        (status = 200, description = "All doctors", body = Object),
        (status = 401, description = "Authentication required")
    )
)]
/// List all doctors. Requires any authenticated session.
async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>, ApiError> {
    require(&state, Requirement::AnyAuthenticated).await?;
    let store = state.store.lock().await;
    Ok(Json(store.doctors().to_vec()))
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = Object,
    responses(
        (status = 201, description = "Doctor created"),
        (status = 400, description = "Duplicate id or invalid record"),
        (status = 401, description = "Admin session required")
    )
)]
/// Create a doctor record. Requires an admin session.
async fn create_doctor(
    State(state): State<AppState>,
    Json(doctor): Json<Doctor>,
) -> Result<StatusCode, ApiError> {
    require(&state, Requirement::Role(Role::Admin)).await?;
    let mut store = state.store.lock().await;
    store.add_doctor(doctor).map_err(store_error_response)?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = String, Path, description = "Doctor record id")),
    responses(
        (status = 200, description = "Doctor record", body = Object),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No such doctor")
    )
)]
/// Fetch one doctor by id. Requires any authenticated session.
async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    require(&state, Requirement::AnyAuthenticated).await?;
    let store = state.store.lock().await;
    store
        .doctor(&id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("no doctor with id {id}")))
}

#[utoipa::path(
    put,
    path = "/doctors/{id}",
    params(("id" = String, Path, description = "Doctor record id")),
    request_body = Object,
    responses(
        (status = 200, description = "Doctor replaced"),
        (status = 204, description = "No matching record, nothing replaced"),
        (status = 400, description = "Id mismatch or invalid record"),
        (status = 401, description = "Admin session required")
    )
)]
/// Replace a doctor record whole. Requires an admin session.
async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(doctor): Json<Doctor>,
) -> Result<StatusCode, ApiError> {
    require(&state, Requirement::Role(Role::Admin)).await?;
    if doctor.id != id {
        return Err((
            StatusCode::BAD_REQUEST,
            "record id does not match path".into(),
        ));
    }
    let mut store = state.store.lock().await;
    let replaced = store.update_doctor(doctor).map_err(store_error_response)?;
    Ok(if replaced {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    })
}

#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    params(("id" = String, Path, description = "Doctor record id")),
    responses(
        (status = 200, description = "Doctor removed"),
        (status = 204, description = "No matching record"),
        (status = 401, description = "Admin session required")
    )
)]
/// Delete a doctor by id. Requires an admin session. Idempotent.
async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&state, Requirement::Role(Role::Admin)).await?;
    let mut store = state.store.lock().await;
    let removed = store.delete_doctor(&id).map_err(store_error_response)?;
    Ok(if removed {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    })
}

#[utoipa::path(
    get,
    path = "/emergency/{national_id}",
    params(("national_id" = String, Path, description = "Ten-digit national ID")),
    responses(
        (status = 200, description = "Critical patient data", body = Object),
        (status = 400, description = "Malformed national ID"),
        (status = 404, description = "No matching patient")
    )
)]
/// Emergency critical-data lookup by national ID. Unauthenticated by design:
/// this is the first-responder path.
async fn emergency_lookup(
    State(state): State<AppState>,
    Path(national_id): Path<String>,
) -> Result<Json<swasthya_core::EmergencySummary>, ApiError> {
    let nid = NationalId::parse(&national_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let store = state.store.lock().await;
    store
        .emergency_lookup(&EmergencyQuery::NationalId(nid))
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("no patient with national ID {national_id}"),
        ))
}
