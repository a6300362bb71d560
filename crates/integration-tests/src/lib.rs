//! Integration tests for Casita Azul.
//!
//! The client and page controllers run against [`StubApi`], an in-process
//! server that speaks the listing API's wire format: bearer-token auth with
//! refresh rotation, `{"properties": [...]}` envelopes, `{"error": "..."}`
//! failures, multipart image uploads, and logical property deletion. Tests
//! need no network or external services.
//!
//! ```bash
//! cargo test -p casita-azul-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Json;
use serde_json::{Value, json};
use url::Url;

use casita_azul_client::{ApiClient, ApiConfig, MemoryStorage, SessionStore};
use casita_azul_core::{
    Agent, AgentId, CatalogItem, CatalogItemId, ImageId, Property, PropertyId, PropertyImage, Role,
};

/// One account known to the stub's auth layer.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Mutable world behind the stub's endpoints.
#[derive(Debug, Default)]
pub struct StubState {
    accounts: Vec<Account>,
    access_tokens: HashMap<String, String>,
    refresh_tokens: HashMap<String, String>,
    token_seq: u64,

    properties: Vec<Property>,
    next_property_id: i32,
    next_image_id: i32,

    agents: Vec<Agent>,
    next_agent_id: i32,

    user_fetch_failures: u32,
}

type SharedState = Arc<Mutex<StubState>>;

/// The in-process listing API.
pub struct StubApi {
    addr: SocketAddr,
    state: SharedState,
}

impl StubApi {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot bind.
    pub async fn start() -> std::io::Result<Self> {
        let state: SharedState = Arc::new(Mutex::new(StubState {
            next_property_id: 1,
            next_image_id: 1,
            next_agent_id: 1,
            ..StubState::default()
        }));

        let router = Router::new()
            .route("/api/login", post(login))
            .route("/api/register", post(register))
            .route("/api/refresh", post(refresh))
            .route("/api/logout", post(logout))
            .route("/api/user", get(current_user))
            .route("/api/propiedades", get(list_properties).post(create_property))
            .route(
                "/api/propiedades/{id}",
                get(get_property).put(update_property).delete(delete_property),
            )
            .route("/api/propiedades/{id}/imagenes", post(upload_image))
            .route(
                "/api/propiedades/{id}/imagenes/{image_id}",
                delete(delete_image),
            )
            .route(
                "/api/propiedades/{id}/imagenes/{image_id}/principal",
                put(set_principal),
            )
            .route("/api/catalogos", get(catalogs))
            .route("/api/agentes", get(list_agents).post(create_agent))
            .route("/api/agentes/{id}", put(update_agent).delete(delete_agent))
            .route("/api/admin/users", get(list_users).post(create_user))
            .route("/api/admin/users/{id}/role", put(update_role))
            .route("/api/admin/users/{id}", delete(delete_user))
            .route("/api/dashboard/stats", get(dashboard_stats))
            .route("/api/dashboard/recent-activity", get(recent_activity))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { addr, state })
    }

    /// Base URL of the stub, including the `/api` path.
    ///
    /// # Panics
    ///
    /// Never; the URL is built from a bound socket address.
    #[must_use]
    pub fn base_url(&self) -> Url {
        let raw = format!("http://{}/api", self.addr);
        Url::parse(&raw).unwrap_or_else(|_| unreachable!("socket address always parses: {raw}"))
    }

    /// Client configuration pointing at the stub, without persistence.
    #[must_use]
    pub fn config(&self) -> ApiConfig {
        let mut config = ApiConfig::new(self.base_url());
        config.session_file = None;
        config
    }

    /// A fresh transport bound to the stub.
    ///
    /// # Panics
    ///
    /// Panics when the HTTP client cannot be built.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).map_or_else(
            |e| panic!("failed to build client: {e}"),
            |client| client,
        )
    }

    /// A fresh in-memory session store over [`client`](Self::client).
    #[must_use]
    pub fn session(&self) -> (ApiClient, SessionStore) {
        let api = self.client();
        let session = SessionStore::new(api.clone(), Box::new(MemoryStorage::new()));
        (api, session)
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        lock(&self.state)
    }

    /// Register an account directly in the stub.
    pub fn seed_account(&self, email: &str, password: &str, role: Option<Role>) -> String {
        let mut state = self.lock();
        let id = format!("u-{}", state.accounts.len() + 1);
        state.accounts.push(Account {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
        id
    }

    /// Insert a property, assigning its id.
    pub fn seed_property(&self, mut property: Property) -> PropertyId {
        let mut state = self.lock();
        let id = PropertyId::new(state.next_property_id);
        state.next_property_id += 1;
        property.id = Some(id);
        state.properties.push(property);
        id
    }

    /// Insert an agent, assigning its id.
    pub fn seed_agent(&self, mut agent: Agent) -> AgentId {
        let mut state = self.lock();
        let id = AgentId::new(state.next_agent_id);
        state.next_agent_id += 1;
        agent.id = Some(id);
        state.agents.push(agent);
        id
    }

    /// Current server-side copy of a property, deleted or not.
    #[must_use]
    pub fn property(&self, id: PropertyId) -> Option<Property> {
        self.lock()
            .properties
            .iter()
            .find(|p| p.id == Some(id))
            .cloned()
    }

    /// Current server-side accounts.
    #[must_use]
    pub fn accounts(&self) -> Vec<Account> {
        self.lock().accounts.clone()
    }

    /// Number of live (not invalidated) access tokens.
    #[must_use]
    pub fn live_access_tokens(&self) -> usize {
        self.lock().access_tokens.len()
    }

    /// Make the next `count` calls to `GET /user` answer 500, simulating a
    /// backend fault between token issuance and the user lookup.
    pub fn fail_user_fetches(&self, count: u32) {
        self.lock().user_fetch_failures = count;
    }
}

fn lock(state: &SharedState) -> MutexGuard<'_, StubState> {
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Resolve the bearer token to an account, or produce the API's 401.
fn authed(state: &StubState, headers: &HeaderMap) -> Result<Account, Response> {
    let token = bearer(headers)
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "missing token"))?;
    let account_id = state
        .access_tokens
        .get(&token)
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "invalid token"))?;
    state
        .accounts
        .iter()
        .find(|a| &a.id == account_id)
        .cloned()
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "unknown account"))
}

/// Like [`authed`], but additionally requires the admin role (403 otherwise).
fn authed_admin(state: &StubState, headers: &HeaderMap) -> Result<Account, Response> {
    let account = authed(state, headers)?;
    if account.role == Some(Role::Admin) {
        Ok(account)
    } else {
        Err(api_error(StatusCode::FORBIDDEN, "admin role required"))
    }
}

fn issue_tokens(state: &mut StubState, account_id: &str) -> (String, String) {
    state.token_seq += 1;
    let access = format!("access-{}", state.token_seq);
    let refresh = format!("refresh-{}", state.token_seq);
    state
        .access_tokens
        .insert(access.clone(), account_id.to_string());
    state
        .refresh_tokens
        .insert(refresh.clone(), account_id.to_string());
    (access, refresh)
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = lock(&state);
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let Some(account) = state
        .accounts
        .iter()
        .find(|a| a.email == email && a.password == password)
        .cloned()
    else {
        return api_error(StatusCode::UNAUTHORIZED, "invalid credentials");
    };

    let (access, refresh) = issue_tokens(&mut state, &account.id);
    // Role is deliberately absent here; clients must follow up with
    // GET /user before the session counts as established.
    Json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "user": { "id": account.id, "email": account.email },
    }))
    .into_response()
}

async fn register(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = lock(&state);
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "email and password are required");
    }
    if state.accounts.iter().any(|a| a.email == email) {
        return api_error(StatusCode::CONFLICT, "account already exists");
    }

    let id = format!("u-{}", state.accounts.len() + 1);
    state.accounts.push(Account {
        id: id.clone(),
        email: email.to_string(),
        password: password.to_string(),
        role: None,
    });
    Json(json!({ "status": "created", "id": id })).into_response()
}

async fn refresh(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = lock(&state);
    let token = body
        .get("refresh_token")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let Some(account_id) = state.refresh_tokens.remove(&token) else {
        return api_error(StatusCode::UNAUTHORIZED, "invalid refresh token");
    };

    let (access, refresh) = issue_tokens(&mut state, &account_id);
    Json(json!({ "access_token": access, "refresh_token": refresh })).into_response()
}

async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = lock(&state);
    if let Some(token) = bearer(&headers) {
        state.access_tokens.remove(&token);
    }
    Json(json!({ "status": "ok" })).into_response()
}

async fn current_user(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = lock(&state);
    if state.user_fetch_failures > 0 {
        state.user_fetch_failures -= 1;
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "user lookup failed");
    }
    match authed(&state, &headers) {
        Ok(account) => Json(json!({
            "id": account.id,
            "email": account.email,
            "role": account.role,
        }))
        .into_response(),
        Err(response) => response,
    }
}

async fn list_properties(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }
    let active: Vec<&Property> = state
        .properties
        .iter()
        .filter(|p| p.deleted_at.is_none())
        .collect();
    Json(json!({ "properties": active })).into_response()
}

async fn get_property(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }
    state
        .properties
        .iter()
        .find(|p| p.id == Some(PropertyId::new(id)) && p.deleted_at.is_none())
        .map_or_else(
            || api_error(StatusCode::NOT_FOUND, "property not found"),
            |p| Json(p).into_response(),
        )
}

async fn create_property(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(mut property): Json<Property>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }
    if property.titulo.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "titulo is required");
    }

    let id = PropertyId::new(state.next_property_id);
    state.next_property_id += 1;
    property.id = Some(id);
    property.created_at = Some("2026-08-27T12:00:00".to_string());
    state.properties.push(property);
    Json(json!({ "status": "success", "id": id })).into_response()
}

async fn update_property(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(mut incoming): Json<Property>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let id = PropertyId::new(id);
    let Some(existing) = state
        .properties
        .iter_mut()
        .find(|p| p.id == Some(id) && p.deleted_at.is_none())
    else {
        return api_error(StatusCode::NOT_FOUND, "property not found");
    };

    // Full replace; images stay server-managed.
    incoming.id = Some(id);
    incoming.imagenes = existing.imagenes.clone();
    incoming.created_at = existing.created_at.clone();
    incoming.updated_at = Some("2026-08-27T12:05:00".to_string());
    *existing = incoming;
    Json(json!({ "status": "success" })).into_response()
}

async fn delete_property(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let Some(property) = state
        .properties
        .iter_mut()
        .find(|p| p.id == Some(PropertyId::new(id)) && p.deleted_at.is_none())
    else {
        return api_error(StatusCode::NOT_FOUND, "property not found");
    };
    property.deleted_at = Some("2026-08-27T12:10:00".to_string());
    Json(json!({ "status": "success" })).into_response()
}

async fn upload_image(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Response {
    let mut filename = String::new();
    let mut size = 0_usize;
    let mut es_principal = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => {
                filename = field.file_name().unwrap_or("upload").to_string();
                size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            }
            Some("es_principal") => {
                es_principal = field
                    .text()
                    .await
                    .map(|t| t == "true")
                    .unwrap_or(false);
            }
            _ => {}
        }
    }

    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }
    if filename.is_empty() || size == 0 {
        return api_error(StatusCode::BAD_REQUEST, "file is required");
    }

    let image_id = ImageId::new(state.next_image_id);
    state.next_image_id += 1;

    let Some(property) = state
        .properties
        .iter_mut()
        .find(|p| p.id == Some(PropertyId::new(id)) && p.deleted_at.is_none())
    else {
        return api_error(StatusCode::NOT_FOUND, "property not found");
    };

    if es_principal {
        for image in &mut property.imagenes {
            image.es_principal = false;
        }
    }
    let orden = i32::try_from(property.imagenes.len()).unwrap_or(i32::MAX);
    property.imagenes.push(PropertyImage {
        id: image_id,
        url: format!("http://stub.local/uploads/{id}/{filename}"),
        nombre_archivo: filename,
        es_principal,
        orden,
    });
    Json(json!({ "status": "success", "id": image_id })).into_response()
}

async fn delete_image(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((id, image_id)): Path<(i32, i32)>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let Some(property) = state
        .properties
        .iter_mut()
        .find(|p| p.id == Some(PropertyId::new(id)))
    else {
        return api_error(StatusCode::NOT_FOUND, "property not found");
    };

    let image_id = ImageId::new(image_id);
    let before = property.imagenes.len();
    property.imagenes.retain(|img| img.id != image_id);
    if property.imagenes.len() == before {
        return api_error(StatusCode::NOT_FOUND, "image not found");
    }
    Json(json!({ "status": "success" })).into_response()
}

async fn set_principal(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((id, image_id)): Path<(i32, i32)>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let Some(property) = state
        .properties
        .iter_mut()
        .find(|p| p.id == Some(PropertyId::new(id)))
    else {
        return api_error(StatusCode::NOT_FOUND, "property not found");
    };

    let image_id = ImageId::new(image_id);
    if !property.imagenes.iter().any(|img| img.id == image_id) {
        return api_error(StatusCode::NOT_FOUND, "image not found");
    }
    for image in &mut property.imagenes {
        image.es_principal = image.id == image_id;
    }
    Json(json!({ "status": "success" })).into_response()
}

async fn catalogs(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let item = CatalogItem::new;
    Json(json!({
        "tipos_negocio": [item(1, "Venta"), item(2, "Alquiler")],
        "tipos_propiedad": [item(1, "Casa"), item(2, "Departamento")],
        "estados_publicacion": [item(1, "Publicada"), item(2, "Borrador")],
        "ciudades": [item(1, "Monterrey"), item(2, "Guadalajara")],
        "monedas": [item(1, "MXN"), item(2, "USD")],
    }))
    .into_response()
}

async fn list_agents(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }
    Json(&state.agents).into_response()
}

async fn create_agent(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(mut agent): Json<Agent>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }
    if agent.nombre.trim().is_empty() || agent.email.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "nombre and email are required");
    }

    let id = AgentId::new(state.next_agent_id);
    state.next_agent_id += 1;
    agent.id = Some(id);
    state.agents.push(agent);
    Json(json!({ "status": "success", "id": id })).into_response()
}

async fn update_agent(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(mut incoming): Json<Agent>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let id = AgentId::new(id);
    let Some(existing) = state.agents.iter_mut().find(|a| a.id == Some(id)) else {
        return api_error(StatusCode::NOT_FOUND, "agent not found");
    };
    incoming.id = Some(id);
    *existing = incoming;
    Json(json!({ "status": "success" })).into_response()
}

async fn delete_agent(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let id = AgentId::new(id);
    let before = state.agents.len();
    state.agents.retain(|a| a.id != Some(id));
    if state.agents.len() == before {
        return api_error(StatusCode::NOT_FOUND, "agent not found");
    }
    Json(json!({ "status": "success" })).into_response()
}

fn account_row(account: &Account) -> Value {
    json!({
        "id": account.id,
        "email": account.email,
        "role": account.role,
        "created_at": "2026-08-01T08:00:00",
    })
}

async fn list_users(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = authed_admin(&state, &headers) {
        return response;
    }
    let rows: Vec<Value> = state.accounts.iter().map(account_row).collect();
    Json(rows).into_response()
}

async fn create_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed_admin(&state, &headers) {
        return response;
    }

    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let role = body
        .get("role")
        .and_then(Value::as_str)
        .and_then(|r| r.parse::<Role>().ok());

    if email.is_empty() || password.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "email and password are required");
    }
    if state.accounts.iter().any(|a| a.email == email) {
        return api_error(StatusCode::CONFLICT, "account already exists");
    }

    let account = Account {
        id: format!("u-{}", state.accounts.len() + 1),
        email: email.to_string(),
        password: password.to_string(),
        role,
    };
    state.accounts.push(account.clone());
    Json(account_row(&account)).into_response()
}

async fn update_role(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed_admin(&state, &headers) {
        return response;
    }

    let role = body
        .get("role")
        .and_then(Value::as_str)
        .and_then(|r| r.parse::<Role>().ok());
    let Some(account) = state.accounts.iter_mut().find(|a| a.id == id) else {
        return api_error(StatusCode::NOT_FOUND, "account not found");
    };
    account.role = role;
    Json(json!({ "status": "success" })).into_response()
}

async fn delete_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = authed_admin(&state, &headers) {
        return response;
    }

    let before = state.accounts.len();
    state.accounts.retain(|a| a.id != id);
    if state.accounts.len() == before {
        return api_error(StatusCode::NOT_FOUND, "account not found");
    }
    Json(json!({ "status": "success" })).into_response()
}

async fn dashboard_stats(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let active: Vec<&Property> = state
        .properties
        .iter()
        .filter(|p| p.deleted_at.is_none())
        .collect();
    let total = active.len() as i64;
    let publicadas = active
        .iter()
        .filter(|p| p.estado_publicacion_id == Some(CatalogItemId::new(1)))
        .count() as i64;
    let visitas: i64 = active.iter().filter_map(|p| p.visitas).sum();
    let con_imagenes = active.iter().filter(|p| !p.imagenes.is_empty()).count() as i64;
    let mas_visitada = active
        .iter()
        .max_by_key(|p| p.visitas.unwrap_or(0))
        .and_then(|p| {
            p.id.map(|id| {
                json!({
                    "id": id,
                    "titulo": p.titulo,
                    "visitas": p.visitas.unwrap_or(0),
                })
            })
        });

    Json(json!({
        "total_propiedades": total,
        "propiedades_publicadas": publicadas,
        "total_visitas": visitas,
        "propiedad_mas_visitada": mas_visitada,
        "imagenes": {
            "con_imagenes": con_imagenes,
            "sin_imagenes": total - con_imagenes,
        },
    }))
    .into_response()
}

async fn recent_activity(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = authed(&state, &headers) {
        return response;
    }

    let mut active: Vec<&Property> = state
        .properties
        .iter()
        .filter(|p| p.deleted_at.is_none())
        .collect();
    active.sort_by(|a, b| b.id.cmp(&a.id));

    let rows: Vec<Value> = active
        .iter()
        .take(5)
        .filter_map(|p| {
            p.id.map(|id| {
                json!({
                    "id": id,
                    "titulo": p.titulo,
                    "created_at": p.created_at.as_deref().unwrap_or("2026-08-27T12:00:00"),
                    "estado": "Publicada",
                })
            })
        })
        .collect();
    Json(rows).into_response()
}
