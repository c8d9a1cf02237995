//! In-process mock of the pet tracker REST API, served on an ephemeral port.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use models::{Animal, AnimalType, Chicken, Vaccination};
use serde_json::json;
use service::auth::domain::LoginInput;
use service::session::{mock::MemorySessionStore, SessionStore};
use service::ApiClient;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct MockState {
    pub animals: HashMap<String, Animal>,
    pub chickens: HashMap<String, Chicken>,
    pub sessions: HashSet<String>,
    pub uploads: Vec<(String, String, usize)>,
    next_id: u32,
}

impl MockState {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("id{}", self.next_id)
    }
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct TestApp {
    pub base_url: String,
    pub state: Shared,
}

impl TestApp {
    pub fn api_config(&self) -> configs::ApiConfig {
        configs::ApiConfig {
            base_url: self.base_url.clone(),
            image_base_url: "http://img.local".into(),
            ..Default::default()
        }
    }

    /// Client with an in-memory session store.
    pub async fn client(&self, session: Arc<MemorySessionStore>) -> anyhow::Result<ApiClient> {
        let store: Arc<dyn SessionStore> = session;
        Ok(ApiClient::new(&self.api_config(), store).await?)
    }

    pub fn seed_animal(&self, animal: Animal) -> String {
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        st.animals.insert(id.clone(), Animal { id: id.clone(), ..animal });
        id
    }

    pub fn seed_chicken(&self, chicken: Chicken) -> String {
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        st.chickens.insert(id.clone(), Chicken { id: id.clone(), ..chicken });
        id
    }

    /// Forget every server-side session, as an expiry would.
    pub fn expire_sessions(&self) {
        self.state.lock().unwrap().sessions.clear();
    }
}

pub async fn start_server() -> anyhow::Result<TestApp> {
    let state: Shared = Arc::new(Mutex::new(MockState::default()));
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/cats", get(list_cats))
        .route("/dogs", get(list_dogs))
        .route("/chickens", get(list_chickens).post(insert_chicken))
        .route("/animal", post(insert_animal))
        .route("/animal/:id", get(get_animal).put(update_animal).delete(delete_animal))
        .route("/animal/:id/vaccinations/add", post(add_vaccinations))
        .route("/animal/:id/vaccinations/delete", post(delete_vaccination))
        .route("/chicken/:id", get(get_chicken).put(update_chicken).delete(delete_chicken))
        .route("/chicken/:id/vaccinations/add", post(add_chicken_vaccinations))
        .route("/chicken/:id/vaccinations/delete", post(delete_chicken_vaccination))
        .route("/image/:id", post(upload_image))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("mock server error: {}", e); }
    });

    Ok(TestApp { base_url, state })
}

fn session_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix("session_token="))
        .map(str::to_string)
        .next()
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    session_of(headers).is_some_and(|id| state.lock().unwrap().sessions.contains(&id))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

async fn login(State(state): State<Shared>, Json(input): Json<LoginInput>) -> Response {
    if input.password != PASSWORD {
        return unauthorized();
    }
    let id = {
        let mut st = state.lock().unwrap();
        let id = format!("sess-{}", st.next_id());
        st.sessions.insert(id.clone());
        id
    };
    (
        [(header::SET_COOKIE, format!("session_token={id}; Path=/; SameSite=Lax"))],
        Json(json!({"sessionId": id})),
    )
        .into_response()
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let Some(id) = session_of(&headers) else {
        return unauthorized();
    };
    if !state.lock().unwrap().sessions.remove(&id) {
        return unauthorized();
    }
    Json(json!({"status": "ok"})).into_response()
}

fn list_of(state: &Shared, kind: AnimalType) -> Json<Vec<Animal>> {
    let st = state.lock().unwrap();
    let mut animals: Vec<Animal> = st.animals.values().filter(|a| a.kind == Some(kind)).cloned().collect();
    animals.sort_by(|a, b| a.id.cmp(&b.id));
    Json(animals)
}

async fn list_cats(State(state): State<Shared>) -> Json<Vec<Animal>> { list_of(&state, AnimalType::Cat) }

async fn list_dogs(State(state): State<Shared>) -> Json<Vec<Animal>> { list_of(&state, AnimalType::Dog) }

/// Serves both surfaces: typed animals plus legacy chickens.
async fn list_chickens(State(state): State<Shared>) -> Response {
    let Json(mut animals) = list_of(&state, AnimalType::Chicken);
    let st = state.lock().unwrap();
    animals.extend(st.chickens.values().map(|c| Animal {
        id: c.id.clone(),
        name: c.name.clone(),
        kind: Some(AnimalType::Chicken),
        ..Default::default()
    }));
    Json(animals).into_response()
}

async fn get_animal(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if id == "broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    match state.lock().unwrap().animals.get(&id) {
        Some(a) => Json(a.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such animal").into_response(),
    }
}

async fn insert_animal(State(state): State<Shared>, headers: HeaderMap, Json(animal): Json<Animal>) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut st = state.lock().unwrap();
    let id = st.next_id();
    let stored = Animal { id: id.clone(), ..animal };
    st.animals.insert(id, stored.clone());
    Json(stored).into_response()
}

async fn update_animal(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(animal): Json<Animal>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut st = state.lock().unwrap();
    if !st.animals.contains_key(&id) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    st.animals.insert(id.clone(), Animal { id, ..animal });
    StatusCode::OK.into_response()
}

async fn delete_animal(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if id == "locked" {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    match state.lock().unwrap().animals.remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn add_vaccinations(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(added): Json<Vec<Vaccination>>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    match state.lock().unwrap().animals.get_mut(&id) {
        Some(a) => {
            a.vaccinations.extend(added);
            StatusCode::OK.into_response()
        }
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn delete_vaccination(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(target): Json<Vaccination>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    match state.lock().unwrap().animals.get_mut(&id) {
        Some(a) => {
            a.vaccinations.retain(|v| *v != target);
            StatusCode::OK.into_response()
        }
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn get_chicken(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().chickens.get(&id) {
        Some(c) => Json(c.clone()).into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn insert_chicken(State(state): State<Shared>, headers: HeaderMap, Json(chicken): Json<Chicken>) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut st = state.lock().unwrap();
    let id = st.next_id();
    let stored = Chicken { id: id.clone(), ..chicken };
    st.chickens.insert(id, stored.clone());
    Json(stored).into_response()
}

async fn update_chicken(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(chicken): Json<Chicken>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.lock().unwrap().chickens.insert(id.clone(), Chicken { id, ..chicken });
    StatusCode::OK.into_response()
}

async fn delete_chicken(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.lock().unwrap().chickens.remove(&id);
    StatusCode::OK.into_response()
}

async fn add_chicken_vaccinations(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(added): Json<Vec<Vaccination>>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(c) = state.lock().unwrap().chickens.get_mut(&id) {
        c.vaccinations.extend(added);
    }
    StatusCode::OK.into_response()
}

async fn delete_chicken_vaccination(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(target): Json<Vaccination>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    match state.lock().unwrap().chickens.get_mut(&id) {
        Some(c) => {
            c.vaccinations.retain(|v| *v != target);
            StatusCode::OK.into_response()
        }
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn upload_image(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let Ok(bytes) = field.bytes().await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        let url = format!("images/{id}-{file_name}");
        let mut st = state.lock().unwrap();
        st.uploads.push((id.clone(), file_name, bytes.len()));
        if let Some(a) = st.animals.get_mut(&id) {
            a.image_url = url.clone();
        }
        if let Some(c) = st.chickens.get_mut(&id) {
            c.image_url = url.clone();
        }
        return Json(json!({"imageUrl": url})).into_response();
    }
    StatusCode::BAD_REQUEST.into_response()
}
