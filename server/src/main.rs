use std::env;
use std::sync::{Arc, Mutex};

use axum::extract::State;

use model::config::Config;
use server::store::FileSnapshotStore;
use server::{ObjectiveChangeRequest, OverrideRequest, PlanRequest, Planner, SimulateRequest};

struct AppState {
    planner: Mutex<Planner>,
}

#[tokio::main]
pub async fn main() {
    // Parse command line arguments to get the port number and snapshot slot
    let args: Vec<String> = env::args().collect();
    let port: u16 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3000);
    let snapshot_path = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| "fleet_saved.json".to_string());

    let planner = Planner::initialize(
        Box::new(FileSnapshotStore::new(&snapshot_path)),
        Config::default(),
    );

    // log every fleet-updated broadcast, as an independent observer of the
    // snapshot would
    let mut fleet_updates = planner.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = fleet_updates.recv().await {
            println!("{}: snapshot persisted, observers re-read", event);
        }
    });

    let state = Arc::new(AppState {
        planner: Mutex::new(planner),
    });

    let app = axum::Router::new()
        .fallback(axum::routing::get(|| async {
            "No route! Use /health, /plan, /override, /objective-change or /simulate."
        }))
        .route("/health", axum::routing::get(healthy))
        .route("/plan", axum::routing::post(plan))
        .route("/override", axum::routing::post(apply_override))
        .route("/objective-change", axum::routing::post(objective_change))
        .route("/simulate", axum::routing::post(simulate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    println!(
        "Server running on port {} (http://localhost:{}/health), snapshot slot: {}",
        port, port, snapshot_path
    );
    axum::serve(listener, app).await.unwrap();
}

pub async fn healthy() -> &'static str {
    println!("Healthy");
    "Healthy"
}

async fn plan(
    State(state): State<Arc<AppState>>,
    axum::extract::Json(request): axum::extract::Json<PlanRequest>,
) -> axum::response::Json<serde_json::Value> {
    axum::response::Json(state.planner.lock().unwrap().plan(request))
}

async fn apply_override(
    State(state): State<Arc<AppState>>,
    axum::extract::Json(request): axum::extract::Json<OverrideRequest>,
) -> axum::response::Json<serde_json::Value> {
    axum::response::Json(state.planner.lock().unwrap().apply_override(request))
}

async fn objective_change(
    State(state): State<Arc<AppState>>,
    axum::extract::Json(request): axum::extract::Json<ObjectiveChangeRequest>,
) -> axum::response::Json<serde_json::Value> {
    axum::response::Json(state.planner.lock().unwrap().apply_objective_change(request))
}

async fn simulate(
    State(state): State<Arc<AppState>>,
    axum::extract::Json(request): axum::extract::Json<SimulateRequest>,
) -> axum::response::Json<serde_json::Value> {
    axum::response::Json(state.planner.lock().unwrap().simulate_crowd(request))
}
