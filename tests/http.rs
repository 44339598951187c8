use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Progress {
    quit_type: String,
    target_days: u32,
    elapsed_days: i64,
    percentage_display: u32,
    color: String,
}

#[derive(Debug, Deserialize)]
struct Chart {
    kind: String,
    values: Vec<f64>,
    revision: u64,
}

struct TestServer {
    base_url: String,
    data_path: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.data_path);
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("health_sim_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/charts")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_health_sim"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", &data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_path,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

fn smoking_form() -> Value {
    json!({
        "habitType": "smoking",
        "cigarettesPerDay": "20",
        "cigarettePrice": "20",
        "cigarettesPerPack": "20",
        "drinksPerDay": "0",
        "drinkPrice": "0",
        "quitPeriod": "30"
    })
}

#[tokio::test]
async fn http_habit_calculation_updates_risk_chart() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: Chart = client
        .get(format!("{}/api/charts/risk", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let out: Value = client
        .post(format!("{}/api/habit/calculate", server.base_url))
        .json(&smoking_form())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(out["result"]["money_saved"], json!(18000.0));
    assert_eq!(out["result"]["life_increase_months"], json!(15.0));
    assert_eq!(out["result"]["risk_reductions"]["cancer"], json!(40.0));
    assert_eq!(out["progress"]["target_days"], json!(90));

    let after: Chart = client
        .get(format!("{}/api/charts/risk", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(after.kind, "bar");
    assert_eq!(after.values, vec![40.0, 30.0, 25.0, 35.0]);
    assert_eq!(after.revision, before.revision + 1);
}

#[tokio::test]
async fn http_exercise_calculation_updates_radar() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let out: Value = client
        .post(format!("{}/api/exercise/calculate", server.base_url))
        .json(&json!({
            "exerciseType": "jogging",
            "exerciseDuration": "30",
            "exerciseFrequency": "3",
            "userWeight": "70"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(out["result"]["calories_per_session"], json!(158));
    assert_eq!(out["result"]["cardio_risk_reduction"], json!(25.0));
    assert_eq!(out["result"]["mood_improvement_display"], json!("60%"));

    let radar: Chart = client
        .get(format!("{}/api/charts/exercise", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(radar.kind, "radar");
    assert_eq!(radar.values, vec![80.0, 65.0, 60.0, 50.0, 75.0]);
}

#[tokio::test]
async fn http_bad_input_is_repaired_not_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut form = smoking_form();
    form["cigarettesPerPack"] = json!("0");
    form["quitPeriod"] = json!("lots");

    let response = client
        .post(format!("{}/api/habit/calculate", server.base_url))
        .json(&form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let out: Value = response.json().await.unwrap();
    assert_eq!(out["profile"]["cigarettes_per_pack"], json!(1));
    assert_eq!(out["profile"]["quit_period_days"], json!(1));
    assert!(out["errors"]["quit-period"].is_string());

    let validated: Value = client
        .post(format!("{}/api/validate", server.base_url))
        .json(&json!({ "field": "user-weight", "value": "-5" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(validated["value"], json!(0.0));
    assert_eq!(validated["error"], json!("value must not be less than 0"));

    let unknown = client
        .post(format!("{}/api/exercise/calculate", server.base_url))
        .json(&json!({ "exerciseType": "parkour" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_forms_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = json!({
        "habitType": "drinking",
        "cigarettesPerDay": "5",
        "cigarettePrice": "18.5",
        "cigarettesPerPack": "20",
        "drinksPerDay": "330",
        "drinkPrice": "24",
        "quitPeriod": "6"
    });
    let exercise = json!({
        "exerciseType": "yoga",
        "exerciseDuration": "45",
        "exerciseFrequency": "2",
        "userWeight": "58"
    });

    let saved = client
        .put(format!("{}/api/forms", server.base_url))
        .json(&json!({ "habit": habit, "exercise": exercise }))
        .send()
        .await
        .unwrap();
    assert!(saved.status().is_success());

    let loaded: Value = client
        .get(format!("{}/api/forms", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(loaded["habit"], habit);
    assert_eq!(loaded["exercise"], exercise);
    assert!(loaded["lastSaved"].is_string());
    assert!(loaded["message"].is_string());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"value="330""#));
    assert!(page.contains(r#"data-selected="yoga""#));

    let on_disk = std::fs::read_to_string(&server.data_path).unwrap();
    assert!(on_disk.contains("healthSimulator_smokingData"));
    assert!(on_disk.contains("healthSimulator_lastSaved"));
}

#[tokio::test]
async fn http_progress_reset_starts_at_zero() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let reset: Progress = client
        .post(format!("{}/api/progress/reset", server.base_url))
        .json(&json!({ "habitType": "drinking" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reset.quit_type, "drinking");
    assert_eq!(reset.target_days, 90);
    assert_eq!(reset.elapsed_days, 0);
    assert_eq!(reset.percentage_display, 0);
    assert_eq!(reset.color, "red");

    let current: Progress = client
        .get(format!("{}/api/progress?habit=smoking", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.quit_type, "drinking");
    assert_eq!(current.elapsed_days, 0);
}

#[tokio::test]
async fn http_unknown_chart_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/charts/pie", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
