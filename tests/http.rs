use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq)]
struct WorkoutSet {
    kind: String,
    reps: u32,
    checked: bool,
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    date: String,
    streak: u64,
    sets: Vec<WorkoutSet>,
    summary: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

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

fn unique_data_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("pullup_log_http_{tag}_{}_{}", std::process::id(), nanos));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
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

async fn spawn_server(data_dir: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_pullup_log"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", data_dir)
        .env_remove("APP_GLYPHS_PATH")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = spawn_server(&unique_data_dir("shared")).await;
    #[cfg(unix)]
    cleanup::register(server.child.id());
    let server = Arc::new(server);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post(client: &Client, url: String, body: Option<serde_json::Value>) -> StateResponse {
    let request = client.post(url);
    let request = match body {
        Some(body) => request.json(&body),
        None => request,
    };
    let response = request.send().await.unwrap();
    assert!(response.status().is_success(), "status {}", response.status());
    response.json().await.unwrap()
}

async fn fetch_state(client: &Client, base_url: &str) -> StateResponse {
    client
        .get(format!("{base_url}/api/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_streak_increment_and_reset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    post(&client, format!("{base}/api/streak/reset"), None).await;
    for _ in 0..3 {
        post(&client, format!("{base}/api/streak/increment"), None).await;
    }
    let state = fetch_state(&client, base).await;
    assert_eq!(state.streak, 3);
    assert!(state.summary.contains("Streak: 3\n"));

    let state = post(&client, format!("{base}/api/streak/reset"), None).await;
    assert_eq!(state.streak, 0);
}

#[tokio::test]
async fn http_reorder_and_delete() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    let state = post(&client, format!("{base}/api/sets"), None).await;
    let first = state.sets.len() - 1;
    post(
        &client,
        format!("{base}/api/sets/{first}/reps"),
        Some(serde_json::json!({ "reps": 1 })),
    )
    .await;
    let state = post(&client, format!("{base}/api/sets"), None).await;
    let second = state.sets.len() - 1;
    post(
        &client,
        format!("{base}/api/sets/{second}/reps"),
        Some(serde_json::json!({ "reps": 2 })),
    )
    .await;

    let state = post(&client, format!("{base}/api/sets/{second}/up"), None).await;
    assert_eq!(state.sets[first].reps, 2);
    assert_eq!(state.sets[second].reps, 1);

    let state = post(&client, format!("{base}/api/sets/{second}/down"), None).await;
    assert_eq!(state.sets[second].reps, 1);

    let before = state.sets.len();
    let response = client
        .delete(format!("{base}/api/sets/{first}"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let state: StateResponse = response.json().await.unwrap();
    assert_eq!(state.sets.len(), before - 1);
    assert_eq!(state.sets[first].reps, 1);

    client
        .delete(format!("{base}/api/sets/{first}"))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
async fn http_out_of_range_index_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    let before = fetch_state(&client, base).await;
    let missing = before.sets.len() + 10;

    let response = client
        .post(format!("{base}/api/sets/{missing}/toggle"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{base}/api/sets/{missing}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = fetch_state(&client, base).await;
    assert_eq!(after.sets, before.sets);
}

#[tokio::test]
async fn http_fresh_log_scenario() {
    let data_dir = unique_data_dir("fresh");
    let server = spawn_server(&data_dir).await;
    let client = Client::new();
    let base = &server.base_url;

    let state = fetch_state(&client, base).await;
    assert!(state.sets.is_empty());
    assert_eq!(state.streak, 0);
    assert!(!state.date.is_empty());

    let state = post(&client, format!("{base}/api/sets"), None).await;
    assert_eq!(
        state.sets,
        vec![WorkoutSet {
            kind: "no-band".to_string(),
            reps: 0,
            checked: true,
        }]
    );

    let state = post(
        &client,
        format!("{base}/api/sets/0/reps"),
        Some(serde_json::json!({ "reps": "8" })),
    )
    .await;
    assert_eq!(state.sets[0].reps, 8);
    assert_eq!(state.summary.lines().count(), 3);

    let state = post(&client, format!("{base}/api/sets/0/toggle"), None).await;
    assert!(!state.sets[0].checked);
    assert_eq!(state.summary.lines().count(), 2);

    let state = post(
        &client,
        format!("{base}/api/sets/0/reps"),
        Some(serde_json::json!({ "reps": "lots" })),
    )
    .await;
    assert_eq!(state.sets[0].reps, 0);

    let summary = client
        .get(format!("{base}/api/summary"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(summary, state.summary);
}

#[tokio::test]
async fn http_state_survives_restart() {
    let data_dir = unique_data_dir("restart");
    {
        let server = spawn_server(&data_dir).await;
        let client = Client::new();
        let base = &server.base_url;
        post(&client, format!("{base}/api/sets"), None).await;
        post(
            &client,
            format!("{base}/api/sets/0/kind"),
            Some(serde_json::json!({ "kind": "banded" })),
        )
        .await;
        post(&client, format!("{base}/api/streak/increment"), None).await;
    }

    let server = spawn_server(&data_dir).await;
    let state = fetch_state(&Client::new(), &server.base_url).await;
    assert_eq!(state.streak, 1);
    assert_eq!(state.sets.len(), 1);
    assert_eq!(state.sets[0].kind, "banded");
}

#[tokio::test]
async fn http_corrupt_sets_slot_starts_fresh() {
    let data_dir = unique_data_dir("corrupt");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("pullup-sets"), r#"{"not":"a list"}"#).unwrap();
    std::fs::write(data_dir.join("pullup-streak"), "5").unwrap();

    let server = spawn_server(&data_dir).await;
    let state = fetch_state(&Client::new(), &server.base_url).await;
    assert!(state.sets.is_empty());
    assert_eq!(state.streak, 5);
}
