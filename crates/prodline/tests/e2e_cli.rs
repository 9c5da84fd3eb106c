use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use serde_json::{Value, json};
use serial_test::serial;

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_prodline")
}

fn command(temp: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("PRODLINE_CONFIG", temp.join("absent.toml"))
        .env_remove("API_ENDPOINT")
        .env_remove("WAIT_TIME")
        .env_remove("PRODLINE_DB_PATH")
        .env_remove("PRODLINE_HTTP_ADDR");
    cmd
}

fn spawn_server(temp: &Path) -> (Child, u16) {
    let port = free_port();
    let child = command(temp)
        .arg("serve")
        .arg("--db-path")
        .arg(temp.join("prodline.duckdb"))
        .arg("--http-addr")
        .arg(format!("127.0.0.1:{port}"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    (child, port)
}

async fn wait_http_ready(port: u16, child: &mut Child) {
    let client = reqwest::Client::new();
    for _ in 0..100 {
        assert!(child.try_wait().unwrap().is_none(), "prodline exited early");
        if client
            .get(format!("http://127.0.0.1:{port}/api/status"))
            .send()
            .await
            .is_ok()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("server did not become ready");
}

#[tokio::test]
#[serial]
async fn simulate_then_summarize() {
    let temp = tempfile::tempdir().unwrap();
    let (mut child, port) = spawn_server(temp.path());
    wait_http_ready(port, &mut child).await;
    let endpoint = format!("http://127.0.0.1:{port}");

    let sim = command(temp.path())
        .args(["--json", "simulate", "--endpoint", endpoint.as_str()])
        .args(["--wait-time", "0", "--iterations", "3", "--seed", "5"])
        .output()
        .unwrap();
    assert!(sim.status.success(), "{}", String::from_utf8_lossy(&sim.stderr));
    let sim_out: Value = serde_json::from_slice(&sim.stdout).unwrap();
    assert_eq!(sim_out["delivered"], 3);
    assert_eq!(sim_out["failed"], 0);

    let summary = command(temp.path())
        .args(["summary", "--json", "--endpoint", endpoint.as_str()])
        .output()
        .unwrap();
    assert!(summary.status.success());
    let summary: Value = serde_json::from_slice(&summary.stdout).unwrap();
    let orders = summary["total_orders"].as_i64().unwrap();
    assert!((45..=90).contains(&orders), "orders={orders}");
    assert_eq!(
        orders,
        sim_out["orders"]["typeA"].as_i64().unwrap()
            + sim_out["orders"]["typeB"].as_i64().unwrap()
            + sim_out["orders"]["typeC"].as_i64().unwrap()
    );

    let status = command(temp.path())
        .args(["status", "--endpoint", endpoint.as_str()])
        .output()
        .unwrap();
    assert!(status.status.success());
    assert!(String::from_utf8_lossy(&status.stdout).contains("rows=3"));

    let _ = child.kill();
    let _ = child.wait();
}

#[tokio::test]
#[serial]
async fn duplicate_post_over_http_is_conflict() {
    let temp = tempfile::tempdir().unwrap();
    let (mut child, port) = spawn_server(temp.path());
    wait_http_ready(port, &mut child).await;

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{port}/submitData");
    let body = json!({
        "orders": {"typeA": 5, "typeB": 3, "typeC": 2},
        "defects": {"typeA": 1, "typeB": 0, "typeC": 0},
        "time": "2026-02-01T00:00:00.000000+00:00",
    });

    let first = client.post(&url).json(&body).send().await.unwrap();
    assert_eq!(first.status().as_u16(), 201);
    let ack: Value = first.json().await.unwrap();
    assert_eq!(ack["message"], "Data received");

    let second = client.post(&url).json(&body).send().await.unwrap();
    assert_eq!(second.status().as_u16(), 409);

    let html = client
        .get(format!("http://127.0.0.1:{port}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<dt>Finished orders</dt><dd>8</dd>"));

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
#[serial]
fn simulate_against_dead_endpoint_still_exits_cleanly() {
    let temp = tempfile::tempdir().unwrap();
    let port = free_port();
    let endpoint = format!("http://127.0.0.1:{port}");
    let out = command(temp.path())
        .args(["--json", "simulate", "--endpoint", endpoint.as_str()])
        .args(["--wait-time", "10ms", "--iterations", "2"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["failed"], 2);
    assert_eq!(v["delivered"], 0);
}
