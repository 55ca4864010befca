use std::io::Cursor;
use std::net::SocketAddr;
use std::time::Duration;

use client::{ErrorLog, HttpProductApi, Outcome, ProductApi, RetryPolicy};
use common::ProductInput;
use tokio::net::TcpListener;

use server::startup;

async fn start_server() -> anyhow::Result<String> {
    let state = startup::build_state(&configs::DatabaseConfig::in_memory()).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = startup::serve(listener, state, std::future::pending()).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(format!("http://{}", addr))
}

fn fast_policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(10))
}

async fn run_script(api: &HttpProductApi, script: &str) -> anyhow::Result<(Outcome, String)> {
    let mut out = Vec::new();
    let outcome = client::app::run_with(
        api,
        &fast_policy(3),
        &ErrorLog::disabled(),
        Cursor::new(script.to_string()),
        &mut out,
    )
    .await?;
    Ok((outcome, String::from_utf8(out)?))
}

#[tokio::test]
async fn scripted_session_round_trip() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let api = HttpProductApi::new(&base_url, Some(Duration::from_secs(5)))?;

    let (outcome, out) = run_script(&api, "2\n1\nX\nY\n1.5\n2\n0\n").await?;
    assert_eq!(outcome, Outcome::Finished);
    assert!(out.contains(&format!("API is available at {base_url}")));
    assert!(out.contains("There are no products in database"));
    assert!(out.contains("Product 'X' added successfully."));

    let listed = api.list().await?;
    assert_eq!(listed.len(), 1);
    let id = listed[0].id;
    assert_eq!((listed[0].name.as_str(), listed[0].description.as_str(), listed[0].price), ("X", "Y", 1.5));

    let script = format!("3\n{id}\nX2\nY\n1.5\n2\n0\n");
    let (_, out) = run_script(&api, &script).await?;
    assert!(out.contains("Product 'X2' updated successfully."));
    assert!(out.contains("X2"));

    let listed = api.list().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].name, "X2");
    assert_eq!(listed[0].description, "Y");
    Ok(())
}

#[tokio::test]
async fn delete_through_the_menu() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let api = HttpProductApi::new(&base_url, None)?;
    let created = api.create(&ProductInput::new("Lamp", "desk lamp", 12.5)?).await?;

    let (_, out) = run_script(&api, &format!("4\n{}\n4\n999\n0\n", created.id)).await?;
    assert!(out.contains(&format!("Product with ID {} deleted successfully.", created.id)));
    // Unknown ids are accepted by the service
    assert!(out.contains("Product with ID 999 deleted successfully."));
    assert!(api.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_returns_stored_record() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let api = HttpProductApi::new(&base_url, None)?;

    let first = api.create(&ProductInput::new("A", "a", 1.0)?).await?;
    let second = api.create(&ProductInput::new("B", "b", 2.0)?).await?;
    assert!(second.id > first.id);
    assert_eq!(second.name, "B");

    let echoed = api.update(first.id, &ProductInput::new("A2", "a", 1.0)?).await?;
    assert_eq!(echoed.name, "A2");
    Ok(())
}

#[tokio::test]
async fn handshake_gives_up_on_closed_port() -> anyhow::Result<()> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let api = HttpProductApi::new(&format!("http://{addr}"), Some(Duration::from_secs(2)))?;
    let (outcome, out) = run_script(&api, "1\nLamp\nlamp\n1\n0\n").await?;

    assert_eq!(outcome, Outcome::Unavailable);
    assert_eq!(out.matches("API is not available. Error:").count(), 3);
    assert_eq!(out.matches("Retrying").count(), 2);
    assert!(!out.contains("Choose an option"));
    Ok(())
}
