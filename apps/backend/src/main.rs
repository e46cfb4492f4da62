use std::collections::HashMap;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use upgrade_backend::config::rules::RulesConfig;
use upgrade_backend::room::{ConnId, RoomRegistry};

mod telemetry;

/// Line-driven host for a single room.
///
/// Each stdin line is `<uid> join`, `<uid> leave` or `<uid> <json frame>`.
/// Every message a connection receives is printed as one JSON line tagged
/// with its uid.
#[tokio::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match RulesConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    let room_id = std::env::var("UPGRADE_ROOM_ID").unwrap_or_else(|_| "table-1".to_string());

    let registry = RoomRegistry::new(config);
    let room = registry.get_or_create(&room_id);
    eprintln!("🚀 Room {room_id} ready; reading commands from stdin");

    let mut conns: HashMap<String, ConnId> = HashMap::new();
    let mut next_conn: ConnId = 1;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let Some((uid, rest)) = line.split_once(' ') else {
            continue;
        };
        let uid = uid.to_string();

        let result = match rest.trim() {
            "join" => {
                let conn_id = next_conn;
                next_conn += 1;
                conns.insert(uid.clone(), conn_id);

                let (tx, mut rx) = mpsc::unbounded_channel();
                let label = uid.clone();
                tokio::spawn(async move {
                    while let Some(msg) = rx.recv().await {
                        println!("{}", serde_json::json!({ "to": label, "msg": msg }));
                    }
                });
                room.join(conn_id, uid, tx).await
            }
            "leave" => match conns.remove(&uid) {
                Some(conn_id) => room.leave(conn_id).await,
                None => continue,
            },
            frame => match conns.get(&uid) {
                Some(conn_id) => room.dispatch(*conn_id, frame).await,
                None => {
                    eprintln!("⚠️  {uid} must join before sending frames");
                    continue;
                }
            },
        };

        if let Err(e) = result {
            eprintln!("❌ {e}");
            break;
        }
    }

    Ok(())
}
