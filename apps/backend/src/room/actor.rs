use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::domain::reducer::{reduce, set_presence};
use crate::domain::snapshot::snapshot_for;
use crate::domain::state::{GameState, TableSettings};
use crate::errors::domain::{DomainError, StateKind};
use crate::protocol::{parse_client_frame, ServerMsg};

/// Connection id assigned by the transport.
pub type ConnId = u64;

/// Outbound half of a client connection.
pub type Outbox = mpsc::UnboundedSender<ServerMsg>;

enum RoomCommand {
    Join {
        conn_id: ConnId,
        uid: String,
        outbox: Outbox,
    },
    Leave {
        conn_id: ConnId,
    },
    Event {
        conn_id: ConnId,
        raw: String,
    },
    Inspect {
        reply: oneshot::Sender<GameState>,
    },
}

/// Cheap, cloneable address of a running room.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    room_id: String,
    tx: mpsc::Sender<RoomCommand>,
}

fn halted(room_id: &str) -> DomainError {
    DomainError::state(StateKind::RoomHalted, format!("room {room_id} is not running"))
}

impl RoomHandle {
    /// Start a room actor on the current tokio runtime.
    pub fn spawn(room_id: impl Into<String>, settings: TableSettings, mailbox: usize) -> Self {
        let room_id = room_id.into();
        let (tx, rx) = mpsc::channel(mailbox.max(1));
        let actor = RoomActor {
            state: GameState::new(room_id.clone(), settings),
            conns: HashMap::new(),
            halted: false,
            rx,
        };
        tokio::spawn(actor.run());
        info!(room = %room_id, mailbox, "room started");
        Self { room_id, tx }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), DomainError> {
        self.tx.send(cmd).await.map_err(|_| halted(&self.room_id))
    }

    /// Attach a connection for `uid`. The room greets it and broadcasts.
    pub async fn join(&self, conn_id: ConnId, uid: impl Into<String>, outbox: Outbox) -> Result<(), DomainError> {
        self.send(RoomCommand::Join {
            conn_id,
            uid: uid.into(),
            outbox,
        })
        .await
    }

    pub async fn leave(&self, conn_id: ConnId) -> Result<(), DomainError> {
        self.send(RoomCommand::Leave { conn_id }).await
    }

    /// Queue a raw client frame from `conn_id`.
    pub async fn dispatch(&self, conn_id: ConnId, raw: impl Into<String>) -> Result<(), DomainError> {
        self.send(RoomCommand::Event {
            conn_id,
            raw: raw.into(),
        })
        .await
    }

    /// Copy of the authoritative state, after every earlier command.
    pub async fn inspect(&self) -> Result<GameState, DomainError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Inspect { reply }).await?;
        rx.await.map_err(|_| halted(&self.room_id))
    }
}

struct Conn {
    uid: String,
    outbox: Outbox,
}

struct RoomActor {
    state: GameState,
    conns: HashMap<ConnId, Conn>,
    /// Set after a system error; the state is frozen from then on.
    halted: bool,
    rx: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        while let Some(cmd) = self.rx.recv().await {
            match cmd {
                RoomCommand::Join {
                    conn_id,
                    uid,
                    outbox,
                } => self.on_join(conn_id, uid, outbox),
                RoomCommand::Leave { conn_id } => self.on_leave(conn_id),
                RoomCommand::Event { conn_id, raw } => self.on_event(conn_id, &raw),
                RoomCommand::Inspect { reply } => {
                    let _ = reply.send(self.state.clone());
                }
            }
        }
        debug!(room = %self.state.room_id, "room mailbox closed");
    }

    fn on_join(&mut self, conn_id: ConnId, uid: String, outbox: Outbox) {
        let hello = ServerMsg::Hello {
            conn_id,
            room_id: self.state.room_id.clone(),
            uid: uid.clone(),
            seat: self.state.seat_of(&uid),
        };
        if outbox.send(hello).is_err() {
            return;
        }
        if !self.halted {
            if let Some(next) = set_presence(&self.state, &uid, true) {
                self.state = next;
            }
        }
        debug!(room = %self.state.room_id, conn_id, uid = %uid, "connection joined");
        self.conns.insert(conn_id, Conn { uid, outbox });
        self.broadcast_snapshots();
    }

    fn on_leave(&mut self, conn_id: ConnId) {
        let Some(conn) = self.conns.remove(&conn_id) else {
            return;
        };
        let still_connected = self.conns.values().any(|c| c.uid == conn.uid);
        if !still_connected && !self.halted {
            if let Some(next) = set_presence(&self.state, &conn.uid, false) {
                self.state = next;
            }
        }
        debug!(room = %self.state.room_id, conn_id, uid = %conn.uid, "connection left");
        self.broadcast_snapshots();
    }

    fn on_event(&mut self, conn_id: ConnId, raw: &str) {
        let Some(uid) = self.conns.get(&conn_id).map(|c| c.uid.clone()) else {
            warn!(room = %self.state.room_id, conn_id, "event from unknown connection");
            return;
        };
        if self.halted {
            self.reply(conn_id, &halted(&self.state.room_id));
            return;
        }

        let result = parse_client_frame(raw).and_then(|action| reduce(&self.state, &uid, &action));
        let reduced = match result {
            Ok(reduced) => reduced,
            Err(err) => {
                if err.is_system() {
                    error!(room = %self.state.room_id, uid = %uid, error = %err, "room halted");
                    self.halted = true;
                } else {
                    warn!(room = %self.state.room_id, uid = %uid, code = err.code().as_str(), detail = err.detail(), "action rejected");
                }
                self.reply(conn_id, &err);
                return;
            }
        };

        if !reduced.changed {
            self.send_snapshot(conn_id);
            return;
        }
        self.state = reduced.state;
        if let Some(notice) = reduced.notice {
            for conn in self.conns.values() {
                let _ = conn.outbox.send(ServerMsg::Notice {
                    notice: notice.clone(),
                });
            }
        }
        self.broadcast_snapshots();
    }

    fn reply(&self, conn_id: ConnId, err: &DomainError) {
        if let Some(conn) = self.conns.get(&conn_id) {
            let _ = conn.outbox.send(ServerMsg::error(err));
        }
    }

    fn send_snapshot(&self, conn_id: ConnId) {
        if let Some(conn) = self.conns.get(&conn_id) {
            let snapshot = snapshot_for(&self.state, Some(&conn.uid));
            let _ = conn.outbox.send(ServerMsg::Snapshot { snapshot });
        }
    }

    fn broadcast_snapshots(&mut self) {
        // Drop connections whose receiver is gone.
        self.conns.retain(|_, conn| {
            let snapshot = snapshot_for(&self.state, Some(&conn.uid));
            conn.outbox.send(ServerMsg::Snapshot { snapshot }).is_ok()
        });
    }
}
