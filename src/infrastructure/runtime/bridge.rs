//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI sends commands through an unbounded channel and drains events
//! without blocking on every frame.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::config::ApiConfig;
use crate::infrastructure::probe::{HttpProbe, Probe, ProbeReport};
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Probe a single URL
    Probe { url: String, timeout_ms: u64 },
    /// Probe the base URL and every configured endpoint
    ProbeConfig { config: ApiConfig },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    ProbeFinished(ProbeReport),
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    pub fn new() -> anyhow::Result<Self> {
        let probe = HttpProbe::new().context("create HTTP client")?;
        Self::with_probe(Arc::new(probe))
    }

    /// Create a bridge whose worker uses `probe` for every check
    pub fn with_probe(probe: Arc<dyn Probe>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let rt = Runtime::new().context("create Tokio runtime")?;

        // Spawn the worker thread that owns the runtime
        thread::Builder::new()
            .name("capa-runtime".to_string())
            .spawn(move || {
                rt.block_on(run_async_worker(probe, cmd_rx, evt_tx));
            })
            .context("spawn runtime thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
