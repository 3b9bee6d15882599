//! Async worker - runs in Tokio runtime and handles network checks

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::infrastructure::probe::{probe_config, probe_target, Probe};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop until shutdown or until the TUI side hangs up
pub async fn run_async_worker(
    probe: Arc<dyn Probe>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            RuntimeCommand::Shutdown => break,

            RuntimeCommand::Probe { url, timeout_ms } => {
                let report = probe_target(
                    probe.as_ref(),
                    "url",
                    url,
                    Duration::from_millis(timeout_ms),
                )
                .await;
                if evt_tx.send(RuntimeEvent::ProbeFinished(report)).is_err() {
                    break;
                }
            }

            RuntimeCommand::ProbeConfig { config } => {
                for report in probe_config(probe.as_ref(), &config).await {
                    if evt_tx.send(RuntimeEvent::ProbeFinished(report)).is_err() {
                        return;
                    }
                }
            }
        }
    }
    log::debug!("runtime worker stopped");
}
