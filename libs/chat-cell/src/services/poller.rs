use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::Message;
use crate::services::messages::MessageService;

/// Fixed-interval refresh for one open conversation. The app polls instead
/// of pushing; this task is the polling loop, scoped to the lifetime of the
/// active conversation and cancelled on teardown. Each tick fetches the
/// full conversation and forwards it to the sink; fetch failures are logged
/// and the next tick is the only retry.
pub struct MessagePoller {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl MessagePoller {
    pub fn spawn(
        service: MessageService,
        user_id: String,
        partner_id: String,
        auth_token: String,
        every: Duration,
        sink: mpsc::Sender<Vec<Message>>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        debug!("Message poller for partner {} shutting down", partner_id);
                        break;
                    }
                    _ = ticker.tick() => {
                        match service.list_conversation(&user_id, &partner_id, &auth_token).await {
                            Ok(batch) => {
                                if sink.send(batch).await.is_err() {
                                    debug!("Message sink dropped, stopping poller");
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Message poll failed: {}", e);
                            }
                        }
                    }
                }
            }
        });

        Self {
            handle,
            shutdown: shutdown_tx,
        }
    }

    /// Signal the loop to stop. Idempotent.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop and wait for the task to wind down.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.handle.await;
    }
}
