use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::EngineConfig;
use crate::engine::RoutingEngine;
use crate::protocol::{RoutingReply, RoutingRequest};
use crate::route::RouteError;

/// A routing engine running on its own thread, fed by message passing.
///
/// Requests are coalesced, not drained: when several snapshots queue up
/// between ticks, only the newest is processed and the rest are silently
/// superseded. Only the latest canvas state matters for rendering, so the
/// loop trades completeness for latency. Replies come back in processing
/// order; there is never more than one request in flight.
pub struct RoutingWorker {
    sender: Option<mpsc::Sender<RoutingRequest>>,
    replies: mpsc::Receiver<Result<RoutingReply, RouteError>>,
    handle: Option<JoinHandle<()>>,
}

impl RoutingWorker {
    pub fn spawn(config: EngineConfig) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<RoutingRequest>();
        let (reply_tx, reply_rx) = mpsc::channel::<Result<RoutingReply, RouteError>>();
        let tick = Duration::from_secs_f64(config.tick_interval_ms.max(0.0) / 1000.0);

        let handle = thread::Builder::new()
            .name("wirepath-router".into())
            .spawn(move || {
                worker_loop(request_rx, reply_tx, tick);
            })
            .expect("failed to spawn routing worker thread");

        Self {
            sender: Some(request_tx),
            replies: reply_rx,
            handle: Some(handle),
        }
    }

    /// Queue a canvas snapshot. It may be superseded by a newer one before
    /// the worker picks it up.
    pub fn submit(&self, request: RoutingRequest) -> Result<(), mpsc::SendError<RoutingRequest>> {
        match &self.sender {
            Some(sender) => sender.send(request),
            None => Err(mpsc::SendError(request)),
        }
    }

    /// Block until the next reply.
    pub fn recv_reply(&self) -> Result<Result<RoutingReply, RouteError>, mpsc::RecvError> {
        self.replies.recv()
    }

    /// Non-blocking reply poll.
    pub fn try_recv_reply(&self) -> Option<Result<RoutingReply, RouteError>> {
        self.replies.try_recv().ok()
    }

    pub fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        // Dropping the sender disconnects the request channel, which ends
        // the worker loop.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RoutingWorker {
    fn drop(&mut self) {
        self.join();
    }
}

fn worker_loop(
    requests: mpsc::Receiver<RoutingRequest>,
    replies: mpsc::Sender<Result<RoutingReply, RouteError>>,
    tick: Duration,
) {
    let mut engine = RoutingEngine::new();
    loop {
        let first = match requests.recv() {
            Ok(request) => request,
            Err(_) => return,
        };

        // Last-write-wins: drain everything queued behind the newest
        // request before doing any work.
        let mut latest = first;
        while let Ok(newer) = requests.try_recv() {
            latest = newer;
        }

        let result = engine.process_request(latest);
        if replies.send(result).is_err() {
            return;
        }

        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }
}
