//! Channel pair between a worker thread and its handle.

use crate::search::worker::protocol::{Request, Response};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Message sent from the handle to the worker.
#[derive(Debug, Clone)]
pub enum HandleMessage {
    /// Process one protocol request and reply.
    Request(Request),
    /// Exit the worker loop.
    Stop,
}

/// Channel endpoints for the worker.
pub struct WorkerChannels {
    /// Receive messages from the handle.
    pub from_handle: Receiver<HandleMessage>,
    /// Send responses to the handle.
    pub to_handle: Sender<Response>,
}

/// Channel endpoints for the handle.
pub struct HandleChannels {
    /// Send messages to the worker.
    pub to_worker: Sender<HandleMessage>,
    /// Receive responses from the worker.
    pub from_worker: Receiver<Response>,
}

/// Create the channels for one worker.
pub fn create_channels() -> (HandleChannels, WorkerChannels) {
    // One request in flight at a time
    let (request_tx, request_rx) = bounded(1);
    let (response_tx, response_rx) = unbounded();

    (
        HandleChannels {
            to_worker: request_tx,
            from_worker: response_rx,
        },
        WorkerChannels {
            from_handle: request_rx,
            to_handle: response_tx,
        },
    )
}
