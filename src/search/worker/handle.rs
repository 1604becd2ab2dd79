//! The worker thread, its handle and the JSON-lines front end.

use crate::error::{ServeError, WorkerError};
use crate::search::config::SearchConfig;
use crate::search::session::Session;
use crate::search::worker::channel::{
    HandleChannels, HandleMessage, WorkerChannels, create_channels,
};
use crate::search::worker::protocol::{BatchReport, Request, Response};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::thread::JoinHandle;

/// Protocol state: at most one session at a time
pub struct Worker {
    config: SearchConfig,
    session: Option<Session>,
}

impl Worker {
    /// `config` supplies everything `init` does not: catalog, seed, sample rate
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Answer one request
    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Init { cases, max_depth } => {
                // A failed init still discards the previous session
                if let Some(previous) = self.session.take() {
                    let stats = previous.statistics();
                    info!(
                        "Replacing session after {} batches ({} candidates pulled, {} passes)",
                        stats.batches, stats.candidates_pulled, stats.passes
                    );
                }
                let config = self.config.clone().with_max_depth(max_depth);
                match Session::new(cases, &config) {
                    Ok(session) => {
                        self.session = Some(session);
                        Response::Ready
                    }
                    Err(e) => {
                        warn!("Init rejected: {}", e);
                        Response::error(e.to_string())
                    }
                }
            }
            Request::Batch { count } => match self.session.as_mut() {
                Some(session) => Response::Result(BatchReport::from(&session.run_batch(count))),
                None => Response::error("No session: send an init request first"),
            },
        }
    }
}

/// Owner side of a running worker thread
pub struct WorkerHandle {
    channels: HandleChannels,
    thread: JoinHandle<()>,
}

/// Start a worker on its own thread
pub fn spawn_worker(config: SearchConfig) -> WorkerHandle {
    let (channels, worker_channels) = create_channels();
    let worker = Worker::new(config);
    let thread = std::thread::spawn(move || run_worker(worker, worker_channels));
    WorkerHandle { channels, thread }
}

fn run_worker(mut worker: Worker, channels: WorkerChannels) {
    debug!("Worker started");
    while let Ok(message) = channels.from_handle.recv() {
        match message {
            HandleMessage::Request(request) => {
                let response = worker.handle(request);
                if channels.to_handle.send(response).is_err() {
                    break;
                }
            }
            HandleMessage::Stop => break,
        }
    }
    debug!("Worker stopped");
}

impl WorkerHandle {
    /// Send a request and wait for its response
    pub fn call(&self, request: Request) -> Result<Response, WorkerError> {
        self.channels
            .to_worker
            .send(HandleMessage::Request(request))
            .map_err(|_| WorkerError::Disconnected)?;
        self.channels
            .from_worker
            .recv()
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Stop the worker and wait for its thread to exit
    pub fn shutdown(self) -> Result<(), WorkerError> {
        // The worker may already be gone; joining reports how it ended
        let _ = self.channels.to_worker.send(HandleMessage::Stop);
        self.thread.join().map_err(|_| WorkerError::Panicked)
    }
}

/// Answer JSON-lines requests from `input` on `output` until end of input.
///
/// Blank lines are ignored. A line that is not a valid request gets an
/// `error` response and the loop continues.
pub fn serve<R: BufRead, W: Write>(
    handle: &WorkerHandle,
    input: R,
    mut output: W,
) -> Result<(), ServeError> {
    info!("Serving requests");
    let mut answered = 0u64;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle.call(request)?,
            Err(e) => Response::error(format!("Invalid request: {}", e)),
        };

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
        answered += 1;
    }

    info!("Input closed after {} requests", answered);
    Ok(())
}
