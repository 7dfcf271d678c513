// vim: set ai et ts=4 sts=4 sw=4:
//! Runs a [`Solver`] on a dedicated thread.
//!
//! The thread owns the solver outright; the caller talks to it only through
//! [`Request`] and [`Response`] messages, and every response carries an owned
//! [`Snapshot`] rather than a reference into the solver.
use std::fmt;
use std::error;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use log::debug;

use super::grid::SquareStatus;
use super::puzzle::Puzzle;
use super::puzzle::solver::{Error, Mode, Outcome, ScanStep, Snapshot, Solver, SolverConfig};

#[derive(PartialEq, Debug, Clone)]
pub enum Request {
    Solve,
    Seed { x: usize, y: usize, status: SquareStatus },
    Refresh,
    Snapshot,
    Stop,     // abandon the scan in progress, if any
    Shutdown,
}

#[derive(PartialEq, Debug, Clone)]
pub enum Response {
    Update(Snapshot),
    Finished { outcome: Outcome, elapsed: Duration, snapshot: Snapshot },
    Snapshot(Snapshot),
    Refreshed,
    Stopped,
    Rejected(Error),
}

#[derive(PartialEq, Debug, Clone)]
pub enum WorkerError {
    Disconnected,
    Panicked,
}
impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkerError::Disconnected => write!(f, "solver worker disconnected"),
            WorkerError::Panicked     => write!(f, "solver worker panicked"),
        }
    }
}
impl error::Error for WorkerError {}

enum ScanEnd {
    Continue,
    Shutdown,
}

pub struct SolverWorker {
    requests: Sender<Request>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<Puzzle>>,
}

impl SolverWorker {
    pub fn spawn(puzzle: Puzzle, config: SolverConfig) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();
        let handle = thread::spawn(move || {
            Self::_serve(Solver::new(puzzle, config), request_rx, response_tx)
        });
        SolverWorker {
            requests: request_tx,
            responses: response_rx,
            handle: Some(handle),
        }
    }

    pub fn send(&self, request: Request) -> Result<(), WorkerError> {
        self.requests.send(request).map_err(|_| WorkerError::Disconnected)
    }
    pub fn recv(&self) -> Result<Response, WorkerError> {
        self.responses.recv().map_err(|_| WorkerError::Disconnected)
    }
    /// Returns a response if one is ready, without blocking.
    pub fn try_recv(&self) -> Result<Option<Response>, WorkerError> {
        match self.responses.try_recv() {
            Ok(response)                     => Ok(Some(response)),
            Err(TryRecvError::Empty)         => Ok(None),
            Err(TryRecvError::Disconnected)  => Err(WorkerError::Disconnected),
        }
    }

    /// Requests a solve and blocks until it concludes, passing intermediate
    /// responses to `on_update`. Returns the final `Finished`, `Stopped` or
    /// `Rejected` response.
    pub fn solve_with<F>(&self, mut on_update: F) -> Result<Response, WorkerError>
        where F: FnMut(Response)
    {
        self.send(Request::Solve)?;
        loop {
            match self.recv()? {
                r @ Response::Finished { .. } |
                r @ Response::Stopped |
                r @ Response::Rejected(_) => return Ok(r),
                other => on_update(other),
            }
        }
    }

    /// Stops the worker thread and hands back its puzzle.
    pub fn shutdown(mut self) -> Result<Puzzle, WorkerError> {
        // the thread may already be gone; joining tells us how it ended
        let _ = self.requests.send(Request::Shutdown);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| WorkerError::Panicked),
            None         => Err(WorkerError::Disconnected),
        }
    }

    fn _serve(mut solver: Solver, requests: Receiver<Request>, responses: Sender<Response>) -> Puzzle {
        while let Ok(request) = requests.recv() {
            debug!("worker received {:?}", request);
            let end = match request {
                Request::Solve => match solver.start() {
                    Ok(())  => Self::_scan(&mut solver, &requests, &responses),
                    Err(e)  => Self::_reply(&responses, Response::Rejected(e)),
                },
                Request::Seed { x, y, status } => match solver.seed_square(x, y, status) {
                    Ok(Some(_)) => Self::_scan(&mut solver, &requests, &responses),
                    Ok(None)    => Self::_reply(&responses, Response::Snapshot(solver.snapshot())),
                    Err(e)      => Self::_reply(&responses, Response::Rejected(e)),
                },
                Request::Refresh => match solver.refresh() {
                    Ok(())  => Self::_reply(&responses, Response::Refreshed),
                    Err(e)  => Self::_reply(&responses, Response::Rejected(e)),
                },
                Request::Snapshot => Self::_reply(&responses, Response::Snapshot(solver.snapshot())),
                Request::Stop     => Self::_reply(&responses, Response::Stopped),
                Request::Shutdown => ScanEnd::Shutdown,
            };
            if let ScanEnd::Shutdown = end {
                break;
            }
        }
        debug!("worker shutting down");
        solver.into_puzzle()
    }

    fn _reply(responses: &Sender<Response>, response: Response) -> ScanEnd {
        match responses.send(response) {
            Ok(())  => ScanEnd::Continue,
            Err(_)  => ScanEnd::Shutdown, // nobody is listening anymore
        }
    }

    /// Drives a started scan to its end, one step at a time, answering
    /// requests that arrive in between.
    fn _scan(solver: &mut Solver, requests: &Receiver<Request>, responses: &Sender<Response>) -> ScanEnd {
        loop {
            loop {
                match requests.try_recv() {
                    Ok(Request::Stop) => {
                        solver.stop();
                        return Self::_reply(responses, Response::Stopped);
                    }
                    Ok(Request::Shutdown) | Err(TryRecvError::Disconnected) => {
                        solver.stop();
                        return ScanEnd::Shutdown;
                    }
                    Ok(Request::Snapshot) => {
                        if let ScanEnd::Shutdown = Self::_reply(responses, Response::Snapshot(solver.snapshot())) {
                            return ScanEnd::Shutdown;
                        }
                    }
                    Ok(_) => {
                        if let ScanEnd::Shutdown = Self::_reply(responses, Response::Rejected(Error::Busy)) {
                            return ScanEnd::Shutdown;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                }
            }

            match solver.next() {
                Some(ScanStep::Scanned { .. }) => {
                    if solver.config.mode == Mode::Paced {
                        if let ScanEnd::Shutdown = Self::_reply(responses, Response::Update(solver.snapshot())) {
                            return ScanEnd::Shutdown;
                        }
                        if solver.config.delay > Duration::from_millis(0) {
                            thread::sleep(solver.config.delay);
                        }
                    }
                }
                Some(ScanStep::Finished(outcome)) => {
                    return Self::_reply(responses, Response::Finished {
                        outcome,
                        elapsed: solver.elapsed().unwrap_or_default(),
                        snapshot: solver.snapshot(),
                    });
                }
                None => return ScanEnd::Continue,
            }
        }
    }
}

impl Drop for SolverWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.requests.send(Request::Shutdown);
            let _ = handle.join();
        }
    }
}

impl fmt::Debug for SolverWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverWorker").finish()
    }
}
