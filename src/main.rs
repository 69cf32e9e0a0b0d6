//! Terminal console runtime and entry point.
//!
//! Thin integration layer between the library and a real terminal. It owns
//! the threads and the screen; everything else is delegated to the library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  Line   ┌───────────────────────┐  TransportRequest  ┌──────────────────┐
//! │ stdin thread │ ──────► │  main loop            │ ─────────────────► │ transport-worker │
//! └──────────────┘         │  handle_event, render │ ◄───────────────── │ (HttpProductApi) │
//!                          └───────────────────────┘  TransportResponse └──────────────────┘
//! ```
//!
//! Both producers feed a single channel. When nothing arrives within
//! [`TICK_INTERVAL`] the loop emits a `Tick`, which applies debounced search
//! input.
//!
//! # Usage
//!
//! ```text
//! catalog-console [--api-url URL] [--page-size N] [--theme NAME] ...
//! catalog-console --config console.toml --page-size 25
//! ```

#![allow(clippy::multiple_crate_versions)]

use catalog_console::app::command::parse_command;
use catalog_console::app::notification::Notification;
use catalog_console::cli::Cli;
use catalog_console::observability::init_tracing;
use catalog_console::transport::HttpProductApi;
use catalog_console::worker::{TransportRequest, TransportResponse, TransportWorker, WorkerHandle};
use catalog_console::{handle_event, initialize, ui, Action, AppState, CatalogError, Event, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use terminal_size::{terminal_size, Height, Width};

/// How long the loop waits for input before emitting a `Tick`.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Used when the terminal size cannot be determined.
const DEFAULT_SIZE: (usize, usize) = (24, 100);

const PROMPT: &str = "> ";

/// Everything the main loop can receive.
enum Incoming {
    Line(String),
    Response(TransportResponse),
    InputClosed,
}

impl From<TransportResponse> for Incoming {
    fn from(response: TransportResponse) -> Self {
        Self::Response(response)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("catalog-console: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Cli::parse().into_config()?;
    let log_file = init_tracing(&config);
    tracing::info!(log_file = ?log_file, api_url = %config.api_url, "catalog console starting");

    let mut console = Console {
        state: initialize(&config),
        export_dir: config.export_dir(),
        out: io::stdout(),
    };

    let (tx, rx) = mpsc::channel::<Incoming>();
    let worker = TransportWorker::new(Box::new(HttpProductApi::new(config.api_url.clone()))).spawn(tx.clone())?;
    spawn_input_reader(tx)?;

    let mut running = console.dispatch(Event::Load, &worker)?;

    while running {
        let event = match rx.recv_timeout(TICK_INTERVAL) {
            Ok(Incoming::Line(line)) => match parse_command(&line, Instant::now(), today()) {
                Ok(Some(event)) => event,
                Ok(None) => {
                    console.draw()?;
                    continue;
                }
                Err(e) => {
                    console.reject_command(&e)?;
                    continue;
                }
            },
            Ok(Incoming::Response(response)) => Event::TransportResponse(response),
            Ok(Incoming::InputClosed) => Event::Quit,
            Err(RecvTimeoutError::Timeout) => Event::Tick { now: Instant::now() },
            Err(RecvTimeoutError::Disconnected) => break,
        };

        running = console.dispatch(event, &worker)?;
    }

    console.restore_screen()?;
    worker.shutdown();
    tracing::info!("catalog console stopped");
    Ok(())
}

fn spawn_input_reader(tx: Sender<Incoming>) -> Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(Incoming::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(Incoming::InputClosed);
        })?;
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn screen_size() -> (usize, usize) {
    terminal_size().map_or(DEFAULT_SIZE, |(Width(cols), Height(rows))| {
        (usize::from(rows), usize::from(cols))
    })
}

/// Runtime side of the console: state plus the resources actions touch.
struct Console {
    state: AppState,
    export_dir: PathBuf,
    out: io::Stdout,
}

impl Console {
    /// Handles `event` and every follow-up event its actions produce.
    ///
    /// Returns `false` once a `Quit` action runs.
    fn dispatch(&mut self, event: Event, worker: &WorkerHandle) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut needs_render = false;

        while let Some(event) = queue.pop_front() {
            let (render, actions) = handle_event(&mut self.state, &event)?;
            needs_render |= render;

            for action in actions {
                match action {
                    Action::Quit => return Ok(false),
                    Action::PostToWorker(request) => {
                        if let Some(failure) = post(worker, request) {
                            queue.push_back(failure);
                        }
                    }
                    Action::Export(export) => queue.push_back(write_export(&export, &self.export_dir)),
                }
            }
        }

        if needs_render {
            self.draw()?;
        }
        Ok(true)
    }

    fn reject_command(&mut self, error: &CatalogError) -> Result<()> {
        let message = match error {
            CatalogError::Validation(message) => message.clone(),
            other => other.to_string(),
        };
        tracing::debug!(error = %message, "rejected command");
        self.state.notify(Notification::error("Invalid command", message));
        self.draw()
    }

    fn draw(&mut self) -> Result<()> {
        let (rows, cols) = screen_size();
        let screen_rows = rows.saturating_sub(1);

        let mut out = self.out.lock();
        ui::render(&mut out, &self.state, screen_rows, cols, today())?;
        write!(out, "\u{1b}[{rows};1H\u{1b}[2K{PROMPT}")?;
        out.flush()?;
        Ok(())
    }

    fn restore_screen(&mut self) -> Result<()> {
        let mut out = self.out.lock();
        write!(out, "\u{1b}[0m\u{1b}[2J\u{1b}[H")?;
        out.flush()?;
        Ok(())
    }
}

/// Posts `request`; a stopped worker becomes an error response.
fn post(worker: &WorkerHandle, request: TransportRequest) -> Option<Event> {
    let operation = request.operation();
    worker.post(request).err().map(|e| {
        tracing::error!(error = %e, "failed to post request");
        Event::TransportResponse(TransportResponse::Error {
            operation,
            message: e.to_string(),
        })
    })
}

fn write_export(export: &catalog_console::export::CsvExport, dir: &Path) -> Event {
    match export.write_to(dir) {
        Ok(path) => Event::ExportWritten {
            path,
            count: export.count,
        },
        Err(e) => Event::ExportFailed { message: e.to_string() },
    }
}
