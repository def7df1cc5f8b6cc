use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use itemset_core::core_api::{CoreError, Engine, RunEvent, RunOptions, RunResult};

/// Handle to a run executing on a background thread.
///
/// Log lines and the final result arrive on separate unbounded channels.
pub struct RunHandle {
    pub log_rx: Receiver<String>,
    pub result_rx: Receiver<Result<RunResult, CoreError>>,
    thread: JoinHandle<()>,
}

impl RunHandle {
    pub fn join(self) {
        if self.thread.join().is_err() {
            tracing::error!("item set worker thread panicked");
        }
    }
}

pub fn spawn_run(engine: Engine, root: PathBuf, options: RunOptions) -> RunHandle {
    let (log_tx, log_rx) = mpsc::channel::<String>();
    let (result_tx, result_rx) = mpsc::channel();

    let thread = thread::spawn(move || {
        let started = Instant::now();
        log(&log_tx, format!("Root: {}", root.display()));
        log(
            &log_tx,
            format!(
                "Mode: {}; backups={}",
                if options.apply_changes {
                    "APPLY"
                } else {
                    "DRY-RUN"
                },
                if options.backup { "ON" } else { "OFF" }
            ),
        );

        let apply = options.apply_changes;
        let result = engine.run_with_progress(&root, &options, |event| {
            if let Some(line) = event_line(event, apply) {
                log(&log_tx, line);
            }
        });
        match &result {
            Ok(_) => log(
                &log_tx,
                format!("Done in {:.2}s", started.elapsed().as_secs_f64()),
            ),
            Err(e) => log(&log_tx, format!("ERROR: {}", e.message)),
        }
        let _ = result_tx.send(result);
    });

    RunHandle {
        log_rx,
        result_rx,
        thread,
    }
}

fn event_line(event: &RunEvent, apply: bool) -> Option<String> {
    match event {
        RunEvent::FileMatched { path, replacements } if !apply => Some(format!(
            "WOULD MODIFY: {} ({replacements} id(s))",
            path.display()
        )),
        RunEvent::FileMatched { .. } => None,
        RunEvent::FileWritten { path } => Some(format!("MODIFIED: {}", path.display())),
        // Listed once with the result.
        RunEvent::Warning(_) => None,
    }
}

fn log(tx: &Sender<String>, line: String) {
    let _ = tx.send(line);
}
