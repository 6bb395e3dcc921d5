use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::error::AppError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Reusable CLI application runner that handles:
/// - Runtime construction
/// - Signal handling (SIGINT, SIGTERM, SIGHUP) with cancellation
/// - Exit codes (0 = success, 1 = error, 129/130/143 = signal)
pub struct CliApp {
    name: String,
    token: CancellationToken,
}

impl CliApp {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            token: CancellationToken::new(),
        }
    }

    /// Token handed to the main function; cancelled when a signal arrives
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run `main_fn` to completion or until a signal, returning the exit code.
    ///
    /// The caller passes the code to `std::process::exit`.
    pub fn run<F, Fut>(self, main_fn: F) -> i32
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                eprintln!("Error: failed to start runtime: {err}");
                return EXIT_FAILURE;
            }
        };

        let code = runtime.block_on(self.run_async(main_fn));
        // A pending stdin read is a blocking task; dropping the runtime would wait on it
        runtime.shutdown_background();
        code
    }

    /// Same as [`CliApp::run`] on an already running runtime
    pub async fn run_async<F, Fut>(self, main_fn: F) -> i32
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        info!(app = %self.name, "Starting");

        tokio::select! {
            result = main_fn(self.token.clone()) => exit_code(&result),
            signal_code = wait_for_signal() => {
                self.token.cancel();
                signal_code
            }
        }
    }
}

/// Map the main function's outcome to a process exit code, reporting errors
pub fn exit_code(result: &Result<(), AppError>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            error!(error = %err, "Application failed");
            eprintln!("Error: {err}");
            EXIT_FAILURE
        }
    }
}

/// Wait for SIGINT, SIGTERM or SIGHUP (Ctrl+C elsewhere) and return 128 + signo.
///
/// If handlers cannot be installed the future never resolves.
async fn wait_for_signal() -> i32 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let handlers = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        );
        let (mut sigterm, mut sigint, mut sighup) = match handlers {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            (term, int, hup) => {
                let err = term.err().or(int.err()).or(hup.err());
                warn!(error = ?err, "Signal handlers unavailable");
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                eprintln!("Received SIGTERM");
                143 // 128 + 15
            }
            _ = sigint.recv() => {
                eprintln!("Received SIGINT");
                130 // 128 + 2
            }
            _ = sighup.recv() => {
                eprintln!("Received SIGHUP");
                129 // 128 + 1
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl+C handler unavailable");
            return std::future::pending().await;
        }
        eprintln!("Received Ctrl+C");
        130
    }
}
