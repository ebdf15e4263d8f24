//! detect-installer-test CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use detect_installer::cli::{Cli, CommandDispatcher};
use detect_installer::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout carries only the report.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("detect_installer=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("detect_installer=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Records whether stdout was already closed when the process started.
///
/// The Rust runtime reopens closed standard descriptors on `/dev/null`
/// before `main`, so the check runs as a static initializer instead.
#[cfg(unix)]
mod stdout_state {
    use std::sync::atomic::{AtomicBool, Ordering};

    static CLOSED_AT_START: AtomicBool = AtomicBool::new(false);

    extern "C" fn record() {
        // SAFETY: F_GETFD only reads the descriptor flags.
        let closed = unsafe { libc::fcntl(libc::STDOUT_FILENO, libc::F_GETFD) } == -1;
        CLOSED_AT_START.store(closed, Ordering::Relaxed);
    }

    #[used]
    #[cfg_attr(
        any(target_os = "linux", target_os = "android", target_os = "freebsd"),
        link_section = ".init_array"
    )]
    #[cfg_attr(target_vendor = "apple", link_section = "__DATA,__mod_init_func")]
    static RECORD: extern "C" fn() = record;

    pub fn closed_at_start() -> bool {
        CLOSED_AT_START.load(Ordering::Relaxed)
    }
}

/// Open stdout for the report.
///
/// `io::stdout()` treats a bad descriptor as a successful write, so on unix
/// the report goes through a duplicate of fd 1 and a closed stdout is an
/// error.
#[cfg(unix)]
fn open_stdout() -> Result<std::fs::File> {
    use detect_installer::DetectError;
    use std::os::fd::AsFd;

    if stdout_state::closed_at_start() {
        return Err(DetectError::probe_failure(
            "stdout is closed",
            io::Error::from_raw_os_error(libc::EBADF),
        ));
    }

    let fd = io::stdout()
        .as_fd()
        .try_clone_to_owned()
        .map_err(|e| DetectError::probe_failure("cannot open stdout", e))?;
    Ok(std::fs::File::from(fd))
}

#[cfg(not(unix))]
fn open_stdout() -> Result<io::Stdout> {
    Ok(io::stdout())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("detect-installer-test starting with args: {:?}", cli);

    match open_stdout().and_then(|mut out| CommandDispatcher::dispatch(&cli, &mut out)) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
