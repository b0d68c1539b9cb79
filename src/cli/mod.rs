//! CLI support for blockscript
//!
//! The pieces the `blockscript` binary is built from: compiling a file,
//! turning trees into JSON, and rendering diagnostics for humans.

mod check;
mod convert;
pub mod report;
mod style;

pub use check::{compile, execute_check, render_output, CheckOptions, CheckResult, Compiled, Emit};
pub use convert::{program_to_json, tokens_to_json};
pub use style::Style;

use crate::CompileError;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::io;
use std::panic::{self, UnwindSafe};
use std::sync::{Mutex, PoisonError};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// The source text failed to lex or parse
    Compile {
        error: CompileError,
        source: String,
        file: String,
    },
    /// JSON serialization error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// A defect in the compiler itself, never the user's code
    Internal(InternalFault),
}

/// Details of a compiler crash, captured from a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalFault {
    pub category: String,
    pub message: String,
    pub location: Option<String>,
    pub trace: String,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Compile {
                error,
                source,
                file,
            } => write!(f, "{}", report::render(error, source, file, &Style::plain())),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Internal(fault) => write!(f, "{}", report::render_crash(fault, &Style::plain())),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Compile { error, .. } => Some(error),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Internal(_) => None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

thread_local! {
    static LAST_FAULT: RefCell<Option<InternalFault>> = const { RefCell::new(None) };
}

/// Held while the panic hook is swapped, so concurrent callers restore hooks
/// in the order they installed them.
static HOOK_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f`, turning a panic inside it into [`CliError::Internal`].
///
/// The default panic message is suppressed while `f` runs; the fault is
/// reported through the returned error instead. The panic hook is process
/// wide, so concurrent calls run one after another.
pub fn catch_internal<T, F>(f: F) -> Result<T, CliError>
where
    F: FnOnce() -> Result<T, CliError> + UnwindSafe,
{
    let _guard = HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        let fault = InternalFault {
            category: "panic".to_string(),
            message: payload_message(info.payload()),
            location: info.location().map(|l| l.to_string()),
            trace: Backtrace::force_capture().to_string(),
        };
        LAST_FAULT.with(|slot| *slot.borrow_mut() = Some(fault));
    }));

    let result = panic::catch_unwind(f);
    panic::set_hook(previous);

    match result {
        Ok(result) => result,
        Err(payload) => {
            let fault = LAST_FAULT
                .with(|slot| slot.borrow_mut().take())
                .unwrap_or_else(|| InternalFault {
                    category: "panic".to_string(),
                    message: payload_message(payload.as_ref()),
                    location: None,
                    trace: String::new(),
                });
            tracing::error!(message = %fault.message, "compiler crashed");
            Err(CliError::Internal(fault))
        }
    }
}

fn payload_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
