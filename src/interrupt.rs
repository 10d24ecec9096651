//! Ctrl-C handling.
//!
//! SIGINT only sets a flag. A foreground child receives the same signal and
//! exits non-zero, so the running pipeline unwinds through its normal error
//! path (dropping the staging tree); `main` then exits 1 without printing.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_sigint(_: nix::libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the SIGINT handler. Call once at process start.
#[cfg(unix)]
pub fn install() -> Result<()> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(on_sigint),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: the handler only touches an atomic
    unsafe { sigaction(Signal::SIGINT, &action) }
        .map_err(|e| Error::precondition(format!("failed to install SIGINT handler: {}", e)))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn install() -> Result<()> {
    Ok(())
}

/// True once the user has pressed Ctrl-C.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Abort the current pipeline if the user pressed Ctrl-C.
pub fn check() -> Result<()> {
    if interrupted() {
        Err(Error::Interrupted)
    } else {
        Ok(())
    }
}
