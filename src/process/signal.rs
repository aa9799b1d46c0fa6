use std::cell::Cell;
use std::io;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::{c_int, sighandler_t, SIGINT, SIGPIPE, SIGQUIT, SIG_DFL, SIG_IGN};

use super::ProcessError;

/// Which dispositions interrupt and quit currently have in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    /// At the prompt: interrupt flags a fresh prompt, quit is ignored.
    Interactive,
    /// Blocked in `wait`: both ignored so the shell survives a stray ^C.
    ForegroundWait,
    /// Freshly forked: both back to the OS default.
    ChildDefault,
}

/// The signal state machine, driven only from fork and wait call sites.
#[derive(Debug)]
pub struct Signals {
    state: Cell<SignalState>,
    interrupted: Arc<AtomicBool>,
}

impl Signals {
    /// Installs the interactive dispositions.
    pub fn install() -> Result<Self, ProcessError> {
        let interrupted = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
            .map_err(|e| ProcessError::os("sigaction", e))?;
        set_handler(SIGQUIT, SIG_IGN).map_err(|e| ProcessError::os("sigaction", e))?;

        Ok(Self {
            state: Cell::new(SignalState::Interactive),
            interrupted,
        })
    }

    pub fn state(&self) -> SignalState {
        self.state.get()
    }

    /// Reports and clears an interrupt that arrived outside the line editor.
    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }

    /// Ignores interrupt and quit until the returned guard is dropped, which
    /// reinstalls whatever dispositions were in place before.
    pub fn foreground(&self) -> ForegroundWait<'_> {
        let saved = [SIGINT, SIGQUIT].map(|signal| match set_handler(signal, SIG_IGN) {
            Ok(previous) => Some((signal, previous)),
            Err(e) => {
                tracing::warn!("could not ignore signal {}: {}", signal, e);
                None
            }
        });
        let previous = self.state.replace(SignalState::ForegroundWait);
        ForegroundWait {
            signals: self,
            saved,
            previous,
        }
    }

    /// Resets interrupt and quit to the default disposition. Called in a
    /// child right after `fork`.
    ///
    /// `SIGPIPE` is reset too: the Rust runtime ignores it in this process,
    /// and an ignored disposition survives `execve`.
    pub fn child_default(&self) {
        for signal in [SIGINT, SIGQUIT, SIGPIPE] {
            // Nothing useful can be reported from a half-started child.
            let _ = set_handler(signal, SIG_DFL);
        }
        self.state.set(SignalState::ChildDefault);
    }
}

pub struct ForegroundWait<'a> {
    signals: &'a Signals,
    saved: [Option<(c_int, libc::sigaction)>; 2],
    previous: SignalState,
}

impl Drop for ForegroundWait<'_> {
    fn drop(&mut self) {
        for (signal, action) in self.saved.iter().flatten() {
            if let Err(e) = restore(*signal, action) {
                tracing::warn!("could not restore signal {}: {}", signal, e);
            }
        }
        tracing::trace!(from = ?self.signals.state(), to = ?self.previous, "signal state restored");
        self.signals.state.set(self.previous);
    }
}

fn set_handler(signal: c_int, handler: sighandler_t) -> io::Result<libc::sigaction> {
    unsafe {
        let mut action: libc::sigaction = mem::zeroed();
        action.sa_sigaction = handler;
        libc::sigemptyset(&mut action.sa_mask);

        let mut previous: libc::sigaction = mem::zeroed();
        if libc::sigaction(signal, &action, &mut previous) == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(previous)
    }
}

fn restore(signal: c_int, action: &libc::sigaction) -> io::Result<()> {
    if unsafe { libc::sigaction(signal, action, ptr::null_mut()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
fn current_handler(signal: c_int) -> io::Result<sighandler_t> {
    unsafe {
        let mut current: libc::sigaction = mem::zeroed();
        if libc::sigaction(signal, ptr::null(), &mut current) == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(current.sa_sigaction)
    }
}
