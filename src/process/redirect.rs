use std::fs::OpenOptions;
use std::os::fd::{OwnedFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;

use super::fd::{self, STDIN, STDOUT};
use super::{heredoc, ProcessError, Signals};
use crate::input::LineSource;
use crate::syntax::{RedirectKind, Redirection};

const FILE_MODE: u32 = 0o644;

/// Applies `redirections` to the current process in order, so a later one
/// on the same stream wins.
pub fn apply(
    redirections: &[Redirection],
    input: &mut dyn LineSource,
    signals: &Signals,
) -> Result<(), ProcessError> {
    for redirection in redirections {
        let (source, target) = open(redirection, input, signals)?;
        fd::dup2(&source, target).map_err(|e| ProcessError::os("dup2", e))?;
        tracing::debug!(kind = ?redirection.kind, file = %redirection.target, "redirected fd {}", target);
    }
    Ok(())
}

fn open(
    redirection: &Redirection,
    input: &mut dyn LineSource,
    signals: &Signals,
) -> Result<(OwnedFd, RawFd), ProcessError> {
    let mut options = OpenOptions::new();
    let target = match redirection.kind {
        RedirectKind::Heredoc => {
            return Ok((heredoc::collect(&redirection.target, input, signals)?, STDIN));
        }
        RedirectKind::In => {
            options.read(true);
            STDIN
        }
        RedirectKind::Out => {
            options.write(true).create(true).truncate(true).mode(FILE_MODE);
            STDOUT
        }
        RedirectKind::Append => {
            options.append(true).create(true).mode(FILE_MODE);
            STDOUT
        }
    };

    let file = options
        .open(&redirection.target)
        .map_err(|source| ProcessError::Redirect {
            target: redirection.target.clone(),
            source,
        })?;
    Ok((OwnedFd::from(file), target))
}
