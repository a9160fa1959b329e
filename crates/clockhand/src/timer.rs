//! One-shot, cancellable timer behind the hours-to-minutes auto-advance.
//!
//! At most one advance is pending. Restarting aborts the previous task before
//! spawning a new one, and dropping [`AutoAdvance`] aborts whatever is left,
//! so a torn-down picker never sees a late transition.
//!
//! A fired timer delivers its [`Ticket`] over a channel; the owner feeds it
//! back through [`AutoAdvance::accept`], which rejects anything but the
//! ticket of the advance that is still pending.

use async_channel::Sender;
use derive_more::Display;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("#{_0}")]
pub struct Ticket(u64);

struct PendingAdvance {
    ticket: Ticket,
    task: JoinHandle<()>,
}

impl Drop for PendingAdvance {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct AutoAdvance {
    runtime: Handle,
    tx: Sender<Ticket>,
    delay: Duration,
    issued: u64,
    pending: Option<PendingAdvance>,
}

impl AutoAdvance {
    pub fn new(runtime: Handle, tx: Sender<Ticket>, delay: Duration) -> Self {
        Self {
            runtime,
            tx,
            delay,
            issued: 0,
            pending: None,
        }
    }

    /// Takes effect from the next restart; a pending advance keeps its deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn restart(&mut self) -> Ticket {
        self.cancel();

        self.issued += 1;
        let ticket = Ticket(self.issued);
        let (tx, delay) = (self.tx.clone(), self.delay);

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).await.is_err() {
                log::debug!("Auto-advance {} fired after its receiver closed", ticket);
            }
        });

        log::trace!("Auto-advance {} scheduled in {:?}", ticket, delay);
        self.pending = Some(PendingAdvance { ticket, task });
        ticket
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::trace!("Auto-advance {} cancelled", pending.ticket);
        }
    }

    /// Consumes the pending advance if `ticket` belongs to it.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => {
                log::debug!("Dropping stale auto-advance {}", ticket);
                false
            }
        }
    }
}
