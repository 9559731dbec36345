// ---------------- Gesture bridge (stdin) ----------------
//
// An external classifier process pipes one message per line into stdin:
// either a bare state (`OPEN`) or an `updateGesture` call as JSON. Each call
// is acknowledged on stdout so the classifier session keeps its turn loop.

use kinetic_core::GestureMailbox;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

pub fn spawn_stdin_bridge(mailbox: Arc<GestureMailbox>) -> Option<thread::JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("gesture-bridge".into())
        .spawn(move || run(&mailbox, io::stdin().lock(), io::stdout()));
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("[gesture] could not start stdin bridge: {e}");
            None
        }
    }
}

fn run(mailbox: &GestureMailbox, input: impl BufRead, mut output: impl Write) {
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::warn!("[gesture] stdin read failed: {e}");
                break;
            }
        };
        let Some(update) = mailbox.offer(&line) else {
            continue;
        };
        if !mailbox.is_connected() {
            log::info!("[gesture] classifier connected");
            mailbox.set_connected(true);
        }
        if update.state.is_some() {
            mailbox.set_tracking(true);
        }
        if let Some(ack) = update.acknowledgement() {
            if writeln!(output, "{}", ack.to_json()).and_then(|_| output.flush()).is_err() {
                log::warn!("[gesture] could not acknowledge {:?}", ack.id);
            }
        }
    }
    // Keep the last gesture; only the link status changes.
    mailbox.set_connected(false);
    mailbox.set_tracking(false);
    log::info!("[gesture] classifier stream closed");
}
