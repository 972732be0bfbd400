/// ----- HOTKEY MODULE -----
/// This module listens for the sign hotkey on the terminal. The listener
/// thread only reads key events while armed, so the prompts keep normal
/// line input in between signs.

use std::io;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use shared_resources::config::Hotkey;

use super::RunError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Write,
    Abort,
}

/// Something the session can block on until the next sign is wanted.
pub trait TriggerSource {
    fn wait(&self) -> Result<Trigger, RunError>;
}

/// Esc and Ctrl-C abort; the hotkey writes; everything else is ignored.
pub fn classify(hotkey: &Hotkey, key: KeyEvent) -> Option<Trigger> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        code if code == hotkey.code() => Some(Trigger::Write),
        KeyCode::Esc => Some(Trigger::Abort),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Trigger::Abort),
        _ => None,
    }
}

fn pending_event() -> io::Result<Option<Event>> {
    if event::poll(Duration::ZERO)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Throws away every event already queued. Returns how many were dropped.
fn drain_events(mut next_pending: impl FnMut() -> io::Result<Option<Event>>) -> io::Result<usize> {
    let mut drained = 0;
    while next_pending()?.is_some() {
        drained += 1;
    }
    Ok(drained)
}

/// Empties `trigger_rx` of triggers nobody waited for.
pub(super) fn discard_stale(trigger_rx: &Receiver<Trigger>) -> usize {
    trigger_rx.try_iter().count()
}

fn poll_trigger(hotkey: &Hotkey) -> io::Result<Option<Trigger>> {
    while let Some(event) = pending_event()? {
        if let Event::Key(key) = event {
            if let Some(trigger) = classify(hotkey, key) {
                return Ok(Some(trigger));
            }
        }
    }
    Ok(None)
}

fn listen(
    hotkey: Hotkey,
    poll_period: Duration,
    arm_rx: Receiver<bool>,
    trigger_tx: Sender<Trigger>,
) {
    let mut armed = false;

    loop {
        select! {
            recv(arm_rx) -> msg => {
                match msg {
                    Ok(on) => armed = on,
                    // session dropped the listener
                    Err(_) => return,
                }
            },
            default(poll_period) => {
                if armed {
                    let trigger = match poll_trigger(&hotkey) {
                        Ok(trigger) => trigger,
                        Err(err) => {
                            tracing::warn!(%err, "could not read terminal events");
                            Some(Trigger::Abort)
                        }
                    };
                    if let Some(trigger) = trigger {
                        tracing::debug!(?trigger, "hotkey listener fired");
                        armed = false;
                        if trigger_tx.send(trigger).is_err() {
                            return;
                        }
                    }
                }
            },
        }
    }
}

pub struct HotkeyListener {
    arm_tx: Sender<bool>,
    trigger_rx: Receiver<Trigger>,
}

impl HotkeyListener {
    pub fn spawn(hotkey: Hotkey, poll_period: Duration) -> io::Result<Self> {
        let (arm_tx, arm_rx) = unbounded();
        let (trigger_tx, trigger_rx) = unbounded();
        thread::Builder::new()
            .name("hotkey".to_string())
            .spawn(move || listen(hotkey, poll_period, arm_rx, trigger_tx))?;
        Ok(HotkeyListener { arm_tx, trigger_rx })
    }

    fn arm_and_recv(&self) -> Result<Trigger, RunError> {
        // presses made while the previous sign was written must not count
        let drained = drain_events(pending_event)? + discard_stale(&self.trigger_rx);
        if drained > 0 {
            tracing::debug!(drained, "discarded key presses made before arming");
        }
        self.arm_tx.send(true).map_err(|_| RunError::ListenerStopped)?;
        self.trigger_rx.recv().map_err(|_| RunError::ListenerStopped)
    }
}

impl TriggerSource for HotkeyListener {
    /// Blocks until the hotkey, Esc or Ctrl-C is pressed. The terminal is in
    /// raw mode only for the duration of the wait.
    fn wait(&self) -> Result<Trigger, RunError> {
        terminal::enable_raw_mode()?;
        let trigger = self.arm_and_recv();
        terminal::disable_raw_mode()?;
        trigger
    }
}
