/// ----- KEYSTROKES MODULE -----
/// Types signs into whichever window has focus and listens for the hotkey
/// system wide, so the game can stay in the foreground while signs are
/// written.

use std::fmt;
use std::io;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::KeyCode;
use enigo::{Direction as Press, Enigo, Key, Keyboard, Settings};
use rdev::{EventType, Key as RdevKey};

use shared_resources::config::Hotkey;

use super::hotkey::{discard_stale, Trigger, TriggerSource};
use super::sign_writer::SignWriter;
use super::RunError;

fn input_error(err: impl fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

/// Writes each line as typed text followed by Return, and closes the sign
/// with Escape.
pub struct KeystrokeSignWriter {
    enigo: Enigo,
}

impl KeystrokeSignWriter {
    pub fn new() -> io::Result<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(input_error)?;
        Ok(KeystrokeSignWriter { enigo })
    }
}

impl SignWriter for KeystrokeSignWriter {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.enigo.text(line).map_err(input_error)?;
        self.enigo.key(Key::Return, Press::Click).map_err(input_error)
    }

    fn finish_sign(&mut self) -> io::Result<()> {
        self.enigo.key(Key::Escape, Press::Click).map_err(input_error)
    }
}

/// Only function keys can be listened for globally: a letter hotkey would
/// fire on the sign text typed by [`KeystrokeSignWriter`].
pub fn global_key(hotkey: &Hotkey) -> Option<RdevKey> {
    let key = match hotkey.code() {
        KeyCode::F(1) => RdevKey::F1,
        KeyCode::F(2) => RdevKey::F2,
        KeyCode::F(3) => RdevKey::F3,
        KeyCode::F(4) => RdevKey::F4,
        KeyCode::F(5) => RdevKey::F5,
        KeyCode::F(6) => RdevKey::F6,
        KeyCode::F(7) => RdevKey::F7,
        KeyCode::F(8) => RdevKey::F8,
        KeyCode::F(9) => RdevKey::F9,
        KeyCode::F(10) => RdevKey::F10,
        KeyCode::F(11) => RdevKey::F11,
        KeyCode::F(12) => RdevKey::F12,
        _ => return None,
    };
    Some(key)
}

/// Turns raw key events into triggers. Ctrl-C aborts; Escape does not,
/// since the writer itself presses it after every sign.
#[derive(Debug)]
struct KeyState {
    hotkey: RdevKey,
    ctrl_held: bool,
}

impl KeyState {
    fn new(hotkey: RdevKey) -> Self {
        KeyState {
            hotkey,
            ctrl_held: false,
        }
    }

    fn classify(&mut self, event: EventType) -> Option<Trigger> {
        match event {
            EventType::KeyPress(RdevKey::ControlLeft | RdevKey::ControlRight) => {
                self.ctrl_held = true;
                None
            }
            EventType::KeyRelease(RdevKey::ControlLeft | RdevKey::ControlRight) => {
                self.ctrl_held = false;
                None
            }
            EventType::KeyPress(key) if key == self.hotkey => Some(Trigger::Write),
            EventType::KeyPress(RdevKey::KeyC) if self.ctrl_held => Some(Trigger::Abort),
            _ => None,
        }
    }
}

fn listen(hotkey: RdevKey, trigger_tx: Sender<Trigger>) {
    let mut keys = KeyState::new(hotkey);
    let result = rdev::listen(move |event| {
        if let Some(trigger) = keys.classify(event.event_type) {
            tracing::debug!(?trigger, "global hotkey fired");
            // receiver gone means the session is over
            let _ = trigger_tx.send(trigger);
        }
    });
    if let Err(err) = result {
        tracing::error!(?err, "global hotkey listener stopped");
    }
}

pub struct GlobalHotkeyListener {
    trigger_rx: Receiver<Trigger>,
}

impl GlobalHotkeyListener {
    pub fn spawn(hotkey: &Hotkey) -> Result<Self, RunError> {
        let key = global_key(hotkey).ok_or_else(|| RunError::NoGlobalHotkey(hotkey.to_string()))?;
        let (trigger_tx, trigger_rx) = unbounded();
        thread::Builder::new()
            .name("global-hotkey".to_string())
            .spawn(move || listen(key, trigger_tx))?;
        Ok(GlobalHotkeyListener { trigger_rx })
    }
}

impl TriggerSource for GlobalHotkeyListener {
    fn wait(&self) -> Result<Trigger, RunError> {
        let stale = discard_stale(&self.trigger_rx);
        if stale > 0 {
            tracing::debug!(stale, "discarded hotkey presses made while writing");
        }
        self.trigger_rx.recv().map_err(|_| RunError::ListenerStopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("F1", Some(RdevKey::F1))]
    #[test_case("f4", Some(RdevKey::F4))]
    #[test_case("F12", Some(RdevKey::F12))]
    #[test_case("g", None)]
    #[test_case("7", None)]
    fn only_function_keys_are_global(text: &str, expected: Option<RdevKey>) {
        assert_eq!(global_key(&Hotkey::parse(text).unwrap()), expected);
    }

    #[test]
    fn letter_hotkey_cannot_listen_globally() {
        let result = GlobalHotkeyListener::spawn(&Hotkey::parse("g").unwrap());
        assert!(matches!(result, Err(RunError::NoGlobalHotkey(key)) if key == "g"));
    }

    #[test]
    fn hotkey_press_writes_and_release_is_ignored() {
        let mut keys = KeyState::new(RdevKey::F4);
        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::F4)), Some(Trigger::Write));
        assert_eq!(keys.classify(EventType::KeyRelease(RdevKey::F4)), None);
        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::F5)), None);
    }

    #[test]
    fn ctrl_c_aborts_but_typed_escape_does_not() {
        let mut keys = KeyState::new(RdevKey::F4);
        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::Escape)), None);
        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::KeyC)), None);

        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::ControlLeft)), None);
        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::KeyC)), Some(Trigger::Abort));
        assert_eq!(keys.classify(EventType::KeyRelease(RdevKey::ControlLeft)), None);
        assert_eq!(keys.classify(EventType::KeyPress(RdevKey::KeyC)), None);
    }
}
