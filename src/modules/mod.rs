use std::io::{self, BufRead, Write};

use shared_resources::config::{ConfigError, Hotkey, MacroConfig};

use crate::utilities::debug;
use crate::utilities::input::{parse_int, ReadError, ValueReader, DEFAULT_BOOL_ERROR};
use crate::utilities::sign_generator::{ElevatorLayout, MAX_FLOORS};

pub mod hotkey;
#[cfg(feature = "keystrokes")]
pub mod keystrokes;
pub mod sign_writer;

use hotkey::{HotkeyListener, Trigger, TriggerSource};
use sign_writer::{drive_signs, DriveOutcome, SignWriter, TerminalSignWriter};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("hotkey listener stopped")]
    ListenerStopped,
    #[cfg(feature = "keystrokes")]
    #[error("hotkey \"{0}\" cannot be listened for outside the terminal, use a function key")]
    NoGlobalHotkey(String),
}

fn floor_count_check(num_floors: &i64) -> Result<(), String> {
    if *num_floors <= 0 {
        Err(String::from("Not a legal integer (above 0)"))
    } else if *num_floors > i64::from(MAX_FLOORS) {
        Err(format!("Not a legal integer (at most {MAX_FLOORS})"))
    } else {
        Ok(())
    }
}

pub fn read_layout<R: BufRead, W: Write>(
    reader: &mut ValueReader<R, W>,
) -> Result<ElevatorLayout, ReadError> {
    let num_floors =
        reader.read_validated("Enter a number of floors", parse_int, None, floor_count_check)?;
    let has_basement = reader.read_bool(
        "Enter whether to include the basement as a floor",
        Some(false),
        |_| true,
        DEFAULT_BOOL_ERROR,
    )?;
    let has_rooftop = reader.read_bool(
        "Enter whether to include the rooftop as a floor",
        Some(false),
        |_| true,
        DEFAULT_BOOL_ERROR,
    )?;

    // range checked by the prompt above
    let num_floors = u32::try_from(num_floors).unwrap_or(MAX_FLOORS);
    Ok(ElevatorLayout::new(num_floors, has_basement, has_rooftop))
}

/// Configures and writes elevators until the user declines another one.
/// Returns the number of elevators configured.
pub fn run_session<R: BufRead, W: Write>(
    reader: &mut ValueReader<R, W>,
    hotkey: &Hotkey,
    mut wait_for_trigger: impl FnMut() -> Result<Trigger, RunError>,
    writer: &mut dyn SignWriter,
) -> Result<usize, RunError> {
    let mut elevators = 0;

    loop {
        debug::print_banner(reader.output())?;
        let layout = read_layout(reader)?;
        elevators += 1;
        tracing::info!(?layout, signs = layout.sign_count(), "configured elevator");

        debug::print_hotkey_hint(reader.output(), hotkey)?;
        match drive_signs(layout.signs(), &mut wait_for_trigger, writer, reader.output())? {
            DriveOutcome::Completed { written } => {
                tracing::info!(written, "all signs written");
            }
            DriveOutcome::Aborted { written, total } => {
                debug::print_aborted(reader.output(), written, total)?;
            }
        }

        if !reader.read_bool(
            "Would you like to create another elevator?",
            Some(true),
            |_| true,
            DEFAULT_BOOL_ERROR,
        )? {
            return Ok(elevators);
        }
    }
}

type SignOutput = (Box<dyn TriggerSource>, Box<dyn SignWriter>);

fn terminal_output(config: &MacroConfig) -> Result<SignOutput, RunError> {
    let listener = HotkeyListener::spawn(config.keyboard.hotkey, config.keyboard.poll_period)?;
    Ok((Box::new(listener), Box::new(TerminalSignWriter::new(io::stdout()))))
}

#[cfg(feature = "keystrokes")]
fn sign_output(config: &MacroConfig, dry_run: bool) -> Result<SignOutput, RunError> {
    if dry_run {
        return terminal_output(config);
    }
    let listener = keystrokes::GlobalHotkeyListener::spawn(&config.keyboard.hotkey)?;
    Ok((Box::new(listener), Box::new(keystrokes::KeystrokeSignWriter::new()?)))
}

#[cfg(not(feature = "keystrokes"))]
fn sign_output(config: &MacroConfig, dry_run: bool) -> Result<SignOutput, RunError> {
    if !dry_run {
        tracing::warn!("built without the keystrokes feature, signs are printed to the terminal");
    }
    terminal_output(config)
}

/// Runs the session. With `dry_run` set, or without the `keystrokes`
/// feature, signs are printed here instead of typed into the game.
pub fn run(config: MacroConfig, dry_run: bool) -> Result<(), RunError> {
    let (triggers, mut writer) = sign_output(&config, dry_run)?;
    let mut reader = ValueReader::new(io::stdin().lock(), io::stdout());

    let elevators = run_session(
        &mut reader,
        &config.keyboard.hotkey,
        || triggers.wait(),
        writer.as_mut(),
    )?;
    tracing::info!(elevators, "session finished");
    Ok(())
}
