/// ----- SIGN WRITER MODULE -----
/// This module hands the generated signs to the output one at a time,
/// waiting for a trigger before each sign.

use std::io::{self, Write};

use shared_resources::sign_entry::SignEntry;

use crate::utilities::debug;
use crate::utilities::sign_generator::SignSequence;

use super::hotkey::Trigger;
use super::RunError;

/// Output for lift signs. A sign is written line by line and then closed,
/// which resets the output for the next sign.
pub trait SignWriter {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    fn finish_sign(&mut self) -> io::Result<()>;

    fn write_sign(&mut self, entry: &SignEntry) -> io::Result<()> {
        for line in entry.lines() {
            self.write_line(line)?;
        }
        self.finish_sign()
    }
}

/// Prints each sign as two lines followed by an empty separator line.
pub struct TerminalSignWriter<W> {
    out: W,
}

impl<W: Write> TerminalSignWriter<W> {
    pub fn new(out: W) -> Self {
        TerminalSignWriter { out }
    }
}

impl<W: Write> SignWriter for TerminalSignWriter<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    fn finish_sign(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    Completed { written: usize },
    Aborted { written: usize, total: usize },
}

pub fn drive_signs(
    signs: SignSequence,
    mut wait_for_trigger: impl FnMut() -> Result<Trigger, RunError>,
    writer: &mut dyn SignWriter,
    status: &mut impl Write,
) -> Result<DriveOutcome, RunError> {
    let total = signs.len();
    let mut written = 0;

    for entry in signs {
        match wait_for_trigger()? {
            Trigger::Write => {
                debug::print_writing(status, &entry)?;
                writer.write_sign(&entry)?;
                written += 1;
            }
            Trigger::Abort => {
                tracing::info!(written, total, "sign writing aborted");
                return Ok(DriveOutcome::Aborted { written, total });
            }
        }
    }
    Ok(DriveOutcome::Completed { written })
}
