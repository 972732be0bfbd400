use std::io::{Result, Write};

use crossterm::style::Stylize;

use shared_resources::config::Hotkey;
use shared_resources::sign_entry::SignEntry;

use super::input::InputError;

pub fn print_banner(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", "Welcome to the CraftBook Lift Sign Macro program!".bold())
}

pub fn print_invalid_input(out: &mut impl Write, err: &InputError) -> Result<()> {
    writeln!(out, "{} {}", "Error, invalid input:".red(), err)?;
    writeln!(out, "Please try again.")
}

pub fn print_hotkey_hint(out: &mut impl Write, hotkey: &Hotkey) -> Result<()> {
    writeln!(out, "To write a sign, press \"{}\".", hotkey.to_string().cyan())
}

pub fn print_writing(out: &mut impl Write, entry: &SignEntry) -> Result<()> {
    writeln!(out, "Writing {entry}...")
}

pub fn print_aborted(out: &mut impl Write, written: usize, total: usize) -> Result<()> {
    writeln!(out, "{} after {written} of {total} signs.", "Stopped".yellow())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_resources::direction::Direction;

    fn printed(print: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        print(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn invalid_input_report_has_two_lines() {
        let text = printed(|out| print_invalid_input(out, &InputError::BlankWithoutDefault));
        assert!(text.contains("Error, invalid input:"));
        assert!(text.contains("No default value, cannot be blank\nPlease try again.\n"));
    }

    #[test]
    fn writing_line_quotes_both_lines() {
        let entry = SignEntry::new("2nd Floor", Direction::Down);
        let text = printed(|out| print_writing(out, &entry));
        assert_eq!(text, "Writing \"2nd Floor\" - \"[Lift Down]\"...\n");
    }
}
