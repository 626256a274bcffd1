//! Line-oriented session driving the palette controller.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::commands::{CommandOutput, CommandRegistry, Controller};

/// Read commands from `input` until `quit` or end of input.
///
/// While the add-color prompt is open the next line is the color text;
/// end of input with the prompt open cancels it.
pub fn run<R: BufRead, W: Write>(
    ctl: &mut Controller,
    registry: &CommandRegistry,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if !ctl.is_dialog_open() {
            write!(out, "wpgen> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            if ctl.is_dialog_open() {
                ctl.cancel_add();
            }
            writeln!(out)?;
            break;
        };
        let line = line?;

        if ctl.is_dialog_open() {
            ctl.confirm_add(&line);
            continue;
        }

        match registry.execute(&line, ctl) {
            Ok(CommandOutput::Text(text)) => writeln!(out, "{text}")?,
            Ok(CommandOutput::Prompt(text)) => {
                write!(out, "{text}\n> ")?;
                out.flush()?;
            },
            Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Quit) => break,
            Err(e) => writeln!(out, "error: {e:#}")?,
        }
    }

    if let Err(e) = ctl.save() {
        log::error!("Failed to save favorites on exit: {e}");
    }
    Ok(())
}
