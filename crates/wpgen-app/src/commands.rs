//! Command trait, registry, and the palette screen's gestures as commands.
//!
//! Each command stands in for one touch gesture or menu action on the
//! palette screen: `tap`, `hold` (long-press), `star`, `add`, and so on.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use wpgen_core::Outcome;
use wpgen_core::platform::DesktopPlatform;
use wpgen_core::prefs::FilePrefs;
use wpgen_core::{Mode, PaletteController};

/// The controller as wired up by the desktop app.
pub type Controller = PaletteController<FilePrefs, DesktopPlatform>;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// The add-color prompt is open; the next input line is its text.
    Prompt(String),
    /// Leave the session.
    Quit,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "tap <index>").
    fn usage(&self) -> &str;

    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Parse and run one input line.
    pub fn execute(&self, line: &str, ctl: &mut Controller) -> Result<CommandOutput> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(CommandOutput::None);
        };
        let args: Vec<&str> = parts.collect();
        if name == "help" {
            return Ok(CommandOutput::Text(self.help()));
        }
        match self.commands.get(name) {
            Some(cmd) => cmd.execute(&args, ctl),
            None => bail!("unknown command: {name} (try 'help')"),
        }
    }

    fn help(&self) -> String {
        let mut out = String::from("Commands:\n");
        for cmd in self.commands.values() {
            out.push_str(&format!("  {:<34} {}\n", cmd.usage(), cmd.description()));
        }
        out.push_str(&format!("  {:<34} {}", "help", "Show this list"));
        out
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register every palette command.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(ListCmd));
    reg.register(Box::new(TapCmd));
    reg.register(Box::new(HoldCmd));
    reg.register(Box::new(CheckCmd { checked: true }));
    reg.register(Box::new(CheckCmd { checked: false }));
    reg.register(Box::new(ApplyCmd));
    reg.register(Box::new(DoneCmd));
    reg.register(Box::new(StarCmd));
    reg.register(Box::new(AddCmd));
    reg.register(Box::new(PreviewCmd));
    reg.register(Box::new(QuitCmd));
}

fn index_arg(args: &[&str], usage: &str) -> Result<usize> {
    let Some(raw) = args.first() else {
        bail!("usage: {usage}");
    };
    raw.parse::<usize>()
        .with_context(|| format!("not a palette index: {raw}"))
}

/// Short text for outcomes the platform notice does not already cover.
fn describe(outcome: Outcome, ctl: &Controller) -> CommandOutput {
    match outcome {
        Outcome::Ignored => CommandOutput::Text("(nothing to do)".to_string()),
        Outcome::SelectionChanged(_) => CommandOutput::Text(ctl.selection_title()),
        Outcome::SelectionEnded => CommandOutput::Text("Selection cleared".to_string()),
        _ => CommandOutput::None,
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

struct ListCmd;
impl Command for ListCmd {
    fn name(&self) -> &str {
        "list"
    }
    fn description(&self) -> &str {
        "Show the palette (* favorite, [x] checked)"
    }
    fn usage(&self) -> &str {
        "list"
    }
    fn execute(&self, _args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let mut out = String::new();
        if ctl.mode() == Mode::MultiSelect {
            out.push_str(&format!("-- {} --\n", ctl.selection_title()));
        }
        for (i, color) in ctl.palette().iter().enumerate() {
            let star = if ctl.is_favorite_at(i) { '*' } else { ' ' };
            let check = match ctl.mode() {
                Mode::MultiSelect if ctl.is_checked_at(i) => "[x] ",
                Mode::MultiSelect => "[ ] ",
                Mode::Browse => "",
            };
            out.push_str(&format!("{i:>3} {star} {check}{color}\n"));
        }
        out.pop();
        Ok(CommandOutput::Text(out))
    }
}

// ---------------------------------------------------------------------------
// tap / hold / check / uncheck
// ---------------------------------------------------------------------------

struct TapCmd;
impl Command for TapCmd {
    fn name(&self) -> &str {
        "tap"
    }
    fn description(&self) -> &str {
        "Set a color as wallpaper (toggles check while selecting)"
    }
    fn usage(&self) -> &str {
        "tap <index>"
    }
    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let i = index_arg(args, self.usage())?;
        let outcome = ctl.tap(i);
        Ok(describe(outcome, ctl))
    }
}

struct HoldCmd;
impl Command for HoldCmd {
    fn name(&self) -> &str {
        "hold"
    }
    fn description(&self) -> &str {
        "Long-press: start selecting colors for a gradient"
    }
    fn usage(&self) -> &str {
        "hold <index>"
    }
    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let i = index_arg(args, self.usage())?;
        let outcome = ctl.long_press(i);
        Ok(describe(outcome, ctl))
    }
}

struct CheckCmd {
    checked: bool,
}
impl Command for CheckCmd {
    fn name(&self) -> &str {
        if self.checked { "check" } else { "uncheck" }
    }
    fn description(&self) -> &str {
        if self.checked {
            "Add a color to the selection"
        } else {
            "Remove a color from the selection"
        }
    }
    fn usage(&self) -> &str {
        if self.checked {
            "check <index>"
        } else {
            "uncheck <index>"
        }
    }
    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let i = index_arg(args, self.usage())?;
        let outcome = ctl.set_checked(i, self.checked);
        Ok(describe(outcome, ctl))
    }
}

// ---------------------------------------------------------------------------
// apply / done
// ---------------------------------------------------------------------------

struct ApplyCmd;
impl Command for ApplyCmd {
    fn name(&self) -> &str {
        "apply"
    }
    fn description(&self) -> &str {
        "Set a gradient of the checked colors as wallpaper"
    }
    fn usage(&self) -> &str {
        "apply"
    }
    fn execute(&self, _args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        if !ctl.can_apply_gradient() {
            return Ok(CommandOutput::Text(
                "Check at least two colors first".to_string(),
            ));
        }
        let outcome = ctl.apply_gradient();
        Ok(describe(outcome, ctl))
    }
}

struct DoneCmd;
impl Command for DoneCmd {
    fn name(&self) -> &str {
        "done"
    }
    fn description(&self) -> &str {
        "Leave selection mode"
    }
    fn usage(&self) -> &str {
        "done"
    }
    fn execute(&self, _args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let outcome = ctl.end_selection();
        Ok(describe(outcome, ctl))
    }
}

// ---------------------------------------------------------------------------
// star / add
// ---------------------------------------------------------------------------

struct StarCmd;
impl Command for StarCmd {
    fn name(&self) -> &str {
        "star"
    }
    fn description(&self) -> &str {
        "Toggle a color's favorite mark"
    }
    fn usage(&self) -> &str {
        "star <index>"
    }
    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let i = index_arg(args, self.usage())?;
        let outcome = ctl.toggle_favorite(i);
        Ok(describe(outcome, ctl))
    }
}

struct AddCmd;
impl Command for AddCmd {
    fn name(&self) -> &str {
        "add"
    }
    fn description(&self) -> &str {
        "Add a favorite color (prompts when no color is given)"
    }
    fn usage(&self) -> &str {
        "add [color]"
    }
    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        ctl.open_add_dialog();
        if args.is_empty() {
            let s = ctl.strings();
            return Ok(CommandOutput::Prompt(format!(
                "{}: {}",
                s.add_color_title, s.add_color_message
            )));
        }
        let outcome = ctl.confirm_add(&args.join(" "));
        Ok(describe(outcome, ctl))
    }
}

// ---------------------------------------------------------------------------
// preview
// ---------------------------------------------------------------------------

/// Grid column width assumed when none is given.
const DEFAULT_COLUMN_WIDTH: u32 = 120;

struct PreviewCmd;
impl Command for PreviewCmd {
    fn name(&self) -> &str {
        "preview"
    }
    fn description(&self) -> &str {
        "Save a color's grid preview square as PNG"
    }
    fn usage(&self) -> &str {
        "preview <index> <file> [column-width]"
    }
    fn execute(&self, args: &[&str], ctl: &mut Controller) -> Result<CommandOutput> {
        let i = index_arg(args, self.usage())?;
        let Some(path) = args.get(1) else {
            bail!("usage: {}", self.usage());
        };
        let column_width = match args.get(2) {
            Some(w) => w
                .parse::<u32>()
                .with_context(|| format!("not a width: {w}"))?,
            None => DEFAULT_COLUMN_WIDTH,
        };
        let Some(bitmap) = ctl.preview(i, column_width) else {
            bail!("no palette entry at {i}");
        };
        std::fs::write(Path::new(path), bitmap.encode_png()?)
            .with_context(|| format!("writing {path}"))?;
        Ok(CommandOutput::Text(format!(
            "Saved {}x{} preview to {path}",
            bitmap.width(),
            bitmap.height()
        )))
    }
}

// ---------------------------------------------------------------------------
// quit
// ---------------------------------------------------------------------------

struct QuitCmd;
impl Command for QuitCmd {
    fn name(&self) -> &str {
        "quit"
    }
    fn description(&self) -> &str {
        "Exit"
    }
    fn usage(&self) -> &str {
        "quit"
    }
    fn execute(&self, _args: &[&str], _ctl: &mut Controller) -> Result<CommandOutput> {
        Ok(CommandOutput::Quit)
    }
}
