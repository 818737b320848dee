use anyhow::{anyhow, bail, Result};
use locsearch_core::session::{Key, Pointer};
use std::time::Duration;

/// One line of an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Text(String),
    Key(Key),
    Pointer(Pointer),
    Focus,
    /// The host resets its value to null.
    Clear,
    Wait(Duration),
    Quit,
}

pub fn parse_line(line: &str) -> Result<Event> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Event::Text(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let event = match name {
        "down" => Event::Key(Key::ArrowDown),
        "up" => Event::Key(Key::ArrowUp),
        "enter" => Event::Key(Key::Enter),
        "esc" => Event::Key(Key::Escape),
        "hover" => Event::Pointer(Pointer::Hover(number(parts.next(), name)?)),
        "click" => Event::Pointer(Pointer::Select(number(parts.next(), name)?)),
        "outside" => Event::Pointer(Pointer::Outside),
        "focus" => Event::Focus,
        "clear" => Event::Clear,
        "wait" => Event::Wait(Duration::from_millis(number(parts.next(), name)? as u64)),
        "quit" | "q" => Event::Quit,
        other => bail!("unknown command :{other}"),
    };
    if parts.next().is_some() {
        bail!("too many arguments for :{name}");
    }
    Ok(event)
}

fn number(arg: Option<&str>, command: &str) -> Result<usize> {
    let arg = arg.ok_or_else(|| anyhow!(":{command} needs a number"))?;
    arg.parse()
        .map_err(|_| anyhow!(":{command} expects a number, got {arg:?}"))
}
