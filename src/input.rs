use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use grayscott_canvas::Tuning;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Tune(Tuning),
    TogglePause,
    Reseed,
    Quit,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

// Caps one frame's input so a held key cannot stall the frame.
const MAX_KEYS_PER_FRAME: usize = 32;

/// Key presses already queued, read without blocking.
pub(crate) fn pending_keys() -> anyhow::Result<Vec<InputEvent>> {
    let mut keys = Vec::new();
    while keys.len() < MAX_KEYS_PER_FRAME && event::poll(Duration::ZERO)? {
        keys.extend(key_press(event::read()?));
    }
    Ok(keys)
}

/// Presses and auto-repeats; releases and non-key events are dropped.
fn key_press(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(k) if k.kind != KeyEventKind::Release => Some(InputEvent {
            key: k.code,
            mods: k.modifiers,
        }),
        _ => None,
    }
}

pub(crate) fn action_for(ev: InputEvent) -> Option<Action> {
    if ev.mods.contains(KeyModifiers::CONTROL)
        && matches!(ev.key, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Action::Quit);
    }
    match ev.key {
        KeyCode::Up => Some(Action::Tune(Tuning::IncreaseFeed)),
        KeyCode::Down => Some(Action::Tune(Tuning::DecreaseFeed)),
        KeyCode::Right => Some(Action::Tune(Tuning::IncreaseKill)),
        KeyCode::Left => Some(Action::Tune(Tuning::DecreaseKill)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Tune(Tuning::IncreaseDiffusionA)),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Action::Tune(Tuning::DecreaseDiffusionA)),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reseed),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
