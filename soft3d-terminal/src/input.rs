/// Key events to camera intents
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use soft3d_core::Intent;

/// Map one key event; releases and unbound keys map to nothing.
///
/// w/s forward/back, a/d left/right, q/e up/down, arrows yaw and pitch,
/// Esc or Ctrl-C quit.
pub fn intent_for(key: &KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    let intent = match key.code {
        KeyCode::Esc => Intent::Quit,
        KeyCode::Char('w') => Intent::MoveForward,
        KeyCode::Char('s') => Intent::MoveBack,
        KeyCode::Char('a') => Intent::MoveLeft,
        KeyCode::Char('d') => Intent::MoveRight,
        KeyCode::Char('q') => Intent::MoveUp,
        KeyCode::Char('e') => Intent::MoveDown,
        KeyCode::Left => Intent::YawLeft,
        KeyCode::Right => Intent::YawRight,
        KeyCode::Up => Intent::PitchUp,
        KeyCode::Down => Intent::PitchDown,
        _ => return None,
    };
    Some(intent)
}
