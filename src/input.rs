//! Keyboard state to per-tick input
//!
//! Movement keys are level-triggered (held). Pickup, drop and restart are
//! edge-triggered: they fire on the press transition and are consumed by the
//! next tick, so key repeat never fires twice.
//!
//! `KeyScript` replays recorded key transitions into a `KeyState`, which is
//! how headless runs are driven without a window.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sim::TickInput;

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    W,
    S,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    E,
    Q,
    R,
}

const KEY_COUNT: usize = 11;

impl Key {
    const fn index(self) -> usize {
        match self {
            Key::A => 0,
            Key::D => 1,
            Key::W => 2,
            Key::S => 3,
            Key::ArrowLeft => 4,
            Key::ArrowRight => 5,
            Key::ArrowUp => 6,
            Key::ArrowDown => 7,
            Key::E => 8,
            Key::Q => 9,
            Key::R => 10,
        }
    }

    /// Letter keys, case-insensitive
    pub fn from_char(c: char) -> Option<Key> {
        match c.to_ascii_lowercase() {
            'a' => Some(Key::A),
            'd' => Some(Key::D),
            'w' => Some(Key::W),
            's' => Some(Key::S),
            'e' => Some(Key::E),
            'q' => Some(Key::Q),
            'r' => Some(Key::R),
            _ => None,
        }
    }

    /// Letter keys plus `left`/`right`/`up`/`down` for the arrows
    pub fn from_name(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(Key::ArrowLeft),
            "right" => Some(Key::ArrowRight),
            "up" => Some(Key::ArrowUp),
            "down" => Some(Key::ArrowDown),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::from_char(c),
                    _ => None,
                }
            }
        }
    }

    pub fn action(self) -> InputAction {
        match self {
            Key::A | Key::ArrowLeft => InputAction::MoveLeft,
            Key::D | Key::ArrowRight => InputAction::MoveRight,
            Key::W | Key::ArrowUp => InputAction::MoveUp,
            Key::S | Key::ArrowDown => InputAction::MoveDown,
            Key::E => InputAction::Pickup,
            Key::Q => InputAction::Drop,
            Key::R => InputAction::Restart,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Pickup,
    Drop,
    Restart,
}

/// Tracks held keys and pending one-shot actions between ticks
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: [bool; KEY_COUNT],
    pickup: bool,
    drop: bool,
    restart: bool,
}

impl KeyState {
    pub fn key_down(&mut self, key: Key) {
        let was_down = std::mem::replace(&mut self.down[key.index()], true);
        if was_down {
            return;
        }
        match key.action() {
            InputAction::Pickup => self.pickup = true,
            InputAction::Drop => self.drop = true,
            InputAction::Restart => self.restart = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.down[key.index()] = false;
    }

    fn action_held(&self, action: InputAction) -> bool {
        const ALL: [Key; KEY_COUNT] = [
            Key::A,
            Key::D,
            Key::W,
            Key::S,
            Key::ArrowLeft,
            Key::ArrowRight,
            Key::ArrowUp,
            Key::ArrowDown,
            Key::E,
            Key::Q,
            Key::R,
        ];
        ALL.iter()
            .any(|k| k.action() == action && self.down[k.index()])
    }

    /// Sample input for one tick and clear the one-shot actions
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.action_held(InputAction::MoveLeft),
            right: self.action_held(InputAction::MoveRight),
            up: self.action_held(InputAction::MoveUp),
            down: self.action_held(InputAction::MoveDown),
            pickup: std::mem::take(&mut self.pickup),
            drop: std::mem::take(&mut self.drop),
            restart: std::mem::take(&mut self.restart),
        }
    }

    /// Forget everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read key script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("key script line {line}: {reason}")]
    Syntax { line: usize, reason: String },
}

/// One recorded key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Frame on which the transition is fed in, counted from 0
    pub frame: u64,
    pub key: Key,
    pub pressed: bool,
}

/// Recorded key transitions, played back frame by frame
///
/// One event per line: `<frame> <key> <down|up>`. Blank lines and `#`
/// comments are skipped. Frames must not go backwards.
#[derive(Debug, Clone, Default)]
pub struct KeyScript {
    events: Vec<KeyEvent>,
    next: usize,
}

impl KeyScript {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut events: Vec<KeyEvent> = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }
            let syntax = |reason: String| ScriptError::Syntax { line, reason };

            let fields: Vec<&str> = content.split_whitespace().collect();
            let [frame, key, state] = fields[..] else {
                return Err(syntax(format!(
                    "expected `<frame> <key> <down|up>`, got {content:?}"
                )));
            };
            let frame: u64 = frame
                .parse()
                .map_err(|e| syntax(format!("bad frame {frame:?}: {e}")))?;
            let key = Key::from_name(key).ok_or_else(|| syntax(format!("unknown key {key:?}")))?;
            let pressed = match state {
                "down" => true,
                "up" => false,
                other => return Err(syntax(format!("expected down or up, got {other:?}"))),
            };
            if let Some(prev) = events.last().filter(|prev| frame < prev.frame) {
                return Err(syntax(format!("frame {frame} comes after frame {}", prev.frame)));
            }
            events.push(KeyEvent {
                frame,
                key,
                pressed,
            });
        }
        Ok(Self { events, next: 0 })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Feed every event due at or before `frame` into `keys`
    pub fn apply(&mut self, frame: u64, keys: &mut KeyState) {
        while let Some(event) = self.events.get(self.next) {
            if event.frame > frame {
                break;
            }
            if event.pressed {
                keys.key_down(event.key);
            } else {
                keys.key_up(event.key);
            }
            self.next += 1;
        }
    }

    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_share_actions() {
        let mut keys = KeyState::default();
        keys.key_down(Key::A);
        keys.key_down(Key::ArrowLeft);
        keys.key_up(Key::A);
        let input = keys.take_tick_input();
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_actions_are_one_shot() {
        let mut keys = KeyState::default();
        keys.key_down(Key::E);
        assert!(keys.take_tick_input().pickup);
        // Still held, but already consumed
        assert!(!keys.take_tick_input().pickup);
        // Key repeat does not re-fire
        keys.key_down(Key::E);
        assert!(!keys.take_tick_input().pickup);

        keys.key_up(Key::E);
        keys.key_down(Key::E);
        assert!(keys.take_tick_input().pickup);
    }

    #[test]
    fn test_char_mapping_is_case_insensitive() {
        assert_eq!(Key::from_char('Q'), Some(Key::Q));
        assert_eq!(Key::from_char('r'), Some(Key::R));
        assert_eq!(Key::from_char('x'), None);
        assert_eq!(Key::E.action(), InputAction::Pickup);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut keys = KeyState::default();
        keys.key_down(Key::Q);
        keys.key_down(Key::D);
        keys.clear();
        assert_eq!(keys.take_tick_input(), TickInput::default());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Left"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name("down"), Some(Key::ArrowDown));
        assert_eq!(Key::from_name("E"), Some(Key::E));
        assert_eq!(Key::from_name("ee"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn test_script_parse() {
        let script = KeyScript::parse(
            "# walk right then grab\n\
             0 d down\n\
             \n\
             20 d up   # stop\n\
             20 e down\n",
        )
        .unwrap();
        assert_eq!(
            script.events(),
            &[
                KeyEvent {
                    frame: 0,
                    key: Key::D,
                    pressed: true
                },
                KeyEvent {
                    frame: 20,
                    key: Key::D,
                    pressed: false
                },
                KeyEvent {
                    frame: 20,
                    key: Key::E,
                    pressed: true
                },
            ]
        );
    }

    #[test]
    fn test_script_errors_name_the_line() {
        let err = KeyScript::parse("0 d down\n1 x down").unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { line: 2, .. }));
        let err = KeyScript::parse("5 d down\n3 d up").unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { line: 2, .. }));
        let err = KeyScript::parse("0 d pressed").unwrap_err();
        assert!(err.to_string().starts_with("key script line 1:"));
        assert!(KeyScript::parse("zero d down").is_err());
        assert!(KeyScript::parse("0 d").is_err());
    }

    #[test]
    fn test_script_playback() {
        let mut script = KeyScript::parse("0 d down\n2 d up\n2 e down").unwrap();
        let mut keys = KeyState::default();

        script.apply(0, &mut keys);
        assert!(keys.take_tick_input().right);
        script.apply(1, &mut keys);
        assert!(keys.take_tick_input().right);
        assert!(!script.is_finished());

        script.apply(2, &mut keys);
        let input = keys.take_tick_input();
        assert!(!input.right);
        assert!(input.pickup);
        assert!(script.is_finished());
    }
}
