//! Named state records and their lifecycle callbacks.
//!
//! A state is up to four optional callbacks filed under a name. The machine
//! decides when each one runs; the callbacks themselves are opaque to it.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Called when a state becomes current. Receives the payload passed to
/// `change_state_to`, borrowed for the duration of the call.
pub type EnterFn = Box<dyn FnMut(Option<&dyn Any>) + Send>;

/// Called once per tick while the state is current, with the host's delta time.
pub type UpdateFn = Box<dyn FnMut(f32) + Send>;

/// Called once per frame while the state is current.
pub type DrawFn = Box<dyn FnMut() + Send>;

/// Called when a state stops being current.
pub type ExitFn = Box<dyn FnMut() + Send>;

/// Identifies one of the four lifecycle slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackKind {
    Enter,
    Update,
    Draw,
    Exit,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Enter => "enter",
            Self::Update => "update",
            Self::Draw => "draw",
            Self::Exit => "exit",
        };
        f.write_str(label)
    }
}

/// The set of lifecycle callbacks a state is registered with.
///
/// Every slot is optional, but a state must fill at least one of them to be
/// accepted by the machine.
///
/// # Example
///
/// ```rust
/// use smile_fsm::Callbacks;
///
/// let callbacks = Callbacks::new()
///     .on_enter(|args| {
///         if let Some(level) = args.and_then(|a| a.downcast_ref::<u32>()) {
///             println!("loading level {level}");
///         }
///     })
///     .on_update(|dt| println!("tick {dt}"))
///     .on_exit(|| println!("bye"));
///
/// assert!(!callbacks.is_empty());
/// ```
#[derive(Default)]
pub struct Callbacks {
    enter: Option<EnterFn>,
    update: Option<UpdateFn>,
    draw: Option<DrawFn>,
    exit: Option<ExitFn>,
}

impl Callbacks {
    /// Create an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enter callback.
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<&dyn Any>) + Send + 'static,
    {
        self.enter = Some(Box::new(f));
        self
    }

    /// Set the update callback.
    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.update = Some(Box::new(f));
        self
    }

    /// Set the draw callback.
    pub fn on_draw<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.draw = Some(Box::new(f));
        self
    }

    /// Set the exit callback.
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.exit = Some(Box::new(f));
        self
    }

    /// True when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.update.is_none() && self.draw.is_none() && self.exit.is_none()
    }

    /// Check whether a given slot is filled.
    pub fn has(&self, kind: CallbackKind) -> bool {
        match kind {
            CallbackKind::Enter => self.enter.is_some(),
            CallbackKind::Update => self.update.is_some(),
            CallbackKind::Draw => self.draw.is_some(),
            CallbackKind::Exit => self.exit.is_some(),
        }
    }

    fn present(&self) -> Vec<CallbackKind> {
        [
            CallbackKind::Enter,
            CallbackKind::Update,
            CallbackKind::Draw,
            CallbackKind::Exit,
        ]
        .into_iter()
        .filter(|kind| self.has(*kind))
        .collect()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("present", &self.present())
            .finish()
    }
}

/// A registered state.
///
/// Records are owned by the registry, which files each one under the name it
/// was registered with. That key is the only copy of the name; the machine
/// refers to the current state through it.
#[derive(Debug)]
pub struct State {
    callbacks: Callbacks,
}

impl State {
    pub(crate) fn new(callbacks: Callbacks) -> Self {
        Self { callbacks }
    }

    /// Check whether this state has the given callback.
    pub fn has_callback(&self, kind: CallbackKind) -> bool {
        self.callbacks.has(kind)
    }

    /// Run the enter callback if present. Returns whether it ran.
    pub(crate) fn enter(&mut self, args: Option<&dyn Any>) -> bool {
        match self.callbacks.enter.as_mut() {
            Some(enter) => {
                enter(args);
                true
            }
            None => false,
        }
    }

    pub(crate) fn update(&mut self, delta_time: f32) -> bool {
        match self.callbacks.update.as_mut() {
            Some(update) => {
                update(delta_time);
                true
            }
            None => false,
        }
    }

    pub(crate) fn draw(&mut self) -> bool {
        match self.callbacks.draw.as_mut() {
            Some(draw) => {
                draw();
                true
            }
            None => false,
        }
    }

    pub(crate) fn exit(&mut self) -> bool {
        match self.callbacks.exit.as_mut() {
            Some(exit) => {
                exit();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn empty_callbacks_report_empty() {
        let callbacks = Callbacks::new();
        assert!(callbacks.is_empty());
        assert!(!callbacks.has(CallbackKind::Enter));
        assert!(!callbacks.has(CallbackKind::Exit));
    }

    #[test]
    fn any_single_slot_makes_callbacks_non_empty() {
        assert!(!Callbacks::new().on_enter(|_| {}).is_empty());
        assert!(!Callbacks::new().on_update(|_| {}).is_empty());
        assert!(!Callbacks::new().on_draw(|| {}).is_empty());
        assert!(!Callbacks::new().on_exit(|| {}).is_empty());
    }

    #[test]
    fn state_reports_its_callbacks() {
        let state = State::new(Callbacks::new().on_draw(|| {}));
        assert!(state.has_callback(CallbackKind::Draw));
        assert!(!state.has_callback(CallbackKind::Enter));
    }

    #[test]
    fn enter_passes_payload_through() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let mut state = State::new(Callbacks::new().on_enter(move |args| {
            *sink.lock().unwrap() = args.and_then(|a| a.downcast_ref::<u32>()).copied();
        }));

        let level = 7u32;
        assert!(state.enter(Some(&level)));
        assert_eq!(*seen.lock().unwrap(), Some(7));

        assert!(state.enter(None));
        assert_eq!(*seen.lock().unwrap(), None);
    }

    #[test]
    fn missing_slots_do_not_run() {
        let mut state = State::new(Callbacks::new().on_update(|_| {}));
        assert!(!state.enter(None));
        assert!(state.update(0.016));
        assert!(!state.draw());
        assert!(!state.exit());
    }

    #[test]
    fn update_receives_delta_time() {
        let total = Arc::new(Mutex::new(0.0f32));
        let sink = Arc::clone(&total);
        let mut state =
            State::new(Callbacks::new().on_update(move |dt| *sink.lock().unwrap() += dt));

        state.update(0.25);
        state.update(0.5);
        assert_eq!(*total.lock().unwrap(), 0.75);
    }

    #[test]
    fn debug_lists_present_callbacks() {
        let callbacks = Callbacks::new().on_enter(|_| {}).on_exit(|| {});
        let rendered = format!("{callbacks:?}");
        assert!(rendered.contains("Enter"));
        assert!(rendered.contains("Exit"));
        assert!(!rendered.contains("Draw"));
    }

    #[test]
    fn callback_kind_displays_lowercase() {
        assert_eq!(CallbackKind::Update.to_string(), "update");
        let json = serde_json::to_string(&CallbackKind::Draw).unwrap();
        assert_eq!(json, "\"draw\"");
    }
}
