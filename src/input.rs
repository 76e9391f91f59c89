//! Input as the simulation sees it: a handful of named actions.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Attack,
    Quit,
    Restart,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Attack,
        Action::Quit,
        Action::Restart,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Query service over whatever device the front-end polls.
pub trait InputSource {
    /// The action is held down this frame.
    fn is_held(&self, action: Action) -> bool;
    /// The action went down during this frame.
    fn was_pressed(&self, action: Action) -> bool;
}

/// One frame's worth of input as plain data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    held: [bool; 7],
    pressed: [bool; 7],
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(mut self, action: Action) -> Self {
        self.held[action.slot()] = true;
        self
    }

    /// Mark a fresh key-down; a pressed key also counts as held.
    pub fn press(mut self, action: Action) -> Self {
        self.pressed[action.slot()] = true;
        self.held[action.slot()] = true;
        self
    }

    pub fn set_held(&mut self, action: Action, held: bool) {
        self.held[action.slot()] = held;
    }

    pub fn set_pressed(&mut self, action: Action, pressed: bool) {
        self.pressed[action.slot()] = pressed;
    }
}

impl InputSource for FrameInput {
    fn is_held(&self, action: Action) -> bool {
        self.held[action.slot()]
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed[action.slot()]
    }
}
