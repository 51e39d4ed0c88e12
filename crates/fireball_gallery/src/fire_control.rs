//! Fire edge detection

/// Tracks the fire button between frames
///
/// A shot is triggered when the button goes from pressed to released, not
/// while it is held.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireControl {
    was_pressed: bool,
}

impl FireControl {
    /// Create a control with the button assumed released
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's button state; `true` means fire now
    pub fn update(&mut self, pressed: bool) -> bool {
        let fire = self.was_pressed && !pressed;
        self.was_pressed = pressed;
        fire
    }
}
