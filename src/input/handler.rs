use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Processed input events for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Toggle pause
    TogglePause,
    /// Raise the simulation speed factor
    SpeedUp,
    /// Lower the simulation speed factor
    SpeedDown,
    /// Pan the camera by whole steps
    Pan { dx: i32, dy: i32 },
    ZoomIn,
    ZoomOut,
    /// Follow the next cat in index order
    FollowNext,
    Unfollow,
    ResetCamera,
    /// Double the population
    MoreCats,
    /// Halve the population
    FewerCats,
    /// Toggle help overlay
    ToggleHelp,
    /// Cycle through display modes (Minimal -> Standard -> Debug)
    CycleDisplayMode,
    SetModeMinimal,
    SetModeStandard,
    SetModeDebug,
    /// Mouse click at position
    MouseClick { x: u16, y: u16 },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Close help (any key when help is shown)
    CloseHelp,
    /// No event
    None,
}

/// Input handler for processing terminal events
pub struct InputHandler {
    help_visible: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            help_visible: false,
        }
    }

    /// Set help visibility state
    pub fn set_help_visible(&mut self, visible: bool) {
        self.help_visible = visible;
    }

    /// Poll for input events with timeout
    pub fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            match event::read().ok()? {
                Event::Key(key_event) => Some(self.handle_key(key_event)),
                Event::Mouse(mouse_event) => Some(self.handle_mouse(mouse_event)),
                Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Handle keyboard input
    fn handle_key(&self, event: KeyEvent) -> InputEvent {
        // If help is visible, any key closes it
        if self.help_visible {
            return InputEvent::CloseHelp;
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,

            // Ctrl+C to quit
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Quit
            }

            KeyCode::Char(' ') => InputEvent::TogglePause,

            // Speed controls
            KeyCode::Char('+') | KeyCode::Char('=') => InputEvent::SpeedUp,
            KeyCode::Char('-') | KeyCode::Char('_') => InputEvent::SpeedDown,

            // Camera
            KeyCode::Left => InputEvent::Pan { dx: -1, dy: 0 },
            KeyCode::Right => InputEvent::Pan { dx: 1, dy: 0 },
            KeyCode::Up => InputEvent::Pan { dx: 0, dy: -1 },
            KeyCode::Down => InputEvent::Pan { dx: 0, dy: 1 },
            KeyCode::Char('z') => InputEvent::ZoomIn,
            KeyCode::Char('x') => InputEvent::ZoomOut,
            KeyCode::Char('f') => InputEvent::FollowNext,
            KeyCode::Char('u') => InputEvent::Unfollow,
            KeyCode::Char('0') => InputEvent::ResetCamera,

            // Population
            KeyCode::Char('n') => InputEvent::MoreCats,
            KeyCode::Char('N') => InputEvent::FewerCats,

            // Display mode controls
            KeyCode::Char('m') => InputEvent::CycleDisplayMode,
            KeyCode::Char('1') => InputEvent::SetModeMinimal,
            KeyCode::Char('2') => InputEvent::SetModeStandard,
            KeyCode::Char('3') => InputEvent::SetModeDebug,

            KeyCode::Char('?') => InputEvent::ToggleHelp,

            _ => InputEvent::None,
        }
    }

    /// Handle mouse input
    fn handle_mouse(&self, event: MouseEvent) -> InputEvent {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => InputEvent::MouseClick {
                x: event.column,
                y: event.row,
            },
            MouseEventKind::ScrollUp => InputEvent::ZoomIn,
            MouseEventKind::ScrollDown => InputEvent::ZoomOut,
            _ => InputEvent::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
