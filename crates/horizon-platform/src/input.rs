//! Event/input adapter.
//!
//! Turns windowing events, already stripped of winit types, into the
//! commands the app applies to the attractor and frame orchestrator.
//! Pointer motion only steers the attractor while the primary or
//! secondary button is held; buttons select the attractor mass.

use horizon_config::schema::{KeybindConfig, SimulationConfig};

use crate::winit_keys::{matches_binding, normalize_winit_key};

/// Pointer buttons the adapter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// A windowing event in adapter terms.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f64, y: f64 },
    ButtonPressed(PointerButton),
    ButtonReleased(PointerButton),
    /// A key was released. Carries winit's logical key name.
    KeyReleased(String),
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// What the app should do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    /// Move the attractor under this pixel position.
    SteerAttractor { x: f64, y: f64 },
    /// Set the attractor mass (positive attracts, negative repels).
    SetMass(f32),
    /// Restore the initial particle cloud and zero the mass.
    Reset,
    /// Recompute the projection and reconfigure the surface.
    Resize { width: u32, height: u32 },
    Quit,
}

/// Stateful mapping from [`InputEvent`] to [`InputCommand`].
#[derive(Debug, Clone)]
pub struct InputAdapter {
    attract_mass: f32,
    repel_mass: f32,
    quit_key: String,
    reset_key: String,
    cursor: (f64, f64),
    primary_held: bool,
    secondary_held: bool,
}

impl InputAdapter {
    pub fn new(simulation: &SimulationConfig, keybinds: &KeybindConfig) -> Self {
        Self {
            attract_mass: simulation.attractor_mass,
            repel_mass: simulation.repel_mass(),
            quit_key: keybinds.quit.clone(),
            reset_key: keybinds.reset.clone(),
            cursor: (0.0, 0.0),
            primary_held: false,
            secondary_held: false,
        }
    }

    /// Whether pointer motion currently steers the attractor.
    pub fn is_steering(&self) -> bool {
        self.primary_held || self.secondary_held
    }

    /// Process one event, returning the commands it produces in order.
    pub fn handle(&mut self, event: InputEvent) -> Vec<InputCommand> {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.cursor = (x, y);
                if self.is_steering() {
                    vec![InputCommand::SteerAttractor { x, y }]
                } else {
                    Vec::new()
                }
            }

            InputEvent::ButtonPressed(button) => self.button_pressed(button),

            InputEvent::ButtonReleased(button) => {
                match button {
                    PointerButton::Primary => self.primary_held = false,
                    PointerButton::Secondary => self.secondary_held = false,
                    PointerButton::Middle | PointerButton::Other => {}
                }
                Vec::new()
            }

            InputEvent::KeyReleased(name) => {
                let key = normalize_winit_key(&name);
                if matches_binding(&key, &self.quit_key) {
                    vec![InputCommand::Quit]
                } else if matches_binding(&key, &self.reset_key) {
                    vec![InputCommand::Reset]
                } else {
                    tracing::trace!(key = %key, "unbound key released");
                    Vec::new()
                }
            }

            InputEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    // Minimized; keep the last projection.
                    Vec::new()
                } else {
                    vec![InputCommand::Resize { width, height }]
                }
            }

            InputEvent::CloseRequested => vec![InputCommand::Quit],
        }
    }

    fn button_pressed(&mut self, button: PointerButton) -> Vec<InputCommand> {
        match button {
            PointerButton::Primary => {
                self.primary_held = true;
                let (x, y) = self.cursor;
                vec![
                    InputCommand::SteerAttractor { x, y },
                    InputCommand::SetMass(self.attract_mass),
                ]
            }
            PointerButton::Secondary => {
                self.secondary_held = true;
                vec![InputCommand::SetMass(self.repel_mass)]
            }
            PointerButton::Middle => vec![InputCommand::SetMass(0.0)],
            PointerButton::Other => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> InputAdapter {
        InputAdapter::new(&SimulationConfig::default(), &KeybindConfig::default())
    }

    #[test]
    fn motion_without_buttons_only_tracks_cursor() {
        let mut input = adapter();
        let cmds = input.handle(InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert!(cmds.is_empty());

        let cmds = input.handle(InputEvent::ButtonPressed(PointerButton::Primary));
        assert_eq!(cmds[0], InputCommand::SteerAttractor { x: 10.0, y: 20.0 });
    }

    #[test]
    fn primary_press_steers_and_attracts() {
        let mut input = adapter();
        input.handle(InputEvent::PointerMoved { x: 100.0, y: 50.0 });
        let cmds = input.handle(InputEvent::ButtonPressed(PointerButton::Primary));
        assert_eq!(
            cmds,
            vec![
                InputCommand::SteerAttractor { x: 100.0, y: 50.0 },
                InputCommand::SetMass(100_000.0),
            ]
        );
    }

    #[test]
    fn secondary_press_repels_with_quarter_mass() {
        let mut input = adapter();
        let cmds = input.handle(InputEvent::ButtonPressed(PointerButton::Secondary));
        assert_eq!(cmds, vec![InputCommand::SetMass(-25_000.0)]);
    }

    #[test]
    fn middle_press_neutralizes() {
        let mut input = adapter();
        let cmds = input.handle(InputEvent::ButtonPressed(PointerButton::Middle));
        assert_eq!(cmds, vec![InputCommand::SetMass(0.0)]);
        assert!(!input.is_steering());
    }

    #[test]
    fn motion_steers_only_while_held() {
        let mut input = adapter();
        input.handle(InputEvent::ButtonPressed(PointerButton::Secondary));
        let cmds = input.handle(InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert_eq!(cmds, vec![InputCommand::SteerAttractor { x: 3.0, y: 4.0 }]);

        input.handle(InputEvent::ButtonReleased(PointerButton::Secondary));
        let cmds = input.handle(InputEvent::PointerMoved { x: 5.0, y: 6.0 });
        assert!(cmds.is_empty());
    }

    #[test]
    fn middle_held_does_not_steer() {
        let mut input = adapter();
        input.handle(InputEvent::ButtonPressed(PointerButton::Middle));
        let cmds = input.handle(InputEvent::PointerMoved { x: 1.0, y: 1.0 });
        assert!(cmds.is_empty());
    }

    #[test]
    fn escape_quits_and_space_resets() {
        let mut input = adapter();
        assert_eq!(
            input.handle(InputEvent::KeyReleased("Escape".into())),
            vec![InputCommand::Quit]
        );
        assert_eq!(
            input.handle(InputEvent::KeyReleased(" ".into())),
            vec![InputCommand::Reset]
        );
        assert!(input.handle(InputEvent::KeyReleased("a".into())).is_empty());
    }

    #[test]
    fn custom_keybinds() {
        let keys = KeybindConfig {
            quit: "Q".into(),
            reset: "r".into(),
        };
        let mut input = InputAdapter::new(&SimulationConfig::default(), &keys);
        assert_eq!(
            input.handle(InputEvent::KeyReleased("q".into())),
            vec![InputCommand::Quit]
        );
        assert_eq!(
            input.handle(InputEvent::KeyReleased("R".into())),
            vec![InputCommand::Reset]
        );
        assert!(input.handle(InputEvent::KeyReleased("Escape".into())).is_empty());
    }

    #[test]
    fn resize_and_close() {
        let mut input = adapter();
        assert_eq!(
            input.handle(InputEvent::Resized {
                width: 800,
                height: 600
            }),
            vec![InputCommand::Resize {
                width: 800,
                height: 600
            }]
        );
        assert!(input
            .handle(InputEvent::Resized {
                width: 0,
                height: 600
            })
            .is_empty());
        assert_eq!(
            input.handle(InputEvent::CloseRequested),
            vec![InputCommand::Quit]
        );
    }
}
