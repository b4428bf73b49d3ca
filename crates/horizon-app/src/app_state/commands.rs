//! Applying input commands to the scene and orchestrator.

use winit::event_loop::ActiveEventLoop;

use horizon_platform::{pointer_to_world, InputCommand, InputEvent};

use super::core::HorizonApp;

impl HorizonApp {
    /// Feed one event through the input adapter and apply the result.
    pub(super) fn handle_input(&mut self, event: InputEvent, event_loop: &ActiveEventLoop) {
        for command in self.input.handle(event) {
            if self.apply_command(command) {
                event_loop.exit();
            }
        }
    }

    /// Apply one command. Returns `true` when the app should quit.
    pub(super) fn apply_command(&mut self, command: InputCommand) -> bool {
        match command {
            InputCommand::SteerAttractor { x, y } => self.steer_attractor(x, y),

            InputCommand::SetMass(mass) => {
                if let Some(ref mut scene) = self.scene {
                    scene.attractor.mass = mass;
                    tracing::debug!(mass, "Attractor mass set");
                }
            }

            InputCommand::Reset => {
                if let Some(ref mut scene) = self.scene {
                    match self.orchestrator {
                        Some(ref mut orchestrator) => orchestrator.reset(scene),
                        None => scene.attractor.mass = 0.0,
                    }
                }
            }

            InputCommand::Resize { width, height } => {
                self.size = (width, height);
                if let Some(ref mut orchestrator) = self.orchestrator {
                    orchestrator.backend_mut().resize(width, height);
                }
                if let Some(ref mut scene) = self.scene {
                    scene.resize(width, height);
                }
                tracing::debug!(width, height, "Resized");
            }

            InputCommand::Quit => {
                tracing::info!("Quit requested");
                return true;
            }
        }
        false
    }

    /// Move the attractor under the pixel position `(x, y)`.
    pub(super) fn steer_attractor(&mut self, x: f64, y: f64) {
        let (width, height) = self.size;
        let [wx, wy] = pointer_to_world(x, y, width, height, self.config.simulation.limit);
        if let Some(ref mut scene) = self.scene {
            scene.attractor.position = [wx, wy, 0.0];
        }
    }
}
