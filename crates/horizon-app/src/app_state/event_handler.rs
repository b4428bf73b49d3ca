//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::Key;
use winit::window::WindowId;

use horizon_platform::{InputEvent, PointerButton};

use super::core::HorizonApp;

impl ApplicationHandler for HorizonApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let input = match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                Some(InputEvent::CloseRequested)
            }

            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),

            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
                x: position.x,
                y: position.y,
            }),

            WindowEvent::MouseInput { state, button, .. } => {
                let button = pointer_button(button);
                Some(match state {
                    ElementState::Pressed => InputEvent::ButtonPressed(button),
                    ElementState::Released => InputEvent::ButtonReleased(button),
                })
            }

            WindowEvent::KeyboardInput { event, .. } => key_released(&event),

            WindowEvent::RedrawRequested => {
                self.render_frame();
                None
            }

            _ => None,
        };

        if let Some(input) = input {
            self.handle_input(input, event_loop);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.request_redraw();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

impl HorizonApp {
    pub(super) fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

/// Bindings fire on release, so presses produce nothing.
fn key_released(event: &KeyEvent) -> Option<InputEvent> {
    if event.state != ElementState::Released {
        return None;
    }
    key_name(&event.logical_key).map(InputEvent::KeyReleased)
}

fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(c) => Some(c.to_string()),
        _ => None,
    }
}
