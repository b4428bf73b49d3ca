//! Configuration validation.
//!
//! Each section is checked by its own function; errors are collected
//! into a single `ConfigError`.

mod helpers;


use crate::schema::HorizonConfig;
use horizon_common::{Color, ConfigError};

use helpers::{validate_min_u32, validate_positive, validate_range_f32};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HorizonConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_window(&mut errors, config);
    validate_simulation(&mut errors, config);
    validate_camera(&mut errors, config);
    validate_render(&mut errors, config);
    validate_keybinds(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_window(errors: &mut Vec<String>, config: &HorizonConfig) {
    validate_min_u32(errors, "window.width", config.window.width, 1);
    validate_min_u32(errors, "window.height", config.window.height, 1);
}

fn validate_simulation(errors: &mut Vec<String>, config: &HorizonConfig) {
    let sim = &config.simulation;
    validate_positive(errors, "simulation.limit", sim.limit);
    validate_positive(errors, "simulation.time_scale", sim.time_scale);
    validate_range_f32(errors, "simulation.repel_factor", sim.repel_factor, 0.0, 1.0);
    if !sim.attractor_mass.is_finite() {
        errors.push(format!(
            "simulation.attractor_mass = {} must be finite",
            sim.attractor_mass
        ));
    }
}

fn validate_camera(errors: &mut Vec<String>, config: &HorizonConfig) {
    let cam = &config.camera;
    validate_range_f32(errors, "camera.fov", cam.fov, 1.0, 179.0);
    validate_positive(errors, "camera.near", cam.near);
    if cam.far <= cam.near {
        errors.push(format!(
            "camera.far = {} must be greater than camera.near = {}",
            cam.far, cam.near
        ));
    }
    if cam.eye == cam.aim {
        errors.push("camera.eye and camera.aim must differ".into());
    } else if is_parallel(sub(cam.aim, cam.eye), cam.up) {
        errors.push(format!(
            "camera.up = {:?} must not be parallel to camera.aim - camera.eye",
            cam.up
        ));
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// True when `a` and `b` span no plane, including when either is zero.
fn is_parallel(a: [f32; 3], b: [f32; 3]) -> bool {
    let cross = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let len_sq = |v: [f32; 3]| v[0] * v[0] + v[1] * v[1] + v[2] * v[2];
    len_sq(cross) <= 1e-12 * len_sq(a) * len_sq(b)
}

fn validate_render(errors: &mut Vec<String>, config: &HorizonConfig) {
    for (name, value) in [
        ("render.background", &config.render.background),
        ("render.particle_color", &config.render.particle_color),
    ] {
        if Color::from_hex(value).is_none() {
            errors.push(format!("{name} = {value:?} is not a hex color"));
        }
    }
}

fn validate_keybinds(errors: &mut Vec<String>, config: &HorizonConfig) {
    let keys = &config.keybinds;
    if keys.quit.is_empty() || keys.reset.is_empty() {
        errors.push("keybinds must not be empty".into());
    }
    if keys.quit.eq_ignore_ascii_case(&keys.reset) {
        errors.push(format!(
            "keybinds.quit and keybinds.reset are both bound to {:?}",
            keys.quit
        ));
    }
}
