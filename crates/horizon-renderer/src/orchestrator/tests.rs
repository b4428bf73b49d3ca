use horizon_config::HorizonConfig;

use super::*;
use crate::kernel;
use crate::matrix;
use crate::particles::seed_particles;
use crate::scene::Attractor;

fn scene() -> Scene {
    Scene::from_config(&HorizonConfig::default(), 700, 700, false)
}

fn moving_cloud() -> Vec<Particle> {
    vec![
        Particle {
            position: [1.0, 2.0, 3.0],
            velocity: [0.5, 0.0, -0.25],
            distance: 0.0,
        },
        Particle {
            position: [-4.0, 0.5, 7.0],
            velocity: [0.0, 1.0, 0.0],
            distance: 0.0,
        },
    ]
}

#[test]
fn current_buffer_holds_latest_capture() {
    for n in 1..=7 {
        let mut orch = FrameOrchestrator::new(CpuBackend::new(), moving_cloud());
        let mut scene = scene();
        for _ in 0..n {
            orch.tick(&mut scene, 0.01).unwrap();
        }
        assert_eq!(orch.last_capture(), Some(orch.buffers().current_index()));
        let backend = orch.backend();
        assert_eq!(backend.captures.len(), n);
        assert_eq!(backend.draws, backend.captures, "each tick draws what it captured");
        assert_eq!(
            backend.captures.last().copied(),
            Some(orch.buffers().current().id)
        );
    }
}

#[test]
fn captures_alternate_between_slots() {
    let mut orch = FrameOrchestrator::new(CpuBackend::new(), moving_cloud());
    let mut scene = scene();
    for _ in 0..4 {
        orch.tick(&mut scene, 0.0).unwrap();
    }
    // Slot 0 starts current, so the first capture lands in slot 1.
    assert_eq!(orch.backend().captures, vec![1, 0, 1, 0]);
    assert_eq!(orch.ticks(), 4);
}

#[test]
fn each_tick_reads_previous_capture() {
    let cloud = moving_cloud();
    let mut orch = FrameOrchestrator::new(CpuBackend::new(), cloud.clone());
    let mut scene = scene();
    scene.attractor = Attractor {
        position: [2.0, -3.0, 0.0],
        mass: 100_000.0,
    };

    let first = scene.feedback_params(0.5, 2);
    orch.tick(&mut scene, 0.5).unwrap();
    let second = scene.feedback_params(0.5, 2);
    orch.tick(&mut scene, 0.5).unwrap();

    for (i, p) in cloud.iter().enumerate() {
        let expected = kernel::feedback(&kernel::feedback(p, &first), &second);
        assert_eq!(orch.buffers().current().particles[i], expected);
    }
}

#[test]
fn feedback_uses_angles_before_the_frame_advance() {
    let mut orch = FrameOrchestrator::new(CpuBackend::new(), moving_cloud());
    let mut scene = scene();

    orch.tick(&mut scene, 0.0).unwrap();
    let params = orch.backend().last_params.unwrap();
    assert_eq!(params.rotation, matrix::IDENTITY);

    // The draw of the same tick already sees the advanced angles.
    let frame = orch.backend().last_frame.unwrap();
    assert_eq!(frame.model, scene.camera.model());
    assert!((scene.camera.angles[0] - 0.3).abs() < 1e-6);

    orch.tick(&mut scene, 0.0).unwrap();
    let params = orch.backend().last_params.unwrap();
    assert_eq!(params.rotation, matrix::rotation([0.3, 0.2, 0.0]));
}

#[test]
fn zero_mass_tick_keeps_resting_cloud_in_place() {
    let cloud = seed_particles(1000, 15.0, Some(2024));
    assert!(cloud
        .iter()
        .all(|p| p.position.iter().all(|c| *c > -15.0 && *c < 15.0)));

    let mut orch = FrameOrchestrator::new(CpuBackend::new(), cloud.clone());
    let mut scene = scene();
    orch.tick(&mut scene, 1.0).unwrap();

    let out = &orch.buffers().current().particles;
    assert_eq!(out.len(), 1000);
    for (before, after) in cloud.iter().zip(out) {
        assert_eq!(after.velocity, [0.0; 3]);
        assert_eq!(after.position, before.position);
    }
}

#[test]
fn reset_restores_initial_cloud() {
    let cloud = moving_cloud();
    let mut orch = FrameOrchestrator::new(CpuBackend::new(), cloud.clone());
    let mut scene = scene();
    scene.attractor.mass = -25_000.0;
    for _ in 0..3 {
        orch.tick(&mut scene, 0.2).unwrap();
    }

    orch.reset(&mut scene);
    assert_eq!(scene.attractor.mass, 0.0);
    assert_eq!(orch.buffers().current().particles, cloud);
    assert!(orch
        .buffers()
        .next()
        .particles
        .iter()
        .all(|p| *p == Particle::at([0.0; 3])));

    // The next tick starts from the restored cloud.
    let params = scene.feedback_params(0.2, 2);
    orch.tick(&mut scene, 0.2).unwrap();
    assert_eq!(
        orch.buffers().current().particles[0],
        kernel::feedback(&cloud[0], &params)
    );
}

#[test]
fn tick_returns_to_idle() {
    let mut orch = FrameOrchestrator::new(CpuBackend::new(), moving_cloud());
    assert_eq!(orch.phase(), TickPhase::Idle);
    assert_eq!(orch.last_capture(), None);
    orch.tick(&mut scene(), 0.0).unwrap();
    assert_eq!(orch.phase(), TickPhase::Idle);
}

/// Delegates to the CPU backend but fails every draw.
#[derive(Default)]
struct LostSurface(CpuBackend);

impl ParticleBackend for LostSurface {
    type Buffer = CpuBuffer;

    fn create_buffer(
        &mut self,
        label: &str,
        count: u32,
        particles: Option<&[Particle]>,
    ) -> CpuBuffer {
        self.0.create_buffer(label, count, particles)
    }

    fn write_particles(&mut self, buffer: &mut CpuBuffer, particles: &[Particle]) {
        self.0.write_particles(buffer, particles)
    }

    fn clear(&mut self, buffer: &mut CpuBuffer) {
        self.0.clear(buffer)
    }

    fn run_feedback(
        &mut self,
        input: &CpuBuffer,
        output: &mut CpuBuffer,
        params: &FeedbackParams,
    ) {
        self.0.run_feedback(input, output, params)
    }

    fn draw(
        &mut self,
        _source: &CpuBuffer,
        _frame: &FrameParams,
        _count: u32,
    ) -> Result<(), RendererError> {
        Err(RendererError::SurfaceError("surface lost".into()))
    }
}

#[test]
fn failed_draw_still_swaps_roles() {
    let mut orch = FrameOrchestrator::new(LostSurface::default(), moving_cloud());
    let err = orch.tick(&mut scene(), 0.0).unwrap_err();
    assert_eq!(err.to_string(), "surface error: surface lost");
    assert_eq!(orch.buffers().current_index(), 1);
    assert_eq!(orch.last_capture(), Some(1));
    assert_eq!(orch.phase(), TickPhase::Idle);
}
