//! Headless run of the two-Mandelbulb scene.
//!
//! Prints per-frame body state and the packed buffer a renderer would upload.

use fractal_collide::gpu;
use fractal_collide::{Camera, FractalWorld, StepOutcome};

const FRAMES: usize = 240;
const DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), fractal_collide::SimError> {
    let mut world = FractalWorld::demo_pair();
    let camera = Camera::default();
    let mut contacts = 0;

    for body in world.bodies.iter() {
        println!(
            "{} body: radius {} (shape extent ~{:.3} local units)",
            body.shape().name(),
            body.radius(),
            body.shape().nominal_radius()
        );
    }

    for frame in 0..FRAMES {
        let outcome = world.step(DT)?;
        if let StepOutcome::Resolved(contact, report) = outcome {
            contacts += 1;
            println!(
                "frame {:3}: contact at ({:.3}, {:.3}, {:.3}) j = {:.4} jt = {:.4}",
                frame, contact.point.x, contact.point.y, contact.point.z, report.normal, report.tangent
            );
        }

        if frame % 30 == 0 {
            let [a, b] = &world.bodies;
            println!(
                "frame {:3}: A ({:.3}, {:.3}, {:.3}) B ({:.3}, {:.3}, {:.3}) sep {:.3} KE {:.4} |p| {:.2e}",
                frame,
                a.position.x,
                a.position.y,
                a.position.z,
                b.position.x,
                b.position.y,
                b.position.z,
                world.separation(),
                world.kinetic_energy(),
                world.linear_momentum().norm()
            );
        }
    }

    let packed = world.gpu_bodies();
    println!("body buffer: {:?}", gpu::as_floats(&packed));
    println!("camera: {:?}", camera.to_gpu());
    println!("{} contacts in {} frames", contacts, FRAMES);
    Ok(())
}
