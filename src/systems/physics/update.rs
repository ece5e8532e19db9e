//! Integration passes: predict positions, project distance constraints,
//! derive velocities from the corrected positions.

use crate::core::Vec3;

use super::body::{Body, DistanceConstraint};
use super::slab::Slab;

/// Apply gravity and damping, then move every dynamic body along its velocity
pub(crate) fn predict(bodies: &mut Slab<Body>, indices: &[u32], gravity: Vec3, dt: f32) {
    for &i in indices {
        let Some(body) = bodies.at_mut(i) else { continue };
        body.prev_position = body.position;
        if body.is_static() {
            continue;
        }
        body.velocity += gravity * dt;
        body.velocity = body.velocity * (1.0 - body.linear_damping).powf(dt);
        body.position += body.velocity * dt;
    }
}

/// One Gauss-Seidel pass over every distance constraint (zero compliance)
pub(crate) fn solve_distances(bodies: &mut Slab<Body>, constraints: &Slab<DistanceConstraint>) {
    for (_, c) in constraints.iter() {
        let (Some(a), Some(b)) = (bodies.at(c.a), bodies.at(c.b)) else {
            continue;
        };
        let (pa, wa) = (a.position, a.inv_mass);
        let (pb, wb) = (b.position, b.inv_mass);

        let w_sum = wa + wb;
        if w_sum == 0.0 {
            continue;
        }
        let delta = pb - pa;
        let dist = delta.length();
        if dist < 1e-9 {
            continue;
        }

        let correction = delta * ((dist - c.rest) / (dist * w_sum));
        if wa > 0.0 {
            if let Some(a) = bodies.at_mut(c.a) {
                a.position += correction * wa;
            }
        }
        if wb > 0.0 {
            if let Some(b) = bodies.at_mut(c.b) {
                b.position -= correction * wb;
            }
        }
    }
}

/// v = (x - x_prev) / dt for dynamic bodies
pub(crate) fn update_velocities(bodies: &mut Slab<Body>, indices: &[u32], dt: f32) {
    let inv_dt = 1.0 / dt;
    for &i in indices {
        let Some(body) = bodies.at_mut(i) else { continue };
        if body.is_static() {
            continue;
        }
        body.velocity = (body.position - body.prev_position) * inv_dt;
    }
}
