//! Contact generation and response for spheres and static planes

use crate::core::Vec3;

use super::body::Body;
use super::slab::Slab;
use super::types::Shape;

/// Separation below which a resting pair still counts as touching
const CONTACT_SLOP: f32 = 1e-4;
/// Approach speed below which contacts do not bounce
const BOUNCE_THRESHOLD: f32 = 0.1;
/// Extra reach added to the broadphase test
const PAIR_MARGIN: f32 = 0.05;

/// Contact recorded on the last solver pass, applied to velocities afterwards
#[derive(Clone, Copy, Debug)]
pub(crate) struct Contact {
    pub(crate) body: u32,
    /// Points away from the other body
    pub(crate) normal: Vec3,
    /// Normal velocity before the solve (negative = approaching)
    pub(crate) incoming: f32,
    pub(crate) friction: f32,
    pub(crate) restitution: f32,
}

/// Sphere pairs close enough to touch during this tick
pub(crate) fn find_pairs(bodies: &Slab<Body>, spheres: &[u32], dt: f32, pairs: &mut Vec<(u32, u32)>) {
    pairs.clear();
    for (n, &i) in spheres.iter().enumerate() {
        let Some(a) = bodies.at(i) else { continue };
        let Some(ra) = a.radius() else { continue };
        for &j in &spheres[n + 1..] {
            let Some(b) = bodies.at(j) else { continue };
            let Some(rb) = b.radius() else { continue };
            if a.is_static() && b.is_static() {
                continue;
            }
            if a.collision_group != 0 && a.collision_group == b.collision_group {
                continue;
            }
            let reach = ra + rb + PAIR_MARGIN + (a.velocity.length() + b.velocity.length()) * dt;
            if (b.position - a.position).length_squared() < reach * reach {
                pairs.push((i, j));
            }
        }
    }
}

/// Push dynamic spheres out of planes and out of each other.
///
/// When `contacts` is given the touching pairs are recorded for the
/// velocity pass.
pub(crate) fn resolve(
    bodies: &mut Slab<Body>,
    planes: &[u32],
    spheres: &[u32],
    pairs: &[(u32, u32)],
    mut contacts: Option<&mut Vec<Contact>>,
) {
    for &p in planes {
        let Some(plane) = bodies.at(p) else { continue };
        let Shape::Plane { normal } = plane.shape else { continue };
        let (origin, plane_material) = (plane.position, plane.material);

        for &s in spheres {
            let Some(body) = bodies.at_mut(s) else { continue };
            if body.is_static() {
                continue;
            }
            let Some(radius) = body.radius() else { continue };
            let depth = (body.position - origin).dot(normal) - radius;
            if depth < 0.0 {
                body.position -= normal * depth;
            }
            if depth < CONTACT_SLOP {
                if let Some(out) = contacts.as_deref_mut() {
                    out.push(Contact {
                        body: s,
                        normal,
                        incoming: body.velocity.dot(normal),
                        friction: body.material.friction * plane_material.friction,
                        restitution: body.material.restitution * plane_material.restitution,
                    });
                }
            }
        }
    }

    for &(i, j) in pairs {
        let (Some(a), Some(b)) = (bodies.at(i), bodies.at(j)) else { continue };
        let (Some(ra), Some(rb)) = (a.radius(), b.radius()) else { continue };
        let (wa, wb) = (a.inv_mass, b.inv_mass);
        let w_sum = wa + wb;
        if w_sum == 0.0 {
            continue;
        }

        let delta = b.position - a.position;
        let dist = delta.length();
        let gap = dist - ra - rb;
        if gap >= CONTACT_SLOP || dist < 1e-9 {
            continue;
        }
        let normal = delta * (1.0 / dist);
        let friction = a.material.friction * b.material.friction;
        let restitution = a.material.restitution * b.material.restitution;
        let incoming = (b.velocity - a.velocity).dot(normal);

        if gap < 0.0 {
            let push = normal * (-gap / w_sum);
            if let Some(a) = bodies.at_mut(i) {
                a.position -= push * wa;
            }
            if let Some(b) = bodies.at_mut(j) {
                b.position += push * wb;
            }
        }

        if let Some(out) = contacts.as_deref_mut() {
            if wa > 0.0 {
                out.push(Contact { body: i, normal: -normal, incoming, friction, restitution });
            }
            if wb > 0.0 {
                out.push(Contact { body: j, normal, incoming, friction, restitution });
            }
        }
    }
}

/// Friction and restitution on the velocities derived from positions
pub(crate) fn apply_contact_response(bodies: &mut Slab<Body>, contacts: &[Contact]) {
    for c in contacts {
        let Some(body) = bodies.at_mut(c.body) else { continue };
        let vn = body.velocity.dot(c.normal);
        let tangent = body.velocity - c.normal * vn;

        let bounce = if c.incoming < -BOUNCE_THRESHOLD {
            -c.incoming * c.restitution
        } else {
            0.0
        };
        let keep = (1.0 - c.friction).clamp(0.0, 1.0);
        body.velocity = tangent * keep + c.normal * vn.max(bounce);
    }
}
