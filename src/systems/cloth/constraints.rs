//! Constraint graph generation behind a one-shot readiness gate
//!
//! Each undirected edge of the grid graph (4-neighbours plus both diagonals)
//! is emitted from exactly one originating cell:
//! - right:      (r, c) -> (r, c+1)
//! - down:       (r, c) -> (r+1, c)
//! - down-right: (r, c) -> (r+1, c+1)
//! - up-right:   (r, c) -> (r-1, c+1)

use crate::domain::error::SceneError;
use crate::systems::physics::{ConstraintHandle, PhysicsBackend};

use super::binding::BindingGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    StructuralHorizontal,
    StructuralVertical,
    ShearDownRight,
    ShearUpRight,
}

/// Edge between two cells, by grid index
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintSpec {
    pub a: usize,
    pub b: usize,
    pub rest_distance: f32,
    pub kind: ConstraintKind,
}

/// Per-kind totals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstraintCounts {
    pub structural_horizontal: usize,
    pub structural_vertical: usize,
    pub shear_down_right: usize,
    pub shear_up_right: usize,
}

impl ConstraintCounts {
    pub fn total(&self) -> usize {
        self.structural_horizontal + self.structural_vertical + self.shear_down_right + self.shear_up_right
    }
}

/// Enumerate every edge of a `resolution_y x resolution_x` grid once
pub fn enumerate_constraints(
    resolution_x: usize,
    resolution_y: usize,
    spacing_x: f32,
    spacing_y: f32,
) -> Vec<ConstraintSpec> {
    let diagonal = (spacing_x * spacing_x + spacing_y * spacing_y).sqrt();
    let index = |row: usize, col: usize| row * resolution_x + col;
    let mut out = Vec::new();

    for row in 0..resolution_y {
        for col in 0..resolution_x {
            let a = index(row, col);
            let has_right = col + 1 < resolution_x;
            let has_down = row + 1 < resolution_y;

            if has_right {
                out.push(ConstraintSpec {
                    a,
                    b: index(row, col + 1),
                    rest_distance: spacing_x,
                    kind: ConstraintKind::StructuralHorizontal,
                });
            }
            if has_down {
                out.push(ConstraintSpec {
                    a,
                    b: index(row + 1, col),
                    rest_distance: spacing_y,
                    kind: ConstraintKind::StructuralVertical,
                });
            }
            if has_down && has_right {
                out.push(ConstraintSpec {
                    a,
                    b: index(row + 1, col + 1),
                    rest_distance: diagonal,
                    kind: ConstraintKind::ShearDownRight,
                });
            }
            if row > 0 && has_right {
                out.push(ConstraintSpec {
                    a,
                    b: index(row - 1, col + 1),
                    rest_distance: diagonal,
                    kind: ConstraintKind::ShearUpRight,
                });
            }
        }
    }
    out
}

/// One-shot flag: opens on the first observation that the prerequisite holds
/// and stays open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadinessGate {
    open: bool,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True exactly once: on the closed -> open transition
    pub fn try_open(&mut self, ready: bool) -> bool {
        if self.open || !ready {
            return false;
        }
        self.open = true;
        true
    }
}

/// A constraint living in the physics world
#[derive(Clone, Copy, Debug)]
pub struct ClothConstraint {
    pub spec: ConstraintSpec,
    pub handle: ConstraintHandle,
}

/// The cloth's constraint set and the gate guarding its creation
#[derive(Clone, Debug, Default)]
pub struct ConstraintGraph {
    gate: ReadinessGate,
    constraints: Vec<ClothConstraint>,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self) -> ReadinessGate {
        self.gate
    }

    pub fn constraints(&self) -> &[ClothConstraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn counts(&self) -> ConstraintCounts {
        let mut counts = ConstraintCounts::default();
        for c in &self.constraints {
            match c.spec.kind {
                ConstraintKind::StructuralHorizontal => counts.structural_horizontal += 1,
                ConstraintKind::StructuralVertical => counts.structural_vertical += 1,
                ConstraintKind::ShearDownRight => counts.shear_down_right += 1,
                ConstraintKind::ShearUpRight => counts.shear_up_right += 1,
            }
        }
        counts
    }

    /// Create the constraints if every binding is ready and the gate has not
    /// fired yet. Returns how many were created (0 on every later call).
    ///
    /// The gate opens before the first constraint is requested, so a failed
    /// stitch is never retried. On failure the constraints created so far are
    /// removed again; the graph is left empty.
    pub fn stitch<P: PhysicsBackend + ?Sized>(
        &mut self,
        physics: &mut P,
        bindings: &BindingGrid,
        spacing_x: f32,
        spacing_y: f32,
    ) -> Result<usize, SceneError> {
        if !self.gate.try_open(bindings.all_ready()) {
            return Ok(0);
        }

        let specs = enumerate_constraints(
            bindings.resolution_x(),
            bindings.resolution_y(),
            spacing_x,
            spacing_y,
        );
        self.constraints.reserve(specs.len());
        if let Err(e) = self.create_all(physics, bindings, specs) {
            let rolled_back = self.release(physics);
            console_warn!("cloth stitch failed after {} constraints: {}", rolled_back, e);
            return Err(e);
        }

        console_log!("cloth stitched: {} constraints", self.constraints.len());
        Ok(self.constraints.len())
    }

    fn create_all<P: PhysicsBackend + ?Sized>(
        &mut self,
        physics: &mut P,
        bindings: &BindingGrid,
        specs: Vec<ConstraintSpec>,
    ) -> Result<(), SceneError> {
        for spec in specs {
            let (Some(a), Some(b)) = (bindings.handle_at(spec.a), bindings.handle_at(spec.b)) else {
                return Err(SceneError::InvalidConstraint { reason: "endpoint has no body" });
            };
            let handle = physics.create_distance_constraint(a, b, spec.rest_distance)?;
            self.constraints.push(ClothConstraint { spec, handle });
        }
        Ok(())
    }

    /// Remove every constraint from the physics world. The gate stays open.
    pub fn release<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> usize {
        let mut released = 0;
        for c in self.constraints.drain(..) {
            if physics.remove_constraint(c.handle) {
                released += 1;
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ClothConfig;
    use std::collections::HashSet;

    fn edge_key(spec: &ConstraintSpec) -> (usize, usize) {
        (spec.a.min(spec.b), spec.a.max(spec.b))
    }

    #[test]
    fn three_by_three_has_twenty_unique_edges() {
        let specs = enumerate_constraints(3, 3, 1.0, 1.0);
        let count = |k| specs.iter().filter(|s| s.kind == k).count();
        assert_eq!(count(ConstraintKind::StructuralHorizontal), 6);
        assert_eq!(count(ConstraintKind::StructuralVertical), 6);
        assert_eq!(count(ConstraintKind::ShearDownRight), 4);
        assert_eq!(count(ConstraintKind::ShearUpRight), 4);

        let unique: HashSet<_> = specs.iter().map(edge_key).collect();
        assert_eq!(unique.len(), specs.len());
        assert!(specs.iter().all(|s| s.a != s.b));
    }

    #[test]
    fn edge_count_matches_closed_form() {
        for (rx, ry) in [(2, 2), (4, 3), (10, 10), (7, 2)] {
            let specs = enumerate_constraints(rx, ry, 0.3, 0.3);
            let config = ClothConfig { resolution_x: rx, resolution_y: ry, ..ClothConfig::default() };
            let expected = config.constraint_count();
            assert_eq!(specs.len(), expected, "{}x{}", rx, ry);
            let unique: HashSet<_> = specs.iter().map(edge_key).collect();
            assert_eq!(unique.len(), expected);
        }
    }

    #[test]
    fn every_neighbour_pair_is_covered() {
        let (rx, ry) = (5, 4);
        let unique: HashSet<_> = enumerate_constraints(rx, ry, 1.0, 1.0).iter().map(edge_key).collect();
        for r in 0..ry as isize {
            for c in 0..rx as isize {
                for (dr, dc) in [(0, 1), (1, 0), (1, 1), (-1, 1)] {
                    let (nr, nc) = (r + dr, c + dc);
                    if nr < 0 || nc < 0 || nr >= ry as isize || nc >= rx as isize {
                        continue;
                    }
                    let a = (r as usize) * rx + c as usize;
                    let b = (nr as usize) * rx + nc as usize;
                    assert!(unique.contains(&(a.min(b), a.max(b))), "missing {}-{}", a, b);
                }
            }
        }
    }

    #[test]
    fn rest_distances_follow_spacing() {
        let specs = enumerate_constraints(3, 3, 0.3, 0.4);
        for s in &specs {
            let expected = match s.kind {
                ConstraintKind::StructuralHorizontal => 0.3,
                ConstraintKind::StructuralVertical => 0.4,
                _ => 0.5,
            };
            assert!((s.rest_distance - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn gate_fires_exactly_once() {
        let mut gate = ReadinessGate::new();
        assert!(!gate.try_open(false));
        assert!(!gate.is_open());
        assert!(gate.try_open(true));
        assert!(!gate.try_open(true));
        assert!(gate.is_open());
    }
}
