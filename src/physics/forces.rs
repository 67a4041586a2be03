use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadTree;

/// Direction used when two points coincide, spread around the circle so
/// stacked nodes do not all leave along the same axis.
fn tie_break_direction(first: usize, second: usize) -> Vec2 {
    let angle = (first as f32 * 0.618_034 + second as f32 * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

fn direction_and_distance(delta: Vec2, first: usize, second: usize) -> (Vec2, f32) {
    let distance = delta.length();
    if distance > 1e-4 {
        (delta / distance, distance)
    } else {
        (tie_break_direction(first, second), 0.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct Repulsion {
    pub(super) strength: f32,
    pub(super) softening: f32,
    pub(super) theta: f32,
}

/// Inverse-square push on `index` from every other point, with far cells
/// collapsed to their center of mass.
pub(super) fn repulsion_on(
    tree: &QuadTree,
    index: usize,
    positions: &[Vec2],
    params: Repulsion,
) -> Vec2 {
    if tree.mass <= 0.0 {
        return Vec2::ZERO;
    }

    let point = positions[index];
    if tree.is_leaf() {
        return tree
            .members
            .iter()
            .filter(|&&other| other != index)
            .fold(Vec2::ZERO, |force, &other| {
                let (direction, distance) =
                    direction_and_distance(point - positions[other], index, other);
                force + direction * (params.strength / (distance * distance + params.softening))
            });
    }

    let delta = point - tree.center_of_mass;
    let distance_sq = delta.length_sq().max(1e-4);
    let distance = distance_sq.sqrt();
    let far_enough = !tree.cell.contains(point) && tree.cell.side() / distance < params.theta;
    if far_enough && tree.mass > 1.0 {
        return delta / distance * (params.strength * tree.mass / (distance_sq + params.softening));
    }

    tree.children()
        .map(|child| repulsion_on(child, index, positions, params))
        .fold(Vec2::ZERO, |total, force| total + force)
}

#[derive(Clone, Copy, Debug)]
pub(super) struct Collision {
    pub(super) strength: f32,
    /// Multiplier on the summed radii giving the minimum gap between centers.
    pub(super) spacing: f32,
    pub(super) max_radius: f32,
}

/// Push on `index` away from every node closer than the minimum gap. Each
/// pair is visited from both sides, so only `index` is pushed here.
pub(super) fn collision_on(
    tree: &QuadTree,
    index: usize,
    positions: &[Vec2],
    radii: &[f32],
    params: Collision,
) -> Vec2 {
    let point = positions[index];
    let reach = (radii[index] + params.max_radius) * params.spacing;
    let mut force = Vec2::ZERO;
    tree.visit_near(point, reach, &mut |other| {
        if other == index {
            return;
        }

        let (direction, distance) = direction_and_distance(point - positions[other], index, other);
        let min_distance = (radii[index] + radii[other]) * params.spacing;
        if distance < min_distance {
            force += direction * (min_distance - distance) * params.strength;
        }
    });
    force
}

/// Hooke spring between two endpoints plus damping along the link axis.
/// Returns the force on `from`; `to` receives the opposite.
pub(super) fn spring_between(
    from: (Vec2, Vec2),
    to: (Vec2, Vec2),
    rest_length: f32,
    stiffness: f32,
    damping: f32,
) -> Vec2 {
    let (from_position, from_velocity) = from;
    let (to_position, to_velocity) = to;
    let delta = to_position - from_position;
    let distance = delta.length();
    if distance <= 1e-4 {
        return Vec2::ZERO;
    }

    let direction = delta / distance;
    let stretch = (distance - rest_length) * stiffness;
    let closing_speed = (to_velocity - from_velocity).dot(direction) * damping;
    direction * (stretch + closing_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPULSION: Repulsion = Repulsion {
        strength: 1_000.0,
        softening: 1.0,
        theta: 0.72,
    };

    #[test]
    fn repulsion_pushes_points_apart() {
        let positions = [vec2(-10.0, 0.0), vec2(10.0, 0.0)];
        let tree = QuadTree::build(&positions).unwrap();
        assert!(repulsion_on(&tree, 0, &positions, REPULSION).x < 0.0);
        assert!(repulsion_on(&tree, 1, &positions, REPULSION).x > 0.0);
    }

    #[test]
    fn approximation_stays_close_to_exact_sum() {
        let mut positions = (0..80)
            .map(|index| vec2(2_000.0 + (index % 9) as f32 * 3.0, (index / 9) as f32 * 3.0))
            .collect::<Vec<_>>();
        positions.push(Vec2::ZERO);
        let probe = positions.len() - 1;
        let tree = QuadTree::build(&positions).unwrap();

        let approximate = repulsion_on(&tree, probe, &positions, REPULSION);
        let exact = (0..probe).fold(Vec2::ZERO, |force, other| {
            let delta = positions[probe] - positions[other];
            force + delta.normalized() * (REPULSION.strength / (delta.length_sq() + 1.0))
        });
        assert!((approximate - exact).length() / exact.length() < 0.05);
    }

    #[test]
    fn collision_only_acts_on_overlaps() {
        let positions = [vec2(0.0, 0.0), vec2(6.0, 0.0), vec2(500.0, 0.0)];
        let radii = [5.0, 5.0, 5.0];
        let tree = QuadTree::build(&positions).unwrap();
        let params = Collision {
            strength: 1.0,
            spacing: 1.0,
            max_radius: 5.0,
        };

        assert_eq!(collision_on(&tree, 0, &positions, &radii, params), vec2(-4.0, 0.0));
        assert_eq!(collision_on(&tree, 2, &positions, &radii, params), Vec2::ZERO);
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let force = spring_between(
            (vec2(0.0, 0.0), Vec2::ZERO),
            (vec2(300.0, 0.0), Vec2::ZERO),
            250.0,
            0.1,
            0.2,
        );
        assert!((force.x - 5.0).abs() < 1e-4);

        let compressed = spring_between(
            (vec2(0.0, 0.0), Vec2::ZERO),
            (vec2(100.0, 0.0), Vec2::ZERO),
            250.0,
            0.1,
            0.2,
        );
        assert!(compressed.x < 0.0);
    }
}
