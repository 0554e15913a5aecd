//! Box sweep collision
//!
//! Motion is resolved one axis at a time (vertical, forward, lateral): each
//! axis is swept against every solid box that overlaps the mover on the other
//! two axes, and the move is clamped at the first contact face.

use glam::Vec3;

use super::scene::Aabb;

/// Contact tolerance; faces this close count as touching
pub const CONTACT_EPSILON: f32 = 1e-4;

/// World axes, in the order motion is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Resolution order: fall/rise first, then run, then strafe
    pub const RESOLVE_ORDER: [Axis; 3] = [Axis::Y, Axis::Z, Axis::X];

    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Result of sweeping a box along one axis
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Whether the sweep was stopped by a solid
    pub hit: bool,
    /// Signed distance actually travelled along the axis
    pub distance: f32,
    /// Contact normal (pointing back toward the mover), zero when clear
    pub normal: Vec3,
}

impl SweepResult {
    pub fn clear(distance: f32) -> Self {
        Self {
            hit: false,
            distance,
            normal: Vec3::ZERO,
        }
    }
}

/// Overlap on the two axes other than `axis`.
///
/// Slivers within the contact tolerance do not count. Vertically the test is
/// one-sided: resting on a solid's top face is clear, while a head touching a
/// solid's underside counts as overlap.
fn overlaps_across(mover: &Aabb, solid: &Aabb, axis: Axis) -> bool {
    let (mmin, mmax) = (mover.min.to_array(), mover.max.to_array());
    let (smin, smax) = (solid.min.to_array(), solid.max.to_array());
    [Axis::X, Axis::Y, Axis::Z]
        .into_iter()
        .filter(|&other| other != axis)
        .all(|other| {
            let i = other.index();
            let above_floor = mmin[i] < smax[i] - CONTACT_EPSILON;
            if other == Axis::Y {
                above_floor && mmax[i] > smin[i] - CONTACT_EPSILON
            } else {
                above_floor && mmax[i] > smin[i] + CONTACT_EPSILON
            }
        })
}

/// Gaps within the contact tolerance close to zero so resting bodies stay put
#[inline]
fn snap_gap(gap: f32) -> f32 {
    if gap < CONTACT_EPSILON { 0.0 } else { gap }
}

/// Sweep `mover` by `delta` along `axis`, stopping at the first solid face.
///
/// Solids the mover already penetrates on this axis are ignored so a stuck
/// body can always move out.
pub fn sweep_axis<'a>(
    mover: &Aabb,
    axis: Axis,
    delta: f32,
    solids: impl IntoIterator<Item = &'a Aabb>,
) -> SweepResult {
    if delta == 0.0 {
        return SweepResult::clear(0.0);
    }

    let i = axis.index();
    let (mmin, mmax) = (mover.min.to_array()[i], mover.max.to_array()[i]);
    let mut result = SweepResult::clear(delta);

    for solid in solids {
        if !overlaps_across(mover, solid, axis) {
            continue;
        }
        let (smin, smax) = (solid.min.to_array()[i], solid.max.to_array()[i]);

        if delta > 0.0 && smin >= mmax - CONTACT_EPSILON {
            let gap = snap_gap(smin - mmax);
            if gap < result.distance {
                result = SweepResult {
                    hit: true,
                    distance: gap,
                    normal: -axis.unit(),
                };
            }
        } else if delta < 0.0 && smax <= mmin + CONTACT_EPSILON {
            let gap = snap_gap(mmin - smax);
            if -gap > result.distance {
                result = SweepResult {
                    hit: true,
                    distance: -gap,
                    normal: axis.unit(),
                };
            }
        }
    }

    result
}

/// Resolve a full motion vector for `mover`, returning the displacement allowed
pub fn resolve_motion(mover: Aabb, delta: Vec3, solids: &[Aabb]) -> Vec3 {
    let mut bounds = mover;
    let mut moved = Vec3::ZERO;

    for axis in Axis::RESOLVE_ORDER {
        let component = delta.to_array()[axis.index()];
        let sweep = sweep_axis(&bounds, axis, component, solids);
        let step = axis.unit() * sweep.distance;
        bounds.min += step;
        bounds.max += step;
        moved += step;
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Aabb {
        Aabb::from_center_size(Vec3::new(0.0, -0.5, 0.0), Vec3::new(1.0, 1.0, 10.0))
    }

    fn player_at(pos: Vec3) -> Aabb {
        Aabb::from_center_size(pos, Vec3::new(1.0 / 3.0, 0.5, 1.0 / 3.0))
    }

    #[test]
    fn test_resting_on_ground_blocks_gravity() {
        let player = player_at(Vec3::new(0.0, 0.25, 0.0));
        let sweep = sweep_axis(&player, Axis::Y, -0.12, &[ground()]);
        assert!(sweep.hit);
        assert_eq!(sweep.distance, 0.0);
        assert_eq!(sweep.normal, Vec3::Y);
    }

    #[test]
    fn test_falls_until_contact() {
        let player = player_at(Vec3::new(0.0, 0.3, 0.0));
        let sweep = sweep_axis(&player, Axis::Y, -0.12, &[ground()]);
        assert!(sweep.hit);
        assert!((sweep.distance - -0.05).abs() < 1e-5);
    }

    #[test]
    fn test_free_fall_without_ground() {
        let player = player_at(Vec3::new(0.0, 0.25, 20.0));
        let sweep = sweep_axis(&player, Axis::Y, -0.12, &[ground()]);
        assert!(!sweep.hit);
        assert_eq!(sweep.distance, -0.12);
    }

    #[test]
    fn test_forward_blocked_by_obstacle() {
        let obstacle = Aabb::from_center_size(Vec3::new(0.0, 0.125, 1.0), Vec3::new(1.0, 0.25, 0.25));
        let player = player_at(Vec3::new(0.0, 0.25, 0.5));
        let moved = resolve_motion(player, Vec3::new(0.0, -0.12, 0.3), &[ground(), obstacle]);
        assert_eq!(moved.y, 0.0);
        // Front face of the obstacle at z = 0.875, player front at 0.5 + 1/6
        assert!((moved.z - (0.875 - (0.5 + 1.0 / 6.0))).abs() < 1e-4);
    }

    #[test]
    fn test_passes_over_low_obstacle_when_high_enough() {
        let obstacle = Aabb::from_center_size(Vec3::new(0.0, 0.125, 1.0), Vec3::new(1.0, 0.25, 0.25));
        let player = player_at(Vec3::new(0.0, 1.5, 0.5));
        let moved = resolve_motion(player, Vec3::new(0.0, 0.0, 1.0), &[obstacle]);
        assert_eq!(moved.z, 1.0);
    }

    #[test]
    fn test_sliver_overlap_gives_no_support() {
        // Narrow tile on the right; a centered player only grazes its inner edge
        let narrow = Aabb::from_center_size(Vec3::new(0.3333, -0.5, 0.0), Vec3::new(0.3333, 1.0, 10.0));
        let player = player_at(Vec3::new(0.0, 0.25, 0.0));
        let sweep = sweep_axis(&player, Axis::Y, -0.12, &[narrow]);
        assert!(!sweep.hit);
        assert_eq!(sweep.distance, -0.12);

        let lined_up = player_at(Vec3::new(0.3333, 0.25, 0.0));
        assert!(sweep_axis(&lined_up, Axis::Y, -0.12, &[narrow]).hit);
    }

    #[test]
    fn test_head_contact_blocks_run() {
        // Tall obstacle whose underside sits exactly at the standing player's head
        let high = Aabb::from_center_size(Vec3::new(0.0, 1.5, 1.0), Vec3::new(2.0, 2.0, 0.25));
        let standing = player_at(Vec3::new(0.0, 0.25, 0.5));
        let sweep = sweep_axis(&standing, Axis::Z, 0.45, &[ground(), high]);
        assert!(sweep.hit);
        assert_eq!(sweep.normal, -Vec3::Z);

        let dragging = Aabb::from_center_size(Vec3::new(0.0, 0.125, 0.5), Vec3::new(1.0 / 3.0, 0.25, 1.0 / 3.0));
        let sweep = sweep_axis(&dragging, Axis::Z, 0.45, &[ground(), high]);
        assert!(!sweep.hit);
    }

    #[test]
    fn test_penetrating_solid_is_ignored() {
        let player = player_at(Vec3::new(0.0, -0.2, 0.0));
        let sweep = sweep_axis(&player, Axis::Y, 0.5, &[ground()]);
        assert!(!sweep.hit);
        assert_eq!(sweep.distance, 0.5);
    }
}
