use geo::Vec2;
use items::DamageType;
use stats::{Entity, Team};
use uuid::Uuid;

const MIN_LEAD_TIME: f32 = 0.05;
const MAX_LEAD_TIME: f32 = 1.2;
const OCCLUSION_LATERAL_MARGIN: f32 = 6.0;
/// Fixed pool capacity.
pub const DEFAULT_CAPACITY: usize = 60;

/// In-flight projectile. `owner` decides which side it can hit; it is
/// removed on impact or when `lifetime` or the arena bounds run out.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: Uuid,
    pub owner: Uuid,
    pub owner_team: Team,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub damage_type: DamageType,
    pub lifetime: f32,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.position.x < 0.0 || self.position.y < 0.0 || self.position.x > width || self.position.y > height
    }

    pub fn advance(&mut self, dt: f32) {
        self.position = self.position + self.velocity * dt;
        self.lifetime -= dt;
    }
}

/// Owns every in-flight projectile for one arena battle.
#[derive(Debug)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    capacity: usize,
}

impl Default for ProjectileManager {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            projectiles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new projectile, evicting the oldest entry first if the pool
    /// is already at capacity.
    pub fn spawn(&mut self, projectile: Projectile) {
        if self.projectiles.len() >= self.capacity {
            log::debug!("projectile pool at capacity ({}), evicting oldest", self.capacity);
            self.projectiles.remove(0);
        }
        self.projectiles.push(projectile);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Advance every projectile, drop expired/out-of-bounds ones, and return
    /// `(projectile, target_index)` pairs that collided with an opposing,
    /// living entity this tick. `targets` is the full entity roster; the
    /// manager only considers entries whose team differs from the
    /// projectile's owner.
    pub fn update(&mut self, dt: f32, width: f32, height: f32, targets: &[Entity]) -> Vec<(Projectile, usize)> {
        let mut hits = Vec::new();
        self.projectiles.retain_mut(|p| {
            p.advance(dt);
            if p.is_expired() || p.is_out_of_bounds(width, height) {
                return false;
            }
            for (i, target) in targets.iter().enumerate() {
                if target.team == p.owner_team || !target.alive() {
                    continue;
                }
                if (target.position - p.position).length() <= target.radius + p.radius {
                    hits.push((p.clone(), i));
                    return false;
                }
            }
            true
        });
        hits
    }
}

/// Predictive aim direction: solve the intercept quadratic
/// `(v·v - s^2) t^2 + 2(r·v) t + r·r = 0` for the smallest positive root,
/// clamped to `[0.05, 1.2]`. Falls back to the direct direction to the
/// target's current position when no usable root exists (no velocity
/// estimate, or the quadratic has no positive real root).
pub fn predictive_aim_direction(shooter: Vec2, target: Vec2, target_velocity: Option<Vec2>, projectile_speed: f32) -> Vec2 {
    let r = target - shooter;
    let default_dir = r.normalized_or(Vec2::new(1.0, 0.0));

    let Some(v) = target_velocity else {
        return default_dir;
    };

    let a = v.dot(v) - projectile_speed * projectile_speed;
    let b = 2.0 * r.dot(v);
    let c = r.dot(r);

    let t = smallest_positive_root(a, b, c);
    match t {
        Some(t) => {
            let t = t.clamp(MIN_LEAD_TIME, MAX_LEAD_TIME);
            (r + v * t).normalized_or(default_dir)
        }
        None => default_dir,
    }
}

fn smallest_positive_root(a: f32, b: f32, c: f32) -> Option<f32> {
    if a.abs() < 1e-6 {
        if b.abs() < 1e-6 {
            return None;
        }
        let t = -c / b;
        return (t > 0.0).then_some(t);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
    if lo > 0.0 {
        Some(lo)
    } else if hi > 0.0 {
        Some(hi)
    } else {
        None
    }
}

/// Friendly line-of-fire occlusion: rejects a shot when an ally (other than
/// the intended target) sits close enough to the shot's ray.
pub fn is_occluded_by_ally(shooter: Vec2, target: Vec2, allies: impl Iterator<Item = Vec2>, ally_radii: impl Iterator<Item = f32>) -> bool {
    let to_target = target - shooter;
    let dist = to_target.length();
    if dist < 1e-6 {
        return false;
    }
    let dir = to_target / dist;
    for (ally_pos, ally_radius) in allies.zip(ally_radii) {
        let to_ally = ally_pos - shooter;
        let proj = to_ally.dot(dir);
        if proj <= 0.0 || proj >= dist {
            continue;
        }
        let lateral = (to_ally - dir * proj).length();
        if lateral <= ally_radius + OCCLUSION_LATERAL_MARGIN {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(id: u128) -> Projectile {
        Projectile {
            id: Uuid::from_u128(id),
            owner: Uuid::nil(),
            owner_team: Team::A,
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            radius: 1.0,
            damage: 1.0,
            damage_type: DamageType::Piercing,
            lifetime: 2.0,
        }
    }

    #[test]
    fn spawning_past_capacity_evicts_the_oldest() {
        let mut mgr = ProjectileManager::with_capacity(2);
        mgr.spawn(projectile(1));
        mgr.spawn(projectile(2));
        mgr.spawn(projectile(3));
        assert_eq!(mgr.len(), 2);
        let ids: Vec<_> = mgr.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
    }

    #[test]
    fn no_real_positive_root_falls_back_to_direct_aim() {
        // shooter (0,0), target (100,0) fleeing straight away at 400 u/s --
        // faster than a 340 u/s projectile can ever close the gap, so both
        // roots of the intercept quadratic are negative and the solver
        // falls back to aiming at the target's current position.
        let dir = predictive_aim_direction(
            Vec2::zero(),
            Vec2::new(100.0, 0.0),
            Some(Vec2::new(400.0, 0.0)),
            340.0,
        );
        assert!((dir.x - 1.0).abs() < 1e-4);
        assert!(dir.y.abs() < 1e-4);
    }

    #[test]
    fn stationary_target_aims_directly_at_it() {
        let dir = predictive_aim_direction(Vec2::zero(), Vec2::new(0.0, 50.0), Some(Vec2::zero()), 200.0);
        assert!((dir.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn ally_on_the_ray_occludes_the_shot() {
        let occluded = is_occluded_by_ally(
            Vec2::zero(),
            Vec2::new(100.0, 0.0),
            std::iter::once(Vec2::new(50.0, 2.0)),
            std::iter::once(10.0),
        );
        assert!(occluded);
    }

    #[test]
    fn ally_far_off_the_ray_does_not_occlude() {
        let occluded = is_occluded_by_ally(
            Vec2::zero(),
            Vec2::new(100.0, 0.0),
            std::iter::once(Vec2::new(50.0, 80.0)),
            std::iter::once(10.0),
        );
        assert!(!occluded);
    }

    #[test]
    fn ally_beyond_target_does_not_occlude() {
        let occluded = is_occluded_by_ally(
            Vec2::zero(),
            Vec2::new(100.0, 0.0),
            std::iter::once(Vec2::new(150.0, 0.0)),
            std::iter::once(10.0),
        );
        assert!(!occluded);
    }
}
