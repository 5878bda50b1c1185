//! Particle engine: comet trails and block explosions
//!
//! Two independent populations with the same update contract: integrate by
//! velocity, pull dy down by a per-kind gravity, damp dx, count the
//! lifetime down, prune the tick it reaches zero. Neither population has a
//! size cap; the harness logs population sizes so growth stays visible.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use std::f32::consts::TAU;

/// Horizontal drag applied to every particle each tick
pub const DRAG: f32 = 0.98;

/// Fire palette, white-hot core to dark ember
pub const FIRE_COLORS: [[u8; 3]; 9] = [
    [255, 255, 255],
    [255, 255, 200],
    [255, 255, 100],
    [255, 200, 50],
    [255, 150, 0],
    [255, 100, 0],
    [255, 50, 0],
    [200, 30, 0],
    [150, 20, 0],
];

const SPARK_COLORS: [[u8; 3]; 3] = [[255, 255, 255], [255, 255, 200], [255, 200, 100]];
const EMBER_COLORS: [[u8; 3]; 3] = [[255, 100, 0], [255, 150, 50], [200, 50, 0]];

/// The four particle kinds. They share state and the update contract and
/// differ in spawn parameters and render-time color/size curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Comet-tail particle trailing a ball
    Trail,
    /// Main explosion burst
    Fire,
    /// Fast bright streak
    Spark,
    /// Slow-falling pulsing glow
    Ember,
}

/// A short-lived visual entity
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Added to dy every tick
    pub gravity: f32,
    /// Base color; render_color() applies the kind's curve on top
    pub color: [u8; 3],
    /// Base size in pixels
    pub size: f32,
    /// Remaining lifetime in ticks
    pub ticks_left: i32,
    /// Original lifetime, for normalized age
    pub max_ticks: i32,
    /// Glow phase, advanced for embers only
    pub pulse: f32,
}

impl Particle {
    /// Normalized remaining life in [0, 1]; 1 at spawn, 0 at expiry
    pub fn life_frac(&self) -> f32 {
        self.ticks_left.max(0) as f32 / self.max_ticks as f32
    }

    /// Advance one tick. Returns false once expired.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.vel.x *= DRAG;
        if self.kind == ParticleKind::Ember {
            self.pulse += 0.2;
        }
        self.ticks_left -= 1;
        self.ticks_left > 0
    }

    /// Current draw size for the render collaborator
    pub fn render_size(&self) -> f32 {
        let life = self.life_frac();
        match self.kind {
            ParticleKind::Trail => (self.size * life).max(1.0),
            ParticleKind::Fire => (self.size * (0.3 + life * 0.7)).max(1.0),
            ParticleKind::Spark | ParticleKind::Ember => self.size,
        }
    }

    /// Current draw color for the render collaborator.
    ///
    /// Trail and fire particles walk the fire palette from white-hot to
    /// ember as they age; sparks and embers fade their spawn color.
    pub fn render_color(&self) -> [u8; 3] {
        let life = self.life_frac();
        let scale = |c: [u8; 3], f: f32| -> [u8; 3] {
            [
                (c[0] as f32 * f).clamp(0.0, 255.0) as u8,
                (c[1] as f32 * f).clamp(0.0, 255.0) as u8,
                (c[2] as f32 * f).clamp(0.0, 255.0) as u8,
            ]
        };
        match self.kind {
            ParticleKind::Trail => {
                let base = FIRE_COLORS[palette_index(life)];
                scale(base, 0.3 + life * 0.7)
            }
            ParticleKind::Fire => {
                let base = FIRE_COLORS[palette_index(life)];
                scale(base, life)
            }
            ParticleKind::Spark => scale(self.color, life),
            ParticleKind::Ember => scale(self.color, life * (0.7 + 0.3 * self.pulse.sin())),
        }
    }

    /// Tail endpoint for rendering sparks as streaks
    pub fn streak_tail(&self) -> Vec2 {
        self.pos - self.vel * 2.0
    }
}

fn palette_index(life: f32) -> usize {
    let idx = ((1.0 - life) * (FIRE_COLORS.len() - 1) as f32) as usize;
    idx.min(FIRE_COLORS.len() - 1)
}

/// Owns both particle populations
#[derive(Debug, Default)]
pub struct ParticleEngine {
    /// Comet-trail particles, emitted behind every live ball every tick
    pub trails: Vec<Particle>,
    /// Explosion particles from destroyed blocks
    pub explosions: Vec<Particle>,
}

impl ParticleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.trails.clear();
        self.explosions.clear();
    }

    pub fn total(&self) -> usize {
        self.trails.len() + self.explosions.len()
    }

    /// Emit 3-5 comet particles just behind a ball
    pub fn spawn_trail(&mut self, rng: &mut Pcg32, ball_center: Vec2, ball_vel: Vec2) {
        let count = rng.random_range(3..=5);
        for _ in 0..count {
            // Spawn slightly behind the ball's direction of travel
            let offset = Vec2::new(
                rng.random_range(-4.0..4.0) - ball_vel.x * 0.5,
                rng.random_range(-4.0..4.0) - ball_vel.y * 0.5,
            );
            let lifetime = rng.random_range(25..=45);
            self.trails.push(Particle {
                kind: ParticleKind::Trail,
                pos: ball_center + offset,
                vel: ball_vel * 0.1,
                gravity: 0.0,
                color: FIRE_COLORS[0],
                size: rng.random_range(3..=7) as f32,
                ticks_left: lifetime,
                max_ticks: lifetime,
                pulse: 0.0,
            });
        }
    }

    /// Spawn a fiery burst at a destroyed block's center:
    /// 25 fire + 15 sparks + 10 embers.
    pub fn spawn_explosion(&mut self, rng: &mut Pcg32, center: Vec2) {
        // Main fire burst, radial with an upward bias
        for _ in 0..25 {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(2.0..8.0);
            let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.0);
            let lifetime = rng.random_range(30..=55);
            self.explosions.push(Particle {
                kind: ParticleKind::Fire,
                pos: center,
                vel,
                gravity: 0.15,
                color: FIRE_COLORS[0],
                size: rng.random_range(4..=10) as f32,
                ticks_left: lifetime,
                max_ticks: lifetime,
                pulse: 0.0,
            });
        }

        // Fast bright sparks
        for _ in 0..15 {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(5.0..12.0);
            let lifetime = rng.random_range(15..=30);
            self.explosions.push(Particle {
                kind: ParticleKind::Spark,
                pos: center,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
                gravity: 0.2,
                color: SPARK_COLORS[rng.random_range(0..SPARK_COLORS.len())],
                size: 2.0,
                ticks_left: lifetime,
                max_ticks: lifetime,
                pulse: 0.0,
            });
        }

        // Slow-falling embers with positional jitter
        for _ in 0..10 {
            let offset = Vec2::new(rng.random_range(-20.0..20.0), rng.random_range(-10.0..10.0));
            let lifetime = rng.random_range(40..=70);
            self.explosions.push(Particle {
                kind: ParticleKind::Ember,
                pos: center + offset,
                vel: Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-2.0..-0.5)),
                gravity: 0.05,
                color: EMBER_COLORS[rng.random_range(0..EMBER_COLORS.len())],
                size: rng.random_range(2..=4) as f32,
                ticks_left: lifetime,
                max_ticks: lifetime,
                pulse: rng.random_range(0.0..TAU),
            });
        }
    }

    /// Advance both populations and prune expired particles in the same
    /// tick, so nothing is updated or rendered past its expiry.
    pub fn update(&mut self) {
        self.trails.retain_mut(|p| p.update());
        self.explosions.retain_mut(|p| p.update());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_explosion_composition() {
        let mut engine = ParticleEngine::new();
        engine.spawn_explosion(&mut rng(), Vec2::new(100.0, 100.0));

        assert_eq!(engine.explosions.len(), 50);
        let count = |kind| {
            engine
                .explosions
                .iter()
                .filter(|p| p.kind == kind)
                .count()
        };
        assert_eq!(count(ParticleKind::Fire), 25);
        assert_eq!(count(ParticleKind::Spark), 15);
        assert_eq!(count(ParticleKind::Ember), 10);
    }

    #[test]
    fn test_trail_batch_size() {
        let mut engine = ParticleEngine::new();
        let mut rng = rng();
        for _ in 0..50 {
            engine.trails.clear();
            engine.spawn_trail(&mut rng, Vec2::new(400.0, 300.0), Vec2::new(4.0, -4.0));
            assert!((3..=5).contains(&engine.trails.len()));
        }
    }

    #[test]
    fn test_lifetime_monotone_and_pruned_at_zero() {
        let mut engine = ParticleEngine::new();
        engine.trails.push(Particle {
            kind: ParticleKind::Trail,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            gravity: 0.0,
            color: FIRE_COLORS[0],
            size: 3.0,
            ticks_left: 3,
            max_ticks: 3,
            pulse: 0.0,
        });

        let mut last = 3;
        for _ in 0..2 {
            engine.update();
            assert_eq!(engine.trails.len(), 1);
            let left = engine.trails[0].ticks_left;
            assert!(left < last);
            last = left;
        }

        // Third update drops the lifetime to zero and prunes in the same tick
        engine.update();
        assert!(engine.trails.is_empty());
    }

    #[test]
    fn test_update_applies_gravity_and_drag() {
        let mut p = Particle {
            kind: ParticleKind::Fire,
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, 0.0),
            gravity: 0.15,
            color: FIRE_COLORS[0],
            size: 5.0,
            ticks_left: 10,
            max_ticks: 10,
            pulse: 0.0,
        };
        assert!(p.update());
        assert_eq!(p.pos, Vec2::new(10.0, 0.0));
        assert!((p.vel.x - 9.8).abs() < 1e-5);
        assert!((p.vel.y - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_render_color_cools_with_age() {
        let mut p = Particle {
            kind: ParticleKind::Trail,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            gravity: 0.0,
            color: FIRE_COLORS[0],
            size: 4.0,
            ticks_left: 40,
            max_ticks: 40,
            pulse: 0.0,
        };
        let fresh = p.render_color();
        for _ in 0..35 {
            p.update();
        }
        let old = p.render_color();
        // Red channel survives cooling, green collapses toward the ember end
        assert!(old[1] < fresh[1]);
    }

    #[test]
    fn test_populations_are_independent() {
        let mut engine = ParticleEngine::new();
        let mut rng = rng();
        engine.spawn_trail(&mut rng, Vec2::new(10.0, 10.0), Vec2::new(4.0, -4.0));
        engine.spawn_explosion(&mut rng, Vec2::new(50.0, 50.0));

        assert!(engine.trails.iter().all(|p| p.kind == ParticleKind::Trail));
        assert!(engine.explosions.iter().all(|p| p.kind != ParticleKind::Trail));
        assert_eq!(engine.total(), engine.trails.len() + 50);
    }
}
