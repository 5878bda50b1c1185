//! Axis-aligned collision detection and the paddle bounce contract
//!
//! Pure geometry only: no entity ownership, no mutation of game state.
//! The paddle bounce is the one numerically delicate spot in the game -
//! the radicand floor keeps the ball from ever leaving the paddle on a
//! purely horizontal trajectory.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned rectangle, origin top-left, +y down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True when the rectangles share a nonzero overlap area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Reflect a ball's velocity at the playfield walls.
///
/// Side walls negate dx, the ceiling negates dy. No positional clamping:
/// the reflection pushes the ball back inside within the next tick's margin.
pub fn reflect_walls(pos: Vec2, vel: Vec2, size: f32) -> Vec2 {
    let mut vel = vel;
    if pos.x <= 0.0 || pos.x >= PLAYFIELD_WIDTH - size {
        vel.x = -vel.x;
    }
    if pos.y <= 0.0 {
        vel.y = -vel.y;
    }
    vel
}

/// True when the ball's bottom edge sits inside the paddle's vertical band
/// and the horizontal extents overlap
pub fn hits_paddle(ball_pos: Vec2, ball_size: f32, paddle_x: f32) -> bool {
    ball_pos.y + ball_size >= PADDLE_Y
        && ball_pos.y + ball_size <= PADDLE_Y + PADDLE_HEIGHT
        && ball_pos.x + ball_size >= paddle_x
        && ball_pos.x <= paddle_x + PADDLE_WIDTH
}

/// Outcome of a paddle bounce
#[derive(Debug, Clone, Copy)]
pub struct BounceResult {
    /// Post-bounce velocity; dy is always strictly negative (upward)
    pub vel: Vec2,
    /// Ball y that puts its bottom edge exactly on the paddle top
    pub snap_y: f32,
}

/// Compute the post-bounce velocity for a paddle hit.
///
/// The horizontal component comes from where the ball struck the paddle
/// (`hit_pos` 0..1, unclamped at the edges) plus a spin term from the
/// paddle's own motion that tick, capped at ±`MAX_HORIZONTAL_SPEED`. The
/// vertical component re-normalizes the pre-bounce speed magnitude with a
/// floored radicand, so the ball always leaves upward.
pub fn paddle_bounce(
    ball_pos: Vec2,
    ball_vel: Vec2,
    ball_size: f32,
    paddle_x: f32,
    paddle_vel: f32,
) -> BounceResult {
    let ball_center = ball_pos.x + ball_size / 2.0;
    let hit_pos = (ball_center - paddle_x) / PADDLE_WIDTH;

    // -1 at the far left edge, 0 dead center, +1 at the far right edge
    let angle_factor = (hit_pos - 0.5) * 2.0;

    let mut dx = angle_factor * MAX_ANGLE_SPEED;
    dx += -paddle_vel * SPIN_FACTOR;
    dx = dx.clamp(-MAX_HORIZONTAL_SPEED, MAX_HORIZONTAL_SPEED);

    // Preserve the pre-bounce speed magnitude. The floor guarantees a
    // vertical component; the zero clamp guards the radicand against
    // pathological spin inputs.
    let speed_sq = ball_vel.length_squared();
    let radicand = (speed_sq - dx * dx).max(MIN_SPEED_SQ).max(0.0);
    let dy = -radicand.sqrt();

    BounceResult {
        vel: Vec2::new(dx, dy),
        snap_y: PADDLE_Y - ball_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));

        // Touching edges are not an overlap
        let d = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_wall_reflection() {
        let vel = Vec2::new(-4.0, -4.0);

        // Left wall flips dx only
        let out = reflect_walls(Vec2::new(0.0, 300.0), vel, BALL_SIZE);
        assert_eq!(out, Vec2::new(4.0, -4.0));

        // Ceiling flips dy only
        let out = reflect_walls(Vec2::new(300.0, 0.0), Vec2::new(4.0, -4.0), BALL_SIZE);
        assert_eq!(out, Vec2::new(4.0, 4.0));

        // Mid-field: untouched
        let out = reflect_walls(Vec2::new(300.0, 300.0), vel, BALL_SIZE);
        assert_eq!(out, vel);
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let paddle_x = 350.0;
        // Ball center exactly at paddle center
        let ball_x = paddle_x + PADDLE_WIDTH / 2.0 - BALL_SIZE / 2.0;
        let pos = Vec2::new(ball_x, PADDLE_Y - BALL_SIZE);

        let bounce = paddle_bounce(pos, Vec2::new(3.0, 5.0), BALL_SIZE, paddle_x, 0.0);
        assert_eq!(bounce.vel.x, 0.0);
        assert!(bounce.vel.y < 0.0);
    }

    #[test]
    fn test_left_edge_hit_full_deflection() {
        let paddle_x = 350.0;
        // Ball center exactly on the paddle's left edge: hit_pos = 0
        let ball_x = paddle_x - BALL_SIZE / 2.0;
        let pos = Vec2::new(ball_x, PADDLE_Y - BALL_SIZE);

        let bounce = paddle_bounce(pos, Vec2::new(0.0, 5.0), BALL_SIZE, paddle_x, 0.0);
        assert!((bounce.vel.x - (-MAX_ANGLE_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn test_spin_is_clamped() {
        let paddle_x = 350.0;
        let ball_x = paddle_x - BALL_SIZE / 2.0;
        let pos = Vec2::new(ball_x, PADDLE_Y - BALL_SIZE);

        // Edge hit plus a hard rightward paddle swing: -6 - 8*0.3 = -8.4
        let bounce = paddle_bounce(pos, Vec2::new(0.0, 5.0), BALL_SIZE, paddle_x, 8.0);
        assert_eq!(bounce.vel.x, -MAX_HORIZONTAL_SPEED);
        assert!(bounce.vel.y < 0.0);
    }

    #[test]
    fn test_snap_puts_bottom_edge_on_paddle_top() {
        let bounce = paddle_bounce(
            Vec2::new(400.0, PADDLE_Y - 2.0),
            Vec2::new(4.0, 4.0),
            BALL_SIZE,
            380.0,
            0.0,
        );
        assert_eq!(bounce.snap_y, PADDLE_Y - BALL_SIZE);
    }

    #[test]
    fn test_slow_ball_keeps_minimum_vertical_speed() {
        let paddle_x = 350.0;
        let ball_x = paddle_x + PADDLE_WIDTH / 2.0 - BALL_SIZE / 2.0;
        let pos = Vec2::new(ball_x, PADDLE_Y - BALL_SIZE);

        // Nearly stationary ball: radicand floor takes over
        let bounce = paddle_bounce(pos, Vec2::new(0.1, 0.1), BALL_SIZE, paddle_x, 0.0);
        assert!(bounce.vel.y <= -MIN_SPEED_SQ.sqrt() + 1e-5);
    }

    proptest! {
        /// Hitting left of center deflects left, right of center deflects
        /// right, for any incoming velocity (zero paddle velocity).
        #[test]
        fn bounce_is_angle_monotonic(
            magnitude in 0.5f32..45.0,
            hit_left in proptest::bool::ANY,
            dx in -8.0f32..8.0,
            dy in 1.0f32..8.0,
        ) {
            let paddle_x = 350.0;
            let offset = if hit_left { -magnitude } else { magnitude };
            let center_x = paddle_x + PADDLE_WIDTH / 2.0;
            let ball_x = center_x + offset - BALL_SIZE / 2.0;
            let pos = Vec2::new(ball_x, PADDLE_Y - BALL_SIZE);

            let bounce = paddle_bounce(pos, Vec2::new(dx, dy), BALL_SIZE, paddle_x, 0.0);
            if hit_left {
                prop_assert!(bounce.vel.x < 0.0);
            } else {
                prop_assert!(bounce.vel.x > 0.0);
            }
        }

        /// The ball always leaves the paddle moving upward, whatever the
        /// incoming velocity and paddle spin.
        #[test]
        fn bounce_always_goes_up(
            offset in -60.0f32..60.0,
            dx in -12.0f32..12.0,
            dy in -12.0f32..12.0,
            paddle_vel in -8.0f32..8.0,
        ) {
            let paddle_x = 350.0;
            let center_x = paddle_x + PADDLE_WIDTH / 2.0;
            let ball_x = center_x + offset - BALL_SIZE / 2.0;
            let pos = Vec2::new(ball_x, PADDLE_Y - BALL_SIZE);

            let bounce = paddle_bounce(pos, Vec2::new(dx, dy), BALL_SIZE, paddle_x, paddle_vel);
            prop_assert!(bounce.vel.y < 0.0);
            prop_assert!(bounce.vel.x.abs() <= MAX_HORIZONTAL_SPEED);
        }
    }
}
