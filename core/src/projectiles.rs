use std::collections::VecDeque;

use crate::constants::*;
use crate::types::*;

/// Fire from the shooter's muzzle in the direction they face.
pub fn spawn_projectile(shooter: &PlayerState) -> Projectile {
    Projectile {
        owner: shooter.id,
        x: shooter.x + MUZZLE_OFFSET_X * shooter.facing.sign(),
        y: shooter.y + MUZZLE_OFFSET_Y,
        direction: shooter.facing,
        speed: PROJECTILE_SPEED,
        size: PROJECTILE_SIZE,
        color: shooter.id.color(),
        trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
    }
}

/// Fire if the shooter is ready. Returns the reloading shooter and the new projectile.
pub fn try_fire(shooter: &PlayerState, now: Millis) -> Option<(PlayerState, Projectile)> {
    if !shooter.can_shoot {
        return None;
    }
    let reloading = PlayerState {
        can_shoot: false,
        last_shot_at: now,
        ..*shooter
    };
    Some((reloading, spawn_projectile(shooter)))
}

/// Re-arm a shooter once the cooldown has fully elapsed. Polled once per frame.
pub fn refresh_cooldown(p: &PlayerState, now: Millis) -> PlayerState {
    if p.can_shoot || now - p.last_shot_at < SHOOT_COOLDOWN_MS {
        return *p;
    }
    PlayerState {
        can_shoot: true,
        ..*p
    }
}

/// Move a projectile one frame and record the new position in its trail.
pub fn move_projectile(proj: &mut Projectile) {
    proj.x += proj.speed * proj.direction.sign();
    proj.trail.push_back(Vec2::new(proj.x, proj.y));
    while proj.trail.len() > TRAIL_LENGTH {
        proj.trail.pop_front();
    }
}

/// Outside the horizontal screen span. Vertical position never retires a projectile.
pub fn is_off_screen(proj: &Projectile, screen_width: f64) -> bool {
    proj.x < 0.0 || proj.x > screen_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::spawn_player;

    #[test]
    fn spawn_from_muzzle_facing_right() {
        let p = spawn_player(PlayerId::One);
        let proj = spawn_projectile(&p);
        assert_eq!(proj.owner, PlayerId::One);
        assert_eq!(proj.x, p.x + MUZZLE_OFFSET_X);
        assert_eq!(proj.y, p.y + MUZZLE_OFFSET_Y);
        assert_eq!(proj.direction, Facing::Right);
        assert_eq!(proj.color, PLAYER_ONE_COLOR);
        assert!(proj.trail.is_empty());
    }

    #[test]
    fn spawn_from_muzzle_facing_left() {
        let mut p = spawn_player(PlayerId::Two);
        p.facing = Facing::Left;
        let proj = spawn_projectile(&p);
        assert_eq!(proj.x, p.x - MUZZLE_OFFSET_X);
        assert_eq!(proj.direction, Facing::Left);
        assert_eq!(proj.color, PLAYER_TWO_COLOR);
    }

    #[test]
    fn firing_starts_cooldown() {
        let p = spawn_player(PlayerId::One);
        let (reloading, proj) = try_fire(&p, 1234.0).expect("ready to fire");
        assert!(!reloading.can_shoot);
        assert_eq!(reloading.last_shot_at, 1234.0);
        assert_eq!(proj.owner, PlayerId::One);
        assert!(try_fire(&reloading, 1300.0).is_none());
    }

    #[test]
    fn cooldown_rearms_at_500ms() {
        let p = spawn_player(PlayerId::Two);
        let (reloading, _) = try_fire(&p, 1000.0).unwrap();
        assert!(!refresh_cooldown(&reloading, 1000.0).can_shoot);
        assert!(!refresh_cooldown(&reloading, 1499.9).can_shoot);
        assert!(refresh_cooldown(&reloading, 1500.0).can_shoot);
        assert!(refresh_cooldown(&reloading, 9000.0).can_shoot);
    }

    #[test]
    fn move_advances_by_speed() {
        let mut p = spawn_player(PlayerId::Two);
        p.facing = Facing::Left;
        let mut proj = spawn_projectile(&p);
        let x0 = proj.x;
        move_projectile(&mut proj);
        assert_eq!(proj.x, x0 - PROJECTILE_SPEED);
        assert_eq!(proj.trail.back(), Some(&Vec2::new(proj.x, proj.y)));
    }

    #[test]
    fn trail_never_exceeds_five() {
        let mut proj = spawn_projectile(&spawn_player(PlayerId::One));
        for step in 1..=40 {
            move_projectile(&mut proj);
            assert_eq!(proj.trail.len(), step.min(TRAIL_LENGTH));
        }
        // Oldest first, newest last.
        let xs: Vec<f64> = proj.trail.iter().map(|v| v.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*xs.last().unwrap(), proj.x);
    }

    #[test]
    fn off_screen_bounds() {
        let mut proj = spawn_projectile(&spawn_player(PlayerId::One));
        proj.x = 0.0;
        assert!(!is_off_screen(&proj, 800.0));
        proj.x = 800.0;
        assert!(!is_off_screen(&proj, 800.0));
        proj.x = -0.5;
        assert!(is_off_screen(&proj, 800.0));
        proj.x = 800.5;
        assert!(is_off_screen(&proj, 800.0));
    }
}
