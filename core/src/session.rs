use std::collections::VecDeque;

use log::{debug, info, trace};

use crate::collision::resolve_projectile_hit;
use crate::init::{spawn_player, SessionConfig};
use crate::input::{jumper_for, shooter_for, Controls, HeldKeys, InputEvent, MoveIntent};
use crate::particles::tick_particles;
use crate::physics::{apply_jump_physics, apply_movement, release_to_idle};
use crate::prng::Rng;
use crate::projectiles::{is_off_screen, move_projectile, refresh_cooldown, try_fire};
use crate::render::{self, Surface, Viewport};
use crate::sprites::advance_frame;
use crate::types::*;

/// One duel from first frame to game over.
///
/// The host queues key events with [`Session::push_input`] whenever they
/// arrive and calls [`Session::frame`] at a fixed cadence. Events are applied
/// at the start of the next frame, in arrival order.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    frame: u64,
    phase: Phase,
    players: [PlayerState; 2],
    projectiles: Vec<Projectile>,
    particles: Vec<HitParticle>,
    keys: HeldKeys,
    /// Jump presses seen since the last movement step, per player.
    jump_requested: [bool; 2],
    pending: VecDeque<InputEvent>,
    rng: Rng,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            frame: 0,
            phase: Phase::Running,
            players: [spawn_player(PlayerId::One), spawn_player(PlayerId::Two)],
            projectiles: Vec::new(),
            particles: Vec::new(),
            keys: HeldKeys::default(),
            jump_requested: [false; 2],
            pending: VecDeque::new(),
            rng: Rng::new(config.seed),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        if self.is_over() {
            return;
        }
        self.pending.push_back(event);
    }

    /// Run one frame at host time `now` and draw it onto `surface`.
    ///
    /// Order while running:
    ///  0. Apply queued input (held keys, shots, jump presses, key-release idle)
    ///  1. Draw scene
    ///  2. Projectiles: move, draw, collide, retire
    ///  3. Particles: move, draw, retire
    ///  4. Jump physics for both players
    ///  5. Draw both players
    ///  6. Draw HUD
    ///  7. Cooldown expiry
    ///  8. Animation frame advance
    ///  9. Keyboard movement
    ///
    /// A game over raised in step 2 lets the rest of this frame finish; every
    /// later frame only redraws the winner banner.
    pub fn frame(&mut self, now: Millis, surface: &mut impl Surface) {
        let vp = self.viewport();
        if let Phase::GameOver { winner } = self.phase {
            render::draw_winner(surface, winner, vp);
            return;
        }

        self.frame += 1;
        self.apply_pending_input(now);

        render::draw_scene(surface, vp);
        self.advance_projectiles(surface);
        self.advance_particles(surface);

        self.players = self.players.map(|p| apply_jump_physics(&p));
        for p in &self.players {
            render::draw_player(surface, p);
        }
        render::draw_hud(surface, &self.players, vp);

        self.players = self.players.map(|p| refresh_cooldown(&p, now));
        self.players = self.players.map(|p| advance_frame(&p));

        let keys = self.keys;
        let requested = std::mem::take(&mut self.jump_requested);
        self.players = self.players.map(|p| {
            let mut intent = MoveIntent::read(&keys, &Controls::for_player(p.id));
            intent.jump |= requested[p.id.index()];
            apply_movement(&p, &intent)
        });

        trace!(
            "frame {}: projectiles={} particles={}",
            self.frame,
            self.projectiles.len(),
            self.particles.len()
        );

        if let Phase::GameOver { winner } = self.phase {
            render::draw_winner(surface, winner, vp);
        }
    }

    fn apply_pending_input(&mut self, now: Millis) {
        while let Some(event) = self.pending.pop_front() {
            match event {
                InputEvent::KeyDown(key) => {
                    self.keys.press(key);
                    if let Some(id) = shooter_for(key) {
                        self.shoot(id, now);
                    }
                    if let Some(id) = jumper_for(key) {
                        self.jump_requested[id.index()] = true;
                    }
                }
                InputEvent::KeyUp(key) => {
                    self.keys.release(key);
                    for p in self.players.iter_mut() {
                        if Controls::for_player(p.id).is_motion_key(key) {
                            *p = release_to_idle(p);
                        }
                    }
                }
            }
        }
    }

    fn shoot(&mut self, id: PlayerId, now: Millis) {
        let shooter = &mut self.players[id.index()];
        if let Some((reloading, proj)) = try_fire(shooter, now) {
            debug!("{:?} fired at x={} y={} facing {:?}", id, proj.x, proj.y, proj.direction);
            *shooter = reloading;
            self.projectiles.push(proj);
        }
    }

    /// Newest projectile first. Each is removed at most once: on a hit, or
    /// when it has left the screen horizontally.
    fn advance_projectiles(&mut self, surface: &mut impl Surface) {
        let width = self.config.viewport_width;
        let mut survivors = Vec::with_capacity(self.projectiles.len());

        for mut proj in std::mem::take(&mut self.projectiles).into_iter().rev() {
            move_projectile(&mut proj);
            render::draw_projectile(surface, &proj);

            let hit = resolve_projectile_hit(
                &proj,
                &mut self.players,
                &mut self.particles,
                &mut self.rng,
            );
            if let Some(hit) = hit {
                if hit.is_lethal() {
                    self.end(hit.shooter);
                }
                continue;
            }

            if is_off_screen(&proj, width) {
                debug!("{:?} projectile left the screen at x={}", proj.owner, proj.x);
                continue;
            }
            survivors.push(proj);
        }

        survivors.reverse();
        self.projectiles = survivors;
    }

    fn advance_particles(&mut self, surface: &mut impl Surface) {
        tick_particles(&mut self.particles);
        for p in &self.particles {
            render::draw_particle(surface, p);
        }
    }

    /// First lethal hit decides the winner.
    fn end(&mut self, winner: PlayerId) {
        if self.phase == Phase::Running {
            info!("game over: {} wins on frame {}", winner.label(), self.frame);
            self.phase = Phase::GameOver { winner };
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            Phase::Running => None,
        }
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn particles(&self) -> &[HitParticle] {
        &self.particles
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.config.viewport_width,
            height: self.config.viewport_height,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            phase: self.phase,
            players: self.players,
            projectiles: self.projectiles.clone(),
            particles: self.particles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::init::default_config;
    use crate::input::Key;
    use crate::render::{NullSurface, RecordingSurface};

    const FRAME_MS: f64 = 100.0;

    fn session() -> Session {
        Session::new(default_config(42))
    }

    fn tap(s: &mut Session, key: Key) {
        s.push_input(InputEvent::KeyDown(key));
        s.push_input(InputEvent::KeyUp(key));
    }

    #[test]
    fn new_session_is_running() {
        let s = session();
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.frame_count(), 0);
        assert_eq!(s.player(PlayerId::One).x, PLAYER_ONE_START_X);
        assert_eq!(s.player(PlayerId::Two).x, PLAYER_TWO_START_X);
        assert!(s.projectiles().is_empty());
    }

    #[test]
    fn held_key_walks_until_released() {
        let mut s = session();
        s.push_input(InputEvent::KeyDown(Key::D));
        s.frame(0.0, &mut NullSurface);
        s.frame(FRAME_MS, &mut NullSurface);
        let p = s.player(PlayerId::One);
        assert_eq!(p.x, PLAYER_ONE_START_X + 2.0 * MOVE_SPEED);
        assert_eq!(p.action, Action::Walk);
        assert_eq!(s.player(PlayerId::Two).x, PLAYER_TWO_START_X);

        s.push_input(InputEvent::KeyUp(Key::D));
        s.frame(2.0 * FRAME_MS, &mut NullSurface);
        let p = s.player(PlayerId::One);
        assert_eq!(p.x, PLAYER_ONE_START_X + 2.0 * MOVE_SPEED);
        assert_eq!(p.action, Action::Idle);
    }

    #[test]
    fn jump_through_the_loop_lands() {
        let mut s = session();
        s.push_input(InputEvent::KeyDown(Key::ArrowUp));
        s.frame(0.0, &mut NullSurface);
        s.push_input(InputEvent::KeyUp(Key::ArrowUp));
        assert!(s.player(PlayerId::Two).airborne);

        let mut frames = 0;
        while s.player(PlayerId::Two).airborne {
            frames += 1;
            s.frame(frames as f64 * FRAME_MS, &mut NullSurface);
            let p = s.player(PlayerId::Two);
            if p.airborne {
                assert_eq!(p.action, Action::Jump);
            }
            assert!(frames < 100);
        }
        let p = s.player(PlayerId::Two);
        assert_eq!(frames, 17);
        assert_eq!(p.y, GROUND_Y);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn jump_tapped_between_frames_still_jumps() {
        let mut s = session();
        tap(&mut s, Key::W);
        s.frame(0.0, &mut NullSurface);
        let p = s.player(PlayerId::One);
        assert!(p.airborne);
        assert_eq!(p.action, Action::Jump);
        assert_eq!(p.vy, JUMP_VELOCITY);
        assert!(!s.player(PlayerId::Two).airborne);

        // The press is consumed by that frame's movement step.
        s.frame(FRAME_MS, &mut NullSurface);
        assert_eq!(s.player(PlayerId::One).vy, JUMP_VELOCITY + GRAVITY);
    }

    #[test]
    fn jump_tap_while_airborne_is_dropped() {
        let mut s = session();
        tap(&mut s, Key::ArrowUp);
        s.frame(0.0, &mut NullSurface);
        for i in 1..5 {
            s.frame(i as f64 * FRAME_MS, &mut NullSurface);
        }
        let vy = s.player(PlayerId::Two).vy;

        tap(&mut s, Key::ArrowUp);
        s.frame(5.0 * FRAME_MS, &mut NullSurface);
        assert_eq!(s.player(PlayerId::Two).vy, vy + GRAVITY);

        let mut i = 6;
        while s.player(PlayerId::Two).airborne {
            s.frame(i as f64 * FRAME_MS, &mut NullSurface);
            i += 1;
            assert!(i < 100);
        }
        // Landed and stays down: the mid-air tap was not kept for later.
        s.frame(i as f64 * FRAME_MS, &mut NullSurface);
        assert!(!s.player(PlayerId::Two).airborne);
        assert_eq!(s.player(PlayerId::Two).y, GROUND_Y);
    }

    #[test]
    fn shot_spawns_and_cooldown_rearms_on_next_check() {
        let mut s = session();
        tap(&mut s, Key::Space);
        s.frame(1000.0, &mut NullSurface);
        assert_eq!(s.projectiles().len(), 1);
        assert!(!s.player(PlayerId::One).can_shoot);

        // Still reloading one tick short of the cooldown.
        s.frame(1499.0, &mut NullSurface);
        assert!(!s.player(PlayerId::One).can_shoot);

        // A shot queued for the frame that re-arms is still refused: input is
        // applied before the cooldown check.
        tap(&mut s, Key::Space);
        s.frame(1500.0, &mut NullSurface);
        assert_eq!(s.projectiles().len(), 1);
        assert!(s.player(PlayerId::One).can_shoot);

        tap(&mut s, Key::Space);
        s.frame(1600.0, &mut NullSurface);
        assert_eq!(s.projectiles().len(), 2);
    }

    #[test]
    fn projectile_retires_once_off_screen() {
        let mut s = session();
        s.players[0].x = s.config.viewport_width - 60.0;
        tap(&mut s, Key::Space);
        // Spawned at width - 10, moved to width + 5 and retired in the same frame.
        s.frame(0.0, &mut NullSurface);
        assert!(s.projectiles().is_empty());
    }

    #[test]
    fn projectile_exactly_on_edge_survives() {
        let mut s = session();
        s.players[0].x = s.config.viewport_width - 65.0;
        tap(&mut s, Key::Space);
        s.frame(0.0, &mut NullSurface);
        assert_eq!(s.projectiles().len(), 1);
        assert_eq!(s.projectiles()[0].x, s.config.viewport_width);
        s.frame(FRAME_MS, &mut NullSurface);
        assert!(s.projectiles().is_empty());
    }

    #[test]
    fn hit_spawns_particles_and_damages_target() {
        let mut s = session();
        s.players[1].x = s.players[0].x + 80.0;
        tap(&mut s, Key::Space);
        s.frame(0.0, &mut NullSurface);
        assert!(s.projectiles().is_empty());
        assert_eq!(s.player(PlayerId::Two).health, MAX_HEALTH - PROJECTILE_DAMAGE);
        assert_eq!(s.particles().len(), HIT_PARTICLE_COUNT);

        // Particles age on later frames and disappear.
        for i in 1..=26 {
            s.frame(i as f64 * FRAME_MS, &mut NullSurface);
        }
        assert!(s.particles().is_empty());
    }

    #[test]
    fn hit_removes_only_the_projectile_that_hit() {
        // Both firing orders, so the hitting shot is once the newest and once the oldest.
        for keys in [[Key::Enter, Key::Space], [Key::Space, Key::Enter]] {
            let mut s = session();
            for key in keys {
                tap(&mut s, key);
            }
            // P1 fires right at P2; P2 faces right and fires away from P1.
            // P1's shot reaches the hitbox on the 21st frame.
            for i in 0..20 {
                s.frame(i as f64 * FRAME_MS, &mut NullSurface);
            }
            assert_eq!(s.projectiles().len(), 2);
            assert_eq!(s.player(PlayerId::Two).health, MAX_HEALTH);

            let mut expected = s
                .projectiles()
                .iter()
                .find(|p| p.owner == PlayerId::Two)
                .cloned()
                .unwrap();
            move_projectile(&mut expected);

            s.frame(20.0 * FRAME_MS, &mut NullSurface);
            assert_eq!(s.player(PlayerId::Two).health, MAX_HEALTH - PROJECTILE_DAMAGE);
            assert_eq!(s.projectiles(), &[expected]);

            let xs: Vec<f64> = s.projectiles()[0].trail.iter().map(|v| v.x).collect();
            assert_eq!(xs.len(), TRAIL_LENGTH);
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn ten_hits_end_the_game_and_freeze_state() {
        let mut s = session();
        s.players[1].x = s.players[0].x + 80.0;

        let mut tick = 0u32;
        while !s.is_over() {
            if tick % 6 == 0 {
                tap(&mut s, Key::Space);
            }
            s.frame(tick as f64 * FRAME_MS, &mut NullSurface);
            tick += 1;
            assert!(tick < 1000, "game never ended");
        }

        assert_eq!(s.winner(), Some(PlayerId::One));
        assert_eq!(s.player(PlayerId::Two).health, 0);
        // Ten shots, six frames apart.
        assert_eq!(tick, 55);

        let frozen = s.snapshot();
        for extra in 0..10 {
            s.push_input(InputEvent::KeyDown(Key::ArrowLeft));
            tap(&mut s, Key::Enter);
            tap(&mut s, Key::Space);
            s.frame((tick + extra) as f64 * FRAME_MS, &mut NullSurface);
        }
        assert_eq!(s.snapshot(), frozen);
    }

    #[test]
    fn killing_frame_still_runs_movement() {
        let mut s = session();
        s.players[1].x = s.players[0].x + 80.0;
        s.players[1].health = PROJECTILE_DAMAGE;
        s.push_input(InputEvent::KeyDown(Key::ArrowRight));
        tap(&mut s, Key::Space);
        let x_before = s.players[1].x;
        s.frame(0.0, &mut NullSurface);

        assert_eq!(s.winner(), Some(PlayerId::One));
        assert_eq!(s.player(PlayerId::Two).x, x_before + MOVE_SPEED);

        s.frame(FRAME_MS, &mut NullSurface);
        assert_eq!(s.player(PlayerId::Two).x, x_before + MOVE_SPEED);
    }

    #[test]
    fn game_over_frames_draw_only_the_banner() {
        let mut s = session();
        s.phase = Phase::GameOver { winner: PlayerId::Two };
        let mut surface = RecordingSurface::default();
        s.frame(0.0, &mut surface);
        assert_eq!(surface.texts(), vec!["Player 2 Wins!"]);
        assert_eq!(surface.calls.len(), 1);
        assert_eq!(s.frame_count(), 0);
    }

    #[test]
    fn running_frame_draws_scene_first_and_hud() {
        let mut s = session();
        let mut surface = RecordingSurface::default();
        s.frame(0.0, &mut surface);
        assert!(matches!(surface.calls[0], crate::render::DrawCall::Clear(_)));
        assert!(surface.texts().contains(&"Player 1: 100"));
        assert!(!surface.texts().iter().any(|t| t.ends_with("Wins!")));
    }

    #[test]
    fn key_release_idles_only_its_owner() {
        let mut s = session();
        s.players[0].action = Action::Walk;
        s.players[1].action = Action::Walk;
        s.push_input(InputEvent::KeyUp(Key::W));
        s.apply_pending_input(0.0);
        assert_eq!(s.players[0].action, Action::Idle);
        assert_eq!(s.players[1].action, Action::Walk);
    }

    #[test]
    fn snapshot_serialises_to_json() {
        let mut s = session();
        tap(&mut s, Key::Enter);
        s.frame(0.0, &mut NullSurface);
        let snap = s.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
        assert_eq!(back.projectiles.len(), 1);
        assert_eq!(back.projectiles[0].owner, PlayerId::Two);
    }
}
