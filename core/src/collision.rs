use log::info;

use crate::constants::*;
use crate::particles::emit_hit_burst;
use crate::prng::Rng;
use crate::types::*;

/// Square hitbox test: projectile centre within the half-extent on both axes.
pub fn projectile_hits(proj: &Projectile, target: &PlayerState) -> bool {
    (proj.x - target.x).abs() < HITBOX_HALF_EXTENT && (proj.y - target.y).abs() < HITBOX_HALF_EXTENT
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub shooter: PlayerId,
    pub victim: PlayerId,
    pub victim_health: i32,
}

impl Hit {
    pub fn is_lethal(&self) -> bool {
        self.victim_health <= 0
    }
}

/// Test a projectile against its owner's opponent and apply the hit.
///
/// On a hit the victim loses `PROJECTILE_DAMAGE` health (no floor), a particle
/// burst is appended at the impact point, and the caller must retire the
/// projectile. Returns `None` on a miss.
pub fn resolve_projectile_hit(
    proj: &Projectile,
    players: &mut [PlayerState; 2],
    particles: &mut Vec<HitParticle>,
    rng: &mut Rng,
) -> Option<Hit> {
    let victim = proj.owner.opponent();
    let target = &mut players[victim.index()];
    if !projectile_hits(proj, target) {
        return None;
    }

    particles.extend(emit_hit_burst(rng, proj.x, proj.y, proj.color));
    target.health -= PROJECTILE_DAMAGE;

    let hit = Hit {
        shooter: proj.owner,
        victim,
        victim_health: target.health,
    };
    info!(
        "player hit: shooter={:?} victim={:?} victim_health={}",
        hit.shooter, hit.victim, hit.victim_health
    );
    Some(hit)
}
