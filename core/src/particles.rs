use std::f64::consts::TAU;

use crate::constants::*;
use crate::prng::Rng;
use crate::types::*;

/// Burst of particles flying out from an impact point in random directions.
pub fn emit_hit_burst(rng: &mut Rng, x: f64, y: f64, color: Rgb) -> Vec<HitParticle> {
    (0..HIT_PARTICLE_COUNT)
        .map(|_| {
            let angle = rng.range(0.0, TAU);
            let speed = rng.range(HIT_PARTICLE_MIN_SPEED, HIT_PARTICLE_MAX_SPEED);
            HitParticle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                life: HIT_PARTICLE_LIFE,
                color,
            }
        })
        .collect()
}

/// Move and age one particle.
pub fn move_particle(p: &HitParticle) -> HitParticle {
    HitParticle {
        x: p.x + p.vx,
        y: p.y + p.vy,
        life: p.life - HIT_PARTICLE_DECAY,
        ..*p
    }
}

/// Advance every particle and drop the spent ones, keeping order.
pub fn tick_particles(particles: &mut Vec<HitParticle>) {
    for p in particles.iter_mut() {
        *p = move_particle(p);
    }
    particles.retain(|p| p.life > 0);
}
