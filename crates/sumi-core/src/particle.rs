//! Ink-bleed particles.
//!
//! Particles are ephemeral: the bleed simulator spawns them, advances them
//! once per animation frame, and drops them when their life runs out. They
//! are never part of the scene or its history.

use crate::color::Color;

/// Peak opacity a particle fades down from.
pub const PARTICLE_MAX_OPACITY: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Frames remaining.
    pub life: f32,
    pub max_life: f32,
    pub opacity: f32,
    /// Dot radius in scene units.
    pub size: f32,
    pub color: Color,
}

impl Particle {
    /// Advance one frame: move, age, and fade with remaining life.
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= 1.0;
        self.opacity = (self.life / self.max_life) * PARTICLE_MAX_OPACITY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_ages_and_fades() {
        let mut p = Particle {
            x: 0.0,
            y: 0.0,
            vx: 1.0,
            vy: 0.5,
            life: 4.0,
            max_life: 4.0,
            opacity: 0.2,
            size: 2.0,
            color: Color::BLACK,
        };
        p.step();
        assert_eq!((p.x, p.y), (1.0, 0.5));
        assert_eq!(p.life, 3.0);
        assert!((p.opacity - 0.225).abs() < 1e-6);

        for _ in 0..3 {
            p.step();
        }
        assert!(!p.is_alive());
        assert!(p.opacity <= 0.0);
    }
}
