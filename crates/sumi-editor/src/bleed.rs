//! Ink-bleed particle simulation and the dwell timer that feeds it.
//!
//! Ink spreads where the brush lingers: every spawn emits
//! `floor(intensity * 10 + dwell_ms * 0.01)` particles, so holding the
//! pointer down makes each later spawn denser. Particles drift outward with
//! a slight downward bias, fade with remaining life, and are culled once
//! their life runs out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use sumi_core::model::PathCmd;
use sumi_core::{Color, Particle};

/// Milliseconds per dwell quantum (one animation frame at ~60 Hz).
pub const DWELL_QUANTUM_MS: f32 = 16.0;

/// Pointer travel per quantum below which motion counts as slow enough
/// to bleed.
const SLOW_SPEED: f32 = 2.0;
const GRAVITY: f32 = 0.1;

/// The particle pool plus its random source.
pub struct InkBleed<R = StdRng> {
    particles: Vec<Particle>,
    rng: R,
}

impl Default for InkBleed<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl InkBleed<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible simulator for tests and headless rendering.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> InkBleed<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn unit(&mut self) -> f32 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Emit particles at (x, y). Returns how many were spawned.
    pub fn spawn(&mut self, x: f32, y: f32, intensity: f32, dwell_ms: f32, color: Color) -> usize {
        let count = (intensity * 10.0 + dwell_ms * 0.01).floor().max(0.0) as usize;
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = self.unit() * TAU;
            let speed = self.unit() * intensity * 2.0;
            let life = self.unit() * 100.0 + 50.0;
            let opacity = self.unit() * 0.3 + 0.1;
            let size = self.unit() * 3.0 + 1.0;
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed + GRAVITY,
                life,
                max_life: life,
                opacity,
                size,
                color,
            });
        }
        count
    }

    /// Bleed along a finished stroke: spawn at every third path command.
    /// Paths with fewer than two commands, or a zero bleed factor, do not
    /// bleed.
    pub fn bleed_stroke(
        &mut self,
        commands: &[PathCmd],
        bleed_factor: f32,
        dwell_ms: f32,
        color: Color,
    ) -> usize {
        if bleed_factor == 0.0 || commands.len() < 2 {
            return 0;
        }
        let anchors: Vec<(f32, f32)> = commands
            .iter()
            .step_by(3)
            .filter_map(leading_point)
            .collect();
        let spawned: usize = anchors
            .into_iter()
            .map(|(x, y)| self.spawn(x, y, bleed_factor, dwell_ms, color))
            .sum();
        log::trace!("bleed: stroke spawned {spawned}, {} live", self.len());
        spawned
    }

    /// Bleed from pointer motion between two samples. Slow motion bleeds;
    /// the slower, the more.
    pub fn bleed_motion(
        &mut self,
        prev: (f32, f32),
        cur: (f32, f32),
        bleed_factor: f32,
        dwell_ms: f32,
        color: Color,
    ) -> usize {
        let distance = (cur.0 - prev.0).hypot(cur.1 - prev.1);
        let speed = distance / DWELL_QUANTUM_MS;
        if speed >= SLOW_SPEED {
            return 0;
        }
        self.spawn(cur.0, cur.1, bleed_factor * (SLOW_SPEED - speed), dwell_ms, color)
    }

    /// Advance every particle one frame and drop the dead ones.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.step();
        }
        self.particles.retain(Particle::is_alive);
        if !self.particles.is_empty() {
            log::trace!("bleed: {} live", self.particles.len());
        }
    }
}

/// First coordinate pair a command carries.
fn leading_point(cmd: &PathCmd) -> Option<(f32, f32)> {
    match *cmd {
        PathCmd::MoveTo(x, y) | PathCmd::LineTo(x, y) => Some((x, y)),
        PathCmd::QuadTo(cx, cy, _, _) => Some((cx, cy)),
        PathCmd::CubicTo(ax, ay, ..) => Some((ax, ay)),
        PathCmd::Close => None,
    }
}

/// Accumulates how long the pointer has been held down, in whole quanta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DwellTimer {
    running: bool,
    dwell_ms: f32,
    pending_ms: f32,
}

impl DwellTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero.
    pub fn start(&mut self) {
        self.running = true;
        self.dwell_ms = 0.0;
        self.pending_ms = 0.0;
    }

    /// Stop and reset to zero.
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Feed elapsed frame time. Only whole quanta count.
    pub fn tick(&mut self, elapsed_ms: f32) {
        if !self.running || elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
            return;
        }
        self.pending_ms += elapsed_ms;
        let quanta = (self.pending_ms / DWELL_QUANTUM_MS).floor();
        self.dwell_ms += quanta * DWELL_QUANTUM_MS;
        self.pending_ms -= quanta * DWELL_QUANTUM_MS;
    }

    pub fn dwell_ms(&self) -> f32 {
        self.dwell_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
