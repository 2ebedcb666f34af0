//! Confetti burst controller.
//!
//! A burst is a chain of fixed-length cycles. Each cycle spawns a shower of
//! particles, animates them frame by frame, recycles anything that falls off
//! the bottom while the cycle is still running, and then clears the layer.
//! While the repeat flag is set a new cycle follows after a short pause.
//!
//! ```text
//! Idle --start--> Running --end--> CoolingDown --pause--> Running ...
//!   any state --stop--> Stopped --start--> Running
//! ```
//!
//! Every pending frame and timer is tracked in a [`BurstToken`]; tearing a
//! burst down always cancels the token first, so at most one cycle's
//! particles are ever mutated.

use crate::color::Rgba;
use crate::config::ConfettiConfig;
use crate::sched::{Scheduler, TaskId};
use crate::surface::{LocalRect, Surface2d, Viewport};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Circle,
}

#[derive(Clone, Debug)]
pub struct ConfettiParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub color: Rgba,
    pub shape: Shape,
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    CoolingDown,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A cycle was already running; nothing changed.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cycle {
    pub started_at: f64,
    pub ends_at: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerRole {
    HardStop,
    Restart,
}

/// Everything a burst has scheduled. Cancelling it leaves nothing pending.
#[derive(Debug, Default)]
pub struct BurstToken {
    frame: Option<TaskId>,
    timer: Option<(TaskId, TimerRole)>,
}

impl BurstToken {
    pub fn cancel(self, scheduler: &mut impl Scheduler) {
        if let Some(id) = self.frame {
            scheduler.cancel(id);
        }
        if let Some((id, _)) = self.timer {
            scheduler.cancel(id);
        }
    }

    fn cancel_timer(&mut self, scheduler: &mut impl Scheduler) {
        if let Some((id, _)) = self.timer.take() {
            scheduler.cancel(id);
        }
    }

    fn cancel_frame(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(id) = self.frame.take() {
            scheduler.cancel(id);
        }
    }
}

/// Particles per cycle: one per `px_per_particle` of viewport width. A
/// non-positive spacing yields an empty burst.
pub fn confetti_count(viewport: &Viewport, px_per_particle: f32) -> usize {
    if px_per_particle <= 0.0 {
        return 0;
    }
    (viewport.width / px_per_particle).round() as usize
}

pub struct ConfettiController<S: Scheduler> {
    config: ConfettiConfig,
    scheduler: S,
    rng: StdRng,
    viewport: Viewport,
    particles: Vec<ConfettiParticle>,
    phase: Phase,
    repeat: bool,
    cycle: Option<Cycle>,
    token: Option<BurstToken>,
    frames_drawn: u64,
    cycles_started: u64,
}

impl<S: Scheduler> ConfettiController<S> {
    pub fn new(config: ConfettiConfig, scheduler: S, viewport: Viewport, seed: u64) -> Self {
        Self {
            config,
            scheduler,
            rng: StdRng::seed_from_u64(seed),
            viewport,
            particles: Vec::new(),
            phase: Phase::Idle,
            repeat: false,
            cycle: None,
            token: None,
            frames_drawn: 0,
            cycles_started: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a cycle is animating; the re-entrancy guard for `start`.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Running
    }

    #[inline]
    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    #[inline]
    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    #[inline]
    pub fn cycle(&self) -> Option<Cycle> {
        self.cycle
    }

    #[inline]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    #[inline]
    pub fn cycles_started(&self) -> u64 {
        self.cycles_started
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// New viewport for the next cycle; the running cycle keeps its bounds.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn start(&mut self, now: f64, surface: &mut impl Surface2d) -> StartOutcome {
        if self.is_active() {
            return StartOutcome::Ignored;
        }
        self.teardown(surface);
        self.repeat = true;
        self.run_cycle(now, surface);
        StartOutcome::Started
    }

    /// Cancel the burst in whatever state it is in. Safe to call repeatedly.
    pub fn stop(&mut self, surface: &mut impl Surface2d) {
        self.repeat = false;
        self.teardown(surface);
        self.phase = Phase::Stopped;
    }

    fn teardown(&mut self, surface: &mut impl Surface2d) {
        if let Some(token) = self.token.take() {
            token.cancel(&mut self.scheduler);
        }
        self.cycle = None;
        self.particles.clear();
        surface.clear();
        surface.set_visible(false);
    }

    fn run_cycle(&mut self, now: f64, surface: &mut impl Surface2d) {
        if !self.repeat {
            return;
        }
        let cycle = Cycle {
            started_at: now,
            ends_at: now + self.config.cycle_ms,
        };
        self.cycle = Some(cycle);
        self.phase = Phase::Running;
        self.cycles_started += 1;
        surface.set_visible(true);
        surface.fit(&self.viewport);
        self.spawn();
        let frame = self.scheduler.request_frame();
        let hard_stop = self
            .scheduler
            .set_timeout(self.config.cycle_ms + self.config.hard_stop_slack_ms);
        self.token = Some(BurstToken {
            frame: Some(frame),
            timer: Some((hard_stop, TimerRole::HardStop)),
        });
        log::info!(
            "[confetti] cycle {} started: {} particles",
            self.cycles_started,
            self.particles.len()
        );
    }

    fn spawn(&mut self) {
        let count = confetti_count(&self.viewport, self.config.px_per_particle);
        let (w, h) = (self.viewport.width, self.viewport.height);
        let particles: Vec<ConfettiParticle> = (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    self.rng.gen::<f32>() * w,
                    self.config.spawn_y - self.rng.gen::<f32>() * h * 0.5,
                );
                let mut p = ConfettiParticle {
                    pos,
                    vel: Vec2::ZERO,
                    size: self.config.size_min + self.rng.gen::<f32>() * self.config.size_span,
                    rotation: 0.0,
                    spin: 0.0,
                    color: self.pick_color(),
                    shape: if self.rng.gen::<f32>() < 0.5 {
                        Shape::Rect
                    } else {
                        Shape::Circle
                    },
                    alive: true,
                };
                self.launch(&mut p);
                p
            })
            .collect();
        self.particles = particles;
    }

    fn pick_color(&mut self) -> Rgba {
        self.config
            .palette
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Rgba::rgb(255, 255, 255))
    }

    // Fresh velocity and spin, shared by spawn and recycle.
    fn launch(&mut self, p: &mut ConfettiParticle) {
        let c = &self.config;
        p.vel = Vec2::new(
            c.vx_min + self.rng.gen::<f32>() * c.vx_span,
            c.vy_min + self.rng.gen::<f32>() * c.vy_span,
        );
        p.rotation = self.rng.gen::<f32>() * TAU;
        p.spin = c.spin_min + self.rng.gen::<f32>() * c.spin_span;
    }

    /// Animation frame callback.
    pub fn on_frame(&mut self, id: TaskId, now: f64, surface: &mut impl Surface2d) {
        let Some(token) = self.token.as_mut() else {
            return;
        };
        if token.frame != Some(id) {
            return;
        }
        token.frame = None;
        let Some(cycle) = self.cycle else {
            return;
        };
        if now >= cycle.ends_at {
            self.end_cycle(surface);
            return;
        }
        self.draw(now, cycle.ends_at, surface);
        let next = self.scheduler.request_frame();
        if let Some(token) = self.token.as_mut() {
            token.frame = Some(next);
        }
    }

    /// Timer callback: either the hard stop of a cycle or the restart after a pause.
    pub fn on_timeout(&mut self, id: TaskId, now: f64, surface: &mut impl Surface2d) {
        let Some(token) = self.token.as_mut() else {
            return;
        };
        let role = match token.timer {
            Some((pending, role)) if pending == id => role,
            _ => return,
        };
        token.timer = None;
        match role {
            TimerRole::HardStop => {
                log::debug!("[confetti] hard stop at {:.0}ms", now);
                self.end_cycle(surface);
            }
            TimerRole::Restart => {
                self.token = None;
                self.run_cycle(now, surface);
            }
        }
    }

    fn end_cycle(&mut self, surface: &mut impl Surface2d) {
        if let Some(mut token) = self.token.take() {
            token.cancel_frame(&mut self.scheduler);
            token.cancel_timer(&mut self.scheduler);
        }
        self.cycle = None;
        self.particles.clear();
        surface.clear();
        surface.set_visible(false);
        if self.repeat {
            let restart = self.scheduler.set_timeout(self.config.restart_pause_ms);
            self.token = Some(BurstToken {
                frame: None,
                timer: Some((restart, TimerRole::Restart)),
            });
            self.phase = Phase::CoolingDown;
        } else {
            self.phase = Phase::Idle;
        }
        log::debug!("[confetti] cycle ended, repeat={}", self.repeat);
    }

    fn draw(&mut self, now: f64, ends_at: f64, surface: &mut impl Surface2d) {
        surface.clear();
        let (w, h) = (self.viewport.width, self.viewport.height);
        let floor = h + self.config.recycle_margin;
        let mut particles = std::mem::take(&mut self.particles);
        for p in particles.iter_mut().filter(|p| p.alive) {
            p.pos += p.vel;
            p.rotation += p.spin;
            p.vel.y *= self.config.drag;
            if p.pos.y > floor {
                if now < ends_at {
                    p.pos = Vec2::new(self.rng.gen::<f32>() * w, self.config.spawn_y);
                    self.launch(p);
                } else {
                    p.alive = false;
                    continue;
                }
            }
            match p.shape {
                Shape::Rect => surface.fill_rotated_rect(
                    p.pos,
                    p.rotation,
                    LocalRect {
                        x: -p.size / 2.0,
                        y: -p.size / 2.0,
                        w: p.size,
                        h: p.size * self.config.rect_aspect,
                    },
                    p.color,
                ),
                Shape::Circle => {
                    surface.fill_circle(p.pos, p.size * self.config.circle_scale, p.color)
                }
            }
        }
        self.particles = particles;
        self.frames_drawn += 1;
    }

    /// Run one frame's physics at `now` against a cycle ending at `ends_at`
    /// without touching the scheduler. Lets callers step particles directly.
    pub fn step_particles(&mut self, now: f64, ends_at: f64, surface: &mut impl Surface2d) {
        self.draw(now, ends_at, surface);
    }
}
