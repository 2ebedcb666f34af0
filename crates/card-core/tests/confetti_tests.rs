// Host-side tests for the confetti burst controller, driven by a virtual clock.

use card_core::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn make_controller(width: f32, height: f32) -> ConfettiController<ManualScheduler> {
    ConfettiController::new(
        ConfettiConfig::default(),
        ManualScheduler::new(FRAME_MS),
        Viewport::new(width, height, 1.0),
        7,
    )
}

// Deliver every task due up to `until` back into the controller.
fn pump(c: &mut ConfettiController<ManualScheduler>, surface: &mut RecordingSurface, until: f64) {
    while let Some(fired) = c.scheduler_mut().next_due(until) {
        match fired {
            Fired::Frame { id, at } => c.on_frame(id, at, surface),
            Fired::Timeout { id, at } => c.on_timeout(id, at, surface),
        }
    }
}

#[test]
fn start_from_idle_begins_exactly_one_cycle() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    assert_eq!(c.phase(), Phase::Idle);

    assert_eq!(c.start(0.0, &mut surface), StartOutcome::Started);
    assert_eq!(c.phase(), Phase::Running);
    assert!(c.is_active());
    assert!(c.is_repeating());
    assert_eq!(c.cycles_started(), 1);
    // round(800 / 14)
    assert_eq!(c.particles().len(), 57);
    let cycle = c.cycle().expect("cycle running");
    assert_eq!(cycle.started_at, 0.0);
    assert_eq!(cycle.ends_at, 3200.0);
    // one frame and the hard-stop timer
    assert_eq!(c.scheduler().pending_frames(), 1);
    assert_eq!(c.scheduler().pending_timeouts(), 1);
    assert!(surface.visible);
}

#[test]
fn spawned_particles_start_above_the_viewport() {
    let mut c = make_controller(700.0, 400.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    for p in c.particles() {
        assert!(p.alive);
        assert!(p.pos.x >= 0.0 && p.pos.x <= 700.0);
        assert!(p.pos.y <= -20.0 && p.pos.y >= -220.0);
        assert!(p.vel.x >= -1.0 && p.vel.x <= 1.0);
        assert!(p.vel.y >= 2.0 && p.vel.y <= 5.5);
        assert!(p.size >= 6.0 && p.size <= 12.0);
        assert!(p.spin >= -0.1 && p.spin <= 0.1);
    }
}

#[test]
fn start_while_running_is_a_no_op() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    pump(&mut c, &mut surface, 500.0);

    let count = c.particles().len();
    let cycle = c.cycle();
    let pending = c.scheduler().pending();

    assert_eq!(c.start(500.0, &mut surface), StartOutcome::Ignored);
    assert_eq!(c.particles().len(), count);
    assert_eq!(c.cycle(), cycle);
    assert_eq!(c.cycles_started(), 1);
    assert_eq!(c.scheduler().pending(), pending);
}

#[test]
fn frames_draw_particles_until_the_cycle_ends() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    surface.take_ops();

    pump(&mut c, &mut surface, 100.0);
    assert!(c.frames_drawn() >= 5);
    assert!(surface.shapes() > 0);
    // every frame starts from a cleared canvas
    let ops = surface.take_ops();
    assert_eq!(ops.first(), Some(&DrawOp::Clear));
}

#[test]
fn stop_cancels_frames_and_timers() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    pump(&mut c, &mut surface, 1000.0);

    c.stop(&mut surface);
    assert_eq!(c.phase(), Phase::Stopped);
    assert_eq!(c.scheduler().pending(), 0);
    assert!(c.particles().is_empty());
    assert!(!surface.visible);

    let frames = c.frames_drawn();
    surface.take_ops();
    pump(&mut c, &mut surface, 20_000.0);
    assert_eq!(c.frames_drawn(), frames);
    assert_eq!(surface.shapes(), 0);
    assert_eq!(c.cycles_started(), 1);

    // idempotent
    c.stop(&mut surface);
    c.stop(&mut surface);
    assert_eq!(c.phase(), Phase::Stopped);
    assert_eq!(c.scheduler().pending(), 0);
}

#[test]
fn stop_during_cooldown_prevents_the_restart() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    pump(&mut c, &mut surface, 3300.0);
    assert_eq!(c.phase(), Phase::CoolingDown);
    // only the restart timer is left; the hard stop was cancelled with the cycle
    assert_eq!(c.scheduler().pending_timeouts(), 1);
    assert_eq!(c.scheduler().pending_frames(), 0);

    c.stop(&mut surface);
    assert_eq!(c.scheduler().pending(), 0);
    pump(&mut c, &mut surface, 10_000.0);
    assert_eq!(c.cycles_started(), 1);
    assert!(!surface.visible);
}

#[test]
fn cycles_repeat_after_a_short_pause() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);

    pump(&mut c, &mut surface, 3300.0);
    assert_eq!(c.cycles_started(), 1);
    assert!(!surface.visible);

    pump(&mut c, &mut surface, 3500.0);
    assert_eq!(c.cycles_started(), 2);
    assert_eq!(c.phase(), Phase::Running);
    assert!(surface.visible);
    assert_eq!(c.particles().len(), 57);

    pump(&mut c, &mut surface, 7000.0);
    assert!(c.cycles_started() >= 3);
}

#[test]
fn start_during_cooldown_replaces_the_pending_restart() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    pump(&mut c, &mut surface, 3300.0);
    assert_eq!(c.phase(), Phase::CoolingDown);

    assert_eq!(c.start(3300.0, &mut surface), StartOutcome::Started);
    assert_eq!(c.cycles_started(), 2);
    assert_eq!(c.cycle().map(|cy| cy.started_at), Some(3300.0));
    // the old restart timer is gone: one frame plus one hard stop
    assert_eq!(c.scheduler().pending_frames(), 1);
    assert_eq!(c.scheduler().pending_timeouts(), 1);

    pump(&mut c, &mut surface, 3600.0);
    assert_eq!(c.cycles_started(), 2);
}

#[test]
fn hard_stop_hides_the_layer_when_frames_stall() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.scheduler_mut().set_frames_stalled(true);
    c.start(0.0, &mut surface);

    pump(&mut c, &mut surface, 3349.0);
    assert!(surface.visible);
    assert!(!c.particles().is_empty());
    assert_eq!(c.frames_drawn(), 0);

    pump(&mut c, &mut surface, 3350.0);
    assert!(!surface.visible);
    assert!(c.particles().is_empty());
    assert_eq!(c.phase(), Phase::CoolingDown);
}

#[test]
fn layer_is_cleared_by_3350ms_under_frame_jitter() {
    let intervals = [5.0, 48.0, 16.0, 33.0, 7.0, 60.0, 12.0];
    let mut c = make_controller(1024.0, 768.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);

    let mut i = 0;
    while let Some(fired) = c.scheduler_mut().next_due(3350.0) {
        match fired {
            Fired::Frame { id, at } => c.on_frame(id, at, &mut surface),
            Fired::Timeout { id, at } => c.on_timeout(id, at, &mut surface),
        }
        i += 1;
        let ms = intervals[i % intervals.len()];
        c.scheduler_mut().set_frame_interval(ms);
    }
    assert!(!surface.visible);
    assert!(c.particles().is_empty());
    assert_ne!(c.phase(), Phase::Running);
}

#[test]
fn particles_leaving_the_bottom_are_recycled_before_the_end() {
    // A short viewport makes every particle fall out many times per cycle.
    let mut c = make_controller(400.0, 10.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    let count = c.particles().len();
    assert_eq!(count, 29);

    for until in [500.0, 1000.0, 1500.0, 3000.0] {
        pump(&mut c, &mut surface, until);
        assert_eq!(c.particles().len(), count);
        for p in c.particles() {
            assert!(p.alive, "particle died before the cycle ended");
            // anything past the floor (h + 30) is sent back to the top in the same frame
            assert!(p.pos.y <= 40.0);
            assert!(p.vel.x >= -1.0 && p.vel.x <= 1.0);
            assert!(p.vel.y > 0.0 && p.vel.y <= 5.5);
        }
    }
}

#[test]
fn particles_falling_out_after_the_end_are_marked_dead() {
    let mut c = make_controller(400.0, 10.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);

    for _ in 0..200 {
        c.step_particles(4000.0, 3200.0, &mut surface);
    }
    assert!(c.particles().iter().all(|p| !p.alive));

    surface.take_ops();
    c.step_particles(4000.0, 3200.0, &mut surface);
    assert_eq!(surface.shapes(), 0);
}

#[test]
fn viewport_changes_apply_to_the_next_cycle() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    c.set_viewport(Viewport::new(1400.0, 900.0, 2.0));
    pump(&mut c, &mut surface, 1000.0);
    assert_eq!(c.particles().len(), 57);

    pump(&mut c, &mut surface, 3500.0);
    assert_eq!(c.cycles_started(), 2);
    assert_eq!(c.particles().len(), 100);
    assert!(surface
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Fit(v) if v.width == 1400.0)));
}

#[test]
fn stale_task_ids_are_ignored() {
    let mut c = make_controller(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    c.start(0.0, &mut surface);
    let frames = c.frames_drawn();
    c.on_frame(TaskId(9999), 10.0, &mut surface);
    c.on_timeout(TaskId(9999), 10.0, &mut surface);
    assert_eq!(c.frames_drawn(), frames);
    assert_eq!(c.phase(), Phase::Running);
}

#[test]
fn zero_particle_spacing_gives_an_empty_burst() {
    let config = CardConfig::from_json(r#"{"confetti":{"px_per_particle":0}}"#)
        .expect("valid json")
        .confetti;
    assert_eq!(confetti_count(&Viewport::new(800.0, 600.0, 1.0), 0.0), 0);
    assert_eq!(confetti_count(&Viewport::new(800.0, 600.0, 1.0), -3.0), 0);

    let mut c = ConfettiController::new(
        config,
        ManualScheduler::new(FRAME_MS),
        Viewport::new(800.0, 600.0, 1.0),
        3,
    );
    let mut surface = RecordingSurface::new();
    assert_eq!(c.start(0.0, &mut surface), StartOutcome::Started);
    assert!(c.particles().is_empty());
    pump(&mut c, &mut surface, 3300.0);
    assert!(c.particles().is_empty());
    assert!(!surface.visible);

    // the next cycle is empty as well
    pump(&mut c, &mut surface, 3500.0);
    assert_eq!(c.cycles_started(), 2);
    assert!(c.particles().is_empty());
}
