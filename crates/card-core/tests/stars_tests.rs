// Host-side tests for the twinkling star background.

use card_core::*;

fn field(width: f32, height: f32) -> StarField {
    StarField::new(StarFieldConfig::default(), Viewport::new(width, height, 1.0), 3)
}

#[test]
fn star_count_is_one_per_9000_square_pixels() {
    assert_eq!(star_count(&Viewport::new(1920.0, 1080.0, 1.0), 9000.0), 230);
    assert_eq!(star_count(&Viewport::new(390.0, 844.0, 3.0), 9000.0), 37);
    assert_eq!(star_count(&Viewport::new(0.0, 600.0, 1.0), 9000.0), 0);
    assert_eq!(star_count(&Viewport::new(800.0, 600.0, 1.0), 0.0), 0);
}

#[test]
fn device_pixel_ratio_does_not_change_the_count() {
    let a = star_count(&Viewport::new(1280.0, 720.0, 1.0), 9000.0);
    let b = star_count(&Viewport::new(1280.0, 720.0, 2.0), 9000.0);
    assert_eq!(a, b);
}

#[test]
fn generated_stars_stay_inside_their_ranges() {
    let f = field(1200.0, 800.0);
    assert_eq!(f.stars().len(), 107);
    for s in f.stars() {
        assert!(s.pos.x >= 0.0 && s.pos.x <= 1200.0);
        assert!(s.pos.y >= 0.0 && s.pos.y <= 800.0);
        assert!(s.radius >= 0.3 && s.radius <= 1.7);
        assert!(s.base_alpha >= 0.2 && s.base_alpha <= 0.8);
        assert!(s.speed >= 0.008 && s.speed <= 0.026);
        assert!(s.phase >= 0.0 && s.phase <= std::f32::consts::TAU);
    }
}

#[test]
fn resize_to_the_same_viewport_is_idempotent_in_count() {
    let mut f = field(1024.0, 768.0);
    let before = f.stars().len();
    f.resize(Viewport::new(1024.0, 768.0, 1.0));
    f.resize(Viewport::new(1024.0, 768.0, 1.0));
    assert_eq!(f.stars().len(), before);
}

#[test]
fn resize_regenerates_for_the_new_area() {
    let mut f = field(800.0, 600.0);
    assert_eq!(f.stars().len(), 53);
    f.resize(Viewport::new(1600.0, 1200.0, 2.0));
    assert_eq!(f.stars().len(), 213);
    assert_eq!(f.viewport().width, 1600.0);
    assert!(f.stars().iter().any(|s| s.pos.x > 800.0));
}

#[test]
fn tick_clears_then_draws_every_star() {
    let mut f = field(900.0, 500.0);
    let mut surface = RecordingSurface::new();
    f.tick(&mut surface);

    assert_eq!(surface.ops.first(), Some(&DrawOp::Clear));
    assert_eq!(surface.shapes(), f.stars().len());
    for op in &surface.ops[1..] {
        match op {
            DrawOp::Circle { color, .. } => {
                assert_eq!((color.r, color.g, color.b), (255, 182, 206));
                // base alpha in [0.2, 0.8) scaled by a twinkle in [0.2, 1.0]
                assert!(color.a >= 0.0 && color.a <= 0.8);
            }
            other => panic!("unexpected draw op {other:?}"),
        }
    }
}

#[test]
fn tick_advances_every_phase_by_its_speed() {
    let mut f = field(600.0, 600.0);
    let before: Vec<f32> = f.stars().iter().map(|s| s.phase).collect();
    let mut surface = RecordingSurface::new();
    f.tick(&mut surface);
    for (s, p0) in f.stars().iter().zip(before) {
        assert!((s.phase - (p0 + s.speed)).abs() < 1e-5);
    }
}

#[test]
fn twinkle_alpha_follows_the_phase() {
    let s = Star {
        pos: glam::Vec2::ZERO,
        radius: 1.0,
        base_alpha: 0.5,
        phase: std::f32::consts::FRAC_PI_2,
        speed: 0.01,
    };
    assert!((s.alpha(0.6, 0.4) - 0.5).abs() < 1e-6);
    let trough = Star {
        phase: -std::f32::consts::FRAC_PI_2,
        ..s
    };
    assert!((trough.alpha(0.6, 0.4) - 0.1).abs() < 1e-6);
}

#[test]
fn viewport_clamps_the_pixel_ratio() {
    assert_eq!(Viewport::new(10.0, 10.0, 0.5).pixel_ratio(), 1.0);
    assert_eq!(Viewport::new(10.0, 10.0, 1.5).pixel_ratio(), 1.5);
    assert_eq!(Viewport::new(10.0, 10.0, 3.0).pixel_ratio(), 2.0);
    assert_eq!(Viewport::new(10.0, 10.0, f32::NAN).pixel_ratio(), 1.0);

    assert_eq!(Viewport::new(800.0, 600.0, 3.0).backing_size(), (1600, 1200));
    assert_eq!(Viewport::new(0.0, 0.0, 1.0).backing_size(), (1, 1));
}
