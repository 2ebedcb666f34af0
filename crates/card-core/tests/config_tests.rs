// Host-side tests for the page configuration, colors and balloon layout.

use card_core::*;
use rand::prelude::*;

#[test]
fn defaults_match_the_stock_page() {
    let c = CardConfig::default();
    assert_eq!(c.steps.banner, "Happy");
    assert_eq!(c.steps.finale, "Happy Birthday");
    assert_eq!(c.autoplay, AutoplayStrategy::Probe { delay_ms: 100 });
    assert!(!c.replay_enabled);
    assert_eq!(c.music.volume, 0.7);
    assert_eq!(c.confetti.cycle_ms, 3200.0);
    assert_eq!(c.confetti.palette.len(), 5);
    assert_eq!(c.confetti.palette[0], Rgba::rgb(0xff, 0x6f, 0xa5));
    assert_eq!(c.stars.tint, Rgba::rgb(255, 182, 206));
    assert_eq!(c.balloons.count, 24);
    assert_eq!(c.balloons.colors.len(), 6);
    assert_eq!(c.cake.light_delay_ms, 500);
    assert!(c.cake.enabled);
}

#[test]
fn partial_json_only_overrides_named_fields() {
    let json = r##"{
        "steps": { "finale": "Chúc mừng sinh nhật" },
        "autoplay": { "kind": "button_only" },
        "replay_enabled": true,
        "confetti": { "palette": ["#000000", "#ffffff"] }
    }"##;
    let c = CardConfig::from_json(json).expect("valid config");
    assert_eq!(c.steps.finale, "Chúc mừng sinh nhật");
    assert_eq!(c.steps.banner, "Happy");
    assert_eq!(c.autoplay, AutoplayStrategy::ButtonOnly);
    assert!(c.replay_enabled);
    assert_eq!(
        c.confetti.palette,
        vec![Rgba::rgb(0, 0, 0), Rgba::rgb(255, 255, 255)]
    );
    assert_eq!(c.confetti.cycle_ms, 3200.0);
}

#[test]
fn step_list_shape_is_fixed() {
    let json = r#"{"steps": {"banner": "Hi", "extra": "Ignored", "sixth": "Nope"}}"#;
    let c = CardConfig::from_json(json).expect("unknown step keys are ignored");
    assert_eq!(c.steps.banner, "Hi");
    assert_eq!(c.steps.balloons, "Balloons");
    assert_eq!(c.steps.blow_candle, "Blow candle");
    let round_trip = serde_json::to_value(&c.steps).expect("labels serialize");
    assert_eq!(round_trip.as_object().map(|o| o.len()), Some(5));
}

#[test]
fn probe_delay_can_be_tuned() {
    let c = CardConfig::from_json(r#"{"autoplay":{"kind":"probe","delay_ms":250}}"#)
        .expect("valid config");
    assert_eq!(c.autoplay, AutoplayStrategy::Probe { delay_ms: 250 });
    let c = CardConfig::from_json(r#"{"autoplay":{"kind":"immediate"}}"#).expect("valid config");
    assert_eq!(c.autoplay, AutoplayStrategy::Immediate);
}

#[test]
fn invalid_json_falls_back_to_defaults() {
    let c = CardConfig::from_json_or_default("{ not json");
    assert_eq!(c.steps.bring_cake, "Bring cake");
    assert!(matches!(
        CardConfig::from_json("{ not json"),
        Err(CardError::Config(_))
    ));
}

#[test]
fn bad_palette_color_rejects_the_override() {
    let json = r##"{"confetti":{"palette":["#12345"]}}"##;
    assert!(CardConfig::from_json(json).is_err());
    let c = CardConfig::from_json_or_default(json);
    assert_eq!(c.confetti.palette.len(), 5);
}

#[test]
fn colors_parse_and_print() {
    assert_eq!(Rgba::from_hex("#9bd8ff").ok(), Some(Rgba::rgb(0x9b, 0xd8, 0xff)));
    assert_eq!(Rgba::from_hex("7be3b0").ok(), Some(Rgba::rgb(0x7b, 0xe3, 0xb0)));
    assert!(matches!(Rgba::from_hex("#ggg000"), Err(CardError::InvalidColor(_))));
    assert!(Rgba::from_hex("#fff").is_err());
    assert!(Rgba::from_hex("#ffé00").is_err());
    assert!(Rgba::from_hex("#+1+2+3").is_err());
    assert!(Rgba::from_hex("-1ffff").is_err());

    let c = Rgba::rgb(255, 182, 206).with_alpha(0.25);
    assert_eq!(c.to_css(), "rgba(255, 182, 206, 0.250)");
    assert_eq!(Rgba::rgb(1, 2, 3).with_alpha(4.0).a, 1.0);
    assert_eq!(String::from(Rgba::from_u32(0xffeb3b)), "#ffeb3b");
    assert_eq!(serde_json::to_string(&Rgba::rgb(255, 0, 16)).ok().as_deref(), Some("\"#ff0010\""));
}

#[test]
fn cake_canvas_is_bounded_by_cap_container_and_window() {
    let cfg = CakeConfig::default();
    assert_eq!(cake_canvas_size(&cfg, 1200.0, 1920.0), 450.0);
    assert_eq!(cake_canvas_size(&cfg, 320.0, 1920.0), 320.0);
    assert_eq!(cake_canvas_size(&cfg, 1200.0, 400.0), 360.0);
    assert_eq!(cake_canvas_size(&cfg, 0.0, 0.0), 1.0);
}

#[test]
fn balloon_layout_cycles_colors_and_stays_in_range() {
    let cfg = BalloonConfig::default();
    let mut rng = StdRng::seed_from_u64(11);
    let balloons = balloon_layout(&cfg, &mut rng);
    assert_eq!(balloons.len(), 24);
    for (i, b) in balloons.iter().enumerate() {
        assert_eq!(b.color_class, cfg.colors[i % 6]);
        assert!(b.x_vw >= -45.0 && b.x_vw <= 45.0);
        assert!(b.scale >= 0.8 && b.scale <= 1.6);
        assert!(b.duration_s >= 7.0 && b.duration_s <= 13.0);
        assert!(b.delay_s >= 0.0 && b.delay_s <= 2.0);
    }
    assert_eq!(balloons[6].color_class, "red");
    assert_eq!(balloons[23].color_class, "orange");
}

#[test]
fn balloon_layout_without_colors_is_empty() {
    let cfg = BalloonConfig {
        colors: Vec::new(),
        ..BalloonConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    assert!(balloon_layout(&cfg, &mut rng).is_empty());
}
