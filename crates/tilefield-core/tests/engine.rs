mod common;

use common::RecordingSurface;
use glam::Vec2;
use rand::prelude::*;
use tilefield_core::{BackgroundAnimation, CellPhase, ConfigError, EngineError, Settings, Viewport};

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

fn assert_in_range(anim: &BackgroundAnimation) {
    let grid = anim.grid();
    for i in 0..grid.len() {
        assert!((0.0..=1.0).contains(&grid.heat[i]), "heat[{i}]={}", grid.heat[i]);
        assert!((0.0..=1.0).contains(&grid.target[i]), "target[{i}]={}", grid.target[i]);
        assert!(grid.hold[i] >= 0.0, "hold[{i}]={}", grid.hold[i]);
    }
}

#[derive(Clone, Copy, Debug)]
enum Event {
    Move(Vec2),
    Down(Vec2),
    Frame(f64),
}

fn random_script(seed: u64, len: usize) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut now = 0.0;
    (0..len)
        .map(|_| match rng.gen_range(0..10) {
            0..=3 => {
                let x = rng.gen_range(-50.0..850.0);
                let y = rng.gen_range(-50.0..650.0);
                Event::Move(Vec2::new(x, y))
            }
            4 => Event::Down(Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0))),
            _ => {
                now += rng.gen_range(0.0..120.0);
                Event::Frame(now)
            }
        })
        .collect()
}

fn run(script: &[Event], settings: Settings) -> BackgroundAnimation {
    let mut anim = BackgroundAnimation::new(settings, viewport());
    let mut surface = RecordingSurface::default();
    let mut now = 0.0;
    for ev in script {
        match *ev {
            Event::Move(p) => anim.pointer_move(p),
            Event::Down(p) => anim.pointer_down(p, now),
            Event::Frame(t) => {
                now = t;
                anim.frame(t, &mut surface);
                surface.take_rects();
            }
        }
    }
    anim
}

#[test]
fn values_stay_in_unit_range_under_random_input() {
    for seed in 0..8 {
        let mut anim = BackgroundAnimation::new(Settings::default(), viewport());
        let mut now = 0.0;
        for ev in random_script(seed, 400) {
            match ev {
                Event::Move(p) => anim.pointer_move(p),
                Event::Down(p) => anim.pointer_down(p, now),
                Event::Frame(t) => {
                    now = t;
                    anim.step(t);
                    assert_in_range(&anim);
                }
            }
        }
    }
}

#[test]
fn hot_header_preset_stays_in_unit_range() {
    let settings = tilefield_core::Preset::HeaderDark.settings();
    let anim = run(&random_script(99, 600), settings);
    assert_in_range(&anim);
}

#[test]
fn identical_input_gives_bit_identical_heat() {
    let script = random_script(7, 500);
    let a = run(&script, Settings::default());
    let b = run(&script, Settings::default());
    let bits = |anim: &BackgroundAnimation| -> Vec<u32> {
        anim.grid().heat.iter().map(|h| h.to_bits()).collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.ripples().len(), b.ripples().len());
}

#[test]
fn full_heat_is_gone_after_one_fade_interval_step() {
    let settings = Settings::default();
    let fade_ms = settings.fade_ms as f64;
    let mut anim = BackgroundAnimation::new(settings, viewport());
    anim.grid_mut().heat.fill(1.0);
    anim.step(0.0);
    anim.step(fade_ms);
    assert!(anim.grid().heat.iter().all(|h| *h < 0.01));
}

#[test]
fn frame_paced_decay_follows_the_fade_time_constant() {
    let settings = Settings::default();
    let fade_ms = settings.fade_ms as f64;
    let mut anim = BackgroundAnimation::new(settings, viewport());
    anim.grid_mut().heat.fill(1.0);

    let mut now = 0.0;
    anim.step(now);
    while now < fade_ms {
        now += 16.0;
        anim.step(now);
    }
    // roughly e^-1 after one time constant
    let h = anim.grid().heat[0];
    assert!(h > 0.2 && h < 0.5, "h={h}");

    while now < 5.0 * fade_ms {
        now += 16.0;
        anim.step(now);
    }
    assert!(anim.grid().heat.iter().all(|h| *h < 0.01));
}

#[test]
fn pointer_trail_rises_holds_then_fades_to_idle() {
    let mut anim = BackgroundAnimation::new(Settings::default(), viewport());
    let p = Vec2::new(237.0, 237.0);
    let idx = anim.grid().index(5, 5);
    anim.pointer_move(p);

    let mut now = 0.0;
    anim.step(now);
    let g = anim.grid();
    assert_eq!(CellPhase::of(g.heat[idx], g.target[idx], g.hold[idx]), CellPhase::Rising);

    let mut seen = vec![CellPhase::Rising];
    for _ in 0..200 {
        now += 16.0;
        anim.step(now);
        let g = anim.grid();
        let phase = CellPhase::of(g.heat[idx], g.target[idx], g.hold[idx]);
        if seen.last() != Some(&phase) {
            seen.push(phase);
        }
    }
    assert_eq!(
        seen,
        vec![CellPhase::Rising, CellPhase::Holding, CellPhase::Decaying, CellPhase::Idle]
    );
    assert_eq!(anim.grid().heat[idx], 0.0);
}

#[test]
fn frame_paints_every_tile_and_an_overlay_per_lit_cell() {
    let settings = Settings::default();
    let tile_color = settings.tile_color;
    let glow = settings.illuminate_color;
    let mut anim = BackgroundAnimation::new(settings, viewport());
    let mut surface = RecordingSurface::default();

    anim.pointer_move(Vec2::new(400.0, 300.0));
    let stats = anim.frame(0.0, &mut surface);

    let n = anim.grid().len();
    let base = surface.rects.iter().filter(|(_, c, _)| *c == tile_color).count();
    let overlays: Vec<f32> = surface
        .rects
        .iter()
        .filter(|(_, c, _)| *c == glow)
        .map(|(_, _, a)| *a)
        .collect();
    assert_eq!(base, n);
    assert_eq!(overlays.len(), stats.lit_cells);
    assert!(stats.lit_cells > 0);
    assert!(stats.impulse_cells >= stats.lit_cells);
    assert!(overlays.iter().all(|a| *a > 0.0 && *a <= 0.9));
    assert_eq!(surface.clears.len(), 1);
    assert_eq!(stats.dt_ms, 16.67);
}

#[test]
fn grid_layer_is_rebuilt_only_when_geometry_changes() {
    let mut anim = BackgroundAnimation::new(Settings::default(), viewport());
    let mut surface = RecordingSurface::default();

    assert!(anim.frame(0.0, &mut surface).grid_layer_rebuilt);
    assert!(!anim.frame(16.0, &mut surface).grid_layer_rebuilt);
    assert!(!anim.frame(32.0, &mut surface).grid_layer_rebuilt);
    assert_eq!(surface.layer_rebuilds.len(), 1);
    assert_eq!(surface.blits, 3);

    let (_, lines, style) = surface.layer_rebuilds[0];
    let g = anim.grid();
    assert_eq!(lines, g.cols() + 1 + g.rows() + 1);
    assert_eq!(style.alpha, 0.08);

    assert!(anim.set_viewport(Viewport::new(1200.0, 600.0, 1.0)));
    let stats = anim.frame(48.0, &mut surface);
    assert!(stats.grid_layer_rebuilt);
    assert_eq!(surface.layer_rebuilds.len(), 2);

    // dpr changes the backing store even if the lattice does not
    anim.set_viewport(Viewport::new(1200.0, 600.0, 2.0));
    assert!(anim.frame(64.0, &mut surface).grid_layer_rebuilt);
}

#[test]
fn failed_grid_layer_rebuild_is_retried_next_frame() {
    let mut anim = BackgroundAnimation::new(Settings::default(), viewport());
    let mut surface = RecordingSurface {
        failing_rebuilds: 1,
        ..Default::default()
    };

    assert!(!anim.frame(0.0, &mut surface).grid_layer_rebuilt);
    assert!(surface.layer_rebuilds.is_empty());

    // same geometry, but the layer never got built
    assert!(anim.frame(16.0, &mut surface).grid_layer_rebuilt);
    assert_eq!(surface.layer_rebuilds.len(), 1);
    assert!(!anim.frame(32.0, &mut surface).grid_layer_rebuilt);
    assert_eq!(surface.layer_rebuilds.len(), 1);
}

#[test]
fn resize_discards_heat_and_reset_clears_input() {
    let mut anim = BackgroundAnimation::new(Settings::default(), viewport());
    anim.pointer_move(Vec2::new(400.0, 300.0));
    anim.pointer_down(Vec2::new(400.0, 300.0), 0.0);
    anim.step(0.0);
    assert!(anim.grid().target.iter().any(|t| *t > 0.0));

    assert!(!anim.set_viewport(viewport()));
    assert!(anim.grid().target.iter().any(|t| *t > 0.0));

    assert!(anim.set_viewport(Viewport::new(400.0, 300.0, 1.0)));
    assert!(anim.grid().target.iter().all(|t| *t == 0.0));

    anim.reset();
    assert!(anim.ripples().is_empty());
    assert!(!anim.pointer().moved_this_frame);
}

#[test]
fn construction_reports_config_and_viewport_errors() {
    let json = r#"{ "preset": "header-dark" }"#;
    let anim = BackgroundAnimation::from_json(json, viewport()).unwrap();
    assert_eq!(anim.settings().pitch(), 15.0);
    assert_eq!(anim.grid().cols(), 55);

    assert!(matches!(
        BackgroundAnimation::from_json(r##"{ "bgColor": "#+f+f+f" }"##, viewport()),
        Err(EngineError::Config(ConfigError::InvalidColor { field: "bgColor", .. }))
    ));

    let unbounded = Viewport {
        width: f32::INFINITY,
        height: 600.0,
        dpr: 1.0,
    };
    assert!(matches!(
        BackgroundAnimation::try_new(Settings::default(), unbounded),
        Err(EngineError::InvalidViewport { height, .. }) if height == 600.0
    ));
}
