use super::*;

#[test]
fn draft_preset_reproduces_the_preview_shoot() {
    let opts = Preset::Draft.config().into_opts().unwrap();
    assert_eq!(opts.range, TickRange::new(Tick(3620), Tick(4500)).unwrap());
    assert_eq!(opts.framerate, Framerate::per_sec(1).unwrap());
    assert_eq!(opts.renderer.resolution, Resolution::new(60, 40).unwrap());
    assert_eq!(opts.renderer.samples, None);
    assert_eq!(opts.playback, Fps::new(1, 24).unwrap());
    assert_eq!(opts.out_dir, PathBuf::from("movie"));
    assert_eq!(opts.video_path, PathBuf::from("out.mp4"));
    assert_eq!(opts.policy, FailurePolicy::Warn);
}

#[test]
fn final_preset_scales_ticks_with_framerate() {
    let opts = Preset::Final.config().into_opts().unwrap();
    assert_eq!(opts.range.start, Tick(3620 * 24));
    assert_eq!(opts.range.end, Tick(4500 * 24));
    assert_eq!(opts.framerate, Framerate::per_sec(24).unwrap());
    assert_eq!(opts.renderer.samples, Some(100));
    assert_eq!(opts.playback, Fps::new(24, 1).unwrap());
}

#[test]
fn rates_accept_number_text_and_object_forms() {
    let cfg = ShootConfig::from_reader(
        r#"{ "framerate": 24, "playback": "30000/1001" }"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(
        cfg.framerate.unwrap().to_framerate().unwrap(),
        Framerate::per_sec(24).unwrap()
    );
    assert_eq!(
        cfg.playback.unwrap().to_fps().unwrap(),
        Fps::new(30000, 1001).unwrap()
    );

    let cfg = ShootConfig::from_reader(r#"{ "playback": { "num": 1, "den": 24 } }"#.as_bytes())
        .unwrap();
    assert_eq!(cfg.playback, Some(RateValue::Ratio { num: 1, den: 24 }));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = ShootConfig::from_reader(r#"{ "frame_rate": 24 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn later_layers_win_field_by_field() {
    let file = ShootConfig {
        start: Some(0),
        end: Some(10),
        width: Some(320),
        ..ShootConfig::default()
    };
    let cli = ShootConfig {
        width: Some(640),
        ..ShootConfig::default()
    };
    let opts = ShootConfig::resolve([file, cli]).into_opts().unwrap();
    assert_eq!(opts.range.len_frames(), 10);
    assert_eq!(opts.renderer.resolution, Resolution::new(640, 40).unwrap());
    assert_eq!(opts.playback, Fps::new(1, 24).unwrap());
}

#[test]
fn top_most_preset_selects_the_base() {
    let file = ShootConfig {
        preset: Some(Preset::Draft),
        ..ShootConfig::default()
    };
    let cli = ShootConfig {
        preset: Some(Preset::Final),
        ..ShootConfig::default()
    };
    let opts = ShootConfig::resolve([file, cli]).into_opts().unwrap();
    assert_eq!(opts.renderer.resolution, Resolution::new(1200, 800).unwrap());
}

#[test]
fn playback_is_independent_of_framerate() {
    let cli = ShootConfig {
        framerate: Some(RateValue::Whole(24)),
        start: Some(0),
        end: Some(48),
        playback: Some(RateValue::Whole(12)),
        ..ShootConfig::default()
    };
    let opts = ShootConfig::resolve([cli]).into_opts().unwrap();
    assert_eq!(opts.framerate, Framerate::per_sec(24).unwrap());
    assert_eq!(opts.playback, Fps::new(12, 1).unwrap());
}

#[test]
fn into_opts_rejects_bad_values() {
    let bad = |layer: ShootConfig| ShootConfig::resolve([layer]).into_opts().is_err();

    assert!(bad(ShootConfig {
        start: Some(10),
        end: Some(10),
        ..ShootConfig::default()
    }));
    assert!(bad(ShootConfig {
        framerate: Some(RateValue::Whole(0)),
        ..ShootConfig::default()
    }));
    assert!(bad(ShootConfig {
        width: Some(0),
        ..ShootConfig::default()
    }));
    assert!(bad(ShootConfig {
        samples: Some(0),
        ..ShootConfig::default()
    }));
    assert!(bad(ShootConfig {
        playback: Some(RateValue::Text("fast".to_string())),
        ..ShootConfig::default()
    }));
    assert!(bad(ShootConfig {
        digits: Some(2),
        ..ShootConfig::default()
    }));

    assert!(ShootConfig::default().into_opts().is_err());
}

#[test]
fn from_path_reports_missing_files() {
    let err = ShootConfig::from_path("target/does-not-exist.json").unwrap_err();
    assert!(err.to_string().contains("does-not-exist.json"));
}
