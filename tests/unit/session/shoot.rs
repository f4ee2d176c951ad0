use super::*;
use crate::exec::{RecordingRunner, Step};
use crate::foundation::core::{Resolution, Tick};
use crate::render::DEFAULT_RENDERER;

fn opts(start: u64, end: u64, framerate: u32) -> ShootOpts {
    ShootOpts {
        range: TickRange::new(Tick(start), Tick(end)).unwrap(),
        framerate: Framerate::per_sec(framerate).unwrap(),
        naming: FrameNaming::default(),
        out_dir: PathBuf::from("movie"),
        renderer: RendererOpts {
            program: PathBuf::from(DEFAULT_RENDERER),
            resolution: Resolution::new(60, 40).unwrap(),
            samples: None,
        },
        ffmpeg: PathBuf::from("ffmpeg"),
        playback: Fps::new(1, 24).unwrap(),
        video_path: PathBuf::from("out.mp4"),
        profile: EncodeProfile::default(),
        policy: FailurePolicy::Warn,
        verify_frames: false,
    }
}

#[test]
fn two_tick_shoot_renders_twice_then_encodes_once() {
    let shoot = Shoot::new(opts(3620, 3622, 1)).unwrap();
    let mut runner = RecordingRunner::new();
    let stats = shoot.run(&mut runner).unwrap();

    let cmds = runner.commands();
    assert_eq!(cmds.len(), 3);

    assert_eq!(cmds[0].step, Step::Render);
    assert_eq!(cmds[0].flag_value("-t").as_deref(), Some("3620.0"));
    assert_eq!(cmds[0].flag_value("-f").as_deref(), Some("movie/00000.ppm"));
    assert_eq!(cmds[1].flag_value("-t").as_deref(), Some("3621.0"));
    assert_eq!(cmds[1].flag_value("-f").as_deref(), Some("movie/00001.ppm"));

    assert_eq!(cmds[2].step, Step::Encode);
    assert_eq!(cmds[2].flag_value("-i").as_deref(), Some("movie/%05d.ppm"));
    assert_eq!(cmds[2].flag_value("-r").as_deref(), Some("1/24"));
    assert_eq!(cmds[2].args_lossy().last().map(String::as_str), Some("out.mp4"));

    assert_eq!(
        stats,
        ShootStats {
            frames_total: 2,
            frames_failed: 0,
            frames_missing: 0,
            encoded: true,
        }
    );
}

#[test]
fn renderer_calls_equal_range_length_and_encoder_runs_last() {
    let shoot = Shoot::new(opts(100, 350, 24)).unwrap();
    let mut runner = RecordingRunner::new();
    shoot.run(&mut runner).unwrap();

    let cmds = runner.commands();
    assert_eq!(runner.step(Step::Render).count(), 250);
    assert_eq!(runner.step(Step::Encode).count(), 1);
    assert_eq!(cmds.last().map(|c| c.step), Some(Step::Encode));
    assert!(cmds[..cmds.len() - 1].iter().all(|c| c.step == Step::Render));
}

#[test]
fn timestamps_and_paths_follow_index() {
    let shoot = Shoot::new(opts(7, 107, 3)).unwrap();
    let mut runner = RecordingRunner::new();
    shoot.run(&mut runner).unwrap();

    for (i, cmd) in runner.step(Step::Render).enumerate() {
        let expected_t = (7 + i as u64) as f64 / 3.0;
        let t: f64 = cmd.flag_value("-t").unwrap().parse().unwrap();
        assert_eq!(t, expected_t);
        assert_eq!(cmd.flag_value("-f").unwrap(), format!("movie/{i:05}.ppm"));
    }
}

#[test]
fn commands_preview_matches_what_run_executes() {
    let o = opts(0, 5, 1);
    let planned: Vec<_> = o.commands().collect();
    let mut runner = RecordingRunner::new();
    Shoot::new(o).unwrap().run(&mut runner).unwrap();
    assert_eq!(planned, runner.commands());
}

#[test]
fn warn_policy_counts_failed_frames_and_still_encodes() {
    let shoot = Shoot::new(opts(0, 4, 1)).unwrap();
    let mut runner = RecordingRunner::new().fail_call(1).fail_call(2);
    let stats = shoot.run(&mut runner).unwrap();

    assert_eq!(stats.frames_failed, 2);
    assert!(stats.encoded);
    assert_eq!(runner.commands().len(), 5);
}

#[test]
fn abort_policy_stops_at_first_failed_frame() {
    let mut o = opts(0, 4, 1);
    o.policy = FailurePolicy::Abort;
    let shoot = Shoot::new(o).unwrap();
    let mut runner = RecordingRunner::new().fail_call(1);

    let err = shoot.run(&mut runner).unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
    assert!(err.to_string().contains("frame 1"));
    assert_eq!(runner.commands().len(), 2);
    assert_eq!(runner.step(Step::Encode).count(), 0);
}

#[test]
fn encoder_failure_follows_policy() {
    let mut runner = RecordingRunner::new().fail_call(2);
    let stats = Shoot::new(opts(0, 2, 1)).unwrap().run(&mut runner).unwrap();
    assert!(!stats.encoded);

    let mut o = opts(0, 2, 1);
    o.policy = FailurePolicy::Abort;
    let mut runner = RecordingRunner::new().fail_call(2);
    let err = Shoot::new(o).unwrap().run(&mut runner).unwrap_err();
    assert!(matches!(err, ReelError::Encode(_)));
}

#[test]
fn verify_frames_flags_missing_files() {
    let mut o = opts(0, 3, 1);
    o.out_dir = PathBuf::from("target").join("shoot_unit_missing");
    o.verify_frames = true;
    let _ = std::fs::remove_dir_all(&o.out_dir);

    let mut runner = RecordingRunner::new();
    let stats = Shoot::new(o).unwrap().run(&mut runner).unwrap();
    assert_eq!(stats.frames_missing, 3);
}

#[test]
fn prepare_creates_the_frame_directory() {
    let mut o = opts(0, 1, 1);
    o.out_dir = PathBuf::from("target").join("shoot_unit_prepare").join("frames");
    o.video_path = PathBuf::from("target")
        .join("shoot_unit_prepare")
        .join("video")
        .join("out.mp4");
    let _ = std::fs::remove_dir_all(PathBuf::from("target").join("shoot_unit_prepare"));

    let shoot = Shoot::new(o).unwrap();
    shoot.prepare().unwrap();
    assert!(shoot.opts().out_dir.is_dir());
    assert!(shoot.opts().video_path.parent().unwrap().is_dir());
}

#[test]
fn validation_rejects_empty_range_and_oversized_sequences() {
    assert!(Shoot::new(opts(5, 5, 1)).is_err());
    assert!(Shoot::new(opts(0, 100_001, 1)).is_err());
    assert!(Shoot::new(opts(0, 100_000, 1)).is_ok());

    let mut o = opts(0, 1, 1);
    o.renderer.samples = Some(0);
    assert!(Shoot::new(o).is_err());
}
