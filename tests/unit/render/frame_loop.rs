use super::*;
use crate::render::sink::InMemorySink;
use crate::render::stage::{LensSpec, TextSpec};

fn size(w: f64, h: f64, scale: f64) -> SurfaceSize {
    SurfaceSize::new(w, h, scale).unwrap()
}

fn spec(text: &str) -> SceneSpec {
    SceneSpec {
        text: TextSpec {
            content: text.to_owned(),
            color: [255, 255, 255, 255],
            size_px: 32.0,
            line_spacing: 1.1,
            glow: None,
        },
        lens: None,
    }
}

fn garbage_font_loop() -> FrameLoop {
    FrameLoop::new(
        Arc::new(vec![0u8; 8]),
        size(100.0, 50.0, 1.0),
        Box::new(InMemorySink::new()),
    )
    .unwrap()
}

#[test]
fn surface_size_validation() {
    assert!(SurfaceSize::new(800.0, 600.0, 1.0).is_ok());
    assert!(SurfaceSize::new(0.0, 600.0, 1.0).is_err());
    assert!(SurfaceSize::new(800.0, f64::NAN, 1.0).is_err());
    assert!(SurfaceSize::new(800.0, 600.0, 0.0).is_err());
}

#[test]
fn surface_size_applies_device_pixel_ratio() {
    let c = size(800.0, 600.0, 2.0).to_canvas();
    assert_eq!(
        c,
        Canvas {
            width: 1600,
            height: 1200
        }
    );

    // Fractional scales round rather than truncate.
    let c = size(100.0, 100.0, 1.5).to_canvas();
    assert_eq!(c.width, 150);
}

#[test]
fn render_without_scene_is_a_noop() {
    let mut fl = garbage_font_loop();
    fl.render(0.0).unwrap();
    assert!(fl.is_running());
    assert_eq!(fl.frames_presented(), 0);
}

#[test]
fn rasterization_failure_stops_loop_silently() {
    let mut fl = garbage_font_loop();
    fl.configure(&spec("HELLO")).unwrap();

    // Garbage font bytes: the rasterizer fails, the loop stops, nothing is
    // presented, and no error surfaces to the caller.
    fl.render(0.0).unwrap();
    assert!(!fl.is_running());
    assert_eq!(fl.frames_presented(), 0);

    // Further renders stay no-ops.
    fl.render(1.0).unwrap();
    assert_eq!(fl.frames_presented(), 0);
}

#[test]
fn cached_scene_presents_without_rerasterizing() {
    let mut fl = garbage_font_loop();
    fl.configure(&spec("HELLO")).unwrap();

    // Inject a pre-rasterized scene matching the surface; the loop must not
    // touch the (broken) rasterizer as long as nothing changed.
    let canvas = fl.size.to_canvas();
    fl.source = Raster::new(canvas.width, canvas.height);
    fl.scene_dirty = false;

    fl.render(0.0).unwrap();
    fl.render(0.1).unwrap();
    assert!(fl.is_running());
    assert_eq!(fl.frames_presented(), 2);
}

#[test]
fn lens_motion_does_not_rerasterize() {
    let mut fl = garbage_font_loop();
    let mut s = spec("HELLO");
    s.lens = Some(LensSpec {
        intensity: 2.5,
        radius: LensRadius::Px(20.0),
        driver: DriverSpec::Sine,
    });
    fl.configure(&s).unwrap();

    let canvas = fl.size.to_canvas();
    fl.source = Raster::new(canvas.width, canvas.height);
    fl.scene_dirty = false;

    for i in 0..5 {
        fl.render(f64::from(i) * 0.016).unwrap();
    }
    assert!(fl.is_running());
    assert_eq!(fl.frames_presented(), 5);
}

#[test]
fn reconfiguring_equal_spec_keeps_scene_clean() {
    let mut fl = garbage_font_loop();
    fl.configure(&spec("HELLO")).unwrap();
    fl.scene_dirty = false;
    fl.configure(&spec("HELLO")).unwrap();
    assert!(!fl.scene_dirty);

    fl.configure(&spec("CHANGED")).unwrap();
    assert!(fl.scene_dirty);
}

#[test]
fn lens_only_change_keeps_scene_clean() {
    let mut fl = garbage_font_loop();
    let mut s = spec("HELLO");
    fl.configure(&s).unwrap();
    fl.scene_dirty = false;

    s.lens = Some(LensSpec {
        intensity: 2.0,
        radius: LensRadius::HalfDiagonal,
        driver: DriverSpec::Center,
    });
    fl.configure(&s).unwrap();
    assert!(!fl.scene_dirty);
    assert!(fl.driver.is_some());
}

#[test]
fn stale_size_buffer_is_never_presented() {
    let mut fl = garbage_font_loop();
    fl.configure(&spec("HELLO")).unwrap();

    // Scene cached at the old surface size.
    let canvas = fl.size.to_canvas();
    fl.source = Raster::new(canvas.width, canvas.height);
    fl.scene_dirty = false;

    // Resize: the cached raster no longer matches, the loop must rebuild (and
    // with a broken rasterizer, stop) rather than present the stale buffer.
    fl.resize(size(300.0, 200.0, 1.0)).unwrap();
    fl.render(0.0).unwrap();
    assert!(!fl.is_running());
    assert_eq!(fl.frames_presented(), 0);
}

#[test]
fn presented_frame_matches_latest_resize() {
    let mut fl = garbage_font_loop();
    fl.configure(&spec("HELLO")).unwrap();

    fl.resize(size(120.0, 80.0, 1.0)).unwrap();
    fl.resize(size(64.0, 32.0, 1.0)).unwrap();
    let canvas = fl.size.to_canvas();
    assert_eq!(canvas, Canvas { width: 64, height: 32 });
    fl.source = Raster::new(canvas.width, canvas.height);
    fl.scene_dirty = false;

    fl.render(0.0).unwrap();
    assert_eq!(fl.frames_presented(), 1);
    assert_eq!(fl.dest.width(), 0); // no lens: presented straight from source
}

#[test]
fn clear_detaches_scene_on_unmount() {
    let mut fl = garbage_font_loop();
    fl.configure(&spec("HELLO")).unwrap();
    let canvas = fl.size.to_canvas();
    fl.source = Raster::new(canvas.width, canvas.height);
    fl.scene_dirty = false;

    fl.clear().unwrap();
    fl.render(0.0).unwrap();
    assert_eq!(fl.frames_presented(), 0);
    assert!(fl.is_running());
}

#[test]
fn finish_is_idempotent() {
    let mut fl = FrameLoop::new(
        Arc::new(vec![0u8; 8]),
        size(100.0, 50.0, 1.0),
        Box::new(crate::render::sink::NullSink),
    )
    .unwrap();
    fl.finish().unwrap();
    fl.finish().unwrap();
    assert!(!fl.is_running());
}
