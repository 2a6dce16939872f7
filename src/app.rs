use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::animator::{Animator, Viewport, CAT_COUNT, NOTE_COUNT};
use crate::platform;
use crate::render::glyph;
use crate::render::instance::BrickInstance;
use crate::render::pipeline::MAX_INSTANCES;
use crate::render::GpuState;

/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,

    /// The background scene; absent until the window exists.
    scene: Option<Animator>,

    // RNG (shared, deterministic per session)
    rng: fastrand::Rng,

    // Frame timing
    last_frame_time: Option<Instant>,
    frame_stats: FrameStats,

    // Reusable instance buffer (avoid per-frame allocation)
    instance_buf: Vec<BrickInstance>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            scene: None,
            rng: fastrand::Rng::new(),
            last_frame_time: None,
            frame_stats: FrameStats::new(),
            instance_buf: Vec::with_capacity(MAX_INSTANCES),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        // Create a fullscreen-sized borderless window. Start hidden so DWM
        // doesn't cache stale frame state before the overlay styles apply.
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .expect("no monitor found");
        let screen_size = monitor.size();

        let attrs = WindowAttributes::default()
            .with_title("Notefall")
            .with_decorations(false)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(screen_size)
            .with_position(winit::dpi::PhysicalPosition::new(0, 0));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        #[cfg(windows)]
        platform::win32::setup_overlay(&window);

        let size = window.inner_size();
        log::info!(
            "Overlay window created: {}x{} on {:?}",
            size.width,
            size.height,
            monitor.name().unwrap_or_default()
        );

        // Initialize wgpu + pipeline. A host without a usable surface gets
        // no background: log, shut down, raise nothing.
        let Some(gpu) = GpuState::new(window.clone()) else {
            log::warn!("No usable drawing surface; background animation disabled");
            event_loop.exit();
            return;
        };
        self.gpu = Some(gpu);

        // Populate the scene
        let viewport = Viewport::new(size.width as f32, size.height as f32);
        self.scene = Some(Animator::new(viewport, &mut self.rng));
        log::info!(
            "Brick music & cats background initialized: {} notes, {} cats",
            NOTE_COUNT,
            CAT_COUNT,
        );

        // Continuous render loop
        event_loop.set_control_flow(ControlFlow::Poll);

        // Show the window only now that GPU resources and styles are ready.
        window.set_visible(true);

        self.window = Some(window);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Poll ESC (the window is click-through so it can't receive keys)
        #[cfg(windows)]
        if platform::win32::is_escape_pressed() {
            log::info!("ESC pressed, exiting");
            event_loop.exit();
            return;
        }

        // Ask the host for the next frame — the animation never stops while
        // the app is alive.
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if let Some(scene) = &mut self.scene {
                    scene.resize(Viewport::new(
                        new_size.width as f32,
                        new_size.height as f32,
                    ));
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if let Some(last) = self.last_frame_time {
                    self.frame_stats.record_frame(now.duration_since(last).as_secs_f64());
                }
                self.last_frame_time = Some(now);

                let (Some(scene), Some(gpu)) = (&mut self.scene, &mut self.gpu) else {
                    return;
                };

                // One simulation step per presented frame — all sprite
                // speeds are per-frame, not per-second.
                scene.step(&mut self.rng);

                glyph::build_instances(scene, &mut self.instance_buf);
                gpu.update_instances(&self.instance_buf);

                if let Some(mut frame) = gpu.begin_frame() {
                    gpu.draw_bricks(&mut frame.encoder, &frame.view);
                    gpu.finish_frame(frame.encoder, frame.output);
                }
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
