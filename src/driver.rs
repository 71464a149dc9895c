//! Frame driver and the backdrop component
//!
//! `Backdrop` is constructed once per mount (`init`) and torn down once per
//! unmount (`dispose`). The platform layer owns the actual frame scheduling:
//! it reports the id of each requested frame via `set_pending_frame` and
//! cancels whatever `dispose` hands back.

use crate::config::FieldConfig;
use crate::renderer::{FrameReport, Surface, render_frame};
use crate::sim::{EventQueue, FieldEvent, ParticleField, Viewport};

/// Frames between periodic stats log lines
const STATS_LOG_INTERVAL: u64 = 600;

/// Run state of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Before mount, after dispose, or mounted without a drawing context
    #[default]
    Stopped,
    /// Ticking once per display refresh
    Running,
}

/// Frame counter and rolling FPS estimate
#[derive(Debug, Clone)]
pub struct FrameStats {
    frames: u64,
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
    last: FrameReport,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frames: 0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            last: FrameReport::default(),
        }
    }
}

impl FrameStats {
    /// Record a finished frame at `time` (milliseconds)
    pub fn record(&mut self, time: f64, report: FrameReport) {
        self.frames += 1;
        self.last = report;

        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest slot is the one we'll overwrite next; the window spans
        // len - 1 frame intervals
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn last_report(&self) -> FrameReport {
        self.last
    }
}

/// Loop state machine plus the pending frame request
#[derive(Debug, Default)]
pub struct FrameDriver {
    state: DriverState,
    pending: Option<i32>,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn start(&mut self) {
        self.state = DriverState::Running;
    }

    /// Stop and return the pending request id, which the caller must cancel
    pub fn stop(&mut self) -> Option<i32> {
        self.state = DriverState::Stopped;
        self.pending.take()
    }

    /// Remember the id of the next scheduled frame. Ignored once stopped.
    pub fn set_pending(&mut self, id: i32) {
        if self.is_running() {
            self.pending = Some(id);
        }
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn record(&mut self, time: f64, report: FrameReport) {
        // The request that produced this frame has fired
        self.pending = None;
        self.stats.record(time, report);
    }
}

/// The particle background component: field, surface, event queue and loop
pub struct Backdrop<S: Surface> {
    field: ParticleField,
    surface: Option<S>,
    queue: EventQueue,
    driver: FrameDriver,
}

impl<S: Surface> Backdrop<S> {
    /// Mount the component.
    ///
    /// Without a surface (no drawing context yet) nothing is seeded and the
    /// driver stays stopped.
    pub fn init(surface: Option<S>, viewport: Viewport, config: FieldConfig, rng_seed: u64) -> Self {
        let mut backdrop = Self {
            field: ParticleField::new(viewport, config, rng_seed),
            surface,
            queue: EventQueue::new(),
            driver: FrameDriver::new(),
        };

        if backdrop.surface.is_some() {
            backdrop.field.reseed();
            backdrop.driver.start();
            log::info!(
                "Particle backdrop mounted ({}x{}, seed {})",
                viewport.width,
                viewport.height,
                rng_seed
            );
        } else {
            log::warn!("No drawing context available, particle backdrop not started");
        }

        backdrop
    }

    /// Mount with an explicit population instead of a random seed
    pub fn with_field(surface: S, field: ParticleField) -> Self {
        let mut driver = FrameDriver::new();
        driver.start();
        Self {
            field,
            surface: Some(surface),
            queue: EventQueue::new(),
            driver,
        }
    }

    /// Queue a host event for the next tick. Returns `false` (event dropped)
    /// when the backdrop is not running.
    pub fn dispatch(&mut self, event: FieldEvent) -> bool {
        if !self.driver.is_running() {
            log::trace!("Dropping {:?}, backdrop stopped", event);
            return false;
        }
        self.queue.push(event);
        true
    }

    /// Run one frame: apply queued events, step every particle, then draw.
    ///
    /// `time` is the frame timestamp in milliseconds. Returns `None` when
    /// stopped.
    pub fn tick(&mut self, time: f64) -> Option<FrameReport> {
        if !self.driver.is_running() {
            return None;
        }
        let surface = self.surface.as_mut()?;

        for event in self.queue.drain() {
            self.field.apply(event);
        }
        self.field.advance();
        let report = render_frame(surface, self.field.particles(), self.field.pointer(), self.field.config());

        self.driver.record(time, report);
        let stats = self.driver.stats();
        if stats.frames() % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "Frame {}: {} fps, {} edges, {} pointer edges",
                stats.frames(),
                stats.fps(),
                report.edges,
                report.pointer_edges
            );
        }

        Some(report)
    }

    /// Record the id of the next requested frame
    pub fn set_pending_frame(&mut self, id: i32) {
        self.driver.set_pending(id);
    }

    /// Unmount: stop the loop, drop queued events, particles and pointer.
    ///
    /// Returns the pending frame request, which the caller must cancel.
    pub fn dispose(&mut self) -> Option<i32> {
        if !self.driver.is_running() {
            return None;
        }
        self.queue.clear();
        self.field.clear();
        let pending = self.driver.stop();
        log::info!("Particle backdrop disposed after {} frames", self.driver.stats().frames());
        pending
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn stats(&self) -> &FrameStats {
        self.driver.stats()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::Particle;
    use glam::Vec2;

    fn running() -> Backdrop<RecordingSurface> {
        Backdrop::init(
            Some(RecordingSurface::new()),
            Viewport::new(800.0, 600.0),
            FieldConfig::default(),
            12345,
        )
    }

    #[test]
    fn test_init_seeds_and_runs() {
        let backdrop = running();
        assert_eq!(backdrop.state(), DriverState::Running);
        assert_eq!(backdrop.field().particles().len(), 100);
    }

    #[test]
    fn test_init_without_surface_stays_stopped() {
        let mut backdrop: Backdrop<RecordingSurface> =
            Backdrop::init(None, Viewport::new(800.0, 600.0), FieldConfig::default(), 1);
        assert_eq!(backdrop.state(), DriverState::Stopped);
        assert!(backdrop.field().particles().is_empty());
        assert!(backdrop.tick(16.0).is_none());
        assert!(!backdrop.dispatch(FieldEvent::PointerLeave));
        assert_eq!(backdrop.dispose(), None);
    }

    #[test]
    fn test_tick_draws_full_frame() {
        let mut backdrop = running();
        let report = backdrop.tick(16.0).unwrap();
        assert_eq!(report.circles, 100);
        let surface = backdrop.surface().unwrap();
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.count_circles(), 100);
        assert_eq!(backdrop.stats().frames(), 1);
    }

    #[test]
    fn test_events_wait_for_next_tick() {
        let mut backdrop = running();
        assert!(backdrop.dispatch(FieldEvent::PointerMove(Vec2::new(5.0, 5.0))));
        assert_eq!(backdrop.field().pointer(), None);
        assert_eq!(backdrop.pending_events(), 1);

        backdrop.tick(16.0);
        assert_eq!(backdrop.field().pointer(), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(backdrop.pending_events(), 0);
    }

    #[test]
    fn test_events_apply_in_order() {
        let mut backdrop = running();
        backdrop.dispatch(FieldEvent::PointerMove(Vec2::new(5.0, 5.0)));
        backdrop.dispatch(FieldEvent::PointerLeave);
        backdrop.tick(16.0);
        assert_eq!(backdrop.field().pointer(), None);
    }

    #[test]
    fn test_resize_reseeds_and_keeps_running() {
        let mut backdrop = running();
        backdrop.tick(16.0);
        let before = backdrop.field().particles().to_vec();

        backdrop.dispatch(FieldEvent::Resize(Viewport::new(300.0, 200.0)));
        let report = backdrop.tick(32.0).unwrap();
        assert!(backdrop.is_running());
        assert_eq!(report.circles, 100);
        assert_eq!(backdrop.field().viewport(), Viewport::new(300.0, 200.0));
        assert_ne!(backdrop.field().particles(), before.as_slice());
    }

    #[test]
    fn test_render_sees_stepped_positions() {
        let particle = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(0.25, 0.25), 2.0);
        let field =
            ParticleField::with_particles(Viewport::new(100.0, 100.0), FieldConfig::default(), vec![particle]);
        let mut backdrop = Backdrop::with_field(RecordingSurface::new(), field);
        backdrop.tick(16.0);

        let circle = backdrop.surface().unwrap().commands()[1];
        match circle {
            DrawCommand::Circle { center, .. } => assert_eq!(center, Vec2::new(10.25, 10.25)),
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_dispose_returns_pending_frame() {
        let mut backdrop = running();
        backdrop.set_pending_frame(7);
        assert_eq!(backdrop.dispose(), Some(7));
        assert_eq!(backdrop.state(), DriverState::Stopped);
        assert!(backdrop.field().particles().is_empty());

        // Second dispose is a no-op
        assert_eq!(backdrop.dispose(), None);
    }

    #[test]
    fn test_tick_consumes_pending_frame() {
        let mut backdrop = running();
        backdrop.set_pending_frame(3);
        backdrop.tick(16.0);
        assert_eq!(backdrop.dispose(), None);
    }

    #[test]
    fn test_pending_ignored_after_stop() {
        let mut driver = FrameDriver::new();
        driver.start();
        driver.set_pending(1);
        assert_eq!(driver.stop(), Some(1));
        driver.set_pending(2);
        assert_eq!(driver.pending(), None);
    }

    #[test]
    fn test_dispose_drops_queued_events() {
        let mut backdrop = running();
        backdrop.dispatch(FieldEvent::Resize(Viewport::new(10.0, 10.0)));
        backdrop.dispose();
        assert_eq!(backdrop.pending_events(), 0);
        assert!(backdrop.tick(16.0).is_none());
        assert!(backdrop.field().particles().is_empty());
    }

    #[test]
    fn test_fps_estimate() {
        let mut stats = FrameStats::default();
        for i in 1..=61 {
            stats.record(i as f64 * 1000.0 / 60.0, FrameReport::default());
        }
        assert_eq!(stats.frames(), 61);
        assert_eq!(stats.fps(), 60);
    }
}
