//! Particle Backdrop native demo
//!
//! The browser build is the `cdylib` (see `web`). Natively this runs the
//! field headless against a recording surface and prints frame statistics.
//!
//! Usage: `particle-backdrop [config.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use particle_backdrop::renderer::RecordingSurface;
    use particle_backdrop::{Backdrop, FieldConfig, FieldEvent, Viewport};

    env_logger::init();
    log::info!("Particle Backdrop (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => FieldConfig::load(std::path::Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("{}, using default config", e);
            FieldConfig::default()
        }),
        None => FieldConfig::default(),
    };
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let viewport = Viewport::new(1280.0, 720.0);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut backdrop = Backdrop::init(Some(RecordingSurface::new()), viewport, config, seed);

    let mut edges = 0usize;
    let mut pointer_edges = 0usize;
    for frame in 0..frames {
        // Sweep the pointer across the middle for the first half, then leave
        let event = if frame < frames / 2 {
            let x = viewport.width * frame as f32 / (frames / 2).max(1) as f32;
            FieldEvent::PointerMove(Vec2::new(x, viewport.height / 2.0))
        } else {
            FieldEvent::PointerLeave
        };
        backdrop.dispatch(event);
        if frame == frames / 4 {
            backdrop.dispatch(FieldEvent::Resize(Viewport::new(1024.0, 768.0)));
        }

        if let Some(report) = backdrop.tick(frame as f64 * 1000.0 / 60.0) {
            edges += report.edges;
            pointer_edges += report.pointer_edges;
        }
        if let Some(surface) = backdrop.surface_mut() {
            surface.take();
        }
    }

    let stats = backdrop.stats();
    println!("frames:              {}", stats.frames());
    println!("fps (simulated):     {}", stats.fps());
    println!("edges / frame:       {:.1}", edges as f64 / frames.max(1) as f64);
    println!("pointer edges total: {}", pointer_edges);

    backdrop.dispose();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
