//! Proximity graph renderer
//!
//! Full-buffer repaint each frame: clear, particle circles, then for each
//! particle its edges to later particles and to the pointer.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::config::{FieldConfig, LineStyle, Rgba};
use crate::sim::Particle;

/// A 2D drawing target
pub trait Surface {
    /// Erase the whole surface
    fn clear(&mut self);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Stroke a straight segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &LineStyle);
}

/// What one frame drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub circles: usize,
    pub edges: usize,
    pub pointer_edges: usize,
}

/// Draw one frame of the field.
///
/// Pair edges use a strict `distance < max_distance`; pointer edges use
/// `distance < max_distance / 2`. Coincident points still get an edge.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    pointer: Option<Vec2>,
    config: &FieldConfig,
) -> FrameReport {
    let mut report = FrameReport::default();
    let pointer_distance = config.pointer_distance();

    surface.clear();

    for p in particles {
        surface.fill_circle(p.pos, p.size, config.particle_color);
        report.circles += 1;
    }

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            if a.pos.distance(b.pos) < config.max_distance {
                surface.stroke_line(a.pos, b.pos, &config.line);
                report.edges += 1;
            }
        }

        if let Some(pointer) = pointer {
            if a.pos.distance(pointer) < pointer_distance {
                surface.stroke_line(a.pos, pointer, &config.pointer_line);
                report.pointer_edges += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0)
    }

    fn draw(particles: &[Particle], pointer: Option<Vec2>) -> (RecordingSurface, FrameReport) {
        let mut surface = RecordingSurface::new();
        let report = render_frame(&mut surface, particles, pointer, &FieldConfig::default());
        (surface, report)
    }

    #[test]
    fn test_clear_comes_first() {
        let (surface, _) = draw(&[at(1.0, 1.0)], None);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.count_clears(), 1);
    }

    #[test]
    fn test_empty_field_only_clears() {
        let (surface, report) = draw(&[], Some(Vec2::ZERO));
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
        assert_eq!(report, FrameReport::default());
    }

    #[test]
    fn test_edge_threshold_is_exclusive() {
        let (_, report) = draw(&[at(0.0, 0.0), at(150.0, 0.0)], None);
        assert_eq!(report.edges, 0);

        let (_, report) = draw(&[at(0.0, 0.0), at(149.999, 0.0)], None);
        assert_eq!(report.edges, 1);
    }

    #[test]
    fn test_coincident_particles_connect() {
        let (surface, report) = draw(&[at(5.0, 5.0), at(5.0, 5.0)], None);
        assert_eq!(report.edges, 1);
        assert_eq!(surface.lines_with_style(&FieldConfig::default().line).len(), 1);
    }

    #[test]
    fn test_diagonal_distance() {
        // 3-4-5 triangle scaled to 150 exactly
        let (_, report) = draw(&[at(0.0, 0.0), at(90.0, 120.0)], None);
        assert_eq!(report.edges, 0);
        let (_, report) = draw(&[at(0.0, 0.0), at(89.0, 120.0)], None);
        assert_eq!(report.edges, 1);
    }

    #[test]
    fn test_each_pair_drawn_once_no_self_pairs() {
        let particles = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
        let (surface, report) = draw(&particles, None);
        assert_eq!(report.edges, 3);

        let lines = surface.lines_with_style(&FieldConfig::default().line);
        assert_eq!(lines.len(), 3);
        for (from, to) in &lines {
            assert_ne!(from, to, "self pair drawn");
        }
        for (i, (from_a, to_a)) in lines.iter().enumerate() {
            for (from_b, to_b) in &lines[i + 1..] {
                let same = (from_a == from_b && to_a == to_b) || (from_a == to_b && to_a == from_b);
                assert!(!same, "pair drawn twice");
            }
        }
    }

    #[test]
    fn test_edge_set_independent_of_order() {
        let forward = [at(0.0, 0.0), at(100.0, 0.0), at(400.0, 0.0), at(450.0, 10.0)];
        let mut reversed = forward;
        reversed.reverse();

        let normalize = |surface: &RecordingSurface| {
            let mut pairs: Vec<_> = surface
                .lines_with_style(&FieldConfig::default().line)
                .into_iter()
                .map(|(a, b)| {
                    if (a.x, a.y) <= (b.x, b.y) {
                        [a.x, a.y, b.x, b.y]
                    } else {
                        [b.x, b.y, a.x, a.y]
                    }
                })
                .collect();
            pairs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            pairs
        };

        let (a, report_a) = draw(&forward, None);
        let (b, report_b) = draw(&reversed, None);
        assert_eq!(report_a, report_b);
        assert_eq!(report_a.edges, 2);
        assert_eq!(normalize(&a), normalize(&b));
    }

    #[test]
    fn test_pointer_threshold_is_exclusive() {
        let (_, report) = draw(&[at(0.0, 0.0)], Some(Vec2::new(75.0, 0.0)));
        assert_eq!(report.pointer_edges, 0);

        let (surface, report) = draw(&[at(0.0, 0.0)], Some(Vec2::new(74.999, 0.0)));
        assert_eq!(report.pointer_edges, 1);
        let pointer_style = FieldConfig::default().pointer_line;
        assert_eq!(
            surface.lines_with_style(&pointer_style),
            vec![(Vec2::ZERO, Vec2::new(74.999, 0.0))]
        );
    }

    #[test]
    fn test_no_pointer_no_pointer_edges() {
        let (surface, report) = draw(&[at(0.0, 0.0), at(1.0, 1.0)], None);
        assert_eq!(report.pointer_edges, 0);
        assert!(surface.lines_with_style(&FieldConfig::default().pointer_line).is_empty());
    }

    #[test]
    fn test_circles_use_particle_size_and_color() {
        let particles = [
            Particle::new(Vec2::new(3.0, 4.0), Vec2::ZERO, 2.5),
            Particle::new(Vec2::new(500.0, 4.0), Vec2::ZERO, 1.5),
        ];
        let (surface, report) = draw(&particles, None);
        assert_eq!(report.circles, 2);
        let color = FieldConfig::default().particle_color;
        assert_eq!(surface.commands()[1], DrawCommand::Circle { center: Vec2::new(3.0, 4.0), radius: 2.5, color });
        assert_eq!(surface.commands()[2], DrawCommand::Circle { center: Vec2::new(500.0, 4.0), radius: 1.5, color });
    }
}
