//! Projection of passage matrices into engine bodies
//!
//! World coordinates have the origin at the top-left corner of the play area
//! with y growing downward, matching the browser canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::passages::Passages;
use crate::consts::*;
use crate::engine::{BodySpec, Label};

/// Size of one grid cell in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Cell size that tiles a `width` x `height` area with the given grid
    pub fn fit(width: f32, height: f32, rows: usize, cols: usize) -> Self {
        Self::new(width / cols as f32, height / rows as f32)
    }
}

/// Fill colors, `None` leaves the engine default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub wall: Option<String>,
    pub goal: Option<String>,
    pub ball: Option<String>,
}

/// Geometry and styling knobs for projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionStyle {
    pub wall_thickness: f32,
    pub boundary_thickness: f32,
    pub wall_group: i32,
    pub palette: Palette,
}

impl Default for ProjectionStyle {
    fn default() -> Self {
        Self {
            wall_thickness: WALL_THICKNESS,
            boundary_thickness: BOUNDARY_THICKNESS,
            wall_group: WALL_GROUP,
            palette: Palette::default(),
        }
    }
}

/// Static geometry handed to the engine at setup
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Interior walls (horizontals, then verticals, row-major) then the
    /// top, bottom, left and right boundaries
    pub walls: Vec<BodySpec>,
    pub goal: BodySpec,
    pub ball: BodySpec,
}

impl Layout {
    /// Number of interior walls (excludes the 4 boundaries)
    pub fn interior_wall_count(&self) -> usize {
        self.walls.len() - 4
    }

    /// Walls, goal, ball in registration order
    pub fn bodies(&self) -> impl Iterator<Item = &BodySpec> {
        self.walls.iter().chain([&self.goal, &self.ball])
    }
}

pub fn project(passages: &Passages, cell: CellSize, style: &ProjectionStyle) -> Layout {
    let CellSize {
        width: cw,
        height: ch,
    } = cell;
    let total_w = cw * passages.cols() as f32;
    let total_h = ch * passages.rows() as f32;
    let wall_fill = style.palette.wall.as_deref();

    let wall = |center: Vec2, width: f32, height: f32| {
        BodySpec::rectangle(center, width, height, Label::Wall)
            .with_static(true)
            .with_group(style.wall_group)
            .with_fill(wall_fill)
    };

    let mut walls = Vec::with_capacity(passages.closed_count() + 4);

    for (row, line) in passages.horizontals().iter().enumerate() {
        for (col, &open) in line.iter().enumerate() {
            if open {
                continue;
            }
            let center = Vec2::new(col as f32 * cw + cw / 2.0, row as f32 * ch + ch);
            walls.push(wall(center, cw, style.wall_thickness));
        }
    }

    for (row, line) in passages.verticals().iter().enumerate() {
        for (col, &open) in line.iter().enumerate() {
            if open {
                continue;
            }
            let center = Vec2::new(col as f32 * cw + cw, row as f32 * ch + ch / 2.0);
            walls.push(wall(center, style.wall_thickness, ch));
        }
    }

    let t = style.boundary_thickness;
    walls.push(wall(Vec2::new(total_w / 2.0, 0.0), total_w, t));
    walls.push(wall(Vec2::new(total_w / 2.0, total_h), total_w, t));
    walls.push(wall(Vec2::new(0.0, total_h / 2.0), t, total_h));
    walls.push(wall(Vec2::new(total_w, total_h / 2.0), t, total_h));

    let goal = BodySpec::rectangle(
        Vec2::new(total_w - cw / 2.0, total_h - ch / 2.0),
        cw * GOAL_SCALE,
        ch * GOAL_SCALE,
        Label::Goal,
    )
    .with_static(true)
    .with_fill(style.palette.goal.as_deref());

    let ball = BodySpec::circle(
        Vec2::new(cw / 2.0, ch / 2.0),
        cw.min(ch) * BALL_RADIUS_SCALE,
        Label::Ball,
    )
    .with_fill(style.palette.ball.as_deref());

    Layout { walls, goal, ball }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Shape;
    use crate::maze::{Direction, generate};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 0.001
    }

    #[test]
    fn test_closed_2x2_positions() {
        let p = Passages::new(2, 2).unwrap();
        let layout = project(&p, CellSize::new(100.0, 50.0), &ProjectionStyle::default());

        // 2 horizontal + 2 vertical + 4 boundary
        assert_eq!(layout.walls.len(), 8);

        let h0 = &layout.walls[0];
        assert!(approx(h0.center, Vec2::new(50.0, 50.0)));
        assert_eq!(h0.shape, Shape::Rectangle { width: 100.0, height: WALL_THICKNESS });

        let h1 = &layout.walls[1];
        assert!(approx(h1.center, Vec2::new(150.0, 50.0)));

        let v0 = &layout.walls[2];
        assert!(approx(v0.center, Vec2::new(100.0, 25.0)));
        assert_eq!(v0.shape, Shape::Rectangle { width: WALL_THICKNESS, height: 50.0 });

        let v1 = &layout.walls[3];
        assert!(approx(v1.center, Vec2::new(100.0, 75.0)));
    }

    #[test]
    fn test_boundaries_span_play_area() {
        let p = Passages::new(3, 4).unwrap();
        let layout = project(&p, CellSize::new(10.0, 20.0), &ProjectionStyle::default());
        let n = layout.walls.len();
        let [top, bottom, left, right] = &layout.walls[n - 4..] else {
            panic!("expected four boundary walls");
        };

        assert!(approx(top.center, Vec2::new(20.0, 0.0)));
        assert_eq!(top.shape, Shape::Rectangle { width: 40.0, height: BOUNDARY_THICKNESS });
        assert!(approx(bottom.center, Vec2::new(20.0, 60.0)));
        assert!(approx(left.center, Vec2::new(0.0, 30.0)));
        assert_eq!(left.shape, Shape::Rectangle { width: BOUNDARY_THICKNESS, height: 60.0 });
        assert!(approx(right.center, Vec2::new(40.0, 30.0)));
    }

    #[test]
    fn test_open_passages_emit_no_wall() {
        let mut p = Passages::new(1, 2).unwrap();
        p.open((0, 0), Direction::Right);
        let layout = project(&p, CellSize::new(10.0, 10.0), &ProjectionStyle::default());
        assert_eq!(layout.interior_wall_count(), 0);
        assert_eq!(layout.walls.len(), 4);
    }

    #[test]
    fn test_goal_and_ball() {
        let p = Passages::new(15, 20).unwrap();
        let layout = project(&p, CellSize::new(30.0, 40.0), &ProjectionStyle::default());

        assert!(approx(layout.goal.center, Vec2::new(600.0 - 15.0, 600.0 - 20.0)));
        let Shape::Rectangle { width, height } = layout.goal.shape else {
            panic!("goal should be a rectangle");
        };
        assert!((width - 21.0).abs() < 0.001);
        assert!((height - 28.0).abs() < 0.001);
        assert!(layout.goal.is_static);
        assert_eq!(layout.goal.label, Label::Goal);
        assert_eq!(layout.goal.collision_group, None);

        assert!(approx(layout.ball.center, Vec2::new(15.0, 20.0)));
        assert_eq!(layout.ball.shape, Shape::Circle { radius: 7.5 });
        assert!(!layout.ball.is_static);
        assert_eq!(layout.ball.label, Label::Ball);
    }

    #[test]
    fn test_walls_share_group_and_are_static() {
        let maze = generate(6, 6, &mut Pcg32::seed_from_u64(5)).unwrap();
        let style = ProjectionStyle {
            wall_group: 7,
            ..Default::default()
        };
        let layout = project(&maze, CellSize::new(100.0, 100.0), &style);
        for wall in &layout.walls {
            assert!(wall.is_static);
            assert_eq!(wall.label, Label::Wall);
            assert_eq!(wall.collision_group, Some(7));
        }
        assert_eq!(layout.bodies().filter(|b| !b.is_static).count(), 1);
    }

    #[test]
    fn test_interior_wall_count() {
        for (rows, cols, seed) in [(6, 6, 1), (15, 20, 2), (1, 9, 3), (9, 1, 4)] {
            let maze = generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            let layout = project(&maze, CellSize::new(10.0, 10.0), &ProjectionStyle::default());
            let expected = (rows - 1) * cols + rows * (cols - 1) - (rows * cols - 1);
            assert_eq!(layout.interior_wall_count(), expected);
        }
    }

    #[test]
    fn test_projection_is_pure() {
        let maze = generate(10, 12, &mut Pcg32::seed_from_u64(77)).unwrap();
        let cell = CellSize::fit(600.0, 500.0, 10, 12);
        let style = ProjectionStyle::default();
        assert_eq!(project(&maze, cell, &style), project(&maze, cell, &style));
    }

    #[test]
    fn test_palette_applied() {
        let p = Passages::new(2, 2).unwrap();
        let style = ProjectionStyle {
            palette: Palette {
                wall: Some("rgb(130, 28, 148)".into()),
                goal: None,
                ball: Some("rgb(245, 200, 66)".into()),
            },
            ..Default::default()
        };
        let layout = project(&p, CellSize::new(10.0, 10.0), &style);
        assert_eq!(layout.walls[0].render.as_ref().map(|r| r.fill.as_str()), Some("rgb(130, 28, 148)"));
        assert_eq!(layout.goal.render, None);
        assert!(layout.ball.render.is_some());
    }
}
