use glam::Vec2;

use super::{Canvas, Color, TextAlign};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Color,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokeLines {
        segments: Vec<(Vec2, Vec2)>,
        line_width: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        align: TextAlign,
        color: Color,
    },
}

/// A canvas that records instead of painting (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of filled circles drawn in exactly `color`
    pub fn circles_of(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::FillCircle { color: c, .. } if *c == color))
            .count()
    }
}

impl Canvas for DisplayList {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.commands.clear();
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCmd::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCmd::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.commands.push(DrawCmd::StrokeCircle {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCmd::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_lines(&mut self, segments: &[(Vec2, Vec2)], line_width: f32, color: Color) {
        self.commands.push(DrawCmd::StrokeLines {
            segments: segments.to_vec(),
            line_width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            size_px,
            align,
            color,
        });
    }
}
