use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use drunk_cats::Position;

use super::camera::Camera;
use super::symbols::RING_DOT;

/// The main field widget that renders the border and the nominal map edges
pub struct FieldWidget<'a> {
    camera: &'a Camera,
    map_size: (f64, f64),
    show_map_edges: bool,
    use_unicode: bool,
}

impl<'a> FieldWidget<'a> {
    pub fn new(camera: &'a Camera, map_size: (f64, f64)) -> Self {
        Self {
            camera,
            map_size,
            show_map_edges: true,
            use_unicode: true,
        }
    }

    pub fn show_map_edges(mut self, show: bool) -> Self {
        self.show_map_edges = show;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

/// Area inside the one-cell border
pub fn inner_area(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }

        let border_style = Style::default().fg(Color::Rgb(40, 40, 50));

        // Top and bottom borders
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char('─').set_style(border_style);
            buf[(x, area.y + area.height - 1)]
                .set_char('─')
                .set_style(border_style);
        }

        // Left and right borders
        for y in area.y..area.y + area.height {
            buf[(area.x, y)].set_char('│').set_style(border_style);
            buf[(area.x + area.width - 1, y)]
                .set_char('│')
                .set_style(border_style);
        }

        // Corners
        buf[(area.x, area.y)].set_char('┌').set_style(border_style);
        buf[(area.x + area.width - 1, area.y)]
            .set_char('┐')
            .set_style(border_style);
        buf[(area.x, area.y + area.height - 1)]
            .set_char('└')
            .set_style(border_style);
        buf[(area.x + area.width - 1, area.y + area.height - 1)]
            .set_char('┘')
            .set_style(border_style);

        if !self.show_map_edges {
            return;
        }

        // Faint outline of the map cats start on; they are free to leave it
        let inner = inner_area(area);
        let edge_style = Style::default().fg(Color::Rgb(50, 50, 60));
        let dot = RING_DOT.render(self.use_unicode);
        let (width, height) = self.map_size;
        let steps = u32::from(inner.width.max(inner.height)) * 2;

        for step in 0..=steps {
            let t = f64::from(step) / f64::from(steps.max(1));
            let edge_points = [
                Position::new(width * t, 0.0),
                Position::new(width * t, height),
                Position::new(0.0, height * t),
                Position::new(width, height * t),
            ];
            for point in edge_points {
                if let Some((x, y)) = self.camera.project(&point, inner) {
                    buf[(x, y)].set_char(dot).set_style(edge_style);
                }
            }
        }
    }
}
