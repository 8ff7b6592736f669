use std::collections::HashMap;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use drunk_cats::{Cat, Mood, Position};

use super::camera::Camera;
use super::colors::{dim_color, MoodColors, MOOD_COLORS};
use super::symbols::{FOLLOW_MARKER, MOOD_SYMBOLS, RING_DOT};

/// Draws every visible cat as a mood-colored glyph.
///
/// When several cats share a cell the most severe mood wins, so fights are
/// never hidden behind calm cats.
pub struct CatsWidget<'a> {
    cats: &'a [Cat],
    camera: &'a Camera,
    colors: &'a MoodColors,
    use_unicode: bool,
}

impl<'a> CatsWidget<'a> {
    pub fn new(cats: &'a [Cat], camera: &'a Camera) -> Self {
        Self {
            cats,
            camera,
            colors: &MOOD_COLORS,
            use_unicode: true,
        }
    }

    pub fn colors(mut self, colors: &'a MoodColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

impl Widget for CatsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut cells: HashMap<(u16, u16), Mood> = HashMap::new();
        for cat in self.cats {
            if let Some(cell) = self.camera.project(&cat.position, area) {
                cells
                    .entry(cell)
                    .and_modify(|mood| mood.escalate(cat.mood))
                    .or_insert(cat.mood);
            }
        }

        for ((x, y), mood) in cells {
            let mut style = Style::default().fg(self.colors.get(mood));
            if mood == Mood::WantsToFight {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf[(x, y)]
                .set_char(MOOD_SYMBOLS.get(mood).render(self.use_unicode))
                .set_style(style);
        }

        let Some(cat) = self.camera.followed().and_then(|id| self.cats.get(id)) else {
            return;
        };
        let Some((x, y)) = self.camera.project(&cat.position, area) else {
            return;
        };

        let marker_style = Style::default()
            .fg(self.colors.get(cat.mood))
            .add_modifier(Modifier::BOLD);
        buf[(x, y)].set_style(marker_style.add_modifier(Modifier::REVERSED));
        if x > area.x {
            buf[(x - 1, y)]
                .set_char(FOLLOW_MARKER.0.render(self.use_unicode))
                .set_style(marker_style);
        }
        if x + 1 < area.x + area.width {
            buf[(x + 1, y)]
                .set_char(FOLLOW_MARKER.1.render(self.use_unicode))
                .set_style(marker_style);
        }
    }
}

/// Fight and hiss radius rings around one cat
pub struct RadiusRings<'a> {
    center: Position,
    fight_radius: f64,
    hiss_radius: f64,
    camera: &'a Camera,
    colors: &'a MoodColors,
    use_unicode: bool,
}

impl<'a> RadiusRings<'a> {
    pub fn new(center: Position, fight_radius: f64, hiss_radius: f64, camera: &'a Camera) -> Self {
        Self {
            center,
            fight_radius,
            hiss_radius,
            camera,
            colors: &MOOD_COLORS,
            use_unicode: true,
        }
    }

    pub fn colors(mut self, colors: &'a MoodColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    fn ring(&self, radius: f64, mood: Mood, area: Rect, buf: &mut Buffer) {
        const SEGMENTS: u32 = 96;
        let style = Style::default().fg(dim_color(self.colors.get(mood), 0.6));
        let dot = RING_DOT.render(self.use_unicode);

        for i in 0..SEGMENTS {
            let angle = f64::from(i) / f64::from(SEGMENTS) * std::f64::consts::TAU;
            let point = Position::new(
                self.center.x + radius * angle.cos(),
                self.center.y + radius * angle.sin(),
            );
            if let Some((x, y)) = self.camera.project(&point, area) {
                // Cats drawn earlier keep their cell
                if buf[(x, y)].symbol() == " " {
                    buf[(x, y)].set_char(dot).set_style(style);
                }
            }
        }
    }
}

impl Widget for RadiusRings<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.ring(self.hiss_radius, Mood::Hisses, area, buf);
        self.ring(self.fight_radius, Mood::WantsToFight, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 10, 10)
    }

    #[test]
    fn test_draws_cats_by_mood() {
        let camera = Camera::new(100.0, 100.0);
        let mut calm = Cat::at(5.0, 5.0);
        calm.mood = Mood::Calm;
        let mut angry = Cat::at(55.0, 55.0);
        angry.mood = Mood::WantsToFight;
        let cats = [calm, angry];

        let mut buf = Buffer::empty(area());
        CatsWidget::new(&cats, &camera)
            .use_unicode(false)
            .render(area(), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), ".");
        assert_eq!(buf[(5, 5)].symbol(), "X");
    }

    #[test]
    fn test_shared_cell_shows_worst_mood() {
        let camera = Camera::new(100.0, 100.0);
        let mut hissing = Cat::at(52.0, 52.0);
        hissing.mood = Mood::Hisses;
        let cats = [Cat::at(51.0, 51.0), hissing, Cat::at(53.0, 53.0)];

        let mut buf = Buffer::empty(area());
        CatsWidget::new(&cats, &camera)
            .use_unicode(false)
            .render(area(), &mut buf);
        assert_eq!(buf[(5, 5)].symbol(), "*");
    }

    #[test]
    fn test_followed_cat_gets_markers() {
        let mut camera = Camera::new(100.0, 100.0);
        camera.follow(0);
        let cats = [Cat::at(55.0, 55.0)];

        let mut buf = Buffer::empty(area());
        CatsWidget::new(&cats, &camera)
            .use_unicode(false)
            .render(area(), &mut buf);
        assert_eq!(buf[(4, 5)].symbol(), "[");
        assert_eq!(buf[(6, 5)].symbol(), "]");
    }

    #[test]
    fn test_rings_leave_cats_alone() {
        let camera = Camera::new(100.0, 100.0);
        let mut angry = Cat::at(75.0, 55.0);
        angry.mood = Mood::WantsToFight;
        let cats = [Cat::at(55.0, 55.0), angry];
        let mut buf = Buffer::empty(area());
        CatsWidget::new(&cats, &camera)
            .use_unicode(false)
            .render(area(), &mut buf);
        RadiusRings::new(cats[0].position, 10.0, 20.0, &camera)
            .use_unicode(false)
            .render(area(), &mut buf);

        // Hiss ring passes through the second cat's cell
        assert_eq!(buf[(7, 5)].symbol(), "X");
        assert_eq!(buf[(5, 7)].symbol(), ".");
        assert_eq!(buf[(5, 5)].symbol(), ".");
    }
}
