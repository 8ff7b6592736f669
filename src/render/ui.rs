use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use drunk_cats::{IndexKind, MoodCounts};

use super::colors::{MoodColors, MOOD_COLORS};
use super::DisplayMode;

/// Write `text` starting at `x`, stopping before `limit`; returns the next free column
fn put_text(buf: &mut Buffer, mut x: u16, y: u16, text: &str, style: Style, limit: u16) -> u16 {
    for ch in text.chars() {
        if x >= limit {
            break;
        }
        buf[(x, y)].set_char(ch).set_style(style);
        x += 1;
    }
    x
}

/// Status bar at the bottom of the screen
pub struct StatusBar<'a> {
    counts: MoodCounts,
    tick: u64,
    paused: bool,
    speed_factor: f64,
    fps: u32,
    display_mode: DisplayMode,
    followed: Option<usize>,
    index: Option<(IndexKind, IndexKind)>,
    colors: &'a MoodColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(counts: MoodCounts, tick: u64) -> Self {
        Self {
            counts,
            tick,
            paused: false,
            speed_factor: 1.0,
            fps: 30,
            display_mode: DisplayMode::default(),
            followed: None,
            index: None,
            colors: &MOOD_COLORS,
        }
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn speed_factor(mut self, speed: f64) -> Self {
        self.speed_factor = speed;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    pub fn followed(mut self, followed: Option<usize>) -> Self {
        self.followed = followed;
        self
    }

    /// Configured and effective index, shown in debug mode
    pub fn index(mut self, configured: IndexKind, effective: IndexKind) -> Self {
        self.index = Some((configured, effective));
        self
    }

    pub fn colors(mut self, colors: &'a MoodColors) -> Self {
        self.colors = colors;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 {
            return;
        }

        let bg_style = Style::default().bg(Color::Rgb(25, 25, 35));
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let limit = area.x + area.width - 1;
        let label_style = Style::default().fg(Color::Rgb(100, 100, 120));
        let value_style = Style::default().fg(Color::Rgb(180, 180, 200));
        let accent_style = Style::default()
            .fg(Color::Rgb(100, 200, 150))
            .add_modifier(Modifier::BOLD);

        let mut x = area.x + 1;
        x = put_text(buf, x, area.y, "=^.^= CATS", accent_style, limit) + 2;

        let count_text = format!("{} cats  tick {}", self.counts.total(), self.tick);
        x = put_text(buf, x, area.y, &count_text, value_style, limit) + 2;

        let moods = [
            (format!("calm {}", self.counts.calm), self.colors.calm),
            (format!("hiss {}", self.counts.hisses), self.colors.hisses),
            (format!("fight {}", self.counts.wants_to_fight), self.colors.wants_to_fight),
        ];
        for (text, color) in &moods {
            x = put_text(buf, x, area.y, text, Style::default().fg(*color), limit) + 1;
        }
        x += 1;

        let speed_text = format!("Speed: {:.2}x", self.speed_factor);
        x = put_text(buf, x, area.y, &speed_text, label_style, limit) + 2;

        if self.paused {
            let pause_style = Style::default()
                .fg(Color::Rgb(255, 200, 100))
                .add_modifier(Modifier::BOLD);
            x = put_text(buf, x, area.y, "PAUSED", pause_style, limit) + 2;
        }

        if let Some(id) = self.followed {
            let follow_style = Style::default().fg(Color::Rgb(150, 150, 255));
            x = put_text(buf, x, area.y, &format!("following #{}", id), follow_style, limit) + 2;
        }

        let mode_style = match self.display_mode {
            DisplayMode::Minimal => Style::default().fg(Color::Rgb(150, 200, 255)),
            DisplayMode::Standard => Style::default().fg(Color::Rgb(100, 200, 150)),
            DisplayMode::Debug => Style::default().fg(Color::Rgb(255, 200, 100)),
        };
        let mode_text = format!("[{}]", self.display_mode.name());
        x = put_text(buf, x, area.y, &mode_text, mode_style, limit) + 2;

        if self.display_mode == DisplayMode::Debug {
            let mut debug_text = format!("{} fps", self.fps);
            if let Some((configured, effective)) = self.index {
                debug_text.push_str(&format!("  index {}->{}", configured.name(), effective.name()));
            }
            put_text(buf, x, area.y, &debug_text, label_style, limit);
        }

        let help_text = "m:mode ?:help";
        if area.width > help_text.len() as u16 + 1 {
            let help_x = area.x + area.width - help_text.len() as u16 - 1;
            put_text(buf, help_x, area.y, help_text, label_style, limit);
        }
    }
}

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    const CONTROLS: [(&'static str, &'static str); 13] = [
        ("q, Esc", "Quit"),
        ("Space", "Pause/Resume"),
        ("+/-", "Speed up/down"),
        ("Arrows", "Pan the camera"),
        ("z / x", "Zoom in/out"),
        ("f", "Follow next cat"),
        ("Click", "Follow clicked cat"),
        ("u", "Stop following"),
        ("0", "Reset camera"),
        ("n / N", "Double/halve population"),
        ("m", "Cycle display mode"),
        ("1/2/3", "Minimal/Standard/Debug mode"),
        ("?", "Toggle this help"),
    ];
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(Color::Rgb(20, 20, 30));
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_style(bg_style);
            }
        }

        let box_width = 50u16.min(area.width);
        let box_height = (Self::CONTROLS.len() as u16 + 5).min(area.height);
        if box_width < 20 || box_height < 5 {
            return;
        }
        let box_x = area.x + (area.width - box_width) / 2;
        let box_y = area.y + (area.height - box_height) / 2;

        let box_bg = Style::default().bg(Color::Rgb(35, 35, 45));
        for y in box_y..box_y + box_height {
            for x in box_x..box_x + box_width {
                buf[(x, y)].set_char(' ').set_style(box_bg);
            }
        }

        // Border
        let border_style = Style::default().fg(Color::Rgb(100, 200, 150));
        let right = box_x + box_width - 1;
        let bottom = box_y + box_height - 1;
        for x in box_x..=right {
            buf[(x, box_y)].set_char('─').set_style(border_style);
            buf[(x, bottom)].set_char('─').set_style(border_style);
        }
        for y in box_y..=bottom {
            buf[(box_x, y)].set_char('│').set_style(border_style);
            buf[(right, y)].set_char('│').set_style(border_style);
        }
        buf[(box_x, box_y)].set_char('╭').set_style(border_style);
        buf[(right, box_y)].set_char('╮').set_style(border_style);
        buf[(box_x, bottom)].set_char('╰').set_style(border_style);
        buf[(right, bottom)].set_char('╯').set_style(border_style);

        let title = " Drunk Cats Controls ";
        let title_x = box_x + box_width.saturating_sub(title.len() as u16) / 2;
        let title_style = Style::default()
            .fg(Color::Rgb(100, 200, 150))
            .add_modifier(Modifier::BOLD);
        put_text(buf, title_x, box_y, title, title_style, right);

        let key_style = Style::default()
            .fg(Color::Rgb(200, 200, 100))
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::Rgb(180, 180, 190));

        let mut y = box_y + 2;
        for (key, desc) in Self::CONTROLS {
            if y >= bottom - 1 {
                break;
            }
            put_text(buf, box_x + 3, y, key, key_style, right);
            put_text(buf, box_x + 15, y, desc, desc_style, right - 1);
            y += 1;
        }

        let footer = "Press any key to close";
        let footer_x = box_x + box_width.saturating_sub(footer.len() as u16) / 2;
        let footer_style = Style::default().fg(Color::Rgb(100, 100, 120));
        put_text(buf, footer_x, bottom - 1, footer, footer_style, right);
    }
}

/// Shown in place of the field when the population is empty
pub struct EmptyStateWidget;

impl EmptyStateWidget {
    const MESSAGE: &'static str = "No cats on the plane";
    const HINT: &'static str = "Press n to add some";
}

impl Widget for EmptyStateWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 22 {
            return;
        }

        let center_y = area.y + area.height / 2;
        let limit = area.x + area.width;
        let message_style = Style::default().fg(Color::Rgb(150, 150, 160));
        let hint_style = Style::default().fg(Color::Rgb(100, 100, 110));

        let msg_x = area.x + area.width.saturating_sub(Self::MESSAGE.len() as u16) / 2;
        put_text(buf, msg_x, center_y, Self::MESSAGE, message_style, limit);

        if center_y + 1 < area.y + area.height {
            let hint_x = area.x + area.width.saturating_sub(Self::HINT.len() as u16) / 2;
            put_text(buf, hint_x, center_y + 1, Self::HINT, hint_style, limit);
        }
    }
}
