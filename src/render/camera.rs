//! Mapping from plane coordinates to terminal cells.

use ratatui::layout::Rect;

use drunk_cats::{Cat, Position};

/// How far the camera moves toward a followed cat each frame
pub const FOLLOW_SMOOTHNESS: f64 = 0.1;
/// Zoom level held while following a cat
pub const FOLLOW_ZOOM: f64 = 3.0;

const MIN_ZOOM: f64 = 0.25;
const MAX_ZOOM: f64 = 20.0;
const ZOOM_STEP: f64 = 1.25;
/// Fraction of the visible span moved per pan step
const PAN_FRACTION: f64 = 0.1;

/// Viewer camera: a centre point on the plane plus a zoom factor.
///
/// At zoom 1 the whole nominal map fills the drawing area.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    center: Position,
    zoom: f64,
    map_width: f64,
    map_height: f64,
    follow: Option<usize>,
}

impl Camera {
    pub fn new(map_width: f64, map_height: f64) -> Self {
        Self {
            center: Position::new(map_width / 2.0, map_height / 2.0),
            zoom: 1.0,
            map_width,
            map_height,
            follow: None,
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn followed(&self) -> Option<usize> {
        self.follow
    }

    /// Plane units covered by one cell along each axis
    fn units_per_cell(&self, area: Rect) -> (f64, f64) {
        let width = f64::from(area.width.max(1));
        let height = f64::from(area.height.max(1));
        (
            self.map_width / (width * self.zoom),
            self.map_height / (height * self.zoom),
        )
    }

    /// Project a plane position into `area`, or `None` when it falls outside
    pub fn project(&self, pos: &Position, area: Rect) -> Option<(u16, u16)> {
        let (ux, uy) = self.units_per_cell(area);
        let col = ((pos.x - self.center.x) / ux + f64::from(area.width) / 2.0).floor();
        let row = ((pos.y - self.center.y) / uy + f64::from(area.height) / 2.0).floor();

        if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height) {
            return None;
        }
        Some((area.x + col as u16, area.y + row as u16))
    }

    /// Plane position at the middle of a terminal cell
    pub fn unproject(&self, col: u16, row: u16, area: Rect) -> Position {
        let (ux, uy) = self.units_per_cell(area);
        let dx = f64::from(col) - f64::from(area.x) + 0.5 - f64::from(area.width) / 2.0;
        let dy = f64::from(row) - f64::from(area.y) + 0.5 - f64::from(area.height) / 2.0;
        Position::new(self.center.x + dx * ux, self.center.y + dy * uy)
    }

    /// Pan by whole steps; manual panning stops following
    pub fn pan(&mut self, steps_x: i32, steps_y: i32) {
        self.follow = None;
        self.center.x += f64::from(steps_x) * PAN_FRACTION * self.map_width / self.zoom;
        self.center.y += f64::from(steps_y) * PAN_FRACTION * self.map_height / self.zoom;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn follow(&mut self, id: usize) {
        self.follow = Some(id);
    }

    pub fn unfollow(&mut self) {
        self.follow = None;
    }

    /// Follow the cat after the current one, wrapping around
    pub fn follow_next(&mut self, cat_count: usize) {
        if cat_count == 0 {
            self.follow = None;
            return;
        }
        let next = self.follow.map_or(0, |id| (id + 1) % cat_count);
        self.follow = Some(next);
    }

    /// Back to the whole-map view
    pub fn reset(&mut self) {
        *self = Self::new(self.map_width, self.map_height);
    }

    /// Ease toward the followed cat; drops the follow if the cat is gone
    pub fn update(&mut self, cats: &[Cat]) {
        let Some(id) = self.follow else {
            return;
        };
        let Some(cat) = cats.get(id) else {
            self.follow = None;
            return;
        };

        self.center = self.center.lerp(&cat.position, FOLLOW_SMOOTHNESS);
        self.zoom += (FOLLOW_ZOOM - self.zoom) * FOLLOW_SMOOTHNESS;
    }

    /// Index of the cat drawn closest to a clicked cell
    pub fn pick(&self, cats: &[Cat], col: u16, row: u16, area: Rect) -> Option<usize> {
        let (ux, uy) = self.units_per_cell(area);
        // Accept anything within about one cell of the click
        let reach_sq = ux * ux + uy * uy;
        let target = self.unproject(col, row, area);

        cats.iter()
            .enumerate()
            .map(|(id, cat)| (id, cat.position.distance_sq_to(&target)))
            .filter(|(_, dist_sq)| *dist_sq <= reach_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}
