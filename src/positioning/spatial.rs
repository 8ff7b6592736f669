use std::collections::HashMap;

use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

use super::Position;

/// Populations at or below this size use a plain scan under [`IndexKind::Auto`]
pub const LINEAR_SCAN_THRESHOLD: usize = 64;

/// Point index over cat ids supporting radius queries.
///
/// Queries are inclusive: an id is returned when its squared distance to the
/// centre is `<= radius * radius`. Result order is unspecified but stable for
/// a fixed insertion order.
pub trait SpatialIndex {
    /// Add a point carrying the given id
    fn insert(&mut self, point: Position, id: usize);

    /// Ids of all points within `radius` of `center`
    fn range_query(&self, center: &Position, radius: f64) -> Vec<usize>;

    /// Number of points in the index
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which index implementation a resolver builds every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Linear scan for small populations, R-tree otherwise
    #[default]
    Auto,
    #[serde(rename = "rtree")]
    RTree,
    Grid,
    Linear,
}

impl IndexKind {
    /// Resolve `Auto` against a population size
    pub fn effective(self, count: usize) -> IndexKind {
        match self {
            IndexKind::Auto if count <= LINEAR_SCAN_THRESHOLD => IndexKind::Linear,
            IndexKind::Auto => IndexKind::RTree,
            other => other,
        }
    }

    /// Build a fresh index over `positions`, using each slot as the id.
    ///
    /// `cell_size` only matters for the grid and should match the largest
    /// radius that will be queried.
    pub fn build(self, positions: &[Position], cell_size: f64) -> Result<Box<dyn SpatialIndex>> {
        let index: Box<dyn SpatialIndex> = match self.effective(positions.len()) {
            IndexKind::RTree => Box::new(RTreeIndex::from_positions(positions)?),
            IndexKind::Grid => Box::new(SpatialHash::from_positions(positions, cell_size)?),
            IndexKind::Linear | IndexKind::Auto => Box::new(LinearScan::from_positions(positions)?),
        };
        Ok(index)
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::Auto => "auto",
            IndexKind::RTree => "rtree",
            IndexKind::Grid => "grid",
            IndexKind::Linear => "linear",
        }
    }
}

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Balanced R-tree over cat positions
#[derive(Debug, Default)]
pub struct RTreeIndex {
    tree: RTree<IndexedPoint>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load a tree; the resulting layout depends only on the input order
    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        let mut points = Vec::new();
        points
            .try_reserve_exact(positions.len())
            .map_err(|e| SimError::exhausted("r-tree index", positions.len(), e))?;
        points.extend(
            positions
                .iter()
                .enumerate()
                .map(|(id, pos)| IndexedPoint::new(pos.as_array(), id)),
        );

        Ok(Self {
            tree: RTree::bulk_load(points),
        })
    }
}

impl SpatialIndex for RTreeIndex {
    fn insert(&mut self, point: Position, id: usize) {
        self.tree.insert(IndexedPoint::new(point.as_array(), id));
    }

    fn range_query(&self, center: &Position, radius: f64) -> Vec<usize> {
        self.tree
            .locate_within_distance(center.as_array(), radius * radius)
            .map(|point| point.data)
            .collect()
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

/// Spatial hash grid for O(1) average neighbour lookup.
///
/// The plane is unbounded: cats that walk off the nominal map still hash
/// into their own cells.
#[derive(Debug)]
pub struct SpatialHash {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<(Position, usize)>>,
    count: usize,
}

impl SpatialHash {
    pub fn with_cell_size(cell_size: f64) -> Self {
        Self {
            cell_size: if cell_size.is_finite() && cell_size > 0.0 {
                cell_size
            } else {
                1.0
            },
            cells: HashMap::new(),
            count: 0,
        }
    }

    pub fn from_positions(positions: &[Position], cell_size: f64) -> Result<Self> {
        let mut hash = Self::with_cell_size(cell_size);
        hash.cells
            .try_reserve(positions.len())
            .map_err(|e| SimError::exhausted("grid index", positions.len(), e))?;
        for (id, pos) in positions.iter().enumerate() {
            hash.insert(*pos, id);
        }
        Ok(hash)
    }

    /// Convert a position to cell coordinates
    fn position_to_cell(&self, pos: &Position) -> (i64, i64) {
        (
            (pos.x / self.cell_size).floor() as i64,
            (pos.y / self.cell_size).floor() as i64,
        )
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl SpatialIndex for SpatialHash {
    fn insert(&mut self, point: Position, id: usize) {
        let cell = self.position_to_cell(&point);
        self.cells.entry(cell).or_default().push((point, id));
        self.count += 1;
    }

    fn range_query(&self, center: &Position, radius: f64) -> Vec<usize> {
        let mut found = Vec::new();
        if self.cells.is_empty() || radius < 0.0 {
            return found;
        }

        let radius_sq = radius * radius;
        let (min_cx, min_cy) =
            self.position_to_cell(&Position::new(center.x - radius, center.y - radius));
        let (max_cx, max_cy) =
            self.position_to_cell(&Position::new(center.x + radius, center.y + radius));

        let keep_in_range = |found: &mut Vec<usize>, entries: &[(Position, usize)]| {
            found.extend(
                entries
                    .iter()
                    .filter(|(pos, _)| pos.distance_sq_to(center) <= radius_sq)
                    .map(|(_, id)| *id),
            );
        };

        let box_cells = (i128::from(max_cx) - i128::from(min_cx) + 1)
            .saturating_mul(i128::from(max_cy) - i128::from(min_cy) + 1);

        // Rows then columns, so results are stable for a given insertion order
        if box_cells > self.cells.len() as i128 {
            // Fewer occupied cells than cells in the box: walk those instead
            let mut occupied: Vec<_> = self
                .cells
                .iter()
                .filter(|((cx, cy), _)| {
                    (min_cx..=max_cx).contains(cx) && (min_cy..=max_cy).contains(cy)
                })
                .collect();
            occupied.sort_unstable_by_key(|((cx, cy), _)| (*cy, *cx));
            for (_, entries) in occupied {
                keep_in_range(&mut found, entries.as_slice());
            }
        } else {
            for cy in min_cy..=max_cy {
                for cx in min_cx..=max_cx {
                    if let Some(entries) = self.cells.get(&(cx, cy)) {
                        keep_in_range(&mut found, entries.as_slice());
                    }
                }
            }
        }

        found
    }

    fn len(&self) -> usize {
        self.count
    }
}

/// Full array scan, used for small populations
#[derive(Debug, Default)]
pub struct LinearScan {
    points: Vec<(Position, usize)>,
}

impl LinearScan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        let mut points = Vec::new();
        points
            .try_reserve_exact(positions.len())
            .map_err(|e| SimError::exhausted("linear index", positions.len(), e))?;
        points.extend(positions.iter().enumerate().map(|(id, pos)| (*pos, id)));
        Ok(Self { points })
    }
}

impl SpatialIndex for LinearScan {
    fn insert(&mut self, point: Position, id: usize) {
        self.points.push((point, id));
    }

    fn range_query(&self, center: &Position, radius: f64) -> Vec<usize> {
        let radius_sq = radius * radius;
        self.points
            .iter()
            .filter(|(pos, _)| pos.distance_sq_to(center) <= radius_sq)
            .map(|(_, id)| *id)
            .collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Position> {
        vec![
            Position::new(1.0, 1.0),
            Position::new(1.5, 1.2),
            Position::new(8.0, 8.0),
            Position::new(2.7, 1.1),
            Position::new(-40.0, 3.0),
        ]
    }

    fn sorted(mut ids: Vec<usize>) -> Vec<usize> {
        ids.sort_unstable();
        ids
    }

    fn all_kinds(positions: &[Position]) -> Vec<Box<dyn SpatialIndex>> {
        [IndexKind::RTree, IndexKind::Grid, IndexKind::Linear]
            .into_iter()
            .map(|kind| kind.build(positions, 2.0).unwrap())
            .collect()
    }

    #[test]
    fn test_finds_neighbors_in_known_layout() {
        let positions = layout();
        for index in all_kinds(&positions) {
            assert_eq!(index.len(), 5);
            assert_eq!(sorted(index.range_query(&positions[0], 2.0)), vec![0, 1, 3]);
            assert_eq!(sorted(index.range_query(&positions[2], 2.0)), vec![2]);
        }
    }

    #[test]
    fn test_radius_is_inclusive() {
        let positions = vec![Position::new(0.0, 0.0), Position::new(0.0, 5.0)];
        for index in all_kinds(&positions) {
            assert_eq!(sorted(index.range_query(&positions[0], 5.0)), vec![0, 1]);
            assert_eq!(index.range_query(&positions[0], 4.999), vec![0]);
        }
    }

    #[test]
    fn test_checks_across_cell_boundaries() {
        let positions = vec![
            Position::new(1.9, 1.0),
            Position::new(2.1, 1.0),
            Position::new(5.0, 5.0),
        ];
        let grid = SpatialHash::from_positions(&positions, 2.0).unwrap();
        assert_eq!(sorted(grid.range_query(&positions[0], 0.25)), vec![0, 1]);
        assert_eq!(sorted(grid.range_query(&positions[1], 0.25)), vec![0, 1]);
        assert_eq!(grid.cell_count(), 3);
    }

    #[test]
    fn test_points_outside_nominal_map() {
        let positions = layout();
        let grid = SpatialHash::from_positions(&positions, 2.0).unwrap();
        assert_eq!(grid.range_query(&Position::new(-39.0, 3.0), 1.5), vec![4]);
    }

    #[test]
    fn test_grid_query_far_larger_than_cells() {
        let positions = vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 1.0),
            Position::new(-5.0, 3.0),
            Position::new(30_000.0, 0.0),
        ];
        let grid = SpatialHash::from_positions(&positions, 1.0).unwrap();

        // Occupied cells are walked row by row, as the dense walk would
        assert_eq!(grid.range_query(&Position::new(0.0, 0.0), 20_000.0), vec![0, 1, 2]);
        assert_eq!(sorted(grid.range_query(&Position::new(0.0, 0.0), 1e300)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_index_returns_nothing() {
        for index in all_kinds(&[]) {
            assert!(index.is_empty());
            assert!(index.range_query(&Position::new(0.0, 0.0), 100.0).is_empty());
        }
    }

    #[test]
    fn test_insert_after_build() {
        let mut tree = RTreeIndex::new();
        let mut scan = LinearScan::new();
        let mut grid = SpatialHash::with_cell_size(3.0);
        for (id, pos) in layout().into_iter().enumerate() {
            tree.insert(pos, id);
            scan.insert(pos, id);
            grid.insert(pos, id);
        }
        let center = Position::new(1.2, 1.0);
        assert_eq!(sorted(tree.range_query(&center, 1.6)), vec![0, 1, 3]);
        assert_eq!(sorted(scan.range_query(&center, 1.6)), vec![0, 1, 3]);
        assert_eq!(sorted(grid.range_query(&center, 1.6)), vec![0, 1, 3]);
    }

    #[test]
    fn test_queries_are_repeatable() {
        let positions: Vec<Position> = (0..200)
            .map(|i| Position::new((i % 20) as f64 * 0.7, (i / 20) as f64 * 0.9))
            .collect();
        for kind in [IndexKind::RTree, IndexKind::Grid] {
            let a = kind.build(&positions, 3.0).unwrap();
            let b = kind.build(&positions, 3.0).unwrap();
            assert_eq!(
                a.range_query(&positions[57], 3.0),
                b.range_query(&positions[57], 3.0)
            );
        }
    }

    #[test]
    fn test_auto_switches_on_population() {
        assert_eq!(IndexKind::Auto.effective(0), IndexKind::Linear);
        assert_eq!(IndexKind::Auto.effective(LINEAR_SCAN_THRESHOLD), IndexKind::Linear);
        assert_eq!(IndexKind::Auto.effective(LINEAR_SCAN_THRESHOLD + 1), IndexKind::RTree);
        assert_eq!(IndexKind::Grid.effective(5), IndexKind::Grid);
    }
}
