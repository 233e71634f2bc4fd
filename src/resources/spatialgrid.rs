//! Uniform hash grid for broad-phase collision lookup.
//!
//! The grid is rebuilt from scratch at the start of every tick from the
//! Collidable population; there is no incremental update and therefore no
//! way for it to drift out of sync with the world. Cells are unbounded: two
//! signed 32-bit cell coordinates are packed into one `i64` key, so the world
//! has no fixed extent.
//!
//! An entity is inserted into every cell its AABB covers (edges inclusive),
//! so a query only needs to look at the cells the probe covers. Because of
//! that multi-cell storage, a query may meet the same entity several times;
//! [`SpatialGrid::query`] de-duplicates within one call.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::components::size::Aabb;
use crate::error::{SimError, SimResult};

type Bucket = SmallVec<[Entity; 4]>;

/// Inclusive range of cells covered by an AABB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl CellRange {
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.min_x..=self.max_x).flat_map(move |x| (self.min_y..=self.max_y).map(move |y| (x, y)))
    }

    pub fn len(&self) -> usize {
        let w = (self.max_x - self.min_x + 1).max(0) as usize;
        let h = (self.max_y - self.min_y + 1).max(0) as usize;
        w * h
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Resource, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FxHashMap<i64, Bucket>,
    entity_count: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> SimResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SimError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cells: FxHashMap::default(),
            entity_count: 0,
        })
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Pack two cell coordinates into one key.
    pub fn cell_key(cx: i32, cy: i32) -> i64 {
        ((cx as i64) << 32) | (cy as u32 as i64)
    }

    fn cell_coord(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    pub fn cell_range(&self, aabb: &Aabb) -> CellRange {
        CellRange {
            min_x: self.cell_coord(aabb.left),
            max_x: self.cell_coord(aabb.right),
            min_y: self.cell_coord(aabb.bottom),
            max_y: self.cell_coord(aabb.top),
        }
    }

    /// Drop all entries, keeping allocated buckets' capacity in the map.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.entity_count = 0;
    }

    /// Insert `entity` into every cell its AABB covers.
    pub fn insert(&mut self, entity: Entity, aabb: &Aabb) {
        let range = self.cell_range(aabb);
        for (cx, cy) in range.cells() {
            self.cells
                .entry(Self::cell_key(cx, cy))
                .or_default()
                .push(entity);
        }
        self.entity_count += 1;
    }

    /// Replace the grid contents with `items`.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (Entity, Aabb)>,
    {
        self.clear();
        for (entity, aabb) in items {
            self.insert(entity, &aabb);
        }
    }

    /// Collect the unique entities sharing a cell with `aabb` into `out`,
    /// in first-seen order. `out` is cleared first.
    pub fn query(&self, aabb: &Aabb, out: &mut Vec<Entity>) {
        out.clear();
        let mut seen: FxHashSet<Entity> = FxHashSet::default();
        for (cx, cy) in self.cell_range(aabb).cells() {
            let Some(bucket) = self.cells.get(&Self::cell_key(cx, cy)) else {
                continue;
            };
            for &entity in bucket {
                if seen.insert(entity) {
                    out.push(entity);
                }
            }
        }
    }

    /// Entities stored in one cell, duplicates included.
    pub fn bucket(&self, cx: i32, cy: i32) -> &[Entity] {
        self.cells
            .get(&Self::cell_key(cx, cy))
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of entities inserted since the last rebuild.
    pub fn entity_count(&self) -> usize {
        self.entity_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::size::Size;
    use bevy_ecs::world::World;
    use glam::Vec2;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Size::new(w, h).aabb(Vec2::new(x, y))
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        assert!(matches!(SpatialGrid::new(0.0), Err(SimError::InvalidCellSize(_))));
        assert!(matches!(SpatialGrid::new(-1.0), Err(SimError::InvalidCellSize(_))));
        assert!(SpatialGrid::new(f32::INFINITY).is_err());
    }

    #[test]
    fn key_packs_negative_coordinates_distinctly() {
        let keys = [
            SpatialGrid::cell_key(0, 0),
            SpatialGrid::cell_key(-1, 0),
            SpatialGrid::cell_key(0, -1),
            SpatialGrid::cell_key(-1, -1),
            SpatialGrid::cell_key(1, -1),
        ];
        let unique: FxHashSet<i64> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn zero_area_entity_occupies_one_cell() {
        let e = entities(1);
        let mut grid = SpatialGrid::new(8.0).unwrap();
        grid.insert(e[0], &boxed(3.0, 3.0, 0.0, 0.0));
        assert_eq!(grid.occupied_cells(), 1);
        assert_eq!(grid.bucket(0, 0), &[e[0]]);
    }

    #[test]
    fn straddling_entity_occupies_every_covered_cell() {
        let e = entities(1);
        let mut grid = SpatialGrid::new(8.0).unwrap();
        // spans x 6..10 and y -2..2 -> cells x {0,1}, y {-1,0}
        grid.insert(e[0], &boxed(6.0, -2.0, 4.0, 4.0));
        assert_eq!(grid.occupied_cells(), 4);
        for (cx, cy) in [(0, -1), (0, 0), (1, -1), (1, 0)] {
            assert_eq!(grid.bucket(cx, cy), &[e[0]]);
        }
    }

    #[test]
    fn query_deduplicates_multi_cell_entities() {
        let e = entities(2);
        let mut grid = SpatialGrid::new(8.0).unwrap();
        grid.insert(e[0], &boxed(0.0, 0.0, 20.0, 20.0));
        grid.insert(e[1], &boxed(30.0, 30.0, 1.0, 1.0));

        let mut out = Vec::new();
        grid.query(&boxed(1.0, 1.0, 15.0, 15.0), &mut out);
        assert_eq!(out, vec![e[0]]);

        grid.query(&boxed(-5.0, -5.0, 40.0, 40.0), &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.contains(&e[0]) && out.contains(&e[1]));
    }

    #[test]
    fn query_far_away_is_empty() {
        let e = entities(1);
        let mut grid = SpatialGrid::new(8.0).unwrap();
        grid.insert(e[0], &boxed(0.0, 0.0, 1.0, 1.0));
        let mut out = vec![e[0]];
        grid.query(&boxed(100.0, 100.0, 1.0, 1.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let e = entities(2);
        let mut grid = SpatialGrid::new(4.0).unwrap();
        grid.rebuild([(e[0], boxed(0.0, 0.0, 1.0, 1.0))]);
        grid.rebuild([(e[1], boxed(0.0, 0.0, 1.0, 1.0))]);
        assert_eq!(grid.bucket(0, 0), &[e[1]]);
        assert_eq!(grid.entity_count(), 1);
    }

    #[test]
    fn cell_range_len() {
        let grid = SpatialGrid::new(10.0).unwrap();
        let r = grid.cell_range(&boxed(-1.0, 0.0, 12.0, 5.0));
        assert_eq!(r, CellRange { min_x: -1, max_x: 1, min_y: 0, max_y: 0 });
        assert_eq!(r.len(), 3);
        assert_eq!(r.cells().count(), 3);
    }
}
