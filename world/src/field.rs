use reef_core::{Location, OrganismId, RandomSource};

/// Dense occupancy grid; every cell holds at most one organism handle.
///
/// Misuse such as placing into an occupied cell or addressing a location
/// outside the grid is a scheduling bug and panics.
#[derive(Clone, Debug)]
pub struct SpatialField {
    depth: u32,
    width: u32,
    cells: Vec<Option<OrganismId>>,
}

impl SpatialField {
    /// Creates an empty field with `depth` rows and `width` columns.
    ///
    /// # Panics
    ///
    /// Panics when either dimension is zero.
    #[must_use]
    pub fn new(depth: u32, width: u32) -> Self {
        assert!(
            depth > 0 && width > 0,
            "field dimensions must be positive, got {depth}x{width}"
        );
        let capacity = usize::try_from(u64::from(depth) * u64::from(width)).unwrap_or(0);
        Self {
            depth,
            width,
            cells: vec![None; capacity],
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.depth
    }

    /// Reports whether `location` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, location: Location) -> bool {
        location.row() < self.depth && location.column() < self.width
    }

    /// Records `id` as the occupant of `location`.
    ///
    /// # Panics
    ///
    /// Panics when the location is outside the grid or already held by a
    /// different organism.
    pub fn place(&mut self, id: OrganismId, location: Location) {
        let index = self.index(location);
        match self.cells[index] {
            Some(existing) if existing != id => panic!(
                "cell ({}, {}) already occupied by {existing:?}",
                location.row(),
                location.column()
            ),
            _ => self.cells[index] = Some(id),
        }
    }

    /// Empties `location`.
    pub fn clear(&mut self, location: Location) {
        let index = self.index(location);
        self.cells[index] = None;
    }

    /// Handle of the organism occupying `location`, if any.
    #[must_use]
    pub fn occupant(&self, location: Location) -> Option<OrganismId> {
        self.cells[self.index(location)]
    }

    /// Reports whether `location` is empty.
    #[must_use]
    pub fn is_free(&self, location: Location) -> bool {
        self.occupant(location).is_none()
    }

    /// In-bounds neighbors of `location` in row-major order, excluding itself.
    #[must_use]
    pub fn adjacent_locations(&self, location: Location) -> Vec<Location> {
        let mut neighbors = Vec::with_capacity(8);
        let row = i64::from(location.row());
        let column = i64::from(location.column());
        for row_offset in -1..=1_i64 {
            for column_offset in -1..=1_i64 {
                if row_offset == 0 && column_offset == 0 {
                    continue;
                }
                let (Ok(next_row), Ok(next_column)) = (
                    u32::try_from(row + row_offset),
                    u32::try_from(column + column_offset),
                ) else {
                    continue;
                };
                let candidate = Location::new(next_row, next_column);
                if self.contains(candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    /// Empty neighbors of `location` in row-major order.
    #[must_use]
    pub fn free_adjacent_locations(&self, location: Location) -> Vec<Location> {
        self.adjacent_locations(location)
            .into_iter()
            .filter(|candidate| self.is_free(*candidate))
            .collect()
    }

    /// Picks one empty neighbor uniformly at random.
    ///
    /// Consumes a single integer draw when at least one neighbor is free and
    /// none otherwise.
    pub fn random_free_adjacent_location(
        &self,
        location: Location,
        rng: &mut dyn RandomSource,
    ) -> Option<Location> {
        let free = self.free_adjacent_locations(location);
        if free.is_empty() {
            return None;
        }
        let bound = u32::try_from(free.len()).unwrap_or(u32::MAX);
        let pick = usize::try_from(rng.below(bound)).unwrap_or(0);
        free.get(pick).copied()
    }

    /// Empties every cell.
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Location, OrganismId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            let id = (*cell)?;
            let index = u32::try_from(index).ok()?;
            Some((Location::new(index / width, index % width), id))
        })
    }

    fn index(&self, location: Location) -> usize {
        assert!(
            self.contains(location),
            "location ({}, {}) outside {}x{} field",
            location.row(),
            location.column(),
            self.depth,
            self.width
        );
        let row = usize::try_from(location.row()).unwrap_or(usize::MAX);
        let column = usize::try_from(location.column()).unwrap_or(usize::MAX);
        let width = usize::try_from(self.width).unwrap_or(usize::MAX);
        row * width + column
    }
}
