use crate::{Location, OrganismSnapshot};

/// One cell around an organism together with whatever occupies it.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbor {
    /// Cell location.
    pub location: Location,
    /// Organism or remains in the cell.
    pub occupant: Option<OrganismSnapshot>,
}

/// Read-only view of the in-bounds cells surrounding one organism.
///
/// Cells are listed in row-major order, which is also the order every scan
/// over the neighborhood follows.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    center: Location,
    cells: Vec<Neighbor>,
}

impl Neighborhood {
    /// Creates a view from cells already in row-major order.
    #[must_use]
    pub fn new(center: Location, cells: Vec<Neighbor>) -> Self {
        Self { center, cells }
    }

    /// Cell the view is centered on.
    #[must_use]
    pub const fn center(&self) -> Location {
        self.center
    }

    /// Iterator over the neighboring cells in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.cells.iter()
    }

    /// Empty neighboring cells in scan order.
    #[must_use]
    pub fn free_cells(&self) -> Vec<Location> {
        self.cells
            .iter()
            .filter(|neighbor| neighbor.occupant.is_none())
            .map(|neighbor| neighbor.location)
            .collect()
    }
}
