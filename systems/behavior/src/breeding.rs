use reef_core::{Command, Location, Neighborhood, RandomSource, Sex, Species, Vitals};

/// Newborn placed while the parent is still acting.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Newborn {
    pub(crate) location: Location,
    pub(crate) vitals: Vitals,
}

impl Newborn {
    /// Newborn animals that did not inherit the infection can catch it from
    /// their parent in the same step.
    pub(crate) fn is_susceptible(&self) -> bool {
        self.vitals
            .infection
            .is_some_and(|state| !state.is_infected())
    }
}

/// Draws a litter size in `[1, max_litter]` and bears that many newborns into
/// the free neighbors, in scan order.
///
/// The litter is capped by the free cells available right now.
pub(crate) fn bear_litter(
    species: Species,
    neighborhood: &Neighborhood,
    max_litter: u32,
    litter: &mut Vec<Newborn>,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let size = rng.below(max_litter).saturating_add(1);
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    for location in neighborhood.free_cells().into_iter().take(size) {
        let vitals = Vitals::newborn(species, rng);
        out.push(Command::Bear {
            species,
            at: location,
            vitals,
        });
        litter.push(Newborn { location, vitals });
    }
}

/// Whether a living neighbor of the same species and opposite sex exists.
pub(crate) fn has_partner(neighborhood: &Neighborhood, species: Species, sex: Sex) -> bool {
    neighborhood
        .iter()
        .filter_map(|neighbor| neighbor.occupant.as_ref())
        .any(|occupant| {
            occupant.alive && occupant.species == species && occupant.sex == Some(sex.opposite())
        })
}
