#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative habitat state for the Reef simulation.
//!
//! The [`Habitat`] owns the occupancy [`SpatialField`], the generational arena
//! holding every [`Organism`], the population order the scheduler walks and
//! the nursery of newborns waiting to be scheduled. It is mutated only by
//! [`apply`]; systems observe it through the [`query`] module.

mod field;
mod organism;

use reef_core::{Command, DeathCause, Event, Infection, Location, OrganismId, Vitals};
use slotmap::SlotMap;

pub use field::SpatialField;
pub use organism::Organism;

/// Field, organism arena and scheduling order of one simulation.
#[derive(Debug)]
pub struct Habitat {
    field: SpatialField,
    organisms: SlotMap<OrganismId, Organism>,
    population: Vec<OrganismId>,
    nursery: Vec<OrganismId>,
}

impl Habitat {
    /// Creates an empty habitat with `depth` rows and `width` columns.
    #[must_use]
    pub fn new(depth: u32, width: u32) -> Self {
        Self {
            field: SpatialField::new(depth, width),
            organisms: SlotMap::with_key(),
            population: Vec::new(),
            nursery: Vec::new(),
        }
    }

    /// Read-only access to the occupancy grid.
    #[must_use]
    pub fn field(&self) -> &SpatialField {
        &self.field
    }

    /// Handles of scheduled organisms in acting order.
    #[must_use]
    pub fn population(&self) -> &[OrganismId] {
        &self.population
    }

    /// Looks up an organism by handle.
    #[must_use]
    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(id)
    }

    /// Organism occupying `location`, if any.
    #[must_use]
    pub fn occupant(&self, location: Location) -> Option<(OrganismId, &Organism)> {
        let id = self.field.occupant(location)?;
        self.organisms.get(id).map(|organism| (id, organism))
    }

    fn insert_placed(&mut self, mut organism: Organism, location: Location) -> OrganismId {
        organism.set_location(Some(location));
        let id = self.organisms.insert(organism);
        self.field.place(id, location);
        id
    }

    /// Moves a living organism, vacating its previous cell. Dead organisms only
    /// lose their previous cell. Returns the cell left behind when the move
    /// happened.
    fn set_location(&mut self, id: OrganismId, location: Location) -> Option<Location> {
        let organism = self.organisms.get_mut(id)?;
        let previous = organism.location();
        if let Some(previous) = previous {
            if self.field.occupant(previous) == Some(id) {
                self.field.clear(previous);
            }
        }
        if organism.is_alive() {
            self.field.place(id, location);
            organism.set_location(Some(location));
            previous
        } else {
            organism.set_location(None);
            None
        }
    }

    /// Kills an organism and vacates its cell. Returns `false` when it was
    /// already dead, keeping the first recorded cause.
    fn set_dead(&mut self, id: OrganismId, cause: DeathCause) -> bool {
        let Some(organism) = self.organisms.get_mut(id) else {
            return false;
        };
        if !organism.mark_dead(cause) {
            return false;
        }
        if let Some(location) = organism.location() {
            if self.field.occupant(location) == Some(id) {
                self.field.clear(location);
            }
            organism.set_location(None);
        }
        true
    }

    fn clear_remains(&mut self, id: OrganismId) -> Option<Location> {
        let organism = self.organisms.get_mut(id)?;
        if organism.is_alive() {
            return None;
        }
        let location = organism.location()?;
        self.field.clear(location);
        organism.set_location(None);
        Some(location)
    }

    fn reap(&mut self, out_events: &mut Vec<Event>) {
        let organisms = &mut self.organisms;
        let field = &mut self.field;
        self.population.retain(|id| {
            let alive = organisms.get(*id).is_some_and(Organism::is_alive);
            if !alive {
                if let Some(organism) = organisms.remove(*id) {
                    if let Some(location) = organism.location() {
                        field.clear(location);
                    }
                    out_events.push(Event::OrganismRemoved {
                        id: *id,
                        species: organism.species(),
                        cause: organism.cause_of_death(),
                    });
                }
            }
            alive
        });
    }

    fn admit_newborns(&mut self, out_events: &mut Vec<Event>) {
        for id in std::mem::take(&mut self.nursery) {
            match self.organisms.get(id) {
                Some(organism) if organism.is_alive() => {
                    self.population.push(id);
                    out_events.push(Event::NewbornAdmitted { id });
                }
                Some(_) => {
                    if let Some(organism) = self.organisms.remove(id) {
                        if let Some(location) = organism.location() {
                            self.field.clear(location);
                        }
                    }
                }
                None => {}
            }
        }
    }

    fn clear(&mut self) {
        self.organisms.clear();
        self.population.clear();
        self.nursery.clear();
        self.field.clear_all();
    }
}

/// Applies the provided command to the habitat, mutating state deterministically.
pub fn apply(habitat: &mut Habitat, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Spawn {
            species,
            at,
            vitals,
        } => {
            let id = habitat.insert_placed(Organism::with_vitals(species, vitals), at);
            habitat.population.push(id);
            out_events.push(Event::OrganismSpawned { id, species, at });
        }
        Command::PlaceRemains {
            species,
            at,
            infected,
        } => {
            let mut remains = Organism::with_vitals(
                species,
                Vitals {
                    infection: Some(Infection::new(infected, false)),
                    ..Vitals::default()
                },
            );
            remains.mark_remains();
            let id = habitat.insert_placed(remains, at);
            habitat.population.push(id);
            out_events.push(Event::RemainsPlaced { id, species, at });
        }
        Command::Bear {
            species,
            at,
            vitals,
        } => {
            let id = habitat.insert_placed(Organism::with_vitals(species, vitals), at);
            habitat.nursery.push(id);
            out_events.push(Event::OrganismBorn { id, species, at });
        }
        Command::GrowOlder { id } => {
            if let Some(organism) = habitat.organisms.get_mut(id) {
                organism.grow_older();
            }
        }
        Command::ConsumeFood { id } => {
            if let Some(organism) = habitat.organisms.get_mut(id) {
                organism.consume_food();
            }
        }
        Command::Feed { id, food_level } => {
            if let Some(organism) = habitat.organisms.get_mut(id) {
                organism.set_food_level(food_level);
            }
        }
        Command::SetLethality { id, lethal } => {
            if let Some(infection) = habitat
                .organisms
                .get_mut(id)
                .and_then(Organism::infection_mut)
            {
                infection.set_lethal(lethal);
            }
        }
        Command::Infect { at } => {
            let Some(id) = habitat.field.occupant(at) else {
                return;
            };
            let Some(infection) = habitat
                .organisms
                .get_mut(id)
                .filter(|organism| organism.is_alive())
                .and_then(Organism::infection_mut)
            else {
                return;
            };
            if !infection.is_infected() && infection.toggle() {
                out_events.push(Event::OrganismInfected { id });
            }
        }
        Command::Relocate { id, to } => {
            if let Some(from) = habitat.set_location(id, to) {
                out_events.push(Event::OrganismMoved { id, from, to });
            }
        }
        Command::Kill { id, cause } => {
            if habitat.set_dead(id, cause) {
                if let Some(organism) = habitat.organisms.get(id) {
                    out_events.push(Event::OrganismDied {
                        id,
                        species: organism.species(),
                        cause,
                    });
                }
            }
        }
        Command::ClearRemains { id } => {
            if let Some(at) = habitat.clear_remains(id) {
                out_events.push(Event::RemainsCleared { id, at });
            }
        }
        Command::Reap => habitat.reap(out_events),
        Command::AdmitNewborns => habitat.admit_newborns(out_events),
        Command::Clear => {
            habitat.clear();
            out_events.push(Event::HabitatCleared);
        }
    }
}

/// Read-only views over a [`Habitat`].
pub mod query {
    use super::Habitat;
    use reef_core::{
        Census, Location, Neighbor, Neighborhood, OrganismId, OrganismSnapshot, Species,
    };

    /// Captures a single organism, scheduled or not.
    #[must_use]
    pub fn snapshot(habitat: &Habitat, id: OrganismId) -> Option<OrganismSnapshot> {
        let organism = habitat.organisms.get(id)?;
        Some(OrganismSnapshot {
            id,
            species: organism.species(),
            location: organism.location(),
            age: organism.age(),
            food_level: organism.food_level(),
            sex: organism.sex(),
            infection: organism.infection(),
            alive: organism.is_alive(),
        })
    }

    /// Captures every scheduled organism in acting order.
    #[must_use]
    pub fn snapshots(habitat: &Habitat) -> Vec<OrganismSnapshot> {
        habitat
            .population
            .iter()
            .filter_map(|id| snapshot(habitat, *id))
            .collect()
    }

    /// Captures the cells surrounding `center` in row-major order.
    #[must_use]
    pub fn neighborhood(habitat: &Habitat, center: Location) -> Neighborhood {
        let cells = habitat
            .field
            .adjacent_locations(center)
            .into_iter()
            .map(|location| Neighbor {
                location,
                occupant: habitat
                    .field
                    .occupant(location)
                    .and_then(|id| snapshot(habitat, id)),
            })
            .collect();
        Neighborhood::new(center, cells)
    }

    /// Counts living scheduled organisms per species.
    #[must_use]
    pub fn census(habitat: &Habitat) -> Census {
        let mut census = Census::default();
        for id in &habitat.population {
            if let Some(organism) = habitat.organisms.get(*id) {
                if organism.is_alive() {
                    census.record(organism.species());
                }
            }
        }
        census
    }

    /// Number of living animals currently carrying the infection.
    #[must_use]
    pub fn currently_infected(habitat: &Habitat) -> usize {
        habitat
            .organisms
            .values()
            .filter(|organism| organism.is_alive() && organism.is_infected())
            .count()
    }

    /// Species drawn at `location`, counting remains.
    #[must_use]
    pub fn species_at(habitat: &Habitat, location: Location) -> Option<Species> {
        habitat
            .occupant(location)
            .map(|(_, organism)| organism.species())
    }

    /// Checks that the field and the organisms agree on every position.
    ///
    /// Every occupied cell must point at an organism recorded there, every
    /// placed organism must be the occupant of its cell, and every living
    /// scheduled organism must be placed.
    #[must_use]
    pub fn occupancy_is_consistent(habitat: &Habitat) -> bool {
        let cells_match = habitat.field.occupied().all(|(location, id)| {
            habitat
                .organisms
                .get(id)
                .is_some_and(|organism| organism.location() == Some(location))
        });
        let organisms_match = habitat.organisms.iter().all(|(id, organism)| {
            organism
                .location()
                .map_or(true, |location| habitat.field.occupant(location) == Some(id))
        });
        let scheduled_placed = habitat.population.iter().all(|id| {
            habitat
                .organisms
                .get(*id)
                .map_or(false, |organism| {
                    !organism.is_alive() || organism.location().is_some()
                })
        });
        cells_match && organisms_match && scheduled_placed
    }
}
