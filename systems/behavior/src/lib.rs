#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-species behavior rules executed once per organism per step.
//!
//! Every organism shares the same contract: given a snapshot of itself, a view
//! of its neighborhood and the environment, [`Behavior::handle`] emits the
//! commands that age it, feed it, breed it, move it or kill it. The scheduler
//! applies those commands before the next organism acts, so later actors see
//! earlier moves.

mod animal;
mod breeding;
mod human;
mod plant;

use breeding::Newborn;
use reef_core::{
    Command, DeathCause, Location, Neighborhood, OrganismId, OrganismSnapshot, RandomSource,
    Species,
};
use reef_system_environment::Environment;

/// Pure system that turns one organism's surroundings into lifecycle commands.
#[derive(Debug, Default)]
pub struct Behavior {
    litter: Vec<Newborn>,
}

impl Behavior {
    /// Creates the behavior system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the commands for one step of `subject`.
    ///
    /// Dead subjects and plastic emit nothing. Commands are ordered; applying
    /// them in sequence reproduces the species rule set.
    pub fn handle(
        &mut self,
        subject: &OrganismSnapshot,
        neighborhood: &Neighborhood,
        environment: &Environment,
        rng: &mut dyn RandomSource,
        out: &mut Vec<Command>,
    ) {
        if !subject.alive {
            return;
        }
        self.litter.clear();
        match subject.species {
            Species::Shark | Species::Shrimp | Species::Otter | Species::Plankton => {
                if let Some(profile) = subject.species.animal_profile() {
                    animal::act(subject, profile, neighborhood, &mut self.litter, rng, out);
                }
            }
            Species::Plant => plant::act(
                subject,
                neighborhood,
                environment,
                &mut self.litter,
                rng,
                out,
            ),
            Species::Human => human::act(subject, neighborhood, environment, rng, out),
            Species::Pollutant => {}
        }
    }
}

/// Ages and hungers `subject`; returns whether it survives both.
fn age_and_hunger(subject: &OrganismSnapshot, max_age: u32, out: &mut Vec<Command>) -> bool {
    let id = subject.id;
    out.push(Command::GrowOlder { id });
    out.push(Command::ConsumeFood { id });
    let cause = if subject.age.saturating_add(1) > max_age {
        Some(DeathCause::OldAge)
    } else if subject.food_level.saturating_sub(1) <= 0 {
        Some(DeathCause::Starvation)
    } else {
        None
    };
    match cause {
        Some(cause) => {
            out.push(Command::Kill { id, cause });
            false
        }
        None => true,
    }
}

/// Moves into a random free neighbor not taken by this step's litter, or dies
/// of overcrowding when none is left.
fn wander(
    id: OrganismId,
    neighborhood: &Neighborhood,
    litter: &[Newborn],
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let free: Vec<Location> = neighborhood
        .free_cells()
        .into_iter()
        .filter(|cell| litter.iter().all(|newborn| newborn.location != *cell))
        .collect();
    if free.is_empty() {
        out.push(Command::Kill {
            id,
            cause: DeathCause::Overcrowding,
        });
        return;
    }
    let bound = u32::try_from(free.len()).unwrap_or(u32::MAX);
    let pick = usize::try_from(rng.below(bound)).unwrap_or(0);
    if let Some(to) = free.get(pick) {
        out.push(Command::Relocate { id, to: *to });
    }
}

#[cfg(test)]
mod testing {
    use reef_core::{Command, Event, Location, OrganismId, RandomSource, Species, Vitals};
    use reef_system_environment::Environment;
    use reef_world::{apply, query, Habitat};

    use crate::Behavior;

    pub(crate) fn place(
        habitat: &mut Habitat,
        species: Species,
        vitals: Vitals,
        at: Location,
    ) -> OrganismId {
        let mut events = Vec::new();
        apply(habitat, Command::Spawn { species, at, vitals }, &mut events);
        match events.as_slice() {
            [Event::OrganismSpawned { id, .. }] => *id,
            other => panic!("unexpected spawn events {other:?}"),
        }
    }

    pub(crate) fn place_remains(
        habitat: &mut Habitat,
        species: Species,
        at: Location,
        infected: bool,
    ) -> OrganismId {
        let mut events = Vec::new();
        apply(
            habitat,
            Command::PlaceRemains {
                species,
                at,
                infected,
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::RemainsPlaced { id, .. }] => *id,
            other => panic!("unexpected remains events {other:?}"),
        }
    }

    /// Lets `id` act once and applies its commands; returns the events.
    pub(crate) fn act_once(
        habitat: &mut Habitat,
        id: OrganismId,
        environment: &Environment,
        rng: &mut dyn RandomSource,
    ) -> Vec<Event> {
        let subject = query::snapshot(habitat, id).expect("subject exists");
        let location = subject.location.expect("subject is placed");
        let neighborhood = query::neighborhood(habitat, location);
        let mut commands = Vec::new();
        Behavior::new().handle(&subject, &neighborhood, environment, rng, &mut commands);
        let mut events = Vec::new();
        for command in commands {
            apply(habitat, command, &mut events);
        }
        events
    }

    pub(crate) fn born(events: &[Event]) -> Vec<OrganismId> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::OrganismBorn { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use reef_core::{
        Command, DeathCause, Location, Neighbor, Neighborhood, OrganismId, ScriptedRandom, Vitals,
    };

    use crate::breeding::Newborn;
    use crate::wander;

    fn open_row() -> Neighborhood {
        let cells = [(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]
            .into_iter()
            .map(|(row, column)| Neighbor {
                location: Location::new(row, column),
                occupant: None,
            })
            .collect();
        Neighborhood::new(Location::new(0, 1), cells)
    }

    #[test]
    fn wander_skips_cells_taken_by_the_litter() {
        let litter = [Newborn {
            location: Location::new(0, 0),
            vitals: Vitals::default(),
        }];
        let id = OrganismId::default();
        let mut rng = ScriptedRandom::new(vec![], vec![1]);
        let mut out = Vec::new();

        wander(id, &open_row(), &litter, &mut rng, &mut out);

        assert_eq!(
            out,
            vec![Command::Relocate {
                id,
                to: Location::new(1, 0)
            }]
        );
        assert!(rng.is_exhausted());
    }

    #[test]
    fn wander_without_room_draws_nothing() {
        let id = OrganismId::default();
        let cells = open_row()
            .iter()
            .map(|neighbor| Newborn {
                location: neighbor.location,
                vitals: Vitals::default(),
            })
            .collect::<Vec<_>>();
        let mut rng = ScriptedRandom::new(vec![], vec![0]);
        let mut out = Vec::new();

        wander(id, &open_row(), &cells, &mut rng, &mut out);

        assert_eq!(
            out,
            vec![Command::Kill {
                id,
                cause: DeathCause::Overcrowding
            }]
        );
        assert!(!rng.is_exhausted());
    }
}
