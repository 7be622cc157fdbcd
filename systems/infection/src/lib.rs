#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Infection model: self-cure rolls, contact spread and the running tally of
//! new infections.

use reef_core::{Command, Event, Location, OrganismSnapshot, RandomSource};

/// Chance that an infected animal passes the infection to one susceptible
/// neighbor during a step.
pub const INFECTION_PROBABILITY: f64 = 0.12;

/// One in this many self-cure rolls makes the infection non-lethal.
pub const CURE_ODDS: u32 = 11;

/// Cumulative count of infections passed on since the last reset.
///
/// The tally only grows; animals that die or recover are not subtracted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfectionLedger {
    total: u64,
}

impl InfectionLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// Counts the infections confirmed by the habitat.
    pub fn handle(&mut self, events: &[Event]) {
        let infected = events
            .iter()
            .filter(|event| matches!(event, Event::OrganismInfected { .. }))
            .count();
        self.total = self
            .total
            .saturating_add(u64::try_from(infected).unwrap_or(u64::MAX));
    }

    /// Infections recorded since the last reset.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Clears the tally at a run boundary.
    pub fn reset(&mut self) {
        self.total = 0;
    }
}

/// Whether `occupant` is a living animal that does not carry the infection.
#[must_use]
pub fn is_susceptible(occupant: &OrganismSnapshot) -> bool {
    occupant.alive && occupant.infection.is_some_and(|state| !state.is_infected())
}

/// Redraws the lethality of an infected animal.
///
/// Uninfected animals and non-animals are left alone without consuming a draw.
pub fn self_cure(subject: &OrganismSnapshot, rng: &mut dyn RandomSource, out: &mut Vec<Command>) {
    if !subject.is_infected() {
        return;
    }
    out.push(Command::SetLethality {
        id: subject.id,
        lethal: rng.below(CURE_ODDS) != 1,
    });
}

/// Lets a living, infected animal infect the susceptible cells around it.
///
/// `susceptible` lists the cells of living, uninfected animals in scan order;
/// one draw is made per cell. Returns the number of infections requested.
pub fn spread(
    subject: &OrganismSnapshot,
    susceptible: &[Location],
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) -> usize {
    if !subject.alive || !subject.is_infected() {
        return 0;
    }
    let before = out.len();
    for at in susceptible {
        if rng.chance(INFECTION_PROBABILITY) {
            out.push(Command::Infect { at: *at });
        }
    }
    out.len() - before
}

#[cfg(test)]
mod tests {
    use super::{is_susceptible, self_cure, spread, InfectionLedger};
    use reef_core::{
        Command, Event, Infection, Location, OrganismId, OrganismSnapshot, ScriptedRandom, Sex,
        Species,
    };

    fn snapshot(species: Species, infection: Option<Infection>) -> OrganismSnapshot {
        OrganismSnapshot {
            id: OrganismId::default(),
            species,
            location: Some(Location::new(1, 1)),
            age: 1,
            food_level: 5,
            sex: infection.map(|_| Sex::Male),
            infection,
            alive: true,
        }
    }

    #[test]
    fn self_cure_only_rolls_for_infected_animals() {
        let healthy = snapshot(Species::Shrimp, Some(Infection::new(false, true)));
        let sick = snapshot(Species::Shark, Some(Infection::new(true, true)));
        let mut rng = ScriptedRandom::new(vec![], vec![1]);
        let mut out = Vec::new();

        self_cure(&healthy, &mut rng, &mut out);
        self_cure(&sick, &mut rng, &mut out);

        assert!(rng.is_exhausted());
        assert_eq!(
            out,
            vec![Command::SetLethality {
                id: sick.id,
                lethal: false
            }]
        );
    }

    #[test]
    fn failed_cure_roll_makes_the_infection_lethal() {
        let sick = snapshot(Species::Otter, Some(Infection::new(true, false)));
        let mut rng = ScriptedRandom::new(vec![], vec![0]);
        let mut out = Vec::new();
        self_cure(&sick, &mut rng, &mut out);
        assert_eq!(
            out,
            vec![Command::SetLethality {
                id: sick.id,
                lethal: true
            }]
        );
    }

    #[test]
    fn spread_draws_once_per_susceptible_cell() {
        let carrier = snapshot(Species::Shark, Some(Infection::new(true, false)));
        let cells = [Location::new(1, 0), Location::new(2, 2)];
        let mut rng = ScriptedRandom::new(vec![0.5, 0.12], vec![]);
        let mut out = Vec::new();

        assert_eq!(spread(&carrier, &cells, &mut rng, &mut out), 1);
        assert!(rng.is_exhausted());
        assert_eq!(
            out,
            vec![Command::Infect {
                at: Location::new(2, 2)
            }]
        );
    }

    #[test]
    fn healthy_animals_do_not_spread() {
        let healthy = snapshot(Species::Shrimp, Some(Infection::default()));
        let mut rng = ScriptedRandom::new(vec![0.0], vec![]);
        let mut out = Vec::new();
        assert_eq!(
            spread(&healthy, &[Location::new(0, 1)], &mut rng, &mut out),
            0
        );
        assert!(out.is_empty());
        assert!(!rng.is_exhausted());
    }

    #[test]
    fn only_living_uninfected_animals_are_susceptible() {
        let mut remains = snapshot(Species::Plankton, Some(Infection::default()));
        remains.alive = false;

        assert!(is_susceptible(&snapshot(Species::Otter, Some(Infection::default()))));
        assert!(!is_susceptible(&snapshot(
            Species::Otter,
            Some(Infection::new(true, false))
        )));
        assert!(!is_susceptible(&snapshot(Species::Plant, None)));
        assert!(!is_susceptible(&snapshot(Species::Human, None)));
        assert!(!is_susceptible(&remains));
    }

    #[test]
    fn ledger_counts_confirmed_infections_until_reset() {
        let mut ledger = InfectionLedger::new();
        let id = OrganismId::default();
        ledger.handle(&[
            Event::OrganismInfected { id },
            Event::RemainsCleared {
                id,
                at: Location::new(0, 0),
            },
            Event::OrganismInfected { id },
        ]);
        assert_eq!(ledger.total(), 2);
        ledger.reset();
        assert_eq!(ledger.total(), 0);
    }
}
