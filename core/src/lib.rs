#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Reef ecosystem simulation.
//!
//! This crate defines the vocabulary every other crate speaks: grid
//! [`Location`] values, the closed set of [`Species`], per-individual traits
//! such as [`Sex`] and [`Infection`], the [`WeatherCondition`] categories the
//! environment cycles through, and the [`DeathCause`] recorded when an organism
//! leaves the simulation. Systems never touch the habitat directly: they read
//! views such as [`Neighborhood`] and [`OrganismSnapshot`] and answer with
//! [`Command`] values; the world applies them and reports what happened as
//! [`Event`] values. Species parameters live in static profiles and all
//! randomness flows through the injected [`RandomSource`] contract.

mod random;
mod species;
mod view;
mod vitals;

use serde::{Deserialize, Serialize};

pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use species::{
    AnimalProfile, DietEntry, HumanProfile, PlantProfile, HUMAN, OTTER, PLANKTON, PLANT, SHARK,
    SHRIMP,
};
pub use view::{Neighbor, Neighborhood};
pub use vitals::Vitals;

slotmap::new_key_type! {
    /// Stable handle for organisms backed by a generational slot map.
    pub struct OrganismId;
}

/// Probability that a freshly created animal carries an infection.
pub const INFECTED_AT_BIRTH_PROBABILITY: f64 = 0.4;

/// Probability that a freshly created animal's infection would be lethal.
pub const LETHAL_AT_BIRTH_PROBABILITY: f64 = 0.25;

/// Location of a single field cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    row: u32,
    column: u32,
}

impl Location {
    /// Creates a new field location.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Reports whether `other` is one of the eight cells surrounding this one.
    #[must_use]
    pub fn is_adjacent_to(self, other: Location) -> bool {
        let row_diff = self.row.abs_diff(other.row);
        let column_diff = self.column.abs_diff(other.column);
        row_diff <= 1 && column_diff <= 1 && (row_diff + column_diff) > 0
    }
}

/// Every kind of entity that can occupy a field cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// Apex marine predator feeding on shrimp and plankton.
    Shark,
    /// Small forager grazing on plants.
    Shrimp,
    /// Mid-sized predator feeding on shrimp and plankton.
    Otter,
    /// Drifting forager grazing on plants.
    Plankton,
    /// Stationary producer that only survives sunny steps.
    Plant,
    /// Forager that eats any live animal during daytime.
    Human,
    /// Inert plastic debris that poisons whatever eats it.
    Pollutant,
}

impl Species {
    /// All species in seeding priority order.
    pub const ALL: [Species; 7] = [
        Species::Shark,
        Species::Shrimp,
        Species::Otter,
        Species::Plankton,
        Species::Human,
        Species::Plant,
        Species::Pollutant,
    ];

    /// Reports whether the species is one of the infectable, breeding animals.
    #[must_use]
    pub const fn is_animal(self) -> bool {
        matches!(
            self,
            Species::Shark | Species::Shrimp | Species::Otter | Species::Plankton
        )
    }

    /// Reports whether individuals of the species move between cells.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        self.is_animal() || matches!(self, Species::Human)
    }

    /// Breeding and diet parameters for animal species.
    #[must_use]
    pub fn animal_profile(self) -> Option<&'static AnimalProfile> {
        match self {
            Species::Shark => Some(&SHARK),
            Species::Shrimp => Some(&SHRIMP),
            Species::Otter => Some(&OTTER),
            Species::Plankton => Some(&PLANKTON),
            Species::Plant | Species::Human | Species::Pollutant => None,
        }
    }

    /// Lower-case display name of the species.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Species::Shark => "shark",
            Species::Shrimp => "shrimp",
            Species::Otter => "otter",
            Species::Plankton => "plankton",
            Species::Plant => "plant",
            Species::Human => "human",
            Species::Pollutant => "plastic",
        }
    }

    const fn index(self) -> usize {
        match self {
            Species::Shark => 0,
            Species::Shrimp => 1,
            Species::Otter => 2,
            Species::Plankton => 3,
            Species::Human => 4,
            Species::Plant => 5,
            Species::Pollutant => 6,
        }
    }
}

/// Binary sex assigned uniformly at random when an animal is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male individual.
    Male,
    /// Female individual.
    Female,
}

impl Sex {
    /// Draws a sex with equal probability.
    pub fn sample(rng: &mut dyn RandomSource) -> Self {
        if rng.unit() < 0.5 {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    /// The other sex.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

/// Infection state carried by every animal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Infection {
    infected: bool,
    lethal: bool,
}

impl Infection {
    /// Creates an infection state from explicit flags.
    #[must_use]
    pub const fn new(infected: bool, lethal: bool) -> Self {
        Self { infected, lethal }
    }

    /// Draws the infection and lethality flags of a newly created animal.
    pub fn sample(rng: &mut dyn RandomSource) -> Self {
        let infected = rng.unit() < INFECTED_AT_BIRTH_PROBABILITY;
        let lethal = rng.unit() < LETHAL_AT_BIRTH_PROBABILITY;
        Self { infected, lethal }
    }

    /// Whether the animal currently carries the infection.
    #[must_use]
    pub const fn is_infected(&self) -> bool {
        self.infected
    }

    /// Whether the infection would kill this individual.
    #[must_use]
    pub const fn is_lethal(&self) -> bool {
        self.lethal
    }

    /// Infected and lethal together: the animal dies on its next check.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.infected && self.lethal
    }

    /// Flips the infection flag, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.infected = !self.infected;
        self.infected
    }

    /// Replaces the lethality flag.
    pub fn set_lethal(&mut self, lethal: bool) {
        self.lethal = lethal;
    }
}

/// Categorical weather condition rolled by the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// Clear skies; the only condition plants survive.
    Sunny,
    /// Rain keeps humans from foraging.
    Raining,
    /// Overcast skies.
    Cloudy,
    /// Fallback when no other condition triggers.
    Normal,
}

impl WeatherCondition {
    /// Lower-case display name of the condition.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Raining => "raining",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Normal => "normal",
        }
    }
}

/// Reason an organism left the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Age exceeded the species maximum.
    OldAge,
    /// Food level dropped to zero or below.
    Starvation,
    /// A lethal infection was not cured.
    Infection,
    /// Eaten by another organism.
    Predation,
    /// Ate plastic, or was the plastic that got eaten.
    Poisoning,
    /// No free neighboring cell was left to move into.
    Overcrowding,
    /// A plant experienced a step without sunshine.
    Withered,
    /// A human ate infected remains.
    Disease,
}

impl DeathCause {
    /// Every cause in reporting order.
    pub const ALL: [DeathCause; 8] = [
        DeathCause::OldAge,
        DeathCause::Starvation,
        DeathCause::Infection,
        DeathCause::Predation,
        DeathCause::Poisoning,
        DeathCause::Overcrowding,
        DeathCause::Withered,
        DeathCause::Disease,
    ];

    /// Lower-case display name of the cause.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DeathCause::OldAge => "old age",
            DeathCause::Starvation => "starvation",
            DeathCause::Infection => "infection",
            DeathCause::Predation => "predation",
            DeathCause::Poisoning => "poisoning",
            DeathCause::Overcrowding => "overcrowding",
            DeathCause::Withered => "withered",
            DeathCause::Disease => "disease",
        }
    }
}

/// Commands that mutate the habitat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Places a new organism and schedules it immediately.
    Spawn {
        /// Species of the organism.
        species: Species,
        /// Cell it occupies.
        at: Location,
        /// Starting state.
        vitals: Vitals,
    },
    /// Leaves the dead body of an animal in a cell until the next reap.
    PlaceRemains {
        /// Species the remains belonged to.
        species: Species,
        /// Cell the remains occupy.
        at: Location,
        /// Whether the remains carry the infection.
        infected: bool,
    },
    /// Places a newborn that is only scheduled once newborns are admitted.
    Bear {
        /// Species of the newborn.
        species: Species,
        /// Free cell the newborn occupies.
        at: Location,
        /// Starting state.
        vitals: Vitals,
    },
    /// Advances an organism's age by one step.
    GrowOlder {
        /// Organism that ages.
        id: OrganismId,
    },
    /// Uses up one unit of an organism's food.
    ConsumeFood {
        /// Organism that hungers.
        id: OrganismId,
    },
    /// Replaces an organism's food level after a meal.
    Feed {
        /// Organism that ate.
        id: OrganismId,
        /// Food level after the meal.
        food_level: i32,
    },
    /// Replaces the lethality of an animal's infection.
    SetLethality {
        /// Animal whose infection is redrawn.
        id: OrganismId,
        /// New lethality flag.
        lethal: bool,
    },
    /// Infects the living, uninfected animal occupying a cell, if any.
    Infect {
        /// Cell of the target.
        at: Location,
    },
    /// Moves a living organism into a free cell.
    Relocate {
        /// Organism that moves.
        id: OrganismId,
        /// Destination cell.
        to: Location,
    },
    /// Kills an organism; repeated kills keep the first cause.
    Kill {
        /// Organism that dies.
        id: OrganismId,
        /// Why it died.
        cause: DeathCause,
    },
    /// Clears dead remains from their cell.
    ClearRemains {
        /// Remains to clear.
        id: OrganismId,
    },
    /// Removes every dead organism from the schedule and the arena.
    Reap,
    /// Schedules every living newborn and discards the dead ones.
    AdmitNewborns,
    /// Removes every organism and empties the field.
    Clear,
}

/// Events emitted by the habitat after applying commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// An organism was placed and scheduled.
    OrganismSpawned {
        /// Handle of the new organism.
        id: OrganismId,
        /// Its species.
        species: Species,
        /// Cell it occupies.
        at: Location,
    },
    /// Remains were left in a cell.
    RemainsPlaced {
        /// Handle of the remains.
        id: OrganismId,
        /// Species the remains belonged to.
        species: Species,
        /// Cell the remains occupy.
        at: Location,
    },
    /// A newborn was placed but not yet scheduled.
    OrganismBorn {
        /// Handle of the newborn.
        id: OrganismId,
        /// Its species.
        species: Species,
        /// Cell it occupies.
        at: Location,
    },
    /// An organism moved between cells.
    OrganismMoved {
        /// Organism that moved.
        id: OrganismId,
        /// Cell it left.
        from: Location,
        /// Cell it entered.
        to: Location,
    },
    /// An animal caught the infection.
    OrganismInfected {
        /// Animal that was infected.
        id: OrganismId,
    },
    /// A living organism died.
    OrganismDied {
        /// Organism that died.
        id: OrganismId,
        /// Its species.
        species: Species,
        /// Why it died.
        cause: DeathCause,
    },
    /// Remains were cleared from their cell.
    RemainsCleared {
        /// Handle of the remains.
        id: OrganismId,
        /// Cell that became free.
        at: Location,
    },
    /// A dead organism left the schedule.
    OrganismRemoved {
        /// Handle of the removed organism.
        id: OrganismId,
        /// Its species.
        species: Species,
        /// Recorded cause; remains carry none.
        cause: Option<DeathCause>,
    },
    /// A newborn joined the schedule.
    NewbornAdmitted {
        /// Handle of the newborn.
        id: OrganismId,
    },
    /// Every organism was removed.
    HabitatCleared,
}

/// Immutable representation of a single organism used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganismSnapshot {
    /// Handle of the organism within the habitat.
    pub id: OrganismId,
    /// Species of the organism.
    pub species: Species,
    /// Cell currently occupied, `None` once the organism has died.
    pub location: Option<Location>,
    /// Number of steps lived.
    pub age: u32,
    /// Remaining food; stationary species report zero.
    pub food_level: i32,
    /// Sex of animals; `None` for every other species.
    pub sex: Option<Sex>,
    /// Infection state of animals; `None` for every other species.
    pub infection: Option<Infection>,
    /// Whether the organism is still alive.
    pub alive: bool,
}

impl OrganismSnapshot {
    /// Whether the organism is an animal carrying the infection.
    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.infection.is_some_and(|infection| infection.is_infected())
    }
}

/// Population counts per species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    counts: [usize; 7],
}

impl Census {
    /// Records one living individual of `species`.
    pub fn record(&mut self, species: Species) {
        self.counts[species.index()] += 1;
    }

    /// Number of living individuals of `species`.
    #[must_use]
    pub const fn count(&self, species: Species) -> usize {
        self.counts[species.index()]
    }

    /// Total number of living organisms.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of species with at least one living individual.
    #[must_use]
    pub fn species_present(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// A field stays viable while more than one species is present.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        self.species_present() > 1
    }

    /// Iterator over `(species, count)` pairs in seeding priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Species, usize)> + '_ {
        Species::ALL
            .iter()
            .map(move |species| (*species, self.count(*species)))
    }
}
