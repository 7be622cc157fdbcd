#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Population scheduler driving the Reef simulation one step at a time.
//!
//! A [`Simulation`] owns the habitat, the environment, the infection ledger
//! and the random source. Each [`Simulation::step`] advances the environment,
//! lets every scheduled organism act in population order, reaps the dead and
//! only then admits the step's newborns. Each organism's commands are applied
//! to the habitat before the next organism acts.

mod config;

use reef_core::{
    Census, Command, DeathCause, Event, Location, OrganismSnapshot, RandomSource, SeededRandom,
    Species, Vitals, WeatherCondition,
};
use reef_system_behavior::Behavior;
use reef_system_environment::Environment;
use reef_system_infection::InfectionLedger;
use reef_world::{apply, query, Habitat};
use tracing::{debug, info, trace};

pub use config::{
    ConfigError, SeedingProbabilities, SimulationConfig, DEFAULT_DEPTH, DEFAULT_WIDTH,
};

/// Step limit of a long unattended run.
pub const LONG_RUN_STEPS: u64 = 4_000;

/// Deaths of one step grouped by cause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeathTally {
    counts: [usize; 8],
}

impl DeathTally {
    /// Records one death.
    pub fn record(&mut self, cause: DeathCause) {
        if let Some(index) = DeathCause::ALL.iter().position(|known| *known == cause) {
            self.counts[index] += 1;
        }
    }

    /// Deaths attributed to `cause`.
    #[must_use]
    pub fn count(&self, cause: DeathCause) -> usize {
        DeathCause::ALL
            .iter()
            .position(|known| *known == cause)
            .map_or(0, |index| self.counts[index])
    }

    /// Deaths across every cause.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(cause, count)` pairs for causes that occurred.
    pub fn iter(&self) -> impl Iterator<Item = (DeathCause, usize)> + '_ {
        DeathCause::ALL
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(cause, count)| (*cause, *count))
    }
}

/// Summary of a single step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// One-based index of the step.
    pub step: u64,
    /// Hour after the clock advanced.
    pub hour: u32,
    /// Whether the step took place at night.
    pub night: bool,
    /// Weather during the step.
    pub weather: WeatherCondition,
    /// Temperature during the step.
    pub temperature: u32,
    /// Newborns admitted at the end of the step.
    pub births: usize,
    /// Scheduled organisms removed at the end of the step.
    pub deaths: DeathTally,
    /// Living organisms after the step.
    pub census: Census,
    /// Infections passed on since the last reset.
    pub infected_total: u64,
    /// Living animals carrying the infection after the step.
    pub currently_infected: usize,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// The requested number of steps was executed.
    StepLimit,
    /// The viability predicate rejected the population.
    NotViable,
}

/// Outcome of [`Simulation::run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Steps executed by this run.
    pub steps: u64,
    /// Reason the run stopped.
    pub halt: Halt,
    /// Report of the last executed step, if any.
    pub last: Option<StepReport>,
}

/// Owns every piece of simulation state and advances it step by step.
#[derive(Debug)]
pub struct Simulation<R = SeededRandom> {
    config: SimulationConfig,
    habitat: Habitat,
    environment: Environment,
    behavior: Behavior,
    ledger: InfectionLedger,
    rng: R,
    step: u64,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation<SeededRandom> {
    /// Seeds a new simulation from a fixed seed.
    #[must_use]
    pub fn seeded(config: SimulationConfig, seed: u64) -> Self {
        Self::new(config, SeededRandom::from_seed(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Creates a simulation and seeds its initial population.
    ///
    /// Empty field dimensions fall back to the defaults with a warning.
    pub fn new(config: SimulationConfig, mut rng: R) -> Self {
        let config = config.with_fallback_dimensions();
        let environment = Environment::new(&mut rng);
        let mut simulation = Self {
            habitat: Habitat::new(config.depth, config.width),
            config,
            environment,
            behavior: Behavior::new(),
            ledger: InfectionLedger::new(),
            rng,
            step: 0,
            commands: Vec::new(),
            events: Vec::new(),
        };
        simulation.populate();
        simulation
    }

    /// Wraps a prepared habitat and environment without seeding anything.
    pub fn with_habitat(habitat: Habitat, environment: Environment, rng: R) -> Self {
        let config = SimulationConfig {
            depth: habitat.field().height(),
            width: habitat.field().width(),
            ..SimulationConfig::default()
        };
        Self {
            config,
            habitat,
            environment,
            behavior: Behavior::new(),
            ledger: InfectionLedger::new(),
            rng,
            step: 0,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Advances the whole population by one step.
    pub fn step(&mut self) -> StepReport {
        self.environment.advance(&mut self.rng);
        self.step += 1;

        let order = self.habitat.population().to_vec();
        for id in order {
            let Some(subject) = query::snapshot(&self.habitat, id) else {
                continue;
            };
            let Some(location) = subject.location.filter(|_| subject.alive) else {
                continue;
            };
            let neighborhood = query::neighborhood(&self.habitat, location);
            self.behavior.handle(
                &subject,
                &neighborhood,
                &self.environment,
                &mut self.rng,
                &mut self.commands,
            );
            for command in self.commands.drain(..) {
                apply(&mut self.habitat, command, &mut self.events);
            }
            self.ledger.handle(&self.events);
            for event in self.events.drain(..) {
                if let Event::OrganismDied { species, cause, .. } = event {
                    trace!(
                        step = self.step,
                        species = species.name(),
                        cause = cause.name(),
                        "organism died"
                    );
                }
            }
        }

        apply(&mut self.habitat, Command::Reap, &mut self.events);
        apply(&mut self.habitat, Command::AdmitNewborns, &mut self.events);
        let mut deaths = DeathTally::default();
        let mut births = 0;
        for event in self.events.drain(..) {
            match event {
                Event::OrganismRemoved {
                    cause: Some(cause), ..
                } => deaths.record(cause),
                Event::NewbornAdmitted { .. } => births += 1,
                _ => {}
            }
        }
        debug_assert!(
            query::occupancy_is_consistent(&self.habitat),
            "field and organisms disagree after step {}",
            self.step
        );

        let report = StepReport {
            step: self.step,
            hour: self.environment.clock().hour(),
            night: self.environment.is_night(),
            weather: self.environment.weather().condition(),
            temperature: self.environment.weather().temperature(),
            births,
            deaths,
            census: query::census(&self.habitat),
            infected_total: self.ledger.total(),
            currently_infected: query::currently_infected(&self.habitat),
        };
        debug!(
            step = report.step,
            hour = report.hour,
            weather = report.weather.name(),
            births = report.births,
            deaths = report.deaths.total(),
            population = report.census.total(),
            "step complete"
        );
        report
    }

    /// Steps until `max_steps` have run or `viable` rejects the census.
    ///
    /// Viability is checked before every step.
    pub fn run<F>(&mut self, max_steps: u64, mut viable: F) -> RunSummary
    where
        F: FnMut(&Census) -> bool,
    {
        let mut steps = 0;
        let mut last = None;
        while steps < max_steps {
            if !viable(&self.census()) {
                return RunSummary {
                    steps,
                    halt: Halt::NotViable,
                    last,
                };
            }
            last = Some(self.step());
            steps += 1;
        }
        RunSummary {
            steps,
            halt: Halt::StepLimit,
            last,
        }
    }

    /// Runs for a long period while more than one species survives.
    pub fn run_long(&mut self) -> RunSummary {
        self.run(LONG_RUN_STEPS, Census::is_viable)
    }

    /// Clears everything and seeds a fresh population.
    ///
    /// The clock restarts at midnight with new weather, and the infection
    /// tally returns to zero.
    pub fn reset(&mut self) {
        apply(&mut self.habitat, Command::Clear, &mut self.events);
        self.events.clear();
        self.ledger.reset();
        self.environment = Environment::new(&mut self.rng);
        self.step = 0;
        self.populate();
    }

    /// Configuration the simulation was built with.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Field and organisms.
    #[must_use]
    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    /// Clock and weather.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Steps executed since construction or the last reset.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Infections passed on since the last reset.
    #[must_use]
    pub fn infected_total(&self) -> u64 {
        self.ledger.total()
    }

    /// Living animals currently carrying the infection.
    #[must_use]
    pub fn currently_infected(&self) -> usize {
        query::currently_infected(&self.habitat)
    }

    /// Living organisms per species.
    #[must_use]
    pub fn census(&self) -> Census {
        query::census(&self.habitat)
    }

    /// Whether more than one species is still present.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        self.census().is_viable()
    }

    /// Every scheduled organism in acting order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<OrganismSnapshot> {
        query::snapshots(&self.habitat)
    }

    fn populate(&mut self) {
        let seeding = self.config.seeding;
        for row in 0..self.config.depth {
            for column in 0..self.config.width {
                let location = Location::new(row, column);
                let chosen = Species::ALL
                    .into_iter()
                    .find(|species| self.rng.chance(seeding.probability_of(*species)));
                if let Some(species) = chosen {
                    let vitals = Vitals::seeded(species, &mut self.rng);
                    apply(
                        &mut self.habitat,
                        Command::Spawn {
                            species,
                            at: location,
                            vitals,
                        },
                        &mut self.events,
                    );
                }
            }
        }
        self.events.clear();
        let census = self.census();
        info!(
            depth = self.config.depth,
            width = self.config.width,
            population = census.total(),
            "habitat seeded"
        );
    }
}
