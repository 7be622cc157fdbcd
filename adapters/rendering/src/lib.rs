#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Reef adapters.
//!
//! Adapters never read simulation state directly; they receive a [`Frame`]
//! captured after a step and present it however they like.

use std::{fmt, io::Write, num::NonZeroU64};

use anyhow::{Context, Result as AnyResult};
use reef_core::{Census, Location, RandomSource, Species, WeatherCondition};
use reef_system_population::Simulation;
use reef_world::query;
use thiserror::Error;

/// Character drawn for a cell holding `species`, or for an empty cell.
#[must_use]
pub const fn glyph(species: Option<Species>) -> char {
    match species {
        Some(Species::Shark) => 'S',
        Some(Species::Shrimp) => 's',
        Some(Species::Otter) => 'O',
        Some(Species::Plankton) => 'p',
        Some(Species::Plant) => '*',
        Some(Species::Human) => 'H',
        Some(Species::Pollutant) => '#',
        None => '.',
    }
}

/// Row-major glyph rendering of the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    rows: Vec<String>,
}

impl GlyphGrid {
    /// Rows of glyphs from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Everything an adapter needs to present the state after one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Steps executed so far.
    pub step: u64,
    /// Hour of day.
    pub hour: u32,
    /// Whether it is night.
    pub night: bool,
    /// Current weather condition.
    pub weather: WeatherCondition,
    /// Current temperature.
    pub temperature: u32,
    /// Living organisms per species.
    pub census: Census,
    /// Living animals carrying the infection.
    pub currently_infected: usize,
    /// Infections passed on since the last reset.
    pub infected_total: u64,
    /// Field glyphs, when requested.
    pub grid: Option<GlyphGrid>,
}

impl Frame {
    /// Captures the current state of `simulation`, optionally with the field.
    #[must_use]
    pub fn capture<R: RandomSource>(simulation: &Simulation<R>, with_grid: bool) -> Self {
        let environment = simulation.environment();
        let grid = with_grid.then(|| {
            let habitat = simulation.habitat();
            let field = habitat.field();
            let rows = (0..field.height())
                .map(|row| {
                    (0..field.width())
                        .map(|column| glyph(query::species_at(habitat, Location::new(row, column))))
                        .collect()
                })
                .collect();
            GlyphGrid { rows }
        });
        Self {
            step: simulation.step_count(),
            hour: environment.clock().hour(),
            night: environment.is_night(),
            weather: environment.weather().condition(),
            temperature: environment.weather().temperature(),
            census: simulation.census(),
            currently_infected: simulation.currently_infected(),
            infected_total: simulation.infected_total(),
            grid,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {} | {:02}:00 {} | {} {} | ",
            self.step,
            self.hour,
            if self.night { "night" } else { "day" },
            self.weather.name(),
            self.temperature
        )?;
        for (species, count) in self.census.iter() {
            write!(f, "{} {count} ", species.name())?;
        }
        write!(
            f,
            "| infected {} now, {} total",
            self.currently_infected, self.infected_total
        )
    }
}

/// Errors raised when configuring a rendering adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// Frames must be presented at least every so many steps.
    #[error("render cadence must be positive (received {every})")]
    InvalidCadence {
        /// Provided cadence that failed validation.
        every: u64,
    },
}

/// How often frames are presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderCadence {
    every: NonZeroU64,
}

impl RenderCadence {
    /// Presents a frame every `every` steps.
    pub fn new(every: u64) -> Result<Self, RenderingError> {
        NonZeroU64::new(every)
            .map(|every| Self { every })
            .ok_or(RenderingError::InvalidCadence { every })
    }

    /// Steps between two frames.
    #[must_use]
    pub const fn every(&self) -> u64 {
        self.every.get()
    }
}

/// Contract implemented by every presentation adapter.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

/// Writes frames as plain text.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing into `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        writeln!(self.out, "{frame}").context("failed to write frame summary")?;
        if let Some(grid) = &frame.grid {
            for row in grid.rows() {
                writeln!(self.out, "{row}").context("failed to write field row")?;
            }
        }
        self.out.flush().context("failed to flush frame")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reef_core::{Command, Infection, ScriptedRandom, Sex, Vitals};
    use reef_system_environment::{Clock, Environment, Weather};
    use reef_world::{apply, Habitat};

    fn small_simulation() -> Simulation<ScriptedRandom> {
        let mut habitat = Habitat::new(2, 3);
        let mut events = Vec::new();
        apply(
            &mut habitat,
            Command::Spawn {
                species: Species::Shark,
                at: Location::new(0, 0),
                vitals: Vitals {
                    age: 1,
                    food_level: 9,
                    sex: Some(Sex::Male),
                    infection: Some(Infection::new(true, false)),
                },
            },
            &mut events,
        );
        apply(
            &mut habitat,
            Command::Spawn {
                species: Species::Pollutant,
                at: Location::new(1, 2),
                vitals: Vitals::default(),
            },
            &mut events,
        );
        let environment = Environment::from_parts(
            Clock::at_hour(22),
            Weather::with_condition(WeatherCondition::Cloudy, 4),
        );
        Simulation::with_habitat(habitat, environment, ScriptedRandom::new(vec![], vec![]))
    }

    #[test]
    fn glyphs_cover_every_species() {
        let glyphs: String = Species::ALL.iter().map(|species| glyph(Some(*species))).collect();
        assert_eq!(glyphs, "SsOpH*#");
        assert_eq!(glyph(None), '.');
    }

    #[test]
    fn frame_captures_grid_and_counts() {
        let frame = Frame::capture(&small_simulation(), true);

        assert_eq!(frame.step, 0);
        assert!(frame.night);
        assert_eq!(frame.currently_infected, 1);
        assert_eq!(frame.census.count(Species::Pollutant), 1);
        let grid = frame.grid.expect("grid requested");
        assert_eq!(grid.rows(), &["S..".to_owned(), "..#".to_owned()]);
    }

    #[test]
    fn frame_summary_lists_counts_in_order() {
        let frame = Frame::capture(&small_simulation(), false);
        assert_eq!(
            frame.to_string(),
            "step 0 | 22:00 night | cloudy 4 | shark 1 shrimp 0 otter 0 plankton 0 human 0 \
             plant 0 plastic 1 | infected 1 now, 0 total"
        );
    }

    #[test]
    fn text_backend_writes_summary_then_rows() {
        let mut backend = TextBackend::new(Vec::new());
        backend
            .present(&Frame::capture(&small_simulation(), true))
            .expect("writing to memory succeeds");

        let output = String::from_utf8(backend.into_inner()).expect("utf-8 output");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("step 0 |"));
        assert_eq!(&lines[1..], &["S..", "..#"]);
    }

    #[test]
    fn cadence_rejects_zero() {
        assert_eq!(
            RenderCadence::new(0),
            Err(RenderingError::InvalidCadence { every: 0 })
        );
        assert_eq!(RenderCadence::new(25).map(|cadence| cadence.every()), Ok(25));
    }
}
