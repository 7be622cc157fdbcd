#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Day/night clock and stochastic weather shared by every organism.
//!
//! The scheduler advances the [`Environment`] once per step before any
//! organism acts; behaviors only read it.

use reef_core::{RandomSource, WeatherCondition};
use tracing::debug;

const HOURS_PER_DAY: u32 = 24;
const NIGHT_STARTS_AT: u32 = 21;
const DAY_STARTS_AT: u32 = 6;
const WEATHER_PERIOD_HOURS: u32 = 8;

const SUNNY_PROBABILITY: f64 = 0.5;
const RAINING_PROBABILITY: f64 = 0.9;
const CLOUDY_PROBABILITY: f64 = 0.2;

/// Hour-of-day counter with a fixed nocturnal window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    hour: u32,
}

impl Clock {
    /// Creates a clock showing `hour`, wrapped into a single day.
    #[must_use]
    pub const fn at_hour(hour: u32) -> Self {
        Self {
            hour: hour % HOURS_PER_DAY,
        }
    }

    /// Moves the clock forward one hour, wrapping at midnight.
    pub fn advance(&mut self) {
        self.hour = (self.hour + 1) % HOURS_PER_DAY;
    }

    /// Current hour in `0..24`.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Night runs from 21:00 through 05:59.
    #[must_use]
    pub const fn is_night(&self) -> bool {
        self.hour >= NIGHT_STARTS_AT || self.hour < DAY_STARTS_AT
    }
}

/// Categorical weather with a condition-dependent temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weather {
    condition: WeatherCondition,
    temperature: u32,
}

impl Weather {
    /// Rolls an initial condition and temperature.
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        let mut weather = Self {
            condition: WeatherCondition::Normal,
            temperature: 0,
        };
        weather.roll(rng);
        weather
    }

    /// Weather with an explicit condition and temperature. It holds until the
    /// next period boundary like any rolled weather.
    #[must_use]
    pub const fn with_condition(condition: WeatherCondition, temperature: u32) -> Self {
        Self {
            condition,
            temperature,
        }
    }

    /// Re-rolls the weather when `hour` starts a new eight-hour period.
    pub fn advance(&mut self, hour: u32, rng: &mut dyn RandomSource) {
        if hour % WEATHER_PERIOD_HOURS != 0 {
            return;
        }
        self.roll(rng);
        debug!(
            hour,
            condition = self.condition.name(),
            temperature = self.temperature,
            "weather changed"
        );
    }

    /// Current condition.
    #[must_use]
    pub const fn condition(&self) -> WeatherCondition {
        self.condition
    }

    /// Current temperature.
    #[must_use]
    pub const fn temperature(&self) -> u32 {
        self.temperature
    }

    /// Whether the sky is clear.
    #[must_use]
    pub fn is_sunny(&self) -> bool {
        self.condition == WeatherCondition::Sunny
    }

    /// Whether it is raining.
    #[must_use]
    pub fn is_raining(&self) -> bool {
        self.condition == WeatherCondition::Raining
    }

    fn roll(&mut self, rng: &mut dyn RandomSource) {
        self.condition = if rng.chance(SUNNY_PROBABILITY) {
            WeatherCondition::Sunny
        } else if rng.chance(RAINING_PROBABILITY) {
            WeatherCondition::Raining
        } else if rng.chance(CLOUDY_PROBABILITY) {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::Normal
        };
        self.temperature = rng.below(temperature_bound(self.condition));
    }
}

fn temperature_bound(condition: WeatherCondition) -> u32 {
    match condition {
        WeatherCondition::Sunny => 18,
        WeatherCondition::Raining => 7,
        WeatherCondition::Cloudy => 5,
        WeatherCondition::Normal => 31,
    }
}

/// Clock and weather advanced together once per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Environment {
    clock: Clock,
    weather: Weather,
}

impl Environment {
    /// Starts at midnight with freshly rolled weather.
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        Self {
            clock: Clock::default(),
            weather: Weather::new(rng),
        }
    }

    /// Builds an environment from explicit parts.
    #[must_use]
    pub const fn from_parts(clock: Clock, weather: Weather) -> Self {
        Self { clock, weather }
    }

    /// Advances the clock one hour, then lets the weather react to the new hour.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) {
        self.clock.advance();
        self.weather.advance(self.clock.hour(), rng);
    }

    /// Current clock.
    #[must_use]
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current weather.
    #[must_use]
    pub const fn weather(&self) -> &Weather {
        &self.weather
    }

    /// Shorthand for the clock's night flag.
    #[must_use]
    pub const fn is_night(&self) -> bool {
        self.clock.is_night()
    }
}
