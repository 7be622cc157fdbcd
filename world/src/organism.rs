use reef_core::{DeathCause, Infection, Location, Sex, Species, Vitals};

/// A single entity living in the habitat.
///
/// Position and liveness change only through [`crate::apply`], which keeps
/// the field and the organism in agreement about where the organism is.
#[derive(Clone, Debug, PartialEq)]
pub struct Organism {
    species: Species,
    location: Option<Location>,
    alive: bool,
    age: u32,
    food_level: i32,
    sex: Option<Sex>,
    infection: Option<Infection>,
    cause_of_death: Option<DeathCause>,
}

impl Organism {
    /// Creates an unplaced living organism with explicit vitals.
    ///
    /// Sex and infection are kept only for animals; animals missing either
    /// default to male and uninfected.
    #[must_use]
    pub(crate) fn with_vitals(species: Species, vitals: Vitals) -> Self {
        let (sex, infection) = if species.is_animal() {
            (
                Some(vitals.sex.unwrap_or(Sex::Male)),
                Some(vitals.infection.unwrap_or_default()),
            )
        } else {
            (None, None)
        };
        Self {
            species,
            location: None,
            alive: true,
            age: vitals.age,
            food_level: vitals.food_level,
            sex,
            infection,
            cause_of_death: None,
        }
    }

    /// Species of the organism.
    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    /// Whether the organism is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Steps lived so far.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Remaining food.
    #[must_use]
    pub const fn food_level(&self) -> i32 {
        self.food_level
    }

    /// Sex of animals.
    #[must_use]
    pub const fn sex(&self) -> Option<Sex> {
        self.sex
    }

    /// Infection state of animals.
    #[must_use]
    pub const fn infection(&self) -> Option<Infection> {
        self.infection
    }

    /// Whether the organism is an animal currently carrying the infection.
    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.infection.is_some_and(|infection| infection.is_infected())
    }

    /// Why the organism died, once it has.
    #[must_use]
    pub const fn cause_of_death(&self) -> Option<DeathCause> {
        self.cause_of_death
    }

    pub(crate) fn grow_older(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    pub(crate) fn consume_food(&mut self) {
        self.food_level = self.food_level.saturating_sub(1);
    }

    pub(crate) fn set_food_level(&mut self, food_level: i32) {
        self.food_level = food_level;
    }

    pub(crate) fn infection_mut(&mut self) -> Option<&mut Infection> {
        self.infection.as_mut()
    }

    pub(crate) fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    pub(crate) fn mark_dead(&mut self, cause: DeathCause) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.cause_of_death = Some(cause);
        true
    }

    pub(crate) fn mark_remains(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::Organism;
    use reef_core::{Infection, Sex, Species, Vitals};

    #[test]
    fn explicit_vitals_drop_animal_traits_for_plants() {
        let plant = Organism::with_vitals(
            Species::Plant,
            Vitals {
                age: 3,
                food_level: 0,
                sex: Some(Sex::Female),
                infection: Some(Infection::new(true, true)),
            },
        );
        assert_eq!(plant.sex(), None);
        assert!(!plant.is_infected());
    }

    #[test]
    fn animals_without_traits_default_to_healthy_males() {
        let shrimp = Organism::with_vitals(Species::Shrimp, Vitals::default());
        assert_eq!(shrimp.sex(), Some(Sex::Male));
        assert_eq!(shrimp.infection(), Some(Infection::default()));
        assert!(shrimp.is_alive());
        assert_eq!(shrimp.location(), None);
    }

    #[test]
    fn hunger_and_aging_move_one_unit() {
        let mut shrimp = Organism::with_vitals(
            Species::Shrimp,
            Vitals {
                age: 2,
                food_level: 1,
                ..Vitals::default()
            },
        );
        shrimp.grow_older();
        shrimp.consume_food();
        assert_eq!((shrimp.age(), shrimp.food_level()), (3, 0));
    }
}
