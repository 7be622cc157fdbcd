use crate::{Infection, RandomSource, Sex, Species, HUMAN, PLANT};

/// Starting state of an organism entering the habitat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vitals {
    /// Steps already lived.
    pub age: u32,
    /// Remaining food.
    pub food_level: i32,
    /// Sex; ignored for species without one.
    pub sex: Option<Sex>,
    /// Infection state; ignored for species without one.
    pub infection: Option<Infection>,
}

impl Vitals {
    /// Vitals of an individual seeded into a fresh habitat.
    ///
    /// Animals draw sex and infection first, then age and food. Humans draw
    /// age and food, plants only age; plastic draws nothing.
    pub fn seeded(species: Species, rng: &mut dyn RandomSource) -> Self {
        let mut vitals = Self::traits(species, rng);
        if let Some(profile) = species.animal_profile() {
            vitals.age = rng.below(profile.max_age);
            vitals.food_level = draw_food(rng, profile.starting_ration);
        } else {
            match species {
                Species::Human => {
                    vitals.age = rng.below(HUMAN.max_age);
                    vitals.food_level = draw_food(rng, HUMAN.seeded_food_bound);
                }
                Species::Plant => vitals.age = rng.below(PLANT.max_age),
                _ => {}
            }
        }
        vitals
    }

    /// Vitals of a newborn: age zero with the species ration.
    pub fn newborn(species: Species, rng: &mut dyn RandomSource) -> Self {
        let mut vitals = Self::traits(species, rng);
        vitals.food_level = match species.animal_profile() {
            Some(profile) => profile.starting_ration,
            None if species == Species::Human => HUMAN.starting_ration,
            None => 0,
        };
        vitals
    }

    fn traits(species: Species, rng: &mut dyn RandomSource) -> Self {
        if !species.is_animal() {
            return Self::default();
        }
        let sex = Sex::sample(rng);
        let infection = Infection::sample(rng);
        Self {
            sex: Some(sex),
            infection: Some(infection),
            ..Self::default()
        }
    }
}

fn draw_food(rng: &mut dyn RandomSource, bound: i32) -> i32 {
    let bound = u32::try_from(bound).unwrap_or(0);
    i32::try_from(rng.below(bound)).unwrap_or(0)
}
