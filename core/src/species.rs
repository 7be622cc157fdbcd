use crate::Species;

/// Food value an animal gains from eating one individual of `prey`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DietEntry {
    /// Species that counts as food.
    pub prey: Species,
    /// Food level assigned after eating one individual.
    pub food_value: i32,
}

/// Parameters shared by every individual of one animal species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimalProfile {
    /// Minimum age at which breeding is possible.
    pub breeding_age: u32,
    /// Oldest age an individual survives; one step past it the animal dies.
    pub max_age: u32,
    /// Probability of breeding on a step where every other condition holds.
    pub breeding_probability: f64,
    /// Largest litter a successful breeding produces.
    pub max_litter_size: u32,
    /// Acceptable prey with their food values.
    pub diet: &'static [DietEntry],
    /// Food level given to newborns; seeded individuals draw below it.
    pub starting_ration: i32,
    /// Food level a human gains from eating one individual.
    pub food_value: i32,
}

impl AnimalProfile {
    /// Food value of `prey`, or `None` when it is not part of the diet.
    #[must_use]
    pub fn food_value_of(&self, prey: Species) -> Option<i32> {
        self.diet
            .iter()
            .find(|entry| entry.prey == prey)
            .map(|entry| entry.food_value)
    }
}

/// Parameters of the stationary producer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantProfile {
    /// Oldest age a plant survives.
    pub max_age: u32,
    /// Probability of producing offspring on a sunny step.
    pub breeding_probability: f64,
    /// Largest number of seedlings produced at once.
    pub max_litter_size: u32,
}

/// Parameters of the human forager.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HumanProfile {
    /// Oldest age a human survives.
    pub max_age: u32,
    /// Food level of a newly created human.
    pub starting_ration: i32,
    /// Exclusive upper bound for the food level of seeded humans.
    pub seeded_food_bound: i32,
}

/// Shark parameters.
pub static SHARK: AnimalProfile = AnimalProfile {
    breeding_age: 5,
    max_age: 80,
    breeding_probability: 0.24,
    max_litter_size: 7,
    diet: &[
        DietEntry {
            prey: Species::Shrimp,
            food_value: 12,
        },
        DietEntry {
            prey: Species::Plankton,
            food_value: 18,
        },
    ],
    starting_ration: 30,
    food_value: 15,
};

/// Shrimp parameters.
pub static SHRIMP: AnimalProfile = AnimalProfile {
    breeding_age: 4,
    max_age: 70,
    breeding_probability: 0.26,
    max_litter_size: 6,
    diet: &[DietEntry {
        prey: Species::Plant,
        food_value: 4,
    }],
    starting_ration: 4,
    food_value: 6,
};

/// Otter parameters.
pub static OTTER: AnimalProfile = AnimalProfile {
    breeding_age: 3,
    max_age: 120,
    breeding_probability: 0.40,
    max_litter_size: 5,
    diet: &[
        DietEntry {
            prey: Species::Shrimp,
            food_value: 18,
        },
        DietEntry {
            prey: Species::Plankton,
            food_value: 18,
        },
    ],
    starting_ration: 36,
    food_value: 9,
};

/// Plankton parameters.
pub static PLANKTON: AnimalProfile = AnimalProfile {
    breeding_age: 8,
    max_age: 60,
    breeding_probability: 0.40,
    max_litter_size: 6,
    diet: &[DietEntry {
        prey: Species::Plant,
        food_value: 6,
    }],
    starting_ration: 6,
    food_value: 3,
};

/// Plant parameters.
pub static PLANT: PlantProfile = PlantProfile {
    max_age: 40,
    breeding_probability: 0.12,
    max_litter_size: 5,
};

/// Human parameters.
pub static HUMAN: HumanProfile = HumanProfile {
    max_age: 150,
    starting_ration: 15,
    seeded_food_bound: 35,
};
