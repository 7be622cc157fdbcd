use reef_core::{
    AnimalProfile, Command, DeathCause, Location, Neighborhood, OrganismSnapshot, RandomSource,
    Species,
};
use reef_system_infection as infection;

use crate::breeding::{self, Newborn};
use crate::{age_and_hunger, wander};

/// Shared rule set of the four marine animals.
///
/// Order: age, hunger, infection check or self-cure, breeding, infection
/// spread, foraging, movement.
pub(crate) fn act(
    subject: &OrganismSnapshot,
    profile: &AnimalProfile,
    neighborhood: &Neighborhood,
    litter: &mut Vec<Newborn>,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    if !age_and_hunger(subject, profile.max_age, out) {
        return;
    }
    if subject.infection.is_some_and(|state| state.is_fatal()) {
        out.push(Command::Kill {
            id: subject.id,
            cause: DeathCause::Infection,
        });
        return;
    }
    infection::self_cure(subject, rng, out);

    give_birth(subject, profile, neighborhood, litter, rng, out);
    let susceptible = susceptible_cells(neighborhood, litter);
    let _ = infection::spread(subject, &susceptible, rng, out);

    find_food(subject, profile, neighborhood, litter, rng, out);
}

fn give_birth(
    subject: &OrganismSnapshot,
    profile: &AnimalProfile,
    neighborhood: &Neighborhood,
    litter: &mut Vec<Newborn>,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let Some(sex) = subject.sex else {
        return;
    };
    if subject.age.saturating_add(1) < profile.breeding_age
        || !rng.chance(profile.breeding_probability)
    {
        return;
    }
    if !breeding::has_partner(neighborhood, subject.species, sex) {
        return;
    }
    breeding::bear_litter(
        subject.species,
        neighborhood,
        profile.max_litter_size,
        litter,
        rng,
        out,
    );
}

/// Cells holding a living, uninfected animal once this step's litter is in
/// place, in scan order.
fn susceptible_cells(neighborhood: &Neighborhood, litter: &[Newborn]) -> Vec<Location> {
    neighborhood
        .iter()
        .filter(|neighbor| {
            match litter
                .iter()
                .find(|newborn| newborn.location == neighbor.location)
            {
                Some(newborn) => newborn.is_susceptible(),
                None => neighbor
                    .occupant
                    .as_ref()
                    .is_some_and(infection::is_susceptible),
            }
        })
        .map(|neighbor| neighbor.location)
        .collect()
}

/// Scans the neighbors for the first edible organism and moves onto it, or
/// wanders when nothing edible is adjacent.
///
/// Eating plastic kills both the plastic and the animal and ends the scan.
fn find_food(
    subject: &OrganismSnapshot,
    profile: &AnimalProfile,
    neighborhood: &Neighborhood,
    litter: &[Newborn],
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let id = subject.id;
    for neighbor in neighborhood.iter() {
        let Some(occupant) = neighbor.occupant.as_ref().filter(|occupant| occupant.alive) else {
            continue;
        };
        if occupant.species == Species::Pollutant {
            out.push(Command::Kill {
                id: occupant.id,
                cause: DeathCause::Poisoning,
            });
            out.push(Command::Kill {
                id,
                cause: DeathCause::Poisoning,
            });
            return;
        }
        let Some(food_level) = profile.food_value_of(occupant.species) else {
            continue;
        };
        out.push(Command::Kill {
            id: occupant.id,
            cause: DeathCause::Predation,
        });
        out.push(Command::Feed { id, food_level });
        out.push(Command::Relocate {
            id,
            to: neighbor.location,
        });
        return;
    }
    wander(id, neighborhood, litter, rng, out);
}
