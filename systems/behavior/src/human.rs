use reef_core::{Command, DeathCause, Neighborhood, OrganismSnapshot, RandomSource, HUMAN};
use reef_system_environment::Environment;

use crate::{age_and_hunger, wander};

/// Humans age and hunger every step but only forage and move in daylight
/// without rain.
pub(crate) fn act(
    subject: &OrganismSnapshot,
    neighborhood: &Neighborhood,
    environment: &Environment,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    if !age_and_hunger(subject, HUMAN.max_age, out)
        || environment.is_night()
        || environment.weather().is_raining()
    {
        return;
    }
    find_food(subject, neighborhood, rng, out);
}

/// Eats the first living animal next to the human, or wanders.
///
/// Infected remains found first are cleared away and kill the human.
fn find_food(
    subject: &OrganismSnapshot,
    neighborhood: &Neighborhood,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let id = subject.id;
    for neighbor in neighborhood.iter() {
        let Some(occupant) = neighbor.occupant.as_ref() else {
            continue;
        };
        let Some(profile) = occupant.species.animal_profile() else {
            continue;
        };
        if occupant.alive {
            out.push(Command::Kill {
                id: occupant.id,
                cause: DeathCause::Predation,
            });
            out.push(Command::Feed {
                id,
                food_level: profile.food_value,
            });
            out.push(Command::Relocate {
                id,
                to: neighbor.location,
            });
            return;
        }
        if occupant.is_infected() {
            out.push(Command::ClearRemains { id: occupant.id });
            out.push(Command::Kill {
                id,
                cause: DeathCause::Disease,
            });
            return;
        }
    }
    wander(id, neighborhood, &[], rng, out);
}
