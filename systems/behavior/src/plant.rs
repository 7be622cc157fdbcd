use reef_core::{
    Command, DeathCause, Neighborhood, OrganismSnapshot, RandomSource, Species, PLANT,
};
use reef_system_environment::Environment;

use crate::breeding::{self, Newborn};

/// Plants age, seed their free neighbors on sunny steps, and wither on any
/// other step.
pub(crate) fn act(
    subject: &OrganismSnapshot,
    neighborhood: &Neighborhood,
    environment: &Environment,
    litter: &mut Vec<Newborn>,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let id = subject.id;
    out.push(Command::GrowOlder { id });
    let cause = if subject.age.saturating_add(1) > PLANT.max_age {
        Some(DeathCause::OldAge)
    } else if !environment.weather().is_sunny() {
        Some(DeathCause::Withered)
    } else {
        None
    };
    if let Some(cause) = cause {
        out.push(Command::Kill { id, cause });
        return;
    }
    if rng.chance(PLANT.breeding_probability) {
        breeding::bear_litter(
            Species::Plant,
            neighborhood,
            PLANT.max_litter_size,
            litter,
            rng,
            out,
        );
    }
}
