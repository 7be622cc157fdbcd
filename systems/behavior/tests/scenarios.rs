use reef_core::{
    Command, DeathCause, Event, Infection, Location, OrganismId, RandomSource, ScriptedRandom,
    SeededRandom, Sex, Species, Vitals, WeatherCondition,
};
use reef_system_behavior::Behavior;
use reef_system_environment::{Clock, Environment, Weather};
use reef_system_infection::InfectionLedger;
use reef_world::{apply, query, Habitat, Organism};

fn animal(age: u32, food_level: i32, sex: Sex) -> Vitals {
    Vitals {
        age,
        food_level,
        sex: Some(sex),
        infection: Some(Infection::default()),
    }
}

fn spawn(habitat: &mut Habitat, species: Species, vitals: Vitals, at: Location) -> OrganismId {
    let mut events = Vec::new();
    apply(habitat, Command::Spawn { species, at, vitals }, &mut events);
    match events.as_slice() {
        [Event::OrganismSpawned { id, .. }] => *id,
        other => panic!("unexpected spawn events {other:?}"),
    }
}

fn sunny_noon() -> Environment {
    Environment::from_parts(
        Clock::at_hour(12),
        Weather::with_condition(WeatherCondition::Sunny, 12),
    )
}

/// Lets `id` act once, applying its commands in order; returns the newborns.
fn act_once(
    habitat: &mut Habitat,
    id: OrganismId,
    ledger: &mut InfectionLedger,
    rng: &mut dyn RandomSource,
) -> Vec<OrganismId> {
    let subject = query::snapshot(habitat, id).expect("subject exists");
    let location = subject.location.expect("subject is placed");
    let neighborhood = query::neighborhood(habitat, location);
    let mut commands = Vec::new();
    Behavior::new().handle(&subject, &neighborhood, &sunny_noon(), rng, &mut commands);

    let mut events = Vec::new();
    for command in commands {
        apply(habitat, command, &mut events);
    }
    ledger.handle(&events);
    events
        .iter()
        .filter_map(|event| match event {
            Event::OrganismBorn { id, .. } => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn lone_shark_starves_before_overcrowding() {
    let mut habitat = Habitat::new(1, 1);
    let shark = spawn(
        &mut habitat,
        Species::Shark,
        animal(10, 1, Sex::Male),
        Location::new(0, 0),
    );
    let mut ledger = InfectionLedger::new();
    let mut rng = ScriptedRandom::new(vec![], vec![]);

    let newborns = act_once(&mut habitat, shark, &mut ledger, &mut rng);

    assert!(newborns.is_empty());
    let organism = habitat
        .organism(shark)
        .expect("shark stays in arena until reaped");
    assert_eq!(organism.food_level(), 0);
    assert!(!organism.is_alive());
    assert_eq!(organism.cause_of_death(), Some(DeathCause::Starvation));
    assert!(query::occupancy_is_consistent(&habitat));
}

#[test]
fn juveniles_never_breed_whatever_the_draws() {
    for seed in 0..64 {
        let mut habitat = Habitat::new(3, 3);
        let juvenile = spawn(
            &mut habitat,
            Species::Shrimp,
            animal(2, 50, Sex::Male),
            Location::new(1, 1),
        );
        let _ = spawn(
            &mut habitat,
            Species::Shrimp,
            animal(9, 50, Sex::Female),
            Location::new(0, 0),
        );
        let mut ledger = InfectionLedger::new();
        let mut rng = SeededRandom::from_seed(seed);

        let newborns = act_once(&mut habitat, juvenile, &mut ledger, &mut rng);
        assert!(newborns.is_empty(), "seed {seed} produced offspring");
    }

    let mut habitat = Habitat::new(3, 3);
    let juvenile = spawn(
        &mut habitat,
        Species::Otter,
        animal(1, 50, Sex::Male),
        Location::new(1, 1),
    );
    let _ = spawn(
        &mut habitat,
        Species::Otter,
        animal(9, 50, Sex::Female),
        Location::new(0, 0),
    );
    let mut ledger = InfectionLedger::new();
    let mut rng = ScriptedRandom::new(vec![], vec![]).with_fallback_unit(0.0);
    assert!(act_once(&mut habitat, juvenile, &mut ledger, &mut rng).is_empty());
}

#[test]
fn litter_is_capped_by_free_neighbors() {
    let mut habitat = Habitat::new(2, 2);
    let parent = spawn(
        &mut habitat,
        Species::Otter,
        animal(6, 30, Sex::Female),
        Location::new(0, 0),
    );
    let _ = spawn(
        &mut habitat,
        Species::Otter,
        animal(6, 30, Sex::Male),
        Location::new(1, 1),
    );
    let mut ledger = InfectionLedger::new();
    // Breed, then the largest litter; newborn traits and movement use the fallback.
    let mut rng = ScriptedRandom::new(vec![0.0], vec![4]);

    let free_before = habitat
        .field()
        .free_adjacent_locations(Location::new(0, 0))
        .len();
    let newborns = act_once(&mut habitat, parent, &mut ledger, &mut rng);

    assert_eq!(free_before, 2);
    assert_eq!(newborns.len(), 2);
    for newborn in &newborns {
        let cub = habitat.organism(*newborn).expect("newborn");
        assert_eq!(cub.age(), 0);
        assert_eq!(cub.food_level(), 36);
        assert!(habitat.population().iter().all(|id| id != newborn));
    }
    assert_eq!(
        habitat.organism(parent).and_then(Organism::cause_of_death),
        Some(DeathCause::Overcrowding)
    );
    assert!(query::occupancy_is_consistent(&habitat));
}

#[test]
fn breeding_needs_a_partner_of_the_opposite_sex() {
    let mut habitat = Habitat::new(3, 3);
    let parent = spawn(
        &mut habitat,
        Species::Shrimp,
        animal(6, 30, Sex::Female),
        Location::new(1, 1),
    );
    let _ = spawn(
        &mut habitat,
        Species::Shrimp,
        animal(6, 30, Sex::Female),
        Location::new(0, 0),
    );
    let _ = spawn(
        &mut habitat,
        Species::Plankton,
        animal(9, 30, Sex::Male),
        Location::new(2, 2),
    );
    let mut ledger = InfectionLedger::new();
    let mut rng = ScriptedRandom::new(vec![0.0], vec![]);

    assert!(act_once(&mut habitat, parent, &mut ledger, &mut rng).is_empty());
}

#[test]
fn infected_animal_spreads_before_foraging() {
    let mut habitat = Habitat::new(1, 3);
    let carrier = spawn(
        &mut habitat,
        Species::Shark,
        Vitals {
            infection: Some(Infection::new(true, false)),
            ..animal(1, 20, Sex::Male)
        },
        Location::new(0, 1),
    );
    let prey = spawn(
        &mut habitat,
        Species::Shrimp,
        animal(1, 5, Sex::Male),
        Location::new(0, 0),
    );
    let mut ledger = InfectionLedger::new();
    // Self-cure roll, then the spread draw.
    let mut rng = ScriptedRandom::new(vec![0.05], vec![1]);

    let _ = act_once(&mut habitat, carrier, &mut ledger, &mut rng);

    assert_eq!(ledger.total(), 1);
    let eaten = habitat.organism(prey).expect("prey");
    assert!(eaten.is_infected());
    assert_eq!(eaten.cause_of_death(), Some(DeathCause::Predation));
    let shark = habitat.organism(carrier).expect("shark");
    assert_eq!(shark.location(), Some(Location::new(0, 0)));
    assert_eq!(shark.infection(), Some(Infection::new(true, false)));
}

#[test]
fn newborns_can_catch_the_infection_from_their_parent() {
    let mut habitat = Habitat::new(1, 3);
    let carrier = spawn(
        &mut habitat,
        Species::Shark,
        Vitals {
            infection: Some(Infection::new(true, false)),
            ..animal(10, 20, Sex::Male)
        },
        Location::new(0, 1),
    );
    let partner = spawn(
        &mut habitat,
        Species::Shark,
        animal(10, 20, Sex::Female),
        Location::new(0, 2),
    );
    let mut ledger = InfectionLedger::new();
    // Breed; newborn sex and infection; spread to the newborn but not the partner.
    let mut rng = ScriptedRandom::new(vec![0.0, 0.9, 0.9, 0.9, 0.0, 0.9], vec![1, 0]);

    let newborns = act_once(&mut habitat, carrier, &mut ledger, &mut rng);

    assert_eq!(newborns.len(), 1);
    assert!(habitat.organism(newborns[0]).is_some_and(Organism::is_infected));
    assert!(habitat
        .organism(partner)
        .is_some_and(|shark| !shark.is_infected()));
    assert_eq!(ledger.total(), 1);
    assert!(rng.is_exhausted());
}

#[test]
fn pollutants_never_act() {
    let mut habitat = Habitat::new(1, 1);
    let plastic = spawn(
        &mut habitat,
        Species::Pollutant,
        Vitals::default(),
        Location::new(0, 0),
    );
    let mut ledger = InfectionLedger::new();
    let mut rng = ScriptedRandom::new(vec![0.0], vec![1]);

    assert!(act_once(&mut habitat, plastic, &mut ledger, &mut rng).is_empty());
    let organism = habitat.organism(plastic).expect("plastic");
    assert!(organism.is_alive());
    assert_eq!(organism.age(), 0);
    assert!(!rng.is_exhausted());
}
