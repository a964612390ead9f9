use fitgen_core::domain;
use fitgen_core::{NewRow, NewUser};

use crate::store::{StoreError, StoreUnit};
use crate::synth::Synthesizer;

pub async fn generate<U: StoreUnit>(
    unit: &mut U,
    synth: &mut Synthesizer,
    count: u32,
) -> Result<(), StoreError> {
    for _ in 0..count {
        let user = sample_user(synth);
        unit.insert(&NewRow::User(user)).await?;
    }
    Ok(())
}

pub fn sample_user(synth: &mut Synthesizer) -> NewUser {
    let date_of_birth = synth.date_of_birth(domain::MIN_AGE, domain::MAX_AGE);
    NewUser {
        username: synth.username(),
        password: synth.password(),
        email: synth.email(),
        date_of_birth,
        gender: synth.choose(domain::GENDERS),
        height: synth.uniform(domain::HEIGHT_M),
        weight: synth.uniform(domain::BODY_WEIGHT_KG),
        fitness_goal: synth.choose(domain::FITNESS_GOALS),
        health_condition: synth.choose(domain::HEALTH_CONDITIONS),
        account_creation_date: synth.account_creation_date(date_of_birth, domain::MIN_AGE),
    }
}
