//! When steps for land registration BDD scenarios.

use super::world::{LandRegistrationWorld, run_async};
use furrow::land::services::RegisterLandRequest;
use rstest_bdd_macros::when;

#[when(r#"the land "{name}" is registered with soil "{soil}""#)]
fn register_land(
    world: &mut LandRegistrationWorld,
    name: String,
    soil: String,
) -> Result<(), eyre::Report> {
    let shape = world
        .pending_shape
        .clone()
        .ok_or_else(|| eyre::eyre!("missing drawn shape in scenario world"))?;
    let base = RegisterLandRequest::new("bdd-grower", name, soil, shape);
    let request = match world.manual_size_acres {
        Some(acres) => base.with_manual_size(acres),
        None => base,
    };
    world.last_result = Some(run_async(world.service.register_land(request)));
    Ok(())
}
