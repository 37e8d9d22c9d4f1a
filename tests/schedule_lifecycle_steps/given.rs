//! Given steps for crop schedule BDD scenarios.

use super::world::{GENERATED_TASKS, ScheduleWorld, run_async};
use furrow::land::{
    domain::{Coordinate, DrawnShape, Land, LandRegistration, OwnerId, SoilType},
    ports::LandRepository,
};
use furrow::schedule::{
    domain::{ActivationPolicy, Season},
    services::{ActivateScheduleRequest, StageScheduleRequest},
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given("a registered land")]
fn registered_land(world: &mut ScheduleWorld) -> Result<(), eyre::Report> {
    let land = Land::register(
        LandRegistration {
            owner_id: OwnerId::new("bdd-grower")?,
            name: "Scenario field".to_owned(),
            soil_type: SoilType::Loam,
            shape: DrawnShape::rectangle(
                Coordinate::new(12.9716, 77.5946),
                Coordinate::new(12.9725, 77.5955),
            ),
            manual_size_acres: None,
        },
        &DefaultClock,
    )?;
    run_async(world.lands.store(&land)).wrap_err("store scenario land")?;
    world.land_id = Some(land.id());
    Ok(())
}

fn stage(world: &ScheduleWorld, crop: String) -> Result<(), eyre::Report> {
    let request = StageScheduleRequest::new(
        world.land_id()?,
        crop,
        SoilType::Loam,
        Season::Summer,
        GENERATED_TASKS,
    );
    run_async(world.lifecycle.stage_generated_schedule(request))
        .wrap_err("stage scenario schedule")?;
    Ok(())
}

#[given(r#"a staged "{crop}" schedule"#)]
fn staged_schedule(world: &mut ScheduleWorld, crop: String) -> Result<(), eyre::Report> {
    stage(world, crop)
}

#[given(r#"an active "{crop}" schedule"#)]
fn active_schedule(world: &mut ScheduleWorld, crop: String) -> Result<(), eyre::Report> {
    stage(world, crop.clone())?;
    let request =
        ActivateScheduleRequest::new(world.land_id()?, crop, ActivationPolicy::Fresh, "setup");
    let outcome = run_async(world.lifecycle.activate_schedule(request))
        .wrap_err("activate scenario schedule")?;
    world.active = Some(outcome.schedule);
    Ok(())
}
