//! When steps for crop schedule BDD scenarios.

use super::world::{ScheduleWorld, run_async};
use furrow::schedule::{
    domain::{ActivationPolicy, TaskAction},
    services::{ActivateScheduleRequest, DiseaseTarget, IntegrateDiseaseRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the "{crop}" schedule is activated with policy "{policy}" and token "{token}""#)]
fn activate(
    world: &mut ScheduleWorld,
    crop: String,
    policy: String,
    token: String,
) -> Result<(), eyre::Report> {
    let parsed = ActivationPolicy::try_from(policy.as_str())?;
    let request = ActivateScheduleRequest::new(world.land_id()?, crop, parsed, token);
    let outcome = run_async(world.lifecycle.activate_schedule(request))
        .wrap_err("activate schedule")?;
    world.active = Some(outcome.schedule.clone());
    world.last_activation = Some(outcome);
    Ok(())
}

#[when(r#"task {index:usize} is marked "{action}""#)]
fn mark_task(world: &mut ScheduleWorld, index: usize, action: String) -> Result<(), eyre::Report> {
    let parsed = TaskAction::try_from(action.as_str())?;
    let schedule_id = world.active()?.id();
    let result = run_async(world.lifecycle.apply_task_action(schedule_id, index, parsed));
    world.last_action = Some(result);
    Ok(())
}

#[when(r#"the recommendation "{recommendation}" is integrated for "{crop}""#)]
fn integrate_recommendation(
    world: &mut ScheduleWorld,
    recommendation: String,
    crop: String,
) -> Result<(), eyre::Report> {
    let request = IntegrateDiseaseRequest::new(
        DiseaseTarget::Crop {
            land_id: world.land_id()?,
            crop_name: crop,
        },
        [recommendation],
    );
    let outcome = run_async(world.disease.integrate(request)).wrap_err("integrate disease")?;
    world.active = Some(outcome.schedule);
    Ok(())
}
