//! In-memory integration tests for the schedule lifecycle.

use super::helpers::{Farm, farm, tomato_payload};
use furrow::land::domain::{LandId, SoilType};
use furrow::schedule::{
    domain::{ActivationPolicy, ScheduleDomainError, Season, TaskAction},
    services::{ActivateScheduleRequest, ScheduleLifecycleError, StageScheduleRequest},
};
use rstest::rstest;

async fn staged_and_activated(farm: &Farm, land_id: LandId) -> Result<(), eyre::Report> {
    farm.lifecycle
        .stage_generated_schedule(StageScheduleRequest::new(
            land_id,
            "Tomato",
            SoilType::Loam,
            Season::Summer,
            tomato_payload(),
        ))
        .await?;
    farm.lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land_id,
            "Tomato",
            ActivationPolicy::Fresh,
            "season-start",
        ))
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn season_progresses_through_every_task(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    staged_and_activated(&farm, land.id()).await?;
    let schedule = farm
        .lifecycle
        .active_schedule(land.id(), "Tomato")
        .await?
        .ok_or_else(|| eyre::eyre!("expected an active schedule"))?;

    for index in 0..schedule.tasks().len() {
        let action = if index == 2 {
            TaskAction::Skip
        } else {
            TaskAction::Done
        };
        farm.lifecycle
            .apply_task_action(schedule.id(), index, action)
            .await?;
    }

    let finished = farm
        .lifecycle
        .find_schedule(schedule.id())
        .await?
        .ok_or_else(|| eyre::eyre!("schedule vanished"))?;
    eyre::ensure!(finished.is_fully_resolved());
    eyre::ensure!(finished.next_action() == "All tasks completed!");
    eyre::ensure!(finished.days_planted() == 30);
    let progress = finished.progress();
    eyre::ensure!(progress.completed == 3 && progress.skipped == 1 && progress.pending == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn continuing_keeps_progress_and_fresh_resets_it(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    staged_and_activated(&farm, land.id()).await?;
    let first = farm
        .lifecycle
        .active_schedule(land.id(), "Tomato")
        .await?
        .ok_or_else(|| eyre::eyre!("expected an active schedule"))?;
    farm.lifecycle
        .apply_task_action(first.id(), 0, TaskAction::Done)
        .await?;
    farm.lifecycle
        .apply_task_action(first.id(), 1, TaskAction::Skip)
        .await?;

    let continued = farm
        .lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Continue,
            "continue-1",
        ))
        .await?;
    let smart = farm
        .lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Smart,
            "smart-1",
        ))
        .await?;
    let fresh = farm
        .lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "fresh-1",
        ))
        .await?;

    let continued_progress = continued.schedule.progress();
    eyre::ensure!(continued_progress.completed == 1 && continued_progress.skipped == 1);
    let smart_progress = smart.schedule.progress();
    eyre::ensure!(smart_progress.completed == 1 && smart_progress.skipped == 0);
    eyre::ensure!(fresh.schedule.progress().resolved() == 0);
    eyre::ensure!(fresh.deactivated == vec![smart.schedule.id()]);

    let all = farm.lifecycle.list_for_land(land.id()).await?;
    eyre::ensure!(all.len() == 5);
    eyre::ensure!(all.iter().filter(|schedule| schedule.is_active()).count() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_out_of_order_is_rejected(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    staged_and_activated(&farm, land.id()).await?;
    let schedule = farm
        .lifecycle
        .active_schedule(land.id(), "Tomato")
        .await?
        .ok_or_else(|| eyre::eyre!("expected an active schedule"))?;

    let result = farm
        .lifecycle
        .apply_task_action(schedule.id(), 3, TaskAction::Done)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(ScheduleLifecycleError::Domain(ScheduleDomainError::OutOfSequence {
            index: 3,
            blocking_index: 0,
        }))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_schedules_reject_task_actions(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    staged_and_activated(&farm, land.id()).await?;
    let old = farm
        .lifecycle
        .active_schedule(land.id(), "Tomato")
        .await?
        .ok_or_else(|| eyre::eyre!("expected an active schedule"))?;
    farm.lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "replant",
        ))
        .await?;

    let result = farm
        .lifecycle
        .apply_task_action(old.id(), 0, TaskAction::Done)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(ScheduleLifecycleError::Domain(ScheduleDomainError::ScheduleInactive(id))) if id == old.id()
    ));
    Ok(())
}
