//! Then steps for crop schedule BDD scenarios.

use super::world::{ScheduleWorld, run_async};
use furrow::schedule::{
    domain::{Priority, ScheduleDomainError},
    services::ScheduleLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"exactly one "{crop}" schedule is active"#)]
fn exactly_one_active(world: &ScheduleWorld, crop: String) -> Result<(), eyre::Report> {
    let schedules = run_async(world.lifecycle.list_for_land(world.land_id()?))?;
    let active = schedules
        .iter()
        .filter(|schedule| schedule.is_active() && schedule.crop_name().as_str() == crop)
        .count();
    eyre::ensure!(active == 1, "expected one active {crop} schedule, found {active}");
    Ok(())
}

#[then(r#"the current task is "{label}" on day {day:u32}"#)]
fn current_task_is(world: &ScheduleWorld, label: String, day: u32) -> Result<(), eyre::Report> {
    let task = world
        .active()?
        .current_task()
        .ok_or_else(|| eyre::eyre!("schedule has no pending task"))?;
    eyre::ensure!(
        task.label() == label && task.day() == day,
        "expected {label} on day {day}, found {} on day {}",
        task.label(),
        task.day()
    );
    Ok(())
}

#[then(r#"the current task has priority "{priority}""#)]
fn current_task_priority(world: &ScheduleWorld, priority: String) -> Result<(), eyre::Report> {
    let expected = Priority::try_from(priority.as_str())?;
    let task = world
        .active()?
        .current_task()
        .ok_or_else(|| eyre::eyre!("schedule has no pending task"))?;
    eyre::ensure!(task.priority() == expected, "unexpected priority {}", task.priority());
    Ok(())
}

#[then("the task action fails as out of sequence")]
fn action_out_of_sequence(world: &ScheduleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_action
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task action result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(ScheduleLifecycleError::Domain(
                ScheduleDomainError::OutOfSequence { .. }
            ))
        ),
        "expected OutOfSequence, got {result:?}"
    );
    Ok(())
}

#[then("the task action succeeds")]
fn action_succeeds(world: &ScheduleWorld) -> Result<(), eyre::Report> {
    match world.last_action.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a successful task action, got {other:?}")),
    }
}

#[then("the schedule progress is {percent:u8} percent")]
fn progress_is(world: &ScheduleWorld, percent: u8) -> Result<(), eyre::Report> {
    let schedule_id = world.active()?.id();
    let stored = run_async(world.lifecycle.find_schedule(schedule_id))?
        .ok_or_else(|| eyre::eyre!("schedule vanished"))?;
    let actual = stored.progress().percent();
    eyre::ensure!(actual == percent, "expected {percent}%, found {actual}%");
    Ok(())
}

#[then("the last activation was a replay")]
fn last_activation_replayed(world: &ScheduleWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_activation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing activation outcome"))?;
    eyre::ensure!(outcome.replayed, "expected a replayed activation");
    Ok(())
}
