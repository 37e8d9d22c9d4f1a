//! In-memory integration tests for saved plans and schedule reuse.

use super::helpers::{Farm, farm, tomato_payload};
use furrow::land::domain::SoilType;
use furrow::schedule::{
    domain::{ActivationPolicy, CropSuggestion, Season, TaskAction},
    services::{
        ActivateScheduleRequest, RecordPlanRequest, ReuseOutcome, ReusePlanRequest,
        StageScheduleRequest,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_schedule_is_reused_on_the_next_visit(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    let record = farm
        .reuse
        .record_plan(RecordPlanRequest::new(
            land.id(),
            land.soil_type().clone(),
            Season::Summer,
            [CropSuggestion::new("Tomato", "90-120 days", "Moderate", "High")],
        ))
        .await?;

    let first_visit = farm
        .reuse
        .reuse(ReusePlanRequest::new(
            record.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "visit-1",
        ))
        .await?;
    let ReuseOutcome::GenerationRequired(generation) = first_visit else {
        eyre::bail!("expected a generation request, got {first_visit:?}");
    };
    let staged = farm
        .lifecycle
        .stage_generated_schedule(StageScheduleRequest::new(
            generation.land_id,
            generation.crop_name.as_str(),
            generation.soil_type.clone(),
            generation.season,
            tomato_payload(),
        ))
        .await?;
    let activated = farm
        .lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "visit-1-activate",
        ))
        .await?;
    farm.lifecycle
        .apply_task_action(activated.schedule.id(), 0, TaskAction::Done)
        .await?;

    let second_visit = farm
        .reuse
        .reuse(ReusePlanRequest::new(
            record.id(),
            "tomato",
            ActivationPolicy::Continue,
            "visit-2",
        ))
        .await?;

    let ReuseOutcome::Activated(reused) = second_visit else {
        eyre::bail!("expected a reuse activation, got {second_visit:?}");
    };
    eyre::ensure!(reused.schedule.source_schedule_id() == Some(activated.schedule.id()));
    eyre::ensure!(reused.schedule.progress().completed == 1);
    eyre::ensure!(reused.deactivated == vec![activated.schedule.id()]);
    eyre::ensure!(staged.soil_type() == &SoilType::Loam);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_plans_are_listed_for_their_land(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    let other = farm.register_plot("South field").await?;
    for season in [Season::Spring, Season::Summer] {
        farm.reuse
            .record_plan(RecordPlanRequest::new(
                land.id(),
                SoilType::Loam,
                season,
                [CropSuggestion::new("Okra", "50-65 days", "Low", "Medium")],
            ))
            .await?;
    }

    let plans = farm.reuse.load_historical_plans(land.id()).await?;

    eyre::ensure!(plans.len() == 2);
    eyre::ensure!(plans.first().map(|plan| plan.season()) == Some(Season::Summer));
    eyre::ensure!(farm.reuse.load_historical_plans(other.id()).await?.is_empty());
    Ok(())
}
