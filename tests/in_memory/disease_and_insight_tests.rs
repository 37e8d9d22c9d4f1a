//! In-memory integration tests for disease integration and insights.

use super::helpers::{Farm, farm, tomato_payload};
use furrow::land::domain::{LandId, SoilType};
use furrow::schedule::{
    domain::{
        ActivationPolicy, DISEASE_PHASE, Diagnosis, GrowthStage, PlanType, Priority, Season,
        TaskAction,
    },
    services::{
        ActivateScheduleRequest, DiseaseTarget, IntegrateDiseaseRequest, ScheduleConfig,
        StageScheduleRequest,
    },
};
use rstest::rstest;

fn diagnosis_request(land_id: LandId, crop: &str) -> IntegrateDiseaseRequest {
    IntegrateDiseaseRequest::new(
        DiseaseTarget::Crop {
            land_id,
            crop_name: crop.to_owned(),
        },
        [
            "Apply fungicide spray".to_owned(),
            "Improve field drainage".to_owned(),
        ],
    )
    .with_diagnosis(Diagnosis::new("Early blight", 91))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn diagnosis_preempts_the_running_schedule(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    farm.lifecycle
        .stage_generated_schedule(StageScheduleRequest::new(
            land.id(),
            "Tomato",
            SoilType::Loam,
            Season::Summer,
            tomato_payload(),
        ))
        .await?;
    let active = farm
        .lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "start",
        ))
        .await?
        .schedule;
    farm.lifecycle
        .apply_task_action(active.id(), 0, TaskAction::Done)
        .await?;

    let outcome = farm.disease.integrate(diagnosis_request(land.id(), "Tomato")).await?;

    eyre::ensure!(!outcome.created);
    eyre::ensure!(outcome.inserted == (1..3));
    let current = outcome
        .schedule
        .current_task()
        .ok_or_else(|| eyre::eyre!("expected a pending task"))?;
    eyre::ensure!(current.phase() == DISEASE_PHASE);
    eyre::ensure!(current.priority() == Priority::High);
    eyre::ensure!(current.day() == 3);

    let blocked = farm
        .lifecycle
        .apply_task_action(active.id(), 3, TaskAction::Done)
        .await;
    eyre::ensure!(blocked.is_err(), "regular task must wait for treatment");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn appending_configuration_keeps_the_current_task() -> Result<(), eyre::Report> {
    let farm = Farm::with_config(&ScheduleConfig::reference());
    let land = farm.register_plot("North field").await?;
    farm.lifecycle
        .stage_generated_schedule(StageScheduleRequest::new(
            land.id(),
            "Tomato",
            SoilType::Loam,
            Season::Summer,
            tomato_payload(),
        ))
        .await?;
    farm.lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "start",
        ))
        .await?;

    let outcome = farm.disease.integrate(diagnosis_request(land.id(), "Tomato")).await?;

    eyre::ensure!(outcome.inserted == (4..6));
    eyre::ensure!(
        outcome.schedule.current_task().map(|task| task.label()) == Some("Prepare beds")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn diagnosis_without_schedule_starts_a_disease_plan(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;

    let outcome = farm.disease.integrate(diagnosis_request(land.id(), "Chilli")).await?;

    eyre::ensure!(outcome.created);
    eyre::ensure!(outcome.schedule.plan_type() == PlanType::DiseaseManagement);
    let overview = farm.insights.land_overview(land.id()).await?;
    eyre::ensure!(overview.active_crops.len() == 1);
    eyre::ensure!(
        overview
            .active_crops
            .first()
            .map(|crop| crop.plan_type)
            == Some(PlanType::DiseaseManagement)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insight_reflects_completed_work(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;
    farm.lifecycle
        .stage_generated_schedule(StageScheduleRequest::new(
            land.id(),
            "Tomato",
            SoilType::Loam,
            Season::Summer,
            tomato_payload(),
        ))
        .await?;
    let schedule_id = farm
        .lifecycle
        .activate_schedule(ActivateScheduleRequest::new(
            land.id(),
            "Tomato",
            ActivationPolicy::Fresh,
            "start",
        ))
        .await?
        .schedule
        .id();
    for index in 0..3 {
        farm.lifecycle
            .apply_task_action(schedule_id, index, TaskAction::Done)
            .await?;
    }

    let insight = farm.insights.schedule_insight(schedule_id).await?;

    eyre::ensure!(insight.progress.percent() == 75);
    eyre::ensure!(insight.days_planted == 10);
    eyre::ensure!(insight.growth_stage == GrowthStage::VegetativeGrowth);
    eyre::ensure!(insight.health_score == 75);
    eyre::ensure!(insight.next_action == "Side dressing (Day 30)");
    let band = insight.yield_estimate.band;
    eyre::ensure!(band.min_kg > 0.0 && band.min_kg <= band.max_kg);
    eyre::ensure!(band.max_kg <= insight.yield_estimate.expected_kg);
    Ok(())
}
