//! Then steps for land registration BDD scenarios.

use super::world::LandRegistrationWorld;
use furrow::land::{
    domain::{GeometryError, LandDomainError, SizeSource},
    services::LandRegistrationError,
};
use rstest_bdd_macros::then;

#[then(r#"the land size source is "{source}""#)]
fn size_source_is(world: &LandRegistrationWorld, source: String) -> Result<(), eyre::Report> {
    let expected = match source.as_str() {
        "measured" => SizeSource::Measured,
        "point_default" => SizeSource::PointDefault,
        "manual" => SizeSource::Manual,
        other => return Err(eyre::eyre!("unknown size source in scenario: {other}")),
    };
    let land = world.registered_land()?;
    eyre::ensure!(
        land.size_source() == expected,
        "expected {expected:?}, found {:?}",
        land.size_source()
    );
    Ok(())
}

#[then("the land measures between {low:f64} and {high:f64} acres")]
fn acreage_between(world: &LandRegistrationWorld, low: f64, high: f64) -> Result<(), eyre::Report> {
    let acres = world.registered_land()?.size_acres();
    eyre::ensure!(
        acres >= low && acres <= high,
        "expected {low}..={high} acres, found {acres}"
    );
    Ok(())
}

#[then("registration fails for vertex {index:usize}")]
fn registration_fails_for_vertex(
    world: &LandRegistrationWorld,
    index: usize,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result"))?;
    let Err(LandRegistrationError::Domain(LandDomainError::InvalidGeometry(
        GeometryError::InvalidCoordinate { index: found, .. },
    ))) = result
    else {
        return Err(eyre::eyre!("expected an invalid coordinate error, got {result:?}"));
    };
    eyre::ensure!(*found == index, "expected vertex {index}, found {found}");
    Ok(())
}
