//! In-memory integration tests for land registration.

use super::helpers::{Farm, farm, plot_shape};
use furrow::land::{
    domain::{Coordinate, DrawnShape, GeometryError, LandDomainError, SizeSource, SoilType},
    services::{LandRegistrationError, RegisterLandRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rectangle_is_measured_and_retrievable(farm: Farm) -> Result<(), eyre::Report> {
    let land = farm.register_plot("North field").await?;

    eyre::ensure!(land.size_source() == SizeSource::Measured);
    eyre::ensure!(
        land.size_acres() > 2.3 && land.size_acres() < 2.5,
        "unexpected acreage {}",
        land.size_acres()
    );
    eyre::ensure!(land.boundary().ring().len() == 5);
    eyre::ensure!(land.soil_type() == &SoilType::Loam);

    let found = farm.lands.find_by_id(land.id()).await?;
    eyre::ensure!(found == Some(land));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lands_are_listed_per_owner(farm: Farm) -> Result<(), eyre::Report> {
    farm.register_plot("North field").await?;
    farm.register_plot("South field").await?;
    farm.lands
        .register_land(RegisterLandRequest::new(
            "grower-8",
            "Neighbour",
            "clay",
            plot_shape(),
        ))
        .await?;

    let owned = farm.lands.list_for_owner("grower-7").await?;

    let mut names: Vec<&str> = owned.iter().map(|land| land.name()).collect();
    names.sort_unstable();
    eyre::ensure!(names == vec!["North field", "South field"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn point_selection_gets_the_default_acre(farm: Farm) -> Result<(), eyre::Report> {
    let location = Coordinate::new(18.5204, 73.8567);
    let request = RegisterLandRequest::new("grower-7", "", "black cotton", DrawnShape::point(location));

    let land = farm.lands.register_land(request).await?;

    eyre::ensure!(land.size_source() == SizeSource::PointDefault);
    eyre::ensure!(land.size_acres().total_cmp(&1.0).is_eq());
    eyre::ensure!(land.name() == "Land at 18.5204, 73.8567");
    eyre::ensure!(land.soil_type() == &SoilType::Custom("black cotton".to_owned()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_vertex_rejects_the_whole_shape(farm: Farm) -> Result<(), eyre::Report> {
    let shape = DrawnShape::polygon([
        Coordinate::new(12.97, 77.59),
        Coordinate::new(12.98, 77.59),
        Coordinate::new(12.98, 181.0),
        Coordinate::new(12.97, 77.60),
    ]);

    let result = farm
        .lands
        .register_land(RegisterLandRequest::new("grower-7", "Bad", "loam", shape))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(LandRegistrationError::Domain(LandDomainError::InvalidGeometry(
            GeometryError::InvalidCoordinate { index: 2, .. }
        )))
    ));
    eyre::ensure!(farm.lands.list_for_owner("grower-7").await?.is_empty());
    Ok(())
}
