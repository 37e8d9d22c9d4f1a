//! Given steps for land registration BDD scenarios.

use super::world::LandRegistrationWorld;
use furrow::land::domain::{Coordinate, DrawnShape};
use rstest_bdd_macros::given;

#[given("a rectangle from {lat1:f64}, {lng1:f64} to {lat2:f64}, {lng2:f64}")]
fn rectangle(world: &mut LandRegistrationWorld, lat1: f64, lng1: f64, lat2: f64, lng2: f64) {
    world.pending_shape = Some(DrawnShape::rectangle(
        Coordinate::new(lat1, lng1),
        Coordinate::new(lat2, lng2),
    ));
}

#[given("a point at {lat:f64}, {lng:f64}")]
fn point(world: &mut LandRegistrationWorld, lat: f64, lng: f64) {
    world.pending_shape = Some(DrawnShape::point(Coordinate::new(lat, lng)));
}

#[given("a polygon through {lat1:f64}, {lng1:f64} and {lat2:f64}, {lng2:f64}")]
fn two_vertex_polygon(
    world: &mut LandRegistrationWorld,
    lat1: f64,
    lng1: f64,
    lat2: f64,
    lng2: f64,
) {
    world.pending_shape = Some(DrawnShape::polygon([
        Coordinate::new(lat1, lng1),
        Coordinate::new(lat2, lng2),
    ]));
}

#[given("a manual size of {acres:f64} acres")]
fn manual_size(world: &mut LandRegistrationWorld, acres: f64) {
    world.manual_size_acres = Some(acres);
}
