pub(crate) mod buildings;
pub(crate) mod materials;
mod world;

pub use buildings::{ingest_city, Building, CityState};
pub use world::{setup_scene, Ground, GroundAnchor};
