//! Metropolis: on-chain city viewer. Runs the city_viewer app.

use city_viewer::config;
use city_viewer::sdk::CityViewerBuilder;

fn main() {
    let _ = dotenvy::dotenv();

    CityViewerBuilder::new()
        .chain_config()
        .camera_settings(config::camera_settings())
        .build()
        .run();
}
