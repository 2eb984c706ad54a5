mod rise;

pub use rise::{rise_camera_plugin, CameraSettings};
