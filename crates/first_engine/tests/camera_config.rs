//! Camera configuration files

use first_engine::config::{Config, ConfigError};
use first_engine::render::{Camera, CameraConfig, ViewUpdate};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("first_engine_{}_{}", std::process::id(), name))
}

#[test]
fn camera_config_round_trips_through_ron_and_toml() {
    let config = CameraConfig {
        position: [0.0, 0.0, -1.0],
        rotation: [0.0, 15.0, 0.0],
        fov_y: 1.0,
        aspect: 1.333_33,
        view_update: ViewUpdate::Euler,
        ..CameraConfig::default()
    };

    for name in ["camera.ron", "camera.toml"] {
        let path = temp_path(name);
        config.save_to_file(&path).expect("config should save");
        let loaded = CameraConfig::load_from_file(&path).expect("config should load");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
        let camera = Camera::from_config(&loaded);
        assert_eq!(camera.view_update(), ViewUpdate::Euler);
        assert_eq!(camera.rotation().y, 15.0);
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let err = CameraConfig::default().save_to_file(temp_path("camera.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}
