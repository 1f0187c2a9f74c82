use living_room::{
    config::{RoomConfig, SIZE_VAR},
    flow,
};

#[test]
fn config_warnings_are_visible_after_logger_init() {
    // nothing is printed before a logger is installed
    assert_eq!(log::max_level(), log::LevelFilter::Off);

    flow::init_logger();
    if std::env::var_os("RUST_LOG").is_none() {
        assert!(log::log_enabled!(target: "living_room::config", log::Level::Warn));
        assert!(!log::log_enabled!(target: "living_room::config", log::Level::Info));
    }

    let config = RoomConfig::from_lookup(|key| (key == SIZE_VAR).then(|| "wide".to_string()));
    assert_eq!(config, RoomConfig::default());

    // a second init keeps the installed logger
    flow::init_logger();
    assert_ne!(log::max_level(), log::LevelFilter::Off);
}
