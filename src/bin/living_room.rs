use living_room::{config::RoomConfig, flow};

fn main() -> anyhow::Result<()> {
    flow::init_logger();
    flow::run(RoomConfig::from_env())
}
