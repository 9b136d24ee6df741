//! Drops a handful of shapes onto a floor and mirrors them into a viewer bridge.
//!
//! Start a bridge that accepts newline-delimited scene commands on `127.0.0.1:7000`, then run
//! `cargo run --example falling_shapes`. Pass a different address as the first argument.

use geomirror::physics::SceneDescription;
use geomirror::scene::RemoteScene;
use geomirror::{Application, DEFAULT_ROOT, RunSettings, Simulation};
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_ADDRESS: &str = "127.0.0.1:7000";

fn main() -> Result<(), Box<dyn Error>> {
    geomirror_utils::init_logging();

    let address: SocketAddr = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or(DEFAULT_ADDRESS)
        .parse()?;

    let scene_file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../geomirror/scenes/falling_shapes.json");
    let description = SceneDescription::from_json_file(scene_file)?;
    let simulation = Simulation::new(&description)?;

    let settings = RunSettings::builder().max_steps(600).realtime(true).build();
    let scene = RemoteScene::connect(address)?;
    let mut app = Application::new(simulation, scene, DEFAULT_ROOT, settings)?;

    app.run()?;

    info!("Dropping everything again");
    app.reset()?;
    app.run()?;

    Ok(())
}
