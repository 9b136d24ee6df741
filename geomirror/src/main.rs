use geomirror::app::{MirrorErr, SimulationErr};
use geomirror::physics::SceneDescription;
use geomirror::scene::{RemoteScene, TcpScene};
use geomirror::{AppError, Application, RunSettings, Simulation};
use geomirror_utils::{MirrorArgs, init_logging};
use snafu::ResultExt;
use std::process::ExitCode;
use tracing::{error, info};

fn run(args: &MirrorArgs) -> Result<(), AppError> {
    let mut description = SceneDescription::from_json_file(&args.scene).context(SimulationErr)?;
    if let Some(timestep) = args.physics_timestep {
        description.timestep = timestep;
    }

    let simulation = Simulation::new(&description).context(SimulationErr)?;
    let settings = RunSettings::from(args);

    match args.address {
        Some(address) if args.wants_viewer() => {
            let scene = RemoteScene::connect(address).context(MirrorErr)?;
            Application::new(simulation, scene, &args.root, settings)?.run()
        }
        _ => {
            info!("No viewer attached, running headless");
            Application::<TcpScene>::headless(simulation, settings).run()
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let args = MirrorArgs::from_env();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
