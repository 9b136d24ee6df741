use argh::FromArgs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

fn viewer_address(address: &str) -> Result<SocketAddr, String> {
    address
        .to_socket_addrs()
        .map_err(|e| format!("invalid viewer address \"{address}\": {e}"))?
        .next()
        .ok_or_else(|| format!("viewer address \"{address}\" did not resolve"))
}

/// Mirror a rigid-body simulation into a remote 3D viewer.
#[derive(Debug, FromArgs)]
pub struct MirrorArgs {
    /// path to the JSON scene description
    #[argh(positional)]
    pub scene: PathBuf,

    /// address of the viewer bridge, e.g. 127.0.0.1:7000
    #[argh(option, from_str_fn(viewer_address))]
    pub address: Option<SocketAddr>,
    /// run the simulation without a viewer
    #[argh(switch)]
    pub headless: bool,
    /// name of the scene-graph slot every geom is placed under
    #[argh(option, default = "String::from(\"physics\")")]
    pub root: String,

    /// number of outer steps before exiting
    #[argh(option, default = "1000")]
    pub max_steps: u64,
    /// simulated seconds per outer step (non-positive means one physics timestep)
    #[argh(option, default = "1.0 / 60.0")]
    pub step_size: f64,
    /// override the physics timestep of the scene description
    #[argh(option)]
    pub physics_timestep: Option<f64>,
    /// pace outer steps to wall-clock time
    #[argh(switch)]
    pub realtime: bool,
}

impl MirrorArgs {
    /// Parses the process arguments, exiting with a usage message on error.
    pub fn from_env() -> MirrorArgs {
        argh::from_env()
    }

    /// Whether a viewer should be attached at all.
    pub fn wants_viewer(&self) -> bool {
        !self.headless && self.address.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<MirrorArgs, argh::EarlyExit> {
        MirrorArgs::from_args(&["geomirror"], args)
    }

    #[test]
    fn defaults_are_applied() {
        let args = parse(&["scene.json"]).unwrap();

        assert_eq!(args.scene, PathBuf::from("scene.json"));
        assert_eq!(args.address, None);
        assert!(!args.headless);
        assert_eq!(args.root, "physics");
        assert_eq!(args.max_steps, 1000);
        assert!((args.step_size - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(args.physics_timestep, None);
        assert!(!args.realtime);
        assert!(!args.wants_viewer());
    }

    #[test]
    fn address_enables_viewer() {
        let args = parse(&["scene.json", "--address", "127.0.0.1:7000"]).unwrap();

        assert_eq!(args.address, Some("127.0.0.1:7000".parse().unwrap()));
        assert!(args.wants_viewer());
    }

    #[test]
    fn headless_overrides_address() {
        let args = parse(&["scene.json", "--address", "127.0.0.1:7000", "--headless"]).unwrap();

        assert!(!args.wants_viewer());
    }

    #[test]
    fn bad_address_is_rejected() {
        assert!(parse(&["scene.json", "--address", "not an address"]).is_err());
    }

    #[test]
    fn numeric_options_parse() {
        let args = parse(&[
            "scene.json",
            "--max-steps",
            "10",
            "--step-size",
            "0",
            "--physics-timestep",
            "0.001",
            "--root",
            "mujoco",
            "--realtime",
        ])
        .unwrap();

        assert_eq!(args.max_steps, 10);
        assert_eq!(args.step_size, 0.0);
        assert_eq!(args.physics_timestep, Some(0.001));
        assert_eq!(args.root, "mujoco");
        assert!(args.realtime);
    }

    #[test]
    fn scene_is_required() {
        assert!(parse(&[]).is_err());
    }
}
