//! The outer loop that advances a [`Simulation`] and renders it through a [`SceneMirror`].

use crate::mirror::SceneMirror;
use crate::physics::{Simulation, SimulationError};
use crate::scene::{SceneError, SceneGraph, TcpScene};
use crate::utils::StepCounter;
use bon::Builder;
use geomirror_utils::MirrorArgs;
use snafu::{ResultExt, Snafu};
use tracing::info;
use web_time::{Duration, Instant};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub))]
pub enum AppError {
    #[snafu(display("Simulation failed: {source}"))]
    Simulation { source: SimulationError },

    #[snafu(display("Scene mirror failed: {source}"))]
    Mirror { source: SceneError },
}

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct RunSettings {
    /// Outer steps [`Application::run`] takes before returning.
    #[builder(default = 1000)]
    pub max_steps: u64,
    /// Simulated seconds per outer step. Non-positive means one physics timestep.
    #[builder(default = 1.0 / 60.0)]
    pub step_size: f64,
    /// Sleep after each outer step so simulated time keeps pace with wall-clock time.
    #[builder(default)]
    pub realtime: bool,
    /// Outer steps between two progress logs. `0` disables them.
    #[builder(default = 60)]
    pub log_every: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings::builder().build()
    }
}

impl From<&MirrorArgs> for RunSettings {
    fn from(args: &MirrorArgs) -> Self {
        RunSettings::builder()
            .max_steps(args.max_steps)
            .step_size(args.step_size)
            .realtime(args.realtime)
            .build()
    }
}

pub struct Application<S: SceneGraph = TcpScene> {
    simulation: Simulation,
    mirror: Option<SceneMirror<S>>,
    settings: RunSettings,
    counter: StepCounter,
}

impl<S: SceneGraph> Application<S> {
    /// Builds the mirror of `simulation` in `scene` under `root`.
    pub fn new(simulation: Simulation, scene: S, root: &str, settings: RunSettings) -> Result<Self, AppError> {
        let mirror = SceneMirror::with_root(scene, root, &simulation, &simulation).context(MirrorErr)?;

        Ok(Application {
            simulation,
            mirror: Some(mirror),
            settings,
            counter: StepCounter::default(),
        })
    }

    pub fn headless(simulation: Simulation, settings: RunSettings) -> Self {
        Application {
            simulation,
            mirror: None,
            settings,
            counter: StepCounter::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.simulation.num_total_steps() < self.settings.max_steps
    }

    /// Advances the simulation by one outer step and returns the simulated time it covered.
    ///
    /// That is a whole number of physics timesteps, so it can exceed `step_size`.
    pub fn step(&mut self) -> Duration {
        self.simulation.step(self.settings.step_size);
        Duration::from_secs_f64(self.simulation.num_sim_steps() as f64 * self.simulation.fixed_timestep())
    }

    /// Pushes the current poses to the viewer. Does nothing when headless.
    pub fn render(&mut self) -> Result<(), AppError> {
        match &mut self.mirror {
            Some(mirror) => mirror.render(&self.simulation).context(MirrorErr),
            None => Ok(()),
        }
    }

    pub fn reset(&mut self) -> Result<(), AppError> {
        self.simulation.reset();
        self.counter.clear();
        self.render()
    }

    /// Steps and renders until `max_steps` outer steps have been taken.
    pub fn run(&mut self) -> Result<(), AppError> {
        info!(
            "Running {} steps of {}s (physics timestep {}s)",
            self.settings.max_steps,
            self.settings.step_size,
            self.simulation.fixed_timestep()
        );

        while self.is_active() {
            let start = Instant::now();

            let simulated = self.step();
            self.render()?;

            let elapsed = start.elapsed();
            self.counter.record(elapsed);
            self.log_progress();

            if self.settings.realtime {
                if let Some(remaining) = simulated.checked_sub(elapsed) {
                    std::thread::sleep(remaining);
                }
            }
        }

        info!(
            "Finished after {} steps, {:.3}s simulated in {} physics steps",
            self.simulation.num_total_steps(),
            self.simulation.time(),
            self.simulation.num_total_sim_steps()
        );

        Ok(())
    }

    fn log_progress(&self) {
        let steps = self.simulation.num_total_steps();
        if self.settings.log_every == 0 || steps % self.settings.log_every != 0 {
            return;
        }

        info!(
            "Step {steps}/{}: t = {:.3}s, {:.1} steps/s, slowest {:.2}ms",
            self.settings.max_steps,
            self.simulation.time(),
            self.counter.steps_per_sec(),
            self.counter.slowest_step_time() * 1000.0
        );
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn mirror(&self) -> Option<&SceneMirror<S>> {
        self.mirror.as_ref()
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn step_counter(&self) -> &StepCounter {
        &self.counter
    }
}
