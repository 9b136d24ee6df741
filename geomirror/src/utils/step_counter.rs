use std::collections::VecDeque;
use web_time::Duration;

const DEFAULT_WINDOW: usize = 60;

/// Rolling wall-clock statistics over the most recent outer steps of an
/// [`Application`](crate::Application).
#[derive(Debug, Clone, Default)]
pub struct StepCounter {
    step_times: VecDeque<f32>,
}

impl StepCounter {
    pub fn record(&mut self, elapsed: Duration) {
        if self.step_times.len() >= DEFAULT_WINDOW {
            self.step_times.pop_front();
        }
        self.step_times.push_back(elapsed.as_secs_f32());
    }

    pub fn clear(&mut self) {
        self.step_times.clear();
    }

    pub fn len(&self) -> usize {
        self.step_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.step_times.is_empty()
    }

    /// Mean seconds per step, `0.0` before the first step.
    pub fn mean_step_time(&self) -> f32 {
        if self.step_times.is_empty() {
            return 0.0;
        }
        self.step_times.iter().sum::<f32>() / self.step_times.len() as f32
    }

    pub fn steps_per_sec(&self) -> f32 {
        let dt = self.mean_step_time();
        if dt < f32::EPSILON { 0.0 } else { 1.0 / dt }
    }

    pub fn slowest_step_time(&self) -> f32 {
        self.step_times
            .iter()
            .copied()
            .max_by(|a, b| a.total_cmp(b))
            .unwrap_or_default()
    }
}
