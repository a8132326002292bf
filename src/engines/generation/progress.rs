use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64);
}

pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64) {
        log::info!(
            "Generation {} complete. Best fitness: {:.4}, mean fitness: {:.4}",
            generation + 1,
            best_fitness,
            mean_fitness
        );
    }
}

/// Cooperative stop request, honoured at generation boundaries
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
