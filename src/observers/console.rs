use std::io::Write;

use crate::Error;
use crate::observers::Telemetry;

/// Prints Ez statistics to stdout every `interval` steps.
pub struct ConsoleTelemetry {
    pub interval: usize,
    /// Wait for Enter after each printout.
    pub pause: bool,
}
impl ConsoleTelemetry {
    /// The line printed for `step`, if it falls on the interval.
    pub fn message(&self, step: usize, center: f64, max: f64, min: f64) -> Option<String> {
        if self.interval == 0 || step % self.interval != 0 {
            return None;
        }
        Some(format!(
            "Step {}: Ez center = {:.4e}, max = {:.4e}, min = {:.4e}",
            step, center, max, min,
        ))
    }
}
impl Default for ConsoleTelemetry {
    fn default() -> Self {
        Self { interval: 10, pause: false }
    }
}
impl Telemetry for ConsoleTelemetry {
    fn on_step(&mut self, step: usize, center: f64, max: f64, min: f64) -> Result<(), Error> {
        if let Some(line) = self.message(step, center, max, min) {
            println!("{}", line);
            if self.pause {
                print!("Press Enter to continue...");
                std::io::stdout().flush()?;
                std::io::stdin().read_line(&mut String::new())?;
            }
        }
        Ok(())
    }
}
