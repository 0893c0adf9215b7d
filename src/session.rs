use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::data::{GenerateRequest, GenerationOutput, WorkloadRow};
use crate::engine;
use crate::error::GenerationError;
use crate::ledger::AvailabilityLedger;
use crate::pairing::RotationStrategy;
use crate::workload;

/// One interactive generation session.
///
/// Owns the availability ledger for as long as the session lives. Repeated
/// runs accumulate bookings until [`GenerationSession::reset`].
#[derive(Debug, Default)]
pub struct GenerationSession {
    ledger: AvailabilityLedger,
    seed: Option<u64>,
    rotation: RotationStrategy,
    roster: Vec<String>,
}

impl GenerationSession {
    /// `seed: None` draws a fresh seed for every run.
    pub fn new(seed: Option<u64>, rotation: RotationStrategy) -> Self {
        Self {
            seed,
            rotation,
            ..Self::default()
        }
    }

    pub fn ledger(&self) -> &AvailabilityLedger {
        &self.ledger
    }

    /// Runs generation against this session's ledger.
    ///
    /// A new generator is built from the seed on every run, so with a seed and
    /// a cleared ledger the output repeats exactly.
    pub fn generate(&mut self, request: &GenerateRequest) -> Result<GenerationOutput, GenerationError> {
        let seed = request.seed.or(self.seed).unwrap_or_else(rand::random);
        let rotation = request.rotation.unwrap_or(self.rotation);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        info!("Run seeded with {} using {:?} lab rotation.", seed, rotation);

        let faculty = request.faculty.clone().unwrap_or_default();
        let output = engine::generate(
            &request.mappings,
            request.semester.as_deref(),
            &faculty,
            rotation,
            &mut self.ledger,
            &mut rng,
        )?;
        self.roster = output.workload.iter().map(|w| w.faculty.clone()).collect();
        Ok(output)
    }

    /// Workload for `faculty`, or for the roster of the last run.
    pub fn workload(&self, faculty: Option<&[String]>) -> Vec<WorkloadRow> {
        workload::summarize(&self.ledger, faculty.unwrap_or(self.roster.as_slice()))
    }

    /// Clears the ledger and returns the number of bookings dropped.
    pub fn reset(&mut self) -> usize {
        let cleared = self.ledger.reset();
        info!("Ledger reset, {} bookings cleared.", cleared);
        cleared
    }
}
