//! Rock economy data model.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

/// Raw and processed rock. Processed rock doubles as the session score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceEconomy {
    processable_rock: f64,
    processed_rock: f64,
}

impl ResourceEconomy {
    pub fn new(processable_rock: f64) -> Self {
        Self {
            processable_rock: processable_rock.max(0.0),
            processed_rock: 0.0,
        }
    }

    pub fn processable(&self) -> f64 {
        self.processable_rock
    }

    pub fn processed(&self) -> f64 {
        self.processed_rock
    }

    /// Processable plus processed. Only `produce` changes it.
    pub fn total(&self) -> f64 {
        self.processable_rock + self.processed_rock
    }

    /// Score shown to the player.
    pub fn score(&self) -> i64 {
        self.processed_rock.round() as i64
    }

    /// Add freshly drilled rock. Non-finite or negative amounts are ignored.
    pub fn produce(&mut self, amount: f64) -> bool {
        if !amount.is_finite() || amount <= 0.0 {
            return false;
        }
        self.processable_rock += amount;
        true
    }

    /// Move one quantum (or whatever is left, if less) from processable to
    /// processed. Returns the amount moved.
    pub fn convert_step(&mut self, quantum: f64) -> f64 {
        let moved = quantum.min(self.processable_rock).max(0.0);
        if moved <= 0.0 {
            return 0.0;
        }
        self.processable_rock -= moved;
        self.processed_rock += moved;
        // Clear float dust so the remainder step empties the pile exactly.
        if self.processable_rock < 1e-12 {
            self.processed_rock += self.processable_rock;
            self.processable_rock = 0.0;
        }
        moved
    }
}
