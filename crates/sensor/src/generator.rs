use prodline_core::error::{ProdlineError, Result};
use prodline_core::model::{OrderType, Reading, TypeCounts};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Orders added per type per iteration before scaling.
    pub base_increment: f64,
    pub min_factor: f64,
    pub max_factor: f64,
    /// Chance that a single new order is defective.
    pub defect_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_increment: 10.0,
            min_factor: 0.5,
            max_factor: 1.0,
            defect_probability: 0.01,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.defect_probability) {
            return Err(ProdlineError::InvalidArgument(format!(
                "defect probability must be within 0..=1, got {}",
                self.defect_probability
            )));
        }
        if !(self.min_factor >= 0.0 && self.min_factor <= self.max_factor) {
            return Err(ProdlineError::InvalidArgument(format!(
                "increment factor range {}..={} is invalid",
                self.min_factor, self.max_factor
            )));
        }
        if !(self.base_increment.is_finite() && self.base_increment >= 0.0) {
            return Err(ProdlineError::InvalidArgument(format!(
                "base increment must be a non-negative number, got {}",
                self.base_increment
            )));
        }
        Ok(())
    }
}

/// Counters added by one call to [`SensorState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    pub orders: TypeCounts,
    pub defects: TypeCounts,
}

/// Cumulative counters since process start. Lives only in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorState {
    pub orders: TypeCounts,
    pub defects: TypeCounts,
}

impl SensorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `round(base * U[min, max])` orders per type, then samples one
    /// defect trial per order added in this step.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, cfg: &GeneratorConfig) -> Step {
        let mut step = Step::default();

        for ty in OrderType::ALL {
            let factor = rng.gen_range(cfg.min_factor..=cfg.max_factor);
            let added = (cfg.base_increment * factor).round_ties_even() as i32;
            *step.orders.get_mut(ty) = added;
            *self.orders.get_mut(ty) += added;
        }

        for ty in OrderType::ALL {
            let defects = (0..step.orders.get(ty))
                .filter(|_| rng.gen_bool(cfg.defect_probability))
                .count() as i32;
            *step.defects.get_mut(ty) = defects;
            *self.defects.get_mut(ty) += defects;
        }

        step
    }

    pub fn reading(&self, time: String) -> Reading {
        Reading {
            orders: self.orders,
            defects: self.defects,
            time,
        }
    }
}
