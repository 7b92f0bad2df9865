//! Fluent builder for constructing a [`Model`].

use epi_core::{CalendarDate, ModelConfig, SimDuration, TimePoint};

use crate::{Model, ModelResult};

/// Fluent builder for [`Model`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                         |
/// |-------------------------|---------------------------------|
/// | `.seed(s)`              | `config.seed` (0)               |
/// | `.report_interval(d)`   | 24 h                            |
/// | `.start_date(y, m, d)`  | none: clock starts at the epoch |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(ModelConfig::default())
///     .seed(42)
///     .start_date(2020, 4, 1)
///     .build()?;
/// let home = model.create_location(0.7, "home")?;
/// ```
pub struct ModelBuilder {
    config: ModelConfig,
}

impl ModelBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Time between SEIR snapshots.  Must be positive.
    pub fn report_interval(mut self, interval: SimDuration) -> Self {
        self.config.report_interval_secs = interval.as_secs();
        self
    }

    /// Start the clock at local midnight of the given day.
    pub fn start_date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.config.start_date = Some(CalendarDate::new(year, month, day));
        self
    }

    /// Validate the configuration, resolve the start date, and return a
    /// model with no persons or locations.
    pub fn build(self) -> ModelResult<Model> {
        self.config.validate()?;
        let origin = match self.config.start_date {
            Some(date) => date.midnight()?,
            None => TimePoint::EPOCH,
        };
        Ok(Model::with_origin(self.config, origin))
    }
}
