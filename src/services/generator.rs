//! Synthetic dataset generator
//!
//! Produces a run of monthly periods with a linear growth trend, a Q4-heavy
//! seasonal pattern and bounded noise, plus the matching budget baseline,
//! department splits and cash-flow drivers. All randomness comes from a
//! `StdRng` seeded explicitly, so the same configuration always yields the
//! same dataset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::{debug, warn};

use crate::models::{
    BudgetFigures, CashFlowDrivers, Dataset, DepartmentSplit, DepartmentWeights, FinancialPeriod,
    Money, Month, Scenario, DEPARTMENT_COUNT,
};

/// Seed used when none is supplied
pub const DEFAULT_SEED: u64 = 42;

/// Number of monthly periods generated by default
pub const DEFAULT_PERIODS: usize = 12;

/// Default monthly revenue level before trend, season and noise
pub const DEFAULT_BASE_REVENUE: Money = Money::from_dollars(1_000_000);

/// Largest accepted base revenue. Totals, scenario multipliers and budget
/// factors on top of it stay well inside the cent range.
pub const MAX_BASE_REVENUE: Money = Money::from_dollars(1_000_000_000_000);

const TREND_START: f64 = 0.9;
const TREND_END: f64 = 1.2;

const SEASONAL_AMPLITUDE: f64 = 0.10;
/// Month-of-year where the seasonal curve peaks (mid-December)
const SEASONAL_PEAK: f64 = 11.5;

const REVENUE_NOISE: (f64, f64) = (0.95, 1.05);
const EXPENSE_RATIO: (f64, f64) = (0.60, 0.70);
const EXPENSE_NOISE: (f64, f64) = (0.97, 1.03);

/// Margin band generated expenses are clamped into
pub const MIN_GENERATED_MARGIN: f64 = 0.05;
pub const MAX_GENERATED_MARGIN: f64 = 0.45;

const BUDGET_REVENUE: (f64, f64) = (1.05, 1.10);
const BUDGET_EXPENSES: (f64, f64) = (0.95, 1.00);

const OPERATING_CASH: (f64, f64) = (0.8, 1.2);
const INVESTING_CASH: (f64, f64) = (0.1, 0.3);
const FINANCING_CASH: (f64, f64) = (-0.2, 0.2);
const CURRENT_ASSETS: (f64, f64) = (0.3, 0.5);
const CURRENT_LIABILITIES: (f64, f64) = (0.2, 0.4);

const DEPARTMENT_REVENUE_WEIGHT: (f64, f64) = (0.10, 0.30);
const DEPARTMENT_EXPENSE_WEIGHT: (f64, f64) = (0.15, 0.25);

/// Generator parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Random seed; `None` uses [`DEFAULT_SEED`]
    pub seed: Option<u64>,
    /// Most recent month of the generated run
    pub end_month: Month,
    /// Revenue level the trend and season are applied to
    pub base_revenue: Money,
    /// Number of monthly periods
    pub periods: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::ending_at(Month::current())
    }
}

impl GeneratorConfig {
    /// Default configuration ending at the given month
    pub fn ending_at(end_month: Month) -> Self {
        Self {
            seed: None,
            end_month,
            base_revenue: DEFAULT_BASE_REVENUE,
            periods: DEFAULT_PERIODS,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_base_revenue(mut self, base_revenue: Money) -> Self {
        self.base_revenue = base_revenue;
        self
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Generate a dataset and optionally apply a scenario to it
///
/// The scenario never feeds back into the random draws: the adjusted
/// dataset is the baseline dataset with the scenario applied afterwards.
pub fn generate(config: &GeneratorConfig, scenario: Option<&Scenario>) -> Dataset {
    let baseline = DatasetGenerator::new(config.clone()).generate();
    match scenario {
        Some(scenario) => baseline.with_scenario(scenario),
        None => baseline,
    }
}

/// Deterministic generator for one dataset
pub struct DatasetGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl DatasetGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.effective_seed());
        Self { config, rng }
    }

    /// Draw the full dataset
    ///
    /// Draw order per period is fixed: revenue, expenses, budget, cash-flow
    /// drivers, department weights.
    pub fn generate(mut self) -> Dataset {
        let seed = self.config.effective_seed();
        let count = self.config.periods;
        let base_revenue = if !self.config.base_revenue.is_positive() {
            warn!(
                base_revenue = %self.config.base_revenue,
                "non-positive base revenue replaced by default"
            );
            DEFAULT_BASE_REVENUE
        } else if self.config.base_revenue > MAX_BASE_REVENUE {
            warn!(
                base_revenue = %self.config.base_revenue,
                max = %MAX_BASE_REVENUE,
                "base revenue clamped to maximum"
            );
            MAX_BASE_REVENUE
        } else {
            self.config.base_revenue
        };

        debug!(seed, periods = count, end_month = %self.config.end_month, "generating dataset");

        let months = self.config.end_month.trailing(count);
        let mut periods = Vec::with_capacity(count);
        let mut budget = Vec::with_capacity(count);
        let mut splits = Vec::with_capacity(count);
        let mut drivers = Vec::with_capacity(count);

        for (i, month) in months.into_iter().enumerate() {
            let level = trend_factor(i, count) * seasonal_factor(month) * self.draw(REVENUE_NOISE);
            let revenue = base_revenue.scale(level);

            let ratio = self.draw(EXPENSE_RATIO) * self.draw(EXPENSE_NOISE);
            let expenses = clamp_expenses(revenue, revenue.scale(ratio));
            let period = FinancialPeriod::new(month, revenue, expenses);

            let budget_figures = BudgetFigures::new(
                month,
                revenue.scale(self.draw(BUDGET_REVENUE)),
                expenses.scale(self.draw(BUDGET_EXPENSES)),
            );

            let period_drivers = CashFlowDrivers {
                operating: self.draw(OPERATING_CASH),
                investing: self.draw(INVESTING_CASH),
                financing: self.draw(FINANCING_CASH),
                current_assets: self.draw(CURRENT_ASSETS),
                current_liabilities: self.draw(CURRENT_LIABILITIES),
            };

            let split = DepartmentSplit::new(
                self.draw_weights(DEPARTMENT_REVENUE_WEIGHT),
                self.draw_weights(DEPARTMENT_EXPENSE_WEIGHT),
            );

            debug!(
                month = %month,
                revenue = %period.revenue,
                expenses = %period.expenses,
                margin = period.margin(),
                "generated period"
            );

            periods.push(period);
            budget.push(budget_figures);
            drivers.push(period_drivers);
            splits.push(split);
        }

        Dataset::from_parts(seed, periods, budget, splits, drivers)
    }

    fn draw(&mut self, (low, high): (f64, f64)) -> f64 {
        self.rng.gen_range(low..=high)
    }

    fn draw_weights(&mut self, range: (f64, f64)) -> DepartmentWeights {
        let mut raw = [0.0; DEPARTMENT_COUNT];
        for w in raw.iter_mut() {
            *w = self.draw(range);
        }
        DepartmentWeights::normalized(raw)
    }
}

/// Linear growth factor for period `index` of `count`
pub fn trend_factor(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return TREND_END;
    }
    TREND_START + (TREND_END - TREND_START) * index as f64 / (count - 1) as f64
}

/// Seasonal multiplier for a month of year, highest in Q4 and lowest in Q2
pub fn seasonal_factor(month: Month) -> f64 {
    let phase = 2.0 * PI * (month.month() as f64 - SEASONAL_PEAK) / 12.0;
    1.0 + SEASONAL_AMPLITUDE * phase.cos()
}

/// Keep expenses such that the margin lies within the generated margin band
fn clamp_expenses(revenue: Money, expenses: Money) -> Money {
    let floor = revenue.scale(1.0 - MAX_GENERATED_MARGIN);
    let ceiling = revenue.scale(1.0 - MIN_GENERATED_MARGIN);
    expenses.clamp(floor, ceiling)
}
