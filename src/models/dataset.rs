//! Generated dataset
//!
//! A [`Dataset`] owns index-aligned sequences: actual periods, budget
//! baseline, department splits and cash-flow drivers. It is produced by the
//! generator, owned by whoever asked for it, and never cached globally.
//! Scenario application and windowing return new datasets.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::cash_flow::{CashFlow, CashFlowDrivers, WorkingCapital};
use super::department::{DepartmentRecord, DepartmentSplit};
use super::filter::TimeWindow;
use super::period::{BudgetFigures, FinancialPeriod};
use super::scenario::Scenario;

/// Synthetic financial dataset for a run of consecutive months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scenario: Option<Scenario>,
    periods: Vec<FinancialPeriod>,
    budget: Vec<BudgetFigures>,
    splits: Vec<DepartmentSplit>,
    drivers: Vec<CashFlowDrivers>,
}

impl Dataset {
    /// Assemble a dataset from aligned sequences
    ///
    /// All sequences must have the same length; extra entries are dropped.
    pub fn from_parts(
        seed: u64,
        mut periods: Vec<FinancialPeriod>,
        mut budget: Vec<BudgetFigures>,
        mut splits: Vec<DepartmentSplit>,
        mut drivers: Vec<CashFlowDrivers>,
    ) -> Self {
        let len = periods
            .len()
            .min(budget.len())
            .min(splits.len())
            .min(drivers.len());
        periods.truncate(len);
        budget.truncate(len);
        splits.truncate(len);
        drivers.truncate(len);

        Self {
            seed,
            scenario: None,
            periods,
            budget,
            splits,
            drivers,
        }
    }

    /// Seed the dataset was generated from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scenario applied to produce this dataset, if any
    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    /// Actual figures, oldest first
    pub fn periods(&self) -> &[FinancialPeriod] {
        &self.periods
    }

    /// Budget baseline aligned with [`Dataset::periods`]
    pub fn budget(&self) -> &[BudgetFigures] {
        &self.budget
    }

    pub fn splits(&self) -> &[DepartmentSplit] {
        &self.splits
    }

    pub fn drivers(&self) -> &[CashFlowDrivers] {
        &self.drivers
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Most recent period
    pub fn latest(&self) -> Option<&FinancialPeriod> {
        self.periods.last()
    }

    /// Department records for every period, chronological, departments in canonical order
    pub fn department_records(&self) -> Vec<DepartmentRecord> {
        self.periods
            .iter()
            .zip(&self.splits)
            .flat_map(|(period, split)| split.records(period))
            .collect()
    }

    /// Cash flow per period
    pub fn cash_flows(&self) -> Vec<CashFlow> {
        self.periods
            .iter()
            .zip(&self.drivers)
            .map(|(period, drivers)| drivers.cash_flow(period))
            .collect()
    }

    /// Working capital per period
    pub fn working_capital(&self) -> Vec<WorkingCapital> {
        self.periods
            .iter()
            .zip(&self.drivers)
            .map(|(period, drivers)| drivers.working_capital(period))
            .collect()
    }

    /// Return a new dataset with the scenario applied to the actual figures
    ///
    /// The budget baseline is left as generated so variance reflects the
    /// what-if change. `self` is not modified. An identity scenario returns
    /// an unchanged copy with no scenario recorded.
    pub fn with_scenario(&self, scenario: &Scenario) -> Dataset {
        if scenario.is_identity() {
            return self.clone();
        }
        let periods = self.periods.iter().map(|p| scenario.apply(p)).collect();
        Dataset {
            seed: self.seed,
            scenario: Some(*scenario),
            periods,
            budget: self.budget.clone(),
            splits: self.splits.clone(),
            drivers: self.drivers.clone(),
        }
    }

    /// The trailing periods selected by `window`
    pub fn window(&self, window: TimeWindow) -> Dataset {
        let start = window.start_index(self.len());
        self.slice(start..self.len())
    }

    /// The periods that precede `window`
    pub fn before_window(&self, window: TimeWindow) -> Dataset {
        let start = window.start_index(self.len());
        self.slice(0..start)
    }

    fn slice(&self, range: Range<usize>) -> Dataset {
        Dataset {
            seed: self.seed,
            scenario: self.scenario,
            periods: self.periods[range.clone()].to_vec(),
            budget: self.budget[range.clone()].to_vec(),
            splits: self.splits[range.clone()].to_vec(),
            drivers: self.drivers[range].to_vec(),
        }
    }
}
