//! Properties of generated datasets, scenarios and derived metrics

use fincontrol::export::export_dataset_csv;
use fincontrol::models::{
    BudgetFigures, Dataset, FinancialPeriod, Money, Month, Scenario, TimeWindow,
};
use fincontrol::services::{derive_metrics, generate, GeneratorConfig, VarianceAnalysis};

fn config(seed: u64) -> GeneratorConfig {
    GeneratorConfig::ending_at(Month::new(2025, 12).unwrap()).with_seed(seed)
}

fn csv_bytes(dataset: &Dataset) -> Vec<u8> {
    let mut out = Vec::new();
    export_dataset_csv(dataset, &mut out).unwrap();
    out
}

#[test]
fn profit_and_margin_are_consistent() {
    for seed in [1, 42, 1234] {
        let data = generate(&config(seed), None);
        let metrics = derive_metrics(data.periods(), Some(data.budget()));

        for (period, derived) in data.periods().iter().zip(&metrics.periods) {
            assert_eq!(derived.profit, period.revenue - period.expenses);
            let expected = derived.profit.to_f64() / period.revenue.to_f64();
            assert!((derived.operating_margin - expected).abs() < 1e-12);
            assert!(period.revenue.is_positive());
        }
    }
}

#[test]
fn department_amounts_sum_to_period_totals() {
    for seed in [3, 42, 777] {
        let data = generate(&config(seed), Some(&Scenario::new(1.07, 0.93)));
        let records = data.department_records();

        for period in data.periods() {
            let own = records.iter().filter(|r| r.month == period.month);
            let revenue: Money = own.clone().map(|r| r.revenue).sum();
            let expenses: Money = own.clone().map(|r| r.expenses).sum();
            let share: f64 = own.map(|r| r.revenue_share).sum();

            assert_eq!(revenue, period.revenue);
            assert_eq!(expenses, period.expenses);
            assert!((share - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn first_period_growth_is_zero() {
    let data = generate(&config(42), None);
    let metrics = derive_metrics(data.periods(), None);
    assert_eq!(metrics.periods[0].revenue_growth, 0.0);

    let windowed = data.window(TimeWindow::LastThreeMonths);
    let metrics = derive_metrics(windowed.periods(), None);
    assert_eq!(metrics.periods[0].revenue_growth, 0.0);
}

#[test]
fn identity_scenario_reproduces_baseline() {
    let baseline = generate(&config(42), None);

    assert_eq!(generate(&config(42), Some(&Scenario::new(1.0, 1.0))), baseline);
    assert_eq!(generate(&config(42), Some(&Scenario::baseline())), baseline);
    assert_eq!(baseline.with_scenario(&Scenario::new(1.0, 1.0)), baseline);
    assert_eq!(
        csv_bytes(&generate(&config(42), Some(&Scenario::baseline()))),
        csv_bytes(&baseline)
    );
}

#[test]
fn revenue_multiplier_changes_only_revenue() {
    let month = Month::new(2025, 1).unwrap();
    let period = FinancialPeriod::new(month, Money::from_dollars(100_000), Money::from_dollars(70_000));
    let adjusted = Scenario::new(1.10, 1.0).apply(&period);

    assert_eq!(adjusted.revenue, Money::from_dollars(110_000));
    assert_eq!(adjusted.expenses, period.expenses);
    assert_eq!(adjusted.profit(), Money::from_dollars(40_000));
    assert!((adjusted.margin() - 40_000.0 / 110_000.0).abs() < 1e-12);
}

#[test]
fn scenario_suffix_leaves_earlier_periods() {
    let baseline = generate(&config(8), None);
    let from = Month::new(2025, 7).unwrap();
    let adjusted = baseline.with_scenario(&Scenario::new(1.2, 1.1).starting_at(from));

    for (before, after) in baseline.periods().iter().zip(adjusted.periods()) {
        if before.month < from {
            assert_eq!(before, after);
        } else {
            assert_eq!(after.revenue, before.revenue.scale(1.2));
        }
    }
}

#[test]
fn extreme_multipliers_are_clamped() {
    let baseline = generate(&config(5), None);

    for multiplier in [-3.0, 0.0, f64::NAN, f64::INFINITY, 1e9] {
        let adjusted = baseline.with_scenario(&Scenario::new(multiplier, multiplier));
        for period in adjusted.periods() {
            assert!(period.revenue.is_positive());
            assert!(!period.expenses.is_negative());
        }
    }
}

#[test]
fn mismatched_budget_makes_variance_unavailable() {
    let data = generate(&config(42), None);
    let short: Vec<BudgetFigures> = data.budget()[..6].to_vec();

    let metrics = derive_metrics(data.periods(), Some(short.as_slice()));
    assert!(matches!(metrics.variance, VarianceAnalysis::Unavailable { .. }));
    assert_eq!(metrics.periods.len(), 12);

    let aligned = derive_metrics(data.periods(), Some(data.budget()));
    assert!(aligned.variance.is_available());
}

#[test]
fn same_seed_same_bytes() {
    let a = csv_bytes(&generate(&config(42), None));
    let b = csv_bytes(&generate(&config(42), None));
    assert_eq!(a, b);

    let other = csv_bytes(&generate(&config(43), None));
    assert_ne!(a, other);
}

#[test]
fn empty_input_has_zero_totals() {
    let metrics = derive_metrics(&[], None);
    assert_eq!(metrics.total_revenue, Money::zero());
    assert_eq!(metrics.average_margin, 0.0);
    assert!(metrics.periods.is_empty());
}
