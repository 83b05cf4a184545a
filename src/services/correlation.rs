//! Correlation of the headline series
//!
//! Pearson correlation between revenue, expenses, profit and margin over a
//! period sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::FinancialPeriod;

/// Series included in the correlation matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Series {
    Revenue,
    Expenses,
    Profit,
    Margin,
}

impl Series {
    pub const ALL: [Series; 4] = [Series::Revenue, Series::Expenses, Series::Profit, Series::Margin];

    fn values(&self, periods: &[FinancialPeriod]) -> Vec<f64> {
        periods
            .iter()
            .map(|p| match self {
                Self::Revenue => p.revenue.to_f64(),
                Self::Expenses => p.expenses.to_f64(),
                Self::Profit => p.profit().to_f64(),
                Self::Margin => p.margin(),
            })
            .collect()
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revenue => write!(f, "Revenue"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Profit => write!(f, "Profit"),
            Self::Margin => write!(f, "Margin"),
        }
    }
}

/// Symmetric correlation matrix indexed by [`Series::ALL`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub values: [[f64; 4]; 4],
}

impl CorrelationMatrix {
    pub fn from_periods(periods: &[FinancialPeriod]) -> Self {
        let series: Vec<Vec<f64>> = Series::ALL.iter().map(|s| s.values(periods)).collect();
        let mut values = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                values[i][j] = if i == j {
                    1.0
                } else {
                    pearson(&series[i], &series[j])
                };
            }
        }
        Self { values }
    }

    pub fn get(&self, a: Series, b: Series) -> f64 {
        let index = |s: Series| Series::ALL.iter().position(|x| *x == s).unwrap_or(0);
        self.values[index(a)][index(b)]
    }
}

/// Pearson correlation coefficient, 0.0 when either series has no variance
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        0.0
    } else {
        (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
    }
}
