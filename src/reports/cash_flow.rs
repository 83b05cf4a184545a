//! Cash Flow Report
//!
//! Latest cash-flow components plus window averages for operating cash
//! flow, net cash flow, cash conversion and the current ratio.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tabled::Tabled;

use crate::display::{format_compact, format_title, render_table};
use crate::error::FinResult;
use crate::models::{CashFlow, Dataset, Money, Month, WorkingCapital};
use crate::services::metrics::mean;

/// Cash flow and working capital for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub month: Month,
    pub cash_flow: CashFlow,
    pub working_capital: WorkingCapital,
}

/// Cash Flow Report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowReport {
    pub entries: Vec<CashFlowEntry>,
    pub average_operating: Money,
    pub average_net: Money,
    /// Mean of operating cash flow over revenue, in percent
    pub cash_conversion_percent: f64,
    /// Mean current assets over mean current liabilities
    pub average_current_ratio: f64,
}

#[derive(Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Operating")]
    operating: String,
    #[tabled(rename = "Investing")]
    investing: String,
    #[tabled(rename = "Financing")]
    financing: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Current Ratio")]
    current_ratio: String,
}

impl CashFlowReport {
    pub fn generate(dataset: &Dataset) -> Self {
        let entries: Vec<CashFlowEntry> = dataset
            .periods()
            .iter()
            .zip(dataset.cash_flows())
            .zip(dataset.working_capital())
            .map(|((period, cash_flow), working_capital)| CashFlowEntry {
                month: period.month,
                cash_flow,
                working_capital,
            })
            .collect();

        let count = entries.len() as i64;
        let average = |total: Money| {
            if count == 0 {
                Money::zero()
            } else {
                Money::from_cents(total.cents() / count)
            }
        };

        let average_operating = average(entries.iter().map(|e| e.cash_flow.operating).sum());
        let average_net = average(entries.iter().map(|e| e.cash_flow.net()).sum());

        let cash_conversion_percent = mean(
            dataset
                .periods()
                .iter()
                .zip(&entries)
                .map(|(p, e)| e.cash_flow.operating.ratio_to(p.revenue)),
        ) * 100.0;

        let assets: Money = entries.iter().map(|e| e.working_capital.current_assets).sum();
        let liabilities: Money = entries
            .iter()
            .map(|e| e.working_capital.current_liabilities)
            .sum();
        // Equal counts cancel, so the ratio of sums equals the ratio of means.
        let average_current_ratio = assets.ratio_to(liabilities);

        Self {
            entries,
            average_operating,
            average_net,
            cash_conversion_percent,
            average_current_ratio,
        }
    }

    pub fn latest(&self) -> Option<&CashFlowEntry> {
        self.entries.last()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format_title("Cash Flow Analysis");

        let Some(latest) = self.latest() else {
            output.push_str("No periods in the selected window.\n");
            return output;
        };

        output.push_str(&format!("Latest period ({}):\n", latest.month.label()));
        output.push_str(&format!(
            "  Operating: {:>12}\n  Investing: {:>12}\n  Financing: {:>12}\n  Net:       {:>12}\n\n",
            latest.cash_flow.operating.format_with_symbol(symbol),
            latest.cash_flow.investing.format_with_symbol(symbol),
            latest.cash_flow.financing.format_with_symbol(symbol),
            latest.cash_flow.net().format_with_symbol(symbol),
        ));

        output.push_str(&format!(
            "Avg Operating CF:    {}\n",
            format_compact(self.average_operating, symbol)
        ));
        output.push_str(&format!(
            "Avg Net Cash Flow:   {}\n",
            format_compact(self.average_net, symbol)
        ));
        output.push_str(&format!(
            "Cash Conversion:     {:.1}%\n",
            self.cash_conversion_percent
        ));
        output.push_str(&format!(
            "Avg Current Ratio:   {:.2}\n\n",
            self.average_current_ratio
        ));

        let rows = self.entries.iter().map(|e| CashFlowRow {
            month: e.month.to_string(),
            operating: format_compact(e.cash_flow.operating, symbol),
            investing: format_compact(e.cash_flow.investing, symbol),
            financing: format_compact(e.cash_flow.financing, symbol),
            net: format_compact(e.cash_flow.net(), symbol),
            current_ratio: format!("{:.2}", e.working_capital.current_ratio()),
        });
        output.push_str(&render_table(rows));
        output.push('\n');

        output
    }

    /// Export the per-period cash flow to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "month",
            "operating",
            "investing",
            "financing",
            "net",
            "current_assets",
            "current_liabilities",
        ])?;

        for e in &self.entries {
            wtr.write_record([
                e.month.to_string(),
                e.cash_flow.operating.to_decimal_string(),
                e.cash_flow.investing.to_decimal_string(),
                e.cash_flow.financing.to_decimal_string(),
                e.cash_flow.net().to_decimal_string(),
                e.working_capital.current_assets.to_decimal_string(),
                e.working_capital.current_liabilities.to_decimal_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
