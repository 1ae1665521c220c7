//! # Worker Reports
//!
//! Each order worker tallies what happened to the orders it handled. Reports are
//! returned when the worker thread is joined at shutdown.

use serde::{Deserialize, Serialize};

/// Per-worker tally of order and product outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Product lists of orders the client collected
    pub collected_orders: Vec<Vec<String>>,
    /// Product lists of orders whose pickup timed out
    pub abandoned_orders: Vec<Vec<String>>,
    /// Product lists of orders that failed because a station broke down
    pub failed_orders: Vec<Vec<String>>,
    /// Every individual product a station failed to make
    pub failed_products: Vec<String>,
}

impl WorkerReport {
    /// Orders this worker brought to a final outcome
    pub fn orders_handled(&self) -> usize {
        self.collected_orders.len() + self.abandoned_orders.len() + self.failed_orders.len()
    }
}

/// Totals across every worker's report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownSummary {
    pub workers: usize,
    pub collected: usize,
    pub abandoned: usize,
    pub failed: usize,
    pub failed_products: usize,
}

impl ShutdownSummary {
    pub fn from_reports(reports: &[WorkerReport]) -> Self {
        reports.iter().fold(
            Self {
                workers: reports.len(),
                ..Self::default()
            },
            |mut summary, report| {
                summary.collected += report.collected_orders.len();
                summary.abandoned += report.abandoned_orders.len();
                summary.failed += report.failed_orders.len();
                summary.failed_products += report.failed_products.len();
                summary
            },
        )
    }

    pub fn orders_handled(&self) -> usize {
        self.collected + self.abandoned + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(products: &[&str]) -> Vec<String> {
        products.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_summary_totals() {
        let reports = vec![
            WorkerReport {
                collected_orders: vec![order(&["burger"]), order(&["fries", "burger"])],
                abandoned_orders: vec![order(&["pie"])],
                ..WorkerReport::default()
            },
            WorkerReport {
                failed_orders: vec![order(&["pie", "fries"])],
                failed_products: vec!["pie".to_string()],
                ..WorkerReport::default()
            },
        ];

        assert_eq!(reports[0].orders_handled(), 3);
        let summary = ShutdownSummary::from_reports(&reports);
        assert_eq!(
            summary,
            ShutdownSummary {
                workers: 2,
                collected: 2,
                abandoned: 1,
                failed: 1,
                failed_products: 1,
            }
        );
        assert_eq!(summary.orders_handled(), 4);
    }

    #[test]
    fn test_report_serializes() {
        let report = WorkerReport {
            failed_products: vec!["pie".to_string()],
            ..WorkerReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failed_products"][0], "pie");
        assert_eq!(json["collected_orders"].as_array().map(Vec::len), Some(0));
    }
}
