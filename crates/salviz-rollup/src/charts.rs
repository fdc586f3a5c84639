//! Bar and pie chart data
//!
//! - Bar: mean salary per experience level, ascending by mean
//! - Pie: mean salary per company size, in rollup order, with slice angles

use crate::engine::{rollup, CategoryOrder};
use crate::reducer::MeanSalary;
use salviz_model::{CompanySize, ExperienceLevel, Record};
use serde::Serialize;
use std::f64::consts::TAU;

/// One bar of the salary-by-experience chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    /// Experience level on the x axis
    pub category: ExperienceLevel,
    /// Tooltip description of the level
    pub description: &'static str,
    /// Mean salary in USD
    pub mean_value: f64,
}

/// Mean salary per experience level, sorted ascending by mean
///
/// Ties keep rollup order.
#[must_use]
pub fn bar_data(records: &[Record], order: CategoryOrder) -> Vec<BarDatum> {
    let mut means = rollup(records, Record::experience_level, &MeanSalary);
    order.apply(&mut means);
    let mut bars: Vec<BarDatum> = means
        .into_iter()
        .map(|(category, mean_value)| BarDatum {
            category,
            description: category.description(),
            mean_value,
        })
        .collect();
    bars.sort_by(|a, b| a.mean_value.total_cmp(&b.mean_value));
    bars
}

/// One slice of the salary-by-company-size donut
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    /// Company size
    pub category: CompanySize,
    /// Mean salary in USD
    pub mean_value: f64,
    /// Start angle in radians, clockwise from twelve o'clock
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
}

/// Salary-by-company-size donut data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieData {
    slices: Vec<PieSlice>,
    total: f64,
}

impl PieData {
    /// Build slices in rollup order
    ///
    /// Angles are proportional to mean salary and cover the full circle;
    /// if every mean is zero all slices are empty.
    #[must_use]
    pub fn from_records(records: &[Record], order: CategoryOrder) -> Self {
        let mut means = rollup(records, |r| r.company_size().clone(), &MeanSalary);
        order.apply(&mut means);

        let total: f64 = means.values().sum();
        let k = if total > 0.0 { TAU / total } else { 0.0 };

        let mut angle = 0.0;
        let slices = means
            .into_iter()
            .map(|(category, mean_value)| {
                let start_angle = angle;
                angle += mean_value * k;
                PieSlice {
                    category,
                    mean_value,
                    start_angle,
                    end_angle: angle,
                }
            })
            .collect();

        Self { slices, total }
    }

    /// Slices in rollup order
    #[inline]
    #[must_use]
    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    /// Sum of all slice means
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Share of the total for one category, in percent
    ///
    /// `None` if the category has no slice; `0.0` if the total is zero.
    #[must_use]
    pub fn percentage(&self, category: &CompanySize) -> Option<f64> {
        let slice = self.slices.iter().find(|s| &s.category == category)?;
        if self.total > 0.0 {
            Some(slice.mean_value / self.total * 100.0)
        } else {
            Some(0.0)
        }
    }
}
