//! Descriptive statistics for the distribution inspector.

pub mod density;
pub mod shapiro;

pub use density::{ColumnDistribution, Histogram, distribution, histogram, kde_density, scott_bandwidth};
pub use shapiro::{ShapiroWilk, shapiro_wilk};
