//! Column-oriented panel storage.
//!
//! The generator fills whole columns at a time; rows are only materialized
//! when writing or previewing.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::{PANEL_COLUMNS, PanelRow, Region};

/// Region x week keys in generation (region-major) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelIndex {
    pub region: Vec<Region>,
    pub week: Vec<NaiveDate>,
}

impl PanelIndex {
    /// Cartesian product of every region with every week.
    pub fn cartesian(regions: &[Region], weeks: &[NaiveDate]) -> Self {
        let n = regions.len() * weeks.len();
        let mut region = Vec::with_capacity(n);
        let mut week = Vec::with_capacity(n);
        for &r in regions {
            for &w in weeks {
                region.push(r);
                week.push(w);
            }
        }
        Self { region, week }
    }

    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }
}

/// The full panel, one `Vec` per output column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelFrame {
    pub region: Vec<Region>,
    pub week: Vec<NaiveDate>,
    pub ad_spend_tv: Vec<f64>,
    pub ad_spend_digital: Vec<f64>,
    pub ad_spend_outdoor: Vec<f64>,
    pub ad_spend_retail: Vec<f64>,
    pub avg_temp: Vec<f64>,
    pub holiday: Vec<u8>,
    pub pepsi_spend: Vec<f64>,
    pub sales_volume: Vec<f64>,
    pub total_spend: Vec<f64>,
    pub roi: Vec<f64>,
}

impl PanelFrame {
    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), PANEL_COLUMNS.len())
    }

    pub fn row(&self, i: usize) -> PanelRow {
        PanelRow {
            region: self.region[i],
            week: self.week[i],
            ad_spend_tv: self.ad_spend_tv[i],
            ad_spend_digital: self.ad_spend_digital[i],
            ad_spend_outdoor: self.ad_spend_outdoor[i],
            ad_spend_retail: self.ad_spend_retail[i],
            avg_temp: self.avg_temp[i],
            holiday: self.holiday[i],
            pepsi_spend: self.pepsi_spend[i],
            sales_volume: self.sales_volume[i],
            total_spend: self.total_spend[i],
            roi: self.roi[i],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = PanelRow> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }

    pub fn from_rows(rows: &[PanelRow]) -> Self {
        let mut frame = Self::default();
        for r in rows {
            frame.region.push(r.region);
            frame.week.push(r.week);
            frame.ad_spend_tv.push(r.ad_spend_tv);
            frame.ad_spend_digital.push(r.ad_spend_digital);
            frame.ad_spend_outdoor.push(r.ad_spend_outdoor);
            frame.ad_spend_retail.push(r.ad_spend_retail);
            frame.avg_temp.push(r.avg_temp);
            frame.holiday.push(r.holiday);
            frame.pepsi_spend.push(r.pepsi_spend);
            frame.sales_volume.push(r.sales_volume);
            frame.total_spend.push(r.total_spend);
            frame.roi.push(r.roi);
        }
        frame
    }

    /// Stable sort of every column by `(region label, week)`.
    pub fn sort_by_region_week(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| compare_keys((self.region[a], self.week[a]), (self.region[b], self.week[b])));

        self.region = permute(&self.region, &order);
        self.week = permute(&self.week, &order);
        self.ad_spend_tv = permute(&self.ad_spend_tv, &order);
        self.ad_spend_digital = permute(&self.ad_spend_digital, &order);
        self.ad_spend_outdoor = permute(&self.ad_spend_outdoor, &order);
        self.ad_spend_retail = permute(&self.ad_spend_retail, &order);
        self.avg_temp = permute(&self.avg_temp, &order);
        self.holiday = permute(&self.holiday, &order);
        self.pepsi_spend = permute(&self.pepsi_spend, &order);
        self.sales_volume = permute(&self.sales_volume, &order);
        self.total_spend = permute(&self.total_spend, &order);
        self.roi = permute(&self.roi, &order);
    }

    /// True when rows are non-decreasing in `(region label, week)`.
    pub fn is_sorted(&self) -> bool {
        (1..self.len()).all(|i| {
            compare_keys((self.region[i - 1], self.week[i - 1]), (self.region[i], self.week[i])) != Ordering::Greater
        })
    }
}

/// Output ordering: region label as a string, then week.
pub fn compare_keys(a: (Region, NaiveDate), b: (Region, NaiveDate)) -> Ordering {
    a.0.label().cmp(b.0.label()).then(a.1.cmp(&b.1))
}

fn permute<T: Copy>(values: &[T], order: &[usize]) -> Vec<T> {
    order.iter().map(|&i| values[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn cartesian_is_region_major() {
        let idx = PanelIndex::cartesian(&[Region::West, Region::Midwest], &[d(1), d(8)]);
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.region, vec![Region::West, Region::West, Region::Midwest, Region::Midwest]);
        assert_eq!(idx.week, vec![d(1), d(8), d(1), d(8)]);
    }

    #[test]
    fn sort_orders_by_label_then_week_and_moves_all_columns() {
        let mut frame = PanelFrame::default();
        for (i, (r, w)) in [(Region::West, d(8)), (Region::GreatLakes, d(8)), (Region::West, d(1))]
            .into_iter()
            .enumerate()
        {
            frame.region.push(r);
            frame.week.push(w);
            let v = i as f64;
            frame.ad_spend_tv.push(v);
            frame.ad_spend_digital.push(v);
            frame.ad_spend_outdoor.push(v);
            frame.ad_spend_retail.push(v);
            frame.avg_temp.push(v);
            frame.holiday.push(i as u8);
            frame.pepsi_spend.push(v);
            frame.sales_volume.push(v);
            frame.total_spend.push(v);
            frame.roi.push(v);
        }
        assert!(!frame.is_sorted());

        frame.sort_by_region_week();
        assert!(frame.is_sorted());
        assert_eq!(frame.region, vec![Region::GreatLakes, Region::West, Region::West]);
        assert_eq!(frame.week, vec![d(8), d(1), d(8)]);
        assert_eq!(frame.ad_spend_tv, vec![1.0, 2.0, 0.0]);
        assert_eq!(frame.holiday, vec![1, 2, 0]);
        assert_eq!(frame.roi, vec![1.0, 2.0, 0.0]);
        assert_eq!(frame.shape(), (3, 12));
    }

    #[test]
    fn rows_round_trip_through_frame() {
        let mut frame = PanelFrame::default();
        frame.region.push(Region::Plains);
        frame.week.push(d(1));
        for col in [
            &mut frame.ad_spend_tv,
            &mut frame.ad_spend_digital,
            &mut frame.ad_spend_outdoor,
            &mut frame.ad_spend_retail,
            &mut frame.avg_temp,
            &mut frame.pepsi_spend,
            &mut frame.sales_volume,
            &mut frame.total_spend,
            &mut frame.roi,
        ] {
            col.push(1.5);
        }
        frame.holiday.push(1);

        let rows: Vec<PanelRow> = frame.rows().collect();
        assert_eq!(PanelFrame::from_rows(&rows), frame);
    }
}
