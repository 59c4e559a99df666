use crate::domain::entities::quote_point::QuotePoint;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Date-ordered quote points with at most one point per date.
///
/// A point for a date that is already present replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    points: BTreeMap<NaiveDate, QuotePoint>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `points` in order and returns how many dates were not present before.
    pub fn merge(&mut self, points: impl IntoIterator<Item = QuotePoint>) -> usize {
        let before = self.points.len();
        for point in points {
            self.points.insert(point.date, point);
        }
        self.points.len() - before
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuotePoint> {
        self.points.values()
    }

    pub fn into_vec(self) -> Vec<QuotePoint> {
        self.points.into_values().collect()
    }
}

impl FromIterator<QuotePoint> for ResultSet {
    fn from_iter<T: IntoIterator<Item = QuotePoint>>(iter: T) -> Self {
        let mut set = ResultSet::new();
        set.merge(iter);
        set
    }
}
