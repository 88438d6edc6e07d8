use super::{Amount, ClientId, Period, PlatformId, Record};

/// Optional constraints applied on top of the period window.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub min_amount: Option<Amount>,
    pub max_amount: Option<Amount>,
    pub client_id: Option<ClientId>,
    pub platform_id: Option<PlatformId>,
    pub category: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.client_id.is_none()
            && self.platform_id.is_none()
            && self.category.is_none()
    }

    fn matches(&self, record: &Record) -> bool {
        if let Some(min) = self.min_amount {
            if record.amount() < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if record.amount() > max {
                return false;
            }
        }
        if let Some(client_id) = self.client_id {
            if record.client_id() != Some(client_id) {
                return false;
            }
        }
        if let Some(platform_id) = self.platform_id {
            if record.platform_id() != Some(platform_id) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if record.category() != Some(category.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Select the records whose date lies inside the period (boundaries
/// included) and which satisfy the optional constraints. Input order is
/// preserved; the input itself is never touched.
pub fn filter_records(records: &[Record], period: &Period, filter: &RecordFilter) -> Vec<Record> {
    records
        .iter()
        .filter(|r| period.contains(r.date()) && filter.matches(r))
        .cloned()
        .collect()
}
