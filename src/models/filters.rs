use chrono::NaiveDate;

use super::enums::{CheckFilter, SortOrder};

/// Query parameters for the active/checked appointment list.
#[derive(Debug, Clone)]
pub struct AppointmentFilter {
    pub count: u32,
    pub page_no: u32,
    pub sort: SortOrder,
    pub check_status: CheckFilter,
    pub doctor_ids: Vec<String>,
    pub appointment_date: Option<NaiveDate>,
    pub search: Option<String>,
}

impl Default for AppointmentFilter {
    fn default() -> Self {
        Self {
            count: 100,
            page_no: 1,
            sort: SortOrder::Ascending,
            check_status: CheckFilter::All,
            doctor_ids: Vec::new(),
            appointment_date: None,
            search: None,
        }
    }
}

/// Query parameters for the soft-delete history list.
#[derive(Debug, Clone)]
pub struct DeletedFilter {
    pub count: u32,
    pub page_no: u32,
    pub sort: SortOrder,
    pub doctor_id: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub search: Option<String>,
}

impl Default for DeletedFilter {
    fn default() -> Self {
        Self {
            count: 100,
            page_no: 1,
            sort: SortOrder::Ascending,
            doctor_id: None,
            appointment_date: None,
            search: None,
        }
    }
}

/// One page of a paginated list response.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            current_page: 1,
        }
    }
}
