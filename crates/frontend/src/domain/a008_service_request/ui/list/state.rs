use contracts::domain::a008_service_request::aggregate::{ServiceRequest, ServiceRequestStatus};
use contracts::shared::list_query::{FilterState, ListQuery, Page, SortOrder};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ServiceRequestListState {
    pub requests: Vec<ServiceRequest>,
    pub query: ListQuery,
    /// `None` shows every status.
    pub status: Option<ServiceRequestStatus>,
    pub is_loaded: bool,
}

impl Default for ServiceRequestListState {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            query: ListQuery {
                filters: FilterState {
                    sort_by: "createdAt".to_string(),
                    sort_order: SortOrder::Desc,
                    ..FilterState::default()
                },
                ..ListQuery::default()
            },
            status: None,
            is_loaded: false,
        }
    }
}

impl ServiceRequestListState {
    pub fn visible_page(&self) -> Page<ServiceRequest> {
        match self.status {
            Some(status) => {
                let matching: Vec<ServiceRequest> = self
                    .requests
                    .iter()
                    .filter(|r| r.status == status)
                    .cloned()
                    .collect();
                self.query.run(&matching)
            }
            None => self.query.run(&self.requests),
        }
    }

    pub fn set_status(&mut self, status: Option<ServiceRequestStatus>) {
        self.status = status;
        self.query.page = 0;
    }

    pub fn set_search(&mut self, term: String) {
        self.query.filters.search_term = term;
        self.query.page = 0;
    }

    pub fn active_filters_count(&self) -> usize {
        usize::from(self.status.is_some())
            + usize::from(!self.query.filters.search_term.trim().is_empty())
    }

    pub fn open_count(&self) -> usize {
        self.requests.iter().filter(|r| r.status.is_open()).count()
    }

    pub fn replace_requests(&mut self, requests: Vec<ServiceRequest>) {
        self.requests = requests;
        self.is_loaded = true;
        let filtered = self.visible_page().total_elements;
        self.query.clamp_page(filtered);
    }
}

pub fn create_state() -> RwSignal<ServiceRequestListState> {
    RwSignal::new(ServiceRequestListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a007_task::aggregate::Priority;

    fn request(id: i64, status: ServiceRequestStatus, day: u32) -> ServiceRequest {
        ServiceRequest {
            id,
            customer_id: 1,
            customer_name: Some("Acme".into()),
            device_id: None,
            device_serial: None,
            description: format!("Request {id}"),
            status,
            priority: Priority::Medium,
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).single(),
        }
    }

    #[test]
    fn test_newest_first_and_status_filter() {
        let mut state = ServiceRequestListState::default();
        state.replace_requests(vec![
            request(1, ServiceRequestStatus::New, 1),
            request(2, ServiceRequestStatus::Closed, 5),
            request(3, ServiceRequestStatus::New, 3),
        ]);
        let ids: Vec<i64> = state.visible_page().content.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(state.open_count(), 2);

        state.set_status(Some(ServiceRequestStatus::New));
        let ids: Vec<i64> = state.visible_page().content.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(state.active_filters_count(), 1);
    }
}
