use contracts::domain::a002_device::aggregate::Device;
use contracts::shared::list_query::{
    apply_filters, group_by_key, sort_items, FilterState, GroupedView,
};
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct DeviceListState {
    pub devices: Vec<Device>,
    pub filters: FilterState,
    /// Contract groups folded by the user; `None` is the "no contract" group.
    pub collapsed: HashSet<Option<i64>>,
    pub is_loaded: bool,
}

impl Default for DeviceListState {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            filters: FilterState {
                sort_by: "serialNumber".to_string(),
                ..FilterState::default()
            },
            collapsed: HashSet::new(),
            is_loaded: false,
        }
    }
}

impl DeviceListState {
    /// Filtered and sorted devices, bucketed by contract.
    pub fn groups(&self) -> Vec<GroupedView<i64, Device>> {
        let mut visible = apply_filters(&self.devices, &self.filters);
        sort_items(&mut visible, &self.filters.sort_by, self.filters.sort_order);
        group_by_key(&visible, |d| d.contract_id)
    }

    pub fn toggle_group(&mut self, key: Option<i64>) {
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
    }
}

pub fn create_state() -> RwSignal<DeviceListState> {
    RwSignal::new(DeviceListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_device::aggregate::DeviceStatus;

    fn device(serial: &str, contract_id: Option<i64>) -> Device {
        Device {
            id: serial.len() as i64,
            serial_number: serial.to_string(),
            model: "LX-200".into(),
            manufacturer: None,
            customer_id: None,
            customer_name: None,
            contract_id,
            contract_number: None,
            status: DeviceStatus::Active,
            installed_at: None,
            location: None,
        }
    }

    #[test]
    fn test_groups_sorted_within_contract() {
        let state = DeviceListState {
            devices: vec![
                device("SN-9", Some(2)),
                device("SN-1", None),
                device("SN-5", Some(1)),
                device("SN-3", Some(2)),
            ],
            ..Default::default()
        };
        let groups = state.groups();
        let shape: Vec<(Option<i64>, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.key, g.items.iter().map(|d| d.serial_number.as_str()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (Some(1), vec!["SN-5"]),
                (Some(2), vec!["SN-3", "SN-9"]),
                (None, vec!["SN-1"]),
            ]
        );
    }

    #[test]
    fn test_search_narrows_groups() {
        let mut state = DeviceListState {
            devices: vec![device("SN-9", Some(2)), device("AB-1", None)],
            ..Default::default()
        };
        state.filters.search_term = "ab".into();
        let groups = state.groups();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_ungrouped());
    }

    #[test]
    fn test_toggle_group() {
        let mut state = DeviceListState::default();
        state.toggle_group(None);
        assert!(state.collapsed.contains(&None));
        state.toggle_group(None);
        assert!(state.collapsed.is_empty());
    }
}
