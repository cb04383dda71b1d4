use std::collections::BTreeMap;

/// Items sharing one foreign key. `key == None` is the "ungrouped" bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedView<K, T> {
    pub key: Option<K>,
    pub items: Vec<T>,
}

impl<K, T> GroupedView<K, T> {
    pub fn is_ungrouped(&self) -> bool {
        self.key.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Group `items` by `key_fn`, buckets in ascending key order with the
/// ungrouped bucket last. Items keep their relative order inside a bucket.
pub fn group_by_key<T, K, F>(items: &[T], key_fn: F) -> Vec<GroupedView<K, T>>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> Option<K>,
{
    let mut buckets: BTreeMap<K, Vec<T>> = BTreeMap::new();
    let mut ungrouped = Vec::new();

    for item in items {
        match key_fn(item) {
            Some(key) => buckets.entry(key).or_default().push(item.clone()),
            None => ungrouped.push(item.clone()),
        }
    }

    let mut groups: Vec<GroupedView<K, T>> = buckets
        .into_iter()
        .map(|(key, items)| GroupedView {
            key: Some(key),
            items,
        })
        .collect();

    if !ungrouped.is_empty() {
        groups.push(GroupedView {
            key: None,
            items: ungrouped,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Device {
        serial: &'static str,
        contract_id: Option<i64>,
    }

    fn device(serial: &'static str, contract_id: Option<i64>) -> Device {
        Device {
            serial,
            contract_id,
        }
    }

    #[test]
    fn test_groups_by_contract_ungrouped_last() {
        let items = vec![
            device("d0", Some(2)),
            device("d1", None),
            device("d2", Some(1)),
            device("d3", Some(2)),
        ];
        let groups = group_by_key(&items, |d| d.contract_id);

        let keys: Vec<_> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![Some(1), Some(2), None]);
        let sizes: Vec<_> = groups.iter().map(GroupedView::len).collect();
        assert_eq!(sizes, vec![1, 2, 1]);
        assert_eq!(groups[1].items[0].serial, "d0");
        assert_eq!(groups[1].items[1].serial, "d3");
        assert!(groups[2].is_ungrouped());
    }

    #[test]
    fn test_every_item_in_exactly_one_group() {
        let items: Vec<Device> = (0..20)
            .map(|i| device("x", (i % 3 != 0).then_some(i % 4)))
            .collect();
        let groups = group_by_key(&items, |d| d.contract_id);
        let total: usize = groups.iter().map(GroupedView::len).sum();
        assert_eq!(total, items.len());

        for g in &groups {
            assert!(g.items.iter().all(|d| d.contract_id == g.key));
        }
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<Device> = Vec::new();
        assert!(group_by_key(&items, |d| d.contract_id).is_empty());
    }
}
