use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::export::{build_csv, export_file_name, BlobUrl};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::domain::a005_spare_part::aggregate::{ExportColumn, SparePart};
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// CSV text for the chosen parts and columns, both kept in display order.
/// `None` when either selection is empty.
pub fn export_csv(
    parts: &[SparePart],
    selected: &HashSet<i64>,
    columns: &HashSet<ExportColumn>,
) -> Option<String> {
    let columns: Vec<ExportColumn> = ExportColumn::ALL
        .into_iter()
        .filter(|c| columns.contains(c))
        .collect();
    let rows: Vec<Vec<String>> = parts
        .iter()
        .filter(|p| selected.contains(&p.id))
        .map(|p| columns.iter().map(|c| c.value(p)).collect())
        .collect();
    if columns.is_empty() || rows.is_empty() {
        return None;
    }
    let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
    Some(build_csv(&headers, rows))
}

/// Export dialog. The generated object URL lives as long as the dialog and
/// is revoked when it closes.
#[component]
pub fn SparePartExport(parts: Vec<SparePart>, on_close: Callback<()>) -> impl IntoView {
    let selected = RwSignal::new(parts.iter().map(|p| p.id).collect::<HashSet<i64>>());
    let columns = RwSignal::new(ExportColumn::ALL.into_iter().collect::<HashSet<_>>());
    let error = RwSignal::new(None::<String>);
    let download_url = RwSignal::new(None::<String>);
    let blob = StoredValue::new_local(None::<BlobUrl>);
    let parts = StoredValue::new(parts);

    on_cleanup(move || blob.set_value(None));

    let all_ids = move || parts.with_value(|p| p.iter().map(|p| p.id).collect::<HashSet<i64>>());
    let all_selected = Signal::derive(move || {
        let count = parts.with_value(|p| p.len());
        selected.with(|s| s.len() == count)
    });

    let generate = move |_| {
        let csv = parts.with_value(|p| selected.with(|s| columns.with(|c| export_csv(p, s, c))));
        let Some(csv) = csv else {
            error.set(Some("Select at least one part and one column.".to_string()));
            return;
        };
        let filename = export_file_name("spare-parts", chrono::Local::now());
        match BlobUrl::from_csv(&csv).and_then(|url| url.download(&filename).map(|_| url)) {
            Ok(url) => {
                error.set(None);
                download_url.set(Some(url.url().to_string()));
                // Replacing the previous file revokes its URL.
                blob.set_value(Some(url));
                log::info!("spare parts exported to {}", filename);
            }
            Err(e) => {
                log::error!("spare parts export failed: {}", e);
                error.set(Some(e));
            }
        }
    };

    view! {
        <ModalFrame title="Export spare parts" on_close=on_close modal_style="width: 720px;".to_string()>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <h3 class="modal__section-title">"Columns"</h3>
            <div class="export__columns">
                {ExportColumn::ALL.into_iter().map(|column| view! {
                    <label class="export__option">
                        <input
                            type="checkbox"
                            prop:checked=move || columns.with(|c| c.contains(&column))
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                columns.update(|c| {
                                    if checked {
                                        c.insert(column);
                                    } else {
                                        c.remove(&column);
                                    }
                                });
                            }
                        />
                        {column.header()}
                    </label>
                }).collect_view()}
            </div>

            <h3 class="modal__section-title">
                "Parts "
                <span class="text-muted">{move || format!("({} selected)", selected.with(|s| s.len()))}</span>
            </h3>
            <div class="export__parts">
                <label class="export__option export__option--all">
                    <input
                        type="checkbox"
                        prop:checked=all_selected
                        on:change=move |ev| {
                            if event_target_checked(&ev) {
                                selected.set(all_ids());
                            } else {
                                selected.set(HashSet::new());
                            }
                        }
                    />
                    "Select all"
                </label>
                <table class="table export__table">
                    <tbody>
                        {parts.get_value().into_iter().map(|part| {
                            let id = part.id;
                            view! {
                                <tr class="table__row">
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked: bool| {
                                            selected.update(|s| {
                                                if checked {
                                                    s.insert(id);
                                                } else {
                                                    s.remove(&id);
                                                }
                                            });
                                        })
                                    />
                                    <td class="table__cell export__part-number">{part.part_number}</td>
                                    <td class="table__cell">{part.name}</td>
                                    <td class="table__cell table__cell--number">{part.stock_quantity}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <div class="modal__footer">
                {move || download_url.get().map(|url| view! {
                    <a class="export__link" href=url download="spare-parts.csv">"Download again"</a>
                })}
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=generate>
                    {icon("download")}
                    " Export CSV"
                </Button>
            </div>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: i64, number: &str) -> SparePart {
        SparePart {
            id,
            name: format!("Part {id}"),
            part_number: number.to_string(),
            compatible_models: Vec::new(),
            stock_quantity: 4,
            unit_price: 2.5,
            supplier_id: None,
            supplier_name: None,
            location: None,
            is_low_stock: false,
        }
    }

    #[test]
    fn test_export_keeps_display_order() {
        let parts = vec![part(2, "B"), part(1, "A"), part(3, "C")];
        let selected: HashSet<i64> = [1, 2].into_iter().collect();
        let columns: HashSet<ExportColumn> =
            [ExportColumn::UnitPrice, ExportColumn::PartNumber].into_iter().collect();

        let csv = export_csv(&parts, &selected, &columns).unwrap();
        assert_eq!(csv, "\u{FEFF}Part number;Unit price\nB;2.50\nA;2.50\n");
    }

    #[test]
    fn test_export_requires_selection() {
        let parts = vec![part(1, "A")];
        let all_columns: HashSet<ExportColumn> = ExportColumn::ALL.into_iter().collect();
        assert!(export_csv(&parts, &HashSet::new(), &all_columns).is_none());
        assert!(export_csv(&parts, &[1].into_iter().collect(), &HashSet::new()).is_none());
    }
}
