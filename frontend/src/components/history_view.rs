use shared::export::{build_workbook, export_filename, project_rows};
use shared::records::{filter_logs, summarize};
use shared::DriverLog;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::components::record_table::RecordTable;
use crate::services::download;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct HistoryViewProps {
    pub logs: Vec<DriverLog>,
    pub loading: bool,
    pub on_departure: Callback<DriverLog>,
    pub on_edit: Callback<DriverLog>,
    pub on_delete: Callback<DriverLog>,
}

/// Full log history: filter box, summary counts, the record table, and the
/// spreadsheet export of whatever the filter currently shows.
#[function_component(HistoryView)]
pub fn history_view(props: &HistoryViewProps) -> Html {
    let query = use_state(String::new);
    let export_error = use_state(|| Option::<String>::None);

    let on_query_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let filtered = filter_logs(&query, &props.logs);
    let counts = summarize(&filtered);

    let on_export = {
        let filtered = filtered.clone();
        let export_error = export_error.clone();

        Callback::from(move |_: MouseEvent| {
            export_error.set(None);

            let rows = project_rows(&filtered);
            let filename = export_filename(shared::time::today());

            match build_workbook(&rows) {
                Ok(bytes) => {
                    match download::save_bytes(&bytes, &filename, download::XLSX_MIME) {
                        Ok(()) => {
                            Logger::info_with_component(
                                "history",
                                &format!("Exported {} records to {}", rows.len(), filename),
                            );
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "history",
                                &format!("Download failed: {}", e),
                            );
                            export_error.set(Some(e));
                        }
                    }
                }
                Err(e) => {
                    Logger::error_with_component("history", &format!("Export failed: {}", e));
                    export_error.set(Some(e.to_string()));
                }
            }
        })
    };

    html! {
        <section class="history-section">
            <div class="history-toolbar">
                <h2>{"Log History"}</h2>
                <input
                    type="text"
                    class="history-filter-input"
                    placeholder="Filter by driver, plate, company, hauler, or destination..."
                    value={(*query).clone()}
                    oninput={on_query_input}
                    disabled={props.loading}
                />
                <button
                    class="btn btn-primary"
                    onclick={on_export}
                    disabled={props.loading || filtered.is_empty()}
                >
                    {"Export to Excel"}
                </button>
            </div>

            {if let Some(error) = (*export_error).clone() {
                html! {
                    <div class="history-error">
                        {error}
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="summary-strip">
                <span class="summary-item">{format!("Total: {}", counts.total)}</span>
                <span class="summary-item complete">{format!("Complete: {}", counts.complete)}</span>
                <span class="summary-item incomplete">{format!("In Yard: {}", counts.incomplete)}</span>
            </div>

            <RecordTable
                logs={filtered}
                loading={props.loading}
                on_departure={props.on_departure.clone()}
                on_edit={props.on_edit.clone()}
                on_delete={props.on_delete.clone()}
            />
        </section>
    }
}
