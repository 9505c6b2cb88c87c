use shared::export::project_rows;
use shared::records::derive_status;
use shared::DriverLog;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecordTableProps {
    pub logs: Vec<DriverLog>,
    pub loading: bool,
    pub on_departure: Callback<DriverLog>,
    pub on_edit: Callback<DriverLog>,
    pub on_delete: Callback<DriverLog>,
}

/// Log table shared by the drivers view (today) and the history view (all
/// records). Cells render through the same projection the export uses, so
/// the table and the spreadsheet always agree.
#[function_component(RecordTable)]
pub fn record_table(props: &RecordTableProps) -> Html {
    if props.loading {
        return html! { <div class="loading">{"Loading records..."}</div> };
    }

    if props.logs.is_empty() {
        return html! { <div class="table-empty">{"No records to show"}</div> };
    }

    let rows = project_rows(&props.logs);

    html! {
        <div class="table-container">
            <table class="records-table">
                <thead>
                    <tr>
                        <th>{"Driver"}</th>
                        <th>{"Plate"}</th>
                        <th>{"Company"}</th>
                        <th>{"Hauler"}</th>
                        <th>{"Truck Type"}</th>
                        <th>{"Arrival"}</th>
                        <th>{"Departure"}</th>
                        <th>{"Destination"}</th>
                        <th>{"Products"}</th>
                        <th>{"DN"}</th>
                        <th>{"Status"}</th>
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.logs.iter().zip(rows.iter()).map(|(log, row)| {
                        let status = derive_status(Some(log));

                        let departure_button = if log.is_open() {
                            let on_departure = props.on_departure.clone();
                            let log = log.clone();
                            let onclick = Callback::from(move |_: MouseEvent| {
                                on_departure.emit(log.clone());
                            });
                            html! {
                                <button class="btn btn-small btn-primary" {onclick}>
                                    {"Depart"}
                                </button>
                            }
                        } else {
                            html! {}
                        };

                        let edit_button = {
                            let on_edit = props.on_edit.clone();
                            let log = log.clone();
                            let onclick = Callback::from(move |_: MouseEvent| {
                                on_edit.emit(log.clone());
                            });
                            html! {
                                <button class="btn btn-small btn-secondary" {onclick}>
                                    {"Edit"}
                                </button>
                            }
                        };

                        let delete_button = {
                            let on_delete = props.on_delete.clone();
                            let log = log.clone();
                            let onclick = Callback::from(move |_: MouseEvent| {
                                on_delete.emit(log.clone());
                            });
                            html! {
                                <button class="btn btn-small btn-danger" {onclick}>
                                    {"Delete"}
                                </button>
                            }
                        };

                        html! {
                            <tr key={log.id.clone()}>
                                <td class="driver-name">{&row.name}</td>
                                <td>{&row.plate_number}</td>
                                <td>{&row.company}</td>
                                <td>{&row.hauler}</td>
                                <td>{&row.truck_type}</td>
                                <td class="timestamp">{&row.arrival_time}</td>
                                <td class="timestamp">{&row.departure_time}</td>
                                <td>{&row.destination}</td>
                                <td>{&row.products}</td>
                                <td>{&row.dn_number}</td>
                                <td><span class={status.css_class()}>{status.label()}</span></td>
                                <td class="row-actions">
                                    {departure_button}
                                    {edit_button}
                                    {delete_button}
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
