use shared::records::{search_profiles, RecordStatus};
use shared::{DriverLog, DriverProfile};
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DriverSearchProps {
    pub profiles: Vec<DriverProfile>,
    pub logs: Vec<DriverLog>,
    pub loading: bool,
    pub on_arrival: Callback<DriverProfile>,
    pub on_departure: Callback<DriverLog>,
    pub on_edit: Callback<DriverLog>,
}

/// Roster search box. Results carry the driver's status for today and the
/// matching action: arrival for a driver with no open log, departure for
/// one already in the yard.
#[function_component(DriverSearch)]
pub fn driver_search(props: &DriverSearchProps) -> Html {
    let query = use_state(String::new);

    let on_query_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let matches = search_profiles(&query, &props.profiles, &props.logs, shared::time::today());

    html! {
        <section class="driver-search-section">
            <h2>{"Find a Driver"}</h2>
            <input
                type="text"
                class="driver-search-input"
                placeholder="Search by driver, company, or hauler..."
                value={(*query).clone()}
                oninput={on_query_input}
                disabled={props.loading}
            />

            {if props.loading {
                html! { <div class="loading">{"Loading driver roster..."}</div> }
            } else if query.trim().is_empty() {
                html! {}
            } else if matches.is_empty() {
                html! { <div class="search-empty">{"No drivers match your search"}</div> }
            } else {
                html! {
                    <ul class="search-results">
                        {for matches.iter().map(|entry| {
                            let profile = entry.profile.clone();
                            let status = entry.status;

                            let arrival_button = {
                                let on_arrival = props.on_arrival.clone();
                                let profile = profile.clone();
                                let onclick = Callback::from(move |_: MouseEvent| {
                                    on_arrival.emit(profile.clone());
                                });
                                html! {
                                    <button class="btn btn-primary" {onclick}>
                                        {"Record Arrival"}
                                    </button>
                                }
                            };

                            let departure_button = match (&entry.latest_log, status) {
                                (Some(log), RecordStatus::Incomplete) => {
                                    let on_departure = props.on_departure.clone();
                                    let log = log.clone();
                                    let onclick = Callback::from(move |_: MouseEvent| {
                                        on_departure.emit(log.clone());
                                    });
                                    html! {
                                        <button class="btn btn-primary" {onclick}>
                                            {"Record Departure"}
                                        </button>
                                    }
                                }
                                _ => html! {},
                            };

                            let edit_button = match &entry.latest_log {
                                Some(log) => {
                                    let on_edit = props.on_edit.clone();
                                    let log = log.clone();
                                    let onclick = Callback::from(move |_: MouseEvent| {
                                        on_edit.emit(log.clone());
                                    });
                                    html! {
                                        <button class="btn btn-secondary" {onclick}>
                                            {"Edit"}
                                        </button>
                                    }
                                }
                                None => html! {},
                            };

                            html! {
                                <li key={profile.id.clone()} class="search-result-card">
                                    <div class="search-result-info">
                                        <span class="driver-name">{&entry.profile.name}</span>
                                        <span class="driver-details">
                                            {format!(
                                                "{} · {} · {}",
                                                entry.profile.plate_number,
                                                entry.profile.company,
                                                entry.profile.hauler
                                            )}
                                        </span>
                                    </div>
                                    <span class={status.css_class()}>{status.label()}</span>
                                    <div class="search-result-actions">
                                        {if status == RecordStatus::Incomplete {
                                            departure_button
                                        } else {
                                            arrival_button
                                        }}
                                        {edit_button}
                                    </div>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </section>
    }
}
