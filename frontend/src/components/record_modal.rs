use shared::records::{
    arrival_preflight, field_access, mutation_preflight, FieldAccess, FormField, RecordForm,
    RecordMode,
};
use shared::{CompanyDropdownItem, DriverLog, DriverProfile, Hauler, Product, TruckType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RecordModalProps {
    pub is_open: bool,
    pub mode: RecordMode,
    /// Roster profile seeding an arrival.
    pub profile: Option<DriverProfile>,
    /// Existing log seeding a departure or full edit.
    pub log: Option<DriverLog>,
    pub company_dropdown: Vec<CompanyDropdownItem>,
    pub haulers: Vec<Hauler>,
    pub truck_types: Vec<TruckType>,
    pub products: Vec<Product>,
    /// Current log list, checked for an open arrival before posting.
    pub logs: Vec<DriverLog>,
    pub on_success: Callback<(RecordMode, DriverLog)>,
    pub on_close: Callback<()>,
}

/// The arrival/departure/edit modal. Which fields show and which are
/// frozen follows the mode; all checks run before any request goes out.
#[function_component(RecordModal)]
pub fn record_modal(props: &RecordModalProps) -> Html {
    let form = use_state(RecordForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let api_client = ApiClient::new();

    // Seed the form each time the modal opens
    use_effect_with(props.is_open, {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let mode = props.mode;
        let profile = props.profile.clone();
        let log = props.log.clone();
        let company_dropdown = props.company_dropdown.clone();
        let haulers = props.haulers.clone();
        let truck_types = props.truck_types.clone();

        move |is_open| {
            if *is_open {
                let now = shared::time::now_rfc3339();
                let seeded = match mode {
                    RecordMode::Arrival => profile
                        .as_ref()
                        .map(|p| {
                            RecordForm::for_arrival(
                                p,
                                &company_dropdown,
                                &haulers,
                                &truck_types,
                                &now,
                            )
                        })
                        .unwrap_or_default(),
                    RecordMode::Departure => log
                        .as_ref()
                        .map(|l| RecordForm::for_departure(l, &now))
                        .unwrap_or_default(),
                    RecordMode::EditFull => {
                        log.as_ref().map(RecordForm::for_edit).unwrap_or_default()
                    }
                };
                form.set(seeded);
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_name_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.name = input.value();
            form.set(next);
        })
    };

    let on_plate_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.plate_number = input.value();
            form.set(next);
        })
    };

    let on_company_change = {
        let form = form.clone();
        let companies = props.company_dropdown.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            let mut next = (*form).clone();
            if id.is_empty() {
                next.set_company(None);
            } else if let Some(item) = companies.iter().find(|c| c.id == id) {
                next.set_company(Some((item.id.clone(), item.name.clone())));
            }
            form.set(next);
        })
    };

    let on_hauler_change = {
        let form = form.clone();
        let haulers = props.haulers.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            let mut next = (*form).clone();
            if id.is_empty() {
                next.set_hauler(None);
            } else if let Some(item) = haulers.iter().find(|h| h.id == id) {
                next.set_hauler(Some((item.id.clone(), item.name.clone())));
            }
            form.set(next);
        })
    };

    let on_truck_type_change = {
        let form = form.clone();
        let truck_types = props.truck_types.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            let mut next = (*form).clone();
            if id.is_empty() {
                next.set_truck_type(None);
            } else if let Some(item) = truck_types.iter().find(|t| t.id == id) {
                next.set_truck_type(Some((item.id.clone(), item.name.clone())));
            }
            form.set(next);
        })
    };

    let on_arrival_now = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.reset_arrival_to(&shared::time::now_rfc3339());
            form.set(next);
        })
    };

    let on_departure_now = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.reset_departure_to(&shared::time::now_rfc3339());
            form.set(next);
        })
    };

    let on_destination_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.destination = input.value();
            form.set(next);
        })
    };

    let on_dn_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.dn_number = input.value();
            form.set(next);
        })
    };

    let on_product_add = {
        let form = form.clone();
        let error_message = error_message.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            if id.is_empty() {
                return;
            }
            let mut next = (*form).clone();
            match next.add_product(id) {
                Ok(()) => {
                    error_message.set(None);
                    form.set(next);
                }
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                }
            }
            select.set_value("");
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let mode = props.mode;
        let profile = props.profile.clone();
        let logs = props.logs.clone();
        let on_success = props.on_success.clone();
        let api_client = api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let current = (*form).clone();

            // Every precondition is checked here; a failure means no
            // request is issued at all.
            let preflight = match mode {
                RecordMode::Arrival => arrival_preflight(
                    profile.as_ref(),
                    &current,
                    &logs,
                    shared::time::today(),
                ),
                other => mutation_preflight(&current, other),
            };
            if let Err(err) = preflight {
                error_message.set(Some(err.to_string()));
                return;
            }

            is_submitting.set(true);
            error_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_success = on_success.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                let result = match mode {
                    RecordMode::Arrival => {
                        api_client.create_driver_log(current.to_create_payload()).await
                    }
                    RecordMode::Departure | RecordMode::EditFull => {
                        let log_id = current.log_id.clone().unwrap_or_default();
                        api_client
                            .update_driver_log(&log_id, current.to_update_payload())
                            .await
                    }
                };

                match result {
                    Ok(log) => {
                        is_submitting.set(false);
                        on_success.emit((mode, log));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "record-modal",
                            &format!("Save failed: {}", e),
                        );
                        is_submitting.set(false);
                        error_message.set(Some(e));
                    }
                }
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    if !props.is_open {
        return html! {};
    }

    let mode = props.mode;
    let access = |field: FormField| field_access(mode, field);

    let time_display = |value: Option<&str>| -> String {
        match value {
            Some(raw) if !raw.trim().is_empty() => shared::time::format_display(raw),
            _ => "Not set".to_string(),
        }
    };

    let product_label = |id: &str| -> String {
        props
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    html! {
        <div class="record-modal-backdrop" onclick={on_backdrop_click}>
            <div class="record-modal" onclick={on_modal_click}>
                <div class="record-modal-content">
                    <h3 class="record-modal-title">{mode.title()}</h3>

                    {if let Some(error) = (*error_message).clone() {
                        html! {
                            <div class="record-modal-error">
                                {error}
                            </div>
                        }
                    } else {
                        html! {}
                    }}

                    <form class="record-modal-form" onsubmit={on_submit}>
                        {if access(FormField::Name).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label for="record-name">{"Driver Name"}</label>
                                    <input
                                        id="record-name"
                                        type="text"
                                        value={form.name.clone()}
                                        onchange={on_name_change}
                                        disabled={!access(FormField::Name).is_editable() || *is_submitting}
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        {if access(FormField::PlateNumber).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label for="record-plate">{"Plate Number"}</label>
                                    <input
                                        id="record-plate"
                                        type="text"
                                        value={form.plate_number.clone()}
                                        onchange={on_plate_change}
                                        disabled={!access(FormField::PlateNumber).is_editable() || *is_submitting}
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        {match access(FormField::Company) {
                            FieldAccess::Editable => html! {
                                <div class="form-group">
                                    <label for="record-company">{"Company"}</label>
                                    <select
                                        id="record-company"
                                        onchange={on_company_change}
                                        disabled={*is_submitting}
                                    >
                                        <option value="" selected={form.company_id.is_none()}>
                                            {"Select a company"}
                                        </option>
                                        {for props.company_dropdown.iter().map(|item| {
                                            html! {
                                                <option
                                                    value={item.id.clone()}
                                                    selected={form.company_id.as_deref() == Some(item.id.as_str())}
                                                >
                                                    {&item.name}
                                                </option>
                                            }
                                        })}
                                    </select>
                                </div>
                            },
                            FieldAccess::ReadOnly => html! {
                                <div class="form-group">
                                    <label for="record-company">{"Company"}</label>
                                    <input id="record-company" type="text" value={form.company.clone()} disabled=true />
                                </div>
                            },
                            FieldAccess::Hidden => html! {},
                        }}

                        {match access(FormField::Hauler) {
                            FieldAccess::Editable => html! {
                                <div class="form-group">
                                    <label for="record-hauler">{"Hauler"}</label>
                                    <select
                                        id="record-hauler"
                                        onchange={on_hauler_change}
                                        disabled={*is_submitting}
                                    >
                                        <option value="" selected={form.hauler_id.is_none()}>
                                            {"Select a hauler"}
                                        </option>
                                        {for props.haulers.iter().map(|item| {
                                            html! {
                                                <option
                                                    value={item.id.clone()}
                                                    selected={form.hauler_id.as_deref() == Some(item.id.as_str())}
                                                >
                                                    {&item.name}
                                                </option>
                                            }
                                        })}
                                    </select>
                                </div>
                            },
                            FieldAccess::ReadOnly => html! {
                                <div class="form-group">
                                    <label for="record-hauler">{"Hauler"}</label>
                                    <input id="record-hauler" type="text" value={form.hauler.clone()} disabled=true />
                                </div>
                            },
                            FieldAccess::Hidden => html! {},
                        }}

                        {match access(FormField::TruckType) {
                            FieldAccess::Editable => html! {
                                <div class="form-group">
                                    <label for="record-truck-type">{"Truck Type"}</label>
                                    <select
                                        id="record-truck-type"
                                        onchange={on_truck_type_change}
                                        disabled={*is_submitting}
                                    >
                                        <option value="" selected={form.truck_type_id.is_none()}>
                                            {"Select a truck type"}
                                        </option>
                                        {for props.truck_types.iter().map(|item| {
                                            html! {
                                                <option
                                                    value={item.id.clone()}
                                                    selected={form.truck_type_id.as_deref() == Some(item.id.as_str())}
                                                >
                                                    {&item.name}
                                                </option>
                                            }
                                        })}
                                    </select>
                                </div>
                            },
                            FieldAccess::ReadOnly => html! {
                                <div class="form-group">
                                    <label for="record-truck-type">{"Truck Type"}</label>
                                    <input id="record-truck-type" type="text" value={form.truck_type.clone()} disabled=true />
                                </div>
                            },
                            FieldAccess::Hidden => html! {},
                        }}

                        {if access(FormField::ArrivalTime).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label>{"Arrival Time"}</label>
                                    <div class="time-field">
                                        <span class="time-value">
                                            {time_display(form.arrival_time.as_deref())}
                                        </span>
                                        {if access(FormField::ArrivalTime).is_editable() {
                                            html! {
                                                <button
                                                    type="button"
                                                    class="btn btn-small btn-secondary"
                                                    onclick={on_arrival_now}
                                                    disabled={*is_submitting}
                                                >
                                                    {"Now"}
                                                </button>
                                            }
                                        } else {
                                            html! {}
                                        }}
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        {if access(FormField::DepartureTime).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label>{"Departure Time"}</label>
                                    <div class="time-field">
                                        <span class="time-value">
                                            {time_display(form.departure_time.as_deref())}
                                        </span>
                                        {if access(FormField::DepartureTime).is_editable() {
                                            html! {
                                                <button
                                                    type="button"
                                                    class="btn btn-small btn-secondary"
                                                    onclick={on_departure_now}
                                                    disabled={*is_submitting}
                                                >
                                                    {"Now"}
                                                </button>
                                            }
                                        } else {
                                            html! {}
                                        }}
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        {if access(FormField::Destination).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label for="record-destination">{"Destination"}</label>
                                    <input
                                        id="record-destination"
                                        type="text"
                                        placeholder="Where is the truck headed?"
                                        value={form.destination.clone()}
                                        onchange={on_destination_change}
                                        disabled={!access(FormField::Destination).is_editable() || *is_submitting}
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        {if access(FormField::Products).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label for="record-product-add">{"Products"}</label>
                                    <ul class="product-chips">
                                        {for form.product_ids.iter().map(|id| {
                                            let remove = {
                                                let form = form.clone();
                                                let id = id.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    let mut next = (*form).clone();
                                                    next.remove_product(&id);
                                                    form.set(next);
                                                })
                                            };
                                            html! {
                                                <li key={id.clone()} class="product-chip">
                                                    {product_label(id)}
                                                    {if access(FormField::Products).is_editable() {
                                                        html! {
                                                            <button
                                                                type="button"
                                                                class="chip-remove"
                                                                onclick={remove}
                                                                disabled={*is_submitting}
                                                            >
                                                                {"x"}
                                                            </button>
                                                        }
                                                    } else {
                                                        html! {}
                                                    }}
                                                </li>
                                            }
                                        })}
                                    </ul>
                                    {if access(FormField::Products).is_editable() {
                                        html! {
                                            <select
                                                id="record-product-add"
                                                onchange={on_product_add}
                                                disabled={*is_submitting}
                                            >
                                                <option value="" selected=true>{"Add a product..."}</option>
                                                {for props.products.iter()
                                                    .filter(|p| !form.product_ids.contains(&p.id))
                                                    .map(|p| {
                                                        html! {
                                                            <option value={p.id.clone()}>{&p.name}</option>
                                                        }
                                                    })}
                                            </select>
                                        }
                                    } else {
                                        html! {}
                                    }}
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        {if access(FormField::DnNumber).is_visible() {
                            html! {
                                <div class="form-group">
                                    <label for="record-dn">{"DN Number"}</label>
                                    <input
                                        id="record-dn"
                                        type="text"
                                        placeholder="Delivery note number"
                                        value={form.dn_number.clone()}
                                        onchange={on_dn_change}
                                        disabled={!access(FormField::DnNumber).is_editable() || *is_submitting}
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        <div class="record-modal-buttons">
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled={*is_submitting}
                            >
                                {if *is_submitting {
                                    "Saving..."
                                } else {
                                    mode.submit_label()
                                }}
                            </button>
                            <button
                                type="button"
                                class="btn btn-secondary"
                                onclick={on_cancel}
                                disabled={*is_submitting}
                            >
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
