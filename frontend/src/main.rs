mod components;
mod hooks;
mod services;

use shared::{logs_for_day, DriverLog, DriverProfile, RecordMode};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::{
    DeleteConfirmModal, DriverSearch, Header, HistoryView, RecordModal, RecordTable,
    ReferenceView, RegisterModal, ToastContainer,
};
use hooks::{use_driver_records, use_reference_data, use_toasts};
use services::api::ApiClient;
use services::logging::Logger;

/// Top-level tabs of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardView {
    Drivers,
    History,
    Reference,
}

/// Pending request to open the record modal in a particular mode.
#[derive(Clone, PartialEq)]
struct RecordModalRequest {
    mode: RecordMode,
    profile: Option<DriverProfile>,
    log: Option<DriverLog>,
}

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();

    let reference = use_reference_data(&api_client);
    let records = use_driver_records(&api_client);
    let toasts = use_toasts();

    let active_view = use_state(|| DashboardView::Drivers);

    // Modal coordination
    let record_request = use_state(|| Option::<RecordModalRequest>::None);
    let delete_target = use_state(|| Option::<DriverLog>::None);
    let register_open = use_state(|| false);

    // Connection status for the footer
    let backend_connected = use_state(|| false);
    let backend_endpoint = use_state(|| String::from("Checking..."));

    // Check the backend, then load roster, logs, and reference lists
    use_effect_with((), {
        let api_client = api_client.clone();
        let backend_connected = backend_connected.clone();
        let backend_endpoint = backend_endpoint.clone();
        let reload_reference = reference.actions.reload.clone();
        let refresh_records = records.actions.refresh.clone();

        move |_| {
            spawn_local(async move {
                match api_client.test_connection().await {
                    Ok(()) => {
                        backend_connected.set(true);
                        backend_endpoint.set("localhost:5000".to_string());
                        Logger::info_with_component("app", "Connected to the yard API");

                        reload_reference.emit(());
                        refresh_records.emit(());
                    }
                    Err(e) => {
                        backend_connected.set(false);
                        backend_endpoint.set("Connection failed".to_string());
                        Logger::error_with_component(
                            "app",
                            &format!("Failed to reach the yard API: {}", e),
                        );
                    }
                }
            });

            || ()
        }
    });

    let on_select_view = {
        let active_view = active_view.clone();
        Callback::from(move |view: DashboardView| {
            active_view.set(view);
        })
    };

    let open_register = {
        let register_open = register_open.clone();
        Callback::from(move |_| {
            register_open.set(true);
        })
    };

    let close_register = {
        let register_open = register_open.clone();
        Callback::from(move |_| {
            register_open.set(false);
        })
    };

    let on_register_done = {
        let register_open = register_open.clone();
        let show_success = toasts.actions.show_success.clone();
        Callback::from(move |message: String| {
            register_open.set(false);
            show_success.emit(message);
        })
    };

    let open_arrival = {
        let record_request = record_request.clone();
        Callback::from(move |profile: DriverProfile| {
            record_request.set(Some(RecordModalRequest {
                mode: RecordMode::Arrival,
                profile: Some(profile),
                log: None,
            }));
        })
    };

    let open_departure = {
        let record_request = record_request.clone();
        Callback::from(move |log: DriverLog| {
            record_request.set(Some(RecordModalRequest {
                mode: RecordMode::Departure,
                profile: None,
                log: Some(log),
            }));
        })
    };

    let open_edit = {
        let record_request = record_request.clone();
        Callback::from(move |log: DriverLog| {
            record_request.set(Some(RecordModalRequest {
                mode: RecordMode::EditFull,
                profile: None,
                log: Some(log),
            }));
        })
    };

    let open_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |log: DriverLog| {
            delete_target.set(Some(log));
        })
    };

    let close_record_modal = {
        let record_request = record_request.clone();
        Callback::from(move |_| {
            record_request.set(None);
        })
    };

    let close_delete_modal = {
        let delete_target = delete_target.clone();
        Callback::from(move |_| {
            delete_target.set(None);
        })
    };

    // Saved records land in the local list without a refetch
    let on_record_saved = {
        let record_request = record_request.clone();
        let apply_created = records.actions.apply_created.clone();
        let apply_updated = records.actions.apply_updated.clone();
        let show_success = toasts.actions.show_success.clone();

        Callback::from(move |(mode, log): (RecordMode, DriverLog)| {
            match mode {
                RecordMode::Arrival => {
                    apply_created.emit(log);
                    show_success.emit("Arrival recorded".to_string());
                }
                RecordMode::Departure => {
                    apply_updated.emit(log);
                    show_success.emit("Departure recorded".to_string());
                }
                RecordMode::EditFull => {
                    apply_updated.emit(log);
                    show_success.emit("Record updated".to_string());
                }
            }
            record_request.set(None);
        })
    };

    let on_record_deleted = {
        let delete_target = delete_target.clone();
        let apply_deleted = records.actions.apply_deleted.clone();
        let show_success = toasts.actions.show_success.clone();

        Callback::from(move |id: String| {
            apply_deleted.emit(id);
            show_success.emit("Record deleted".to_string());
            delete_target.set(None);
        })
    };

    let active_request = (*record_request).clone();
    let record_mode = active_request
        .as_ref()
        .map(|request| request.mode)
        .unwrap_or(RecordMode::Arrival);
    let record_profile = active_request
        .as_ref()
        .and_then(|request| request.profile.clone());
    let record_log = active_request
        .as_ref()
        .and_then(|request| request.log.clone());

    let data_error = records
        .state
        .error
        .clone()
        .or_else(|| reference.state.error.clone());

    let today_logs = logs_for_day(&records.state.logs, shared::time::today());

    let view_body = match *active_view {
        DashboardView::Drivers => html! {
            <div class="drivers-view">
                <DriverSearch
                    profiles={records.state.profiles.clone()}
                    logs={records.state.logs.clone()}
                    loading={records.state.loading}
                    on_arrival={open_arrival.clone()}
                    on_departure={open_departure.clone()}
                    on_edit={open_edit.clone()}
                />

                <section class="today-section">
                    <h2 class="section-title">{"Today's Activity"}</h2>
                    <RecordTable
                        logs={today_logs}
                        loading={records.state.loading}
                        on_departure={open_departure.clone()}
                        on_edit={open_edit.clone()}
                        on_delete={open_delete.clone()}
                    />
                </section>
            </div>
        },
        DashboardView::History => html! {
            <HistoryView
                logs={records.state.logs.clone()}
                loading={records.state.loading}
                on_departure={open_departure.clone()}
                on_edit={open_edit.clone()}
                on_delete={open_delete.clone()}
            />
        },
        DashboardView::Reference => html! {
            <ReferenceView
                companies={reference.state.companies.clone()}
                haulers={reference.state.haulers.clone()}
                truck_types={reference.state.truck_types.clone()}
                products={reference.state.products.clone()}
                loading={reference.state.loading}
                on_reload={reference.actions.reload.clone()}
                on_notify_success={toasts.actions.show_success.clone()}
                on_notify_error={toasts.actions.show_error.clone()}
            />
        },
    };

    html! {
        <>
            <Header
                active_view={*active_view}
                on_select_view={on_select_view}
                on_open_register={open_register}
            />

            <main class="dashboard-main">
                {if let Some(error) = data_error {
                    html! {
                        <div class="error-banner">
                            {error}
                        </div>
                    }
                } else {
                    html! {}
                }}

                {view_body}
            </main>

            <RecordModal
                is_open={active_request.is_some()}
                mode={record_mode}
                profile={record_profile}
                log={record_log}
                company_dropdown={reference.state.company_dropdown.clone()}
                haulers={reference.state.haulers.clone()}
                truck_types={reference.state.truck_types.clone()}
                products={reference.state.products.clone()}
                logs={records.state.logs.clone()}
                on_success={on_record_saved}
                on_close={close_record_modal}
            />

            <DeleteConfirmModal
                is_open={(*delete_target).is_some()}
                log={(*delete_target).clone()}
                on_success={on_record_deleted}
                on_close={close_delete_modal}
            />

            <RegisterModal
                is_open={*register_open}
                on_success={on_register_done}
                on_close={close_register}
            />

            <ToastContainer
                toast={toasts.toast.clone()}
                on_dismiss={toasts.actions.dismiss.clone()}
            />

            <div class="connection-status">
                {if *backend_connected {
                    format!("Connected to {}", *backend_endpoint)
                } else {
                    (*backend_endpoint).clone()
                }}
            </div>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
