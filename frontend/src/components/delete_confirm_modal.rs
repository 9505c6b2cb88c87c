use shared::DriverLog;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct DeleteConfirmModalProps {
    pub is_open: bool,
    pub log: Option<DriverLog>,
    /// Emits the deleted record's id.
    pub on_success: Callback<String>,
    pub on_close: Callback<()>,
}

#[function_component(DeleteConfirmModal)]
pub fn delete_confirm_modal(props: &DeleteConfirmModalProps) -> Html {
    let is_deleting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let api_client = ApiClient::new();

    // Reset state when modal opens
    use_effect_with(props.is_open, {
        let is_deleting = is_deleting.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                is_deleting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_confirm = {
        let log = props.log.clone();
        let is_deleting = is_deleting.clone();
        let error_message = error_message.clone();
        let on_success = props.on_success.clone();
        let api_client = api_client.clone();

        Callback::from(move |_: MouseEvent| {
            let log = match log.as_ref() {
                Some(log) => log.clone(),
                None => return,
            };

            is_deleting.set(true);
            error_message.set(None);

            let is_deleting = is_deleting.clone();
            let error_message = error_message.clone();
            let on_success = on_success.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.delete_driver_log(&log.id).await {
                    Ok(()) => {
                        is_deleting.set(false);
                        on_success.emit(log.id.clone());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "delete-confirm",
                            &format!("Delete failed: {}", e),
                        );
                        is_deleting.set(false);
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

    let description = props
        .log
        .as_ref()
        .map(|log| format!("{} ({})", log.name, log.plate_number))
        .unwrap_or_default();

    html! {
        <div class="record-modal-backdrop" onclick={on_backdrop_click}>
            <div class="record-modal delete-confirm-modal" onclick={on_modal_click}>
                <div class="record-modal-content">
                    <h3 class="record-modal-title">{"Delete Record"}</h3>

                    {if let Some(error) = (*error_message).clone() {
                        html! {
                            <div class="record-modal-error">
                                {error}
                            </div>
                        }
                    } else {
                        html! {}
                    }}

                    <p class="delete-confirm-text">
                        {format!("Delete the log for {}? This cannot be undone.", description)}
                    </p>

                    <div class="record-modal-buttons">
                        <button
                            class="btn btn-danger"
                            onclick={on_confirm}
                            disabled={*is_deleting}
                        >
                            {if *is_deleting {
                                "Deleting..."
                            } else {
                                "Delete"
                            }}
                        </button>
                        <button
                            class="btn btn-secondary"
                            onclick={on_cancel}
                            disabled={*is_deleting}
                        >
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
