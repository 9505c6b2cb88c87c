use shared::RegisterUserRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RegisterModalProps {
    pub is_open: bool,
    /// Emits the server's confirmation message.
    pub on_success: Callback<String>,
    pub on_close: Callback<()>,
}

#[function_component(RegisterModal)]
pub fn register_modal(props: &RegisterModalProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let api_client = ApiClient::new();

    // Reset state when modal opens
    use_effect_with(props.is_open, {
        let username = username.clone();
        let password = password.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                username.set(String::new());
                password.set(String::new());
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_success = props.on_success.clone();
        let api_client = api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name = (*username).trim().to_string();
            let secret = (*password).clone();

            if name.is_empty() {
                error_message.set(Some("Please enter a username".to_string()));
                return;
            }

            if secret.is_empty() {
                error_message.set(Some("Please enter a password".to_string()));
                return;
            }

            is_submitting.set(true);
            error_message.set(None);

            let username = username.clone();
            let password = password.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_success = on_success.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                let request = RegisterUserRequest {
                    username: name,
                    password: secret,
                };

                match api_client.register_user(request).await {
                    Ok(response) => {
                        username.set(String::new());
                        password.set(String::new());
                        is_submitting.set(false);

                        let message = if response.message.trim().is_empty() {
                            "User registered".to_string()
                        } else {
                            response.message
                        };
                        on_success.emit(message);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "register",
                            &format!("Registration failed: {}", e),
                        );
                        is_submitting.set(false);
                        error_message.set(Some(format!("Failed to register user: {}", e)));
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

    html! {
        <div class="record-modal-backdrop" onclick={on_backdrop_click}>
            <div class="record-modal register-modal" onclick={on_modal_click}>
                <div class="record-modal-content">
                    <h3 class="record-modal-title">{"Register User"}</h3>

                    {if let Some(error) = (*error_message).clone() {
                        html! {
                            <div class="record-modal-error">
                                {error}
                            </div>
                        }
                    } else {
                        html! {}
                    }}

                    <form class="register-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="register-username">{"Username"}</label>
                            <input
                                id="register-username"
                                type="text"
                                placeholder="Enter a username"
                                value={(*username).clone()}
                                onchange={on_username_change}
                                disabled={*is_submitting}
                                autofocus=true
                            />
                        </div>

                        <div class="form-group">
                            <label for="register-password">{"Password"}</label>
                            <input
                                id="register-password"
                                type="password"
                                placeholder="Enter a password"
                                value={(*password).clone()}
                                onchange={on_password_change}
                                disabled={*is_submitting}
                            />
                        </div>

                        <div class="record-modal-buttons">
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled={*is_submitting}
                            >
                                {if *is_submitting {
                                    "Registering..."
                                } else {
                                    "Register"
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
