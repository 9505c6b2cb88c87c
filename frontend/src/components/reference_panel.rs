use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

/// One row in a reference panel, already reduced to id + display label.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceItem {
    pub id: String,
    pub label: String,
}

#[derive(Properties, PartialEq)]
pub struct ReferencePanelProps {
    pub title: String,
    /// Noun for placeholders, e.g. "company".
    pub singular: String,
    pub items: Vec<ReferenceItem>,
    pub busy: bool,
    pub on_create: Callback<String>,
    /// (id, new label)
    pub on_rename: Callback<(String, String)>,
    pub on_delete: Callback<String>,
}

/// CRUD card for one reference list. The parent owns the API calls; this
/// component only collects names and emits them. A delete is emitted only
/// after the row's inline confirm step.
#[function_component(ReferencePanel)]
pub fn reference_panel(props: &ReferencePanelProps) -> Html {
    let new_name = use_state(String::new);
    // (id, draft label) while a row is being renamed
    let editing = use_state(|| Option::<(String, String)>::None);
    // id of the row whose delete is awaiting confirmation
    let confirming = use_state(|| Option::<String>::None);

    let on_new_name_change = {
        let new_name = new_name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };

    let on_add = {
        let new_name = new_name.clone();
        let on_create = props.on_create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = (*new_name).trim().to_string();
            if name.is_empty() {
                return;
            }
            on_create.emit(name);
            new_name.set(String::new());
        })
    };

    let on_draft_change = {
        let editing = editing.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some((id, _)) = (*editing).clone() {
                editing.set(Some((id, input.value())));
            }
        })
    };

    let on_save_rename = {
        let editing = editing.clone();
        let on_rename = props.on_rename.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some((id, draft)) = (*editing).clone() {
                let label = draft.trim().to_string();
                if !label.is_empty() {
                    on_rename.emit((id, label));
                }
            }
            editing.set(None);
        })
    };

    let on_cancel_rename = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
        })
    };

    html! {
        <div class="reference-panel">
            <h3>{&props.title}</h3>

            <ul class="reference-list">
                {for props.items.iter().map(|item| {
                    let is_editing = (*editing)
                        .as_ref()
                        .map(|(id, _)| id == &item.id)
                        .unwrap_or(false);
                    let is_confirming = (*confirming).as_deref() == Some(item.id.as_str());

                    if is_editing {
                        let draft = (*editing)
                            .as_ref()
                            .map(|(_, draft)| draft.clone())
                            .unwrap_or_default();
                        html! {
                            <li key={item.id.clone()} class="reference-row editing">
                                <input
                                    type="text"
                                    value={draft}
                                    onchange={on_draft_change.clone()}
                                    disabled={props.busy}
                                />
                                <button
                                    class="btn btn-small btn-primary"
                                    onclick={on_save_rename.clone()}
                                    disabled={props.busy}
                                >
                                    {"Save"}
                                </button>
                                <button
                                    class="btn btn-small btn-secondary"
                                    onclick={on_cancel_rename.clone()}
                                    disabled={props.busy}
                                >
                                    {"Cancel"}
                                </button>
                            </li>
                        }
                    } else if is_confirming {
                        let confirm_delete = {
                            let confirming = confirming.clone();
                            let on_delete = props.on_delete.clone();
                            let id = item.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                confirming.set(None);
                                on_delete.emit(id.clone());
                            })
                        };
                        let cancel_delete = {
                            let confirming = confirming.clone();
                            Callback::from(move |_: MouseEvent| {
                                confirming.set(None);
                            })
                        };
                        html! {
                            <li key={item.id.clone()} class="reference-row confirming">
                                <span class="reference-label">{&item.label}</span>
                                <span class="delete-confirm-text">{"Delete?"}</span>
                                <button
                                    class="btn btn-small btn-danger"
                                    onclick={confirm_delete}
                                    disabled={props.busy}
                                >
                                    {"Confirm"}
                                </button>
                                <button
                                    class="btn btn-small btn-secondary"
                                    onclick={cancel_delete}
                                    disabled={props.busy}
                                >
                                    {"Cancel"}
                                </button>
                            </li>
                        }
                    } else {
                        let start_edit = {
                            let editing = editing.clone();
                            let confirming = confirming.clone();
                            let item = item.clone();
                            Callback::from(move |_: MouseEvent| {
                                confirming.set(None);
                                editing.set(Some((item.id.clone(), item.label.clone())));
                            })
                        };
                        let start_delete = {
                            let editing = editing.clone();
                            let confirming = confirming.clone();
                            let id = item.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                editing.set(None);
                                confirming.set(Some(id.clone()));
                            })
                        };
                        html! {
                            <li key={item.id.clone()} class="reference-row">
                                <span class="reference-label">{&item.label}</span>
                                <button
                                    class="btn btn-small btn-secondary"
                                    onclick={start_edit}
                                    disabled={props.busy}
                                >
                                    {"Rename"}
                                </button>
                                <button
                                    class="btn btn-small btn-danger"
                                    onclick={start_delete}
                                    disabled={props.busy}
                                >
                                    {"Delete"}
                                </button>
                            </li>
                        }
                    }
                })}
            </ul>

            <form class="reference-add-form" onsubmit={on_add}>
                <input
                    type="text"
                    placeholder={format!("New {}...", props.singular)}
                    value={(*new_name).clone()}
                    onchange={on_new_name_change}
                    disabled={props.busy}
                />
                <button type="submit" class="btn btn-primary" disabled={props.busy}>
                    {"Add"}
                </button>
            </form>
        </div>
    }
}
