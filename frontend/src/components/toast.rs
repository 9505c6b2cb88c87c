use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_toasts::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastContainerProps {
    pub toast: Option<Toast>,
    pub on_dismiss: Callback<()>,
}

#[function_component(ToastContainer)]
pub fn toast_container(props: &ToastContainerProps) -> Html {
    let toast = match props.toast.as_ref() {
        Some(toast) => toast,
        None => return html! {},
    };

    let on_click = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| {
            on_dismiss.emit(());
        })
    };

    html! {
        <div class="toast-container">
            <div key={toast.id.clone()} class={toast.kind.css_class()} onclick={on_click}>
                {&toast.message}
            </div>
        </div>
    }
}
