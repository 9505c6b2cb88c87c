use web_sys::MouseEvent;
use yew::prelude::*;

use crate::DashboardView;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub active_view: DashboardView,
    pub on_select_view: Callback<DashboardView>,
    pub on_open_register: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let tab = |view: DashboardView, label: &str| {
        let on_select_view = props.on_select_view.clone();
        let class = if props.active_view == view {
            "nav-tab active"
        } else {
            "nav-tab"
        };
        let onclick = Callback::from(move |_: MouseEvent| {
            on_select_view.emit(view);
        });
        html! {
            <button class={class} {onclick}>{label.to_string()}</button>
        }
    };

    let on_register = {
        let on_open_register = props.on_open_register.clone();
        Callback::from(move |_: MouseEvent| {
            on_open_register.emit(());
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Truck Yard Dashboard"}</h1>
                <nav class="header-nav">
                    {tab(DashboardView::Drivers, "Drivers")}
                    {tab(DashboardView::History, "History")}
                    {tab(DashboardView::Reference, "Reference Data")}
                </nav>
                <div class="header-right">
                    <button class="btn btn-secondary" onclick={on_register}>
                        {"Register User"}
                    </button>
                </div>
            </div>
        </header>
    }
}
