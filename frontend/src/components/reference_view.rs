use shared::{
    Company, Hauler, Product, ReferenceEntity, SaveCompanyRequest, SaveHaulerRequest,
    SaveProductRequest, SaveTruckTypeRequest, TruckType,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::reference_panel::{ReferenceItem, ReferencePanel};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ReferenceViewProps {
    pub companies: Vec<Company>,
    pub haulers: Vec<Hauler>,
    pub truck_types: Vec<TruckType>,
    pub products: Vec<Product>,
    pub loading: bool,
    pub on_reload: Callback<()>,
    pub on_notify_success: Callback<String>,
    pub on_notify_error: Callback<String>,
}

fn to_items<T: ReferenceEntity>(entities: &[T]) -> Vec<ReferenceItem> {
    entities
        .iter()
        .map(|entity| ReferenceItem {
            id: entity.id().to_string(),
            label: entity.label().to_string(),
        })
        .collect()
}

/// Management tab for companies, haulers, truck types, and products. Each
/// panel's mutations go straight to the API, then the lists reload; the
/// panel stays disabled while its request is in flight.
#[function_component(ReferenceView)]
pub fn reference_view(props: &ReferenceViewProps) -> Html {
    let api_client = ApiClient::new();

    // One in-flight flag per panel, fed into its `busy` prop.
    let companies_busy = use_state(|| false);
    let haulers_busy = use_state(|| false);
    let truck_types_busy = use_state(|| false);
    let products_busy = use_state(|| false);

    let create_company = {
        let api_client = api_client.clone();
        let busy = companies_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |name: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.create_company(SaveCompanyRequest { name }).await {
                    Ok(company) => {
                        on_notify_success.emit(format!("Added company {}", company.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to create company: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let rename_company = {
        let api_client = api_client.clone();
        let busy = companies_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |(id, name): (String, String)| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.update_company(&id, SaveCompanyRequest { name }).await {
                    Ok(company) => {
                        on_notify_success.emit(format!("Renamed company to {}", company.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to rename company: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let delete_company = {
        let api_client = api_client.clone();
        let busy = companies_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |id: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.delete_company(&id).await {
                    Ok(()) => {
                        on_notify_success.emit("Company deleted".to_string());
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to delete company: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let create_hauler = {
        let api_client = api_client.clone();
        let busy = haulers_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |name: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.create_hauler(SaveHaulerRequest { name }).await {
                    Ok(hauler) => {
                        on_notify_success.emit(format!("Added hauler {}", hauler.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to create hauler: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let rename_hauler = {
        let api_client = api_client.clone();
        let busy = haulers_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |(id, name): (String, String)| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.update_hauler(&id, SaveHaulerRequest { name }).await {
                    Ok(hauler) => {
                        on_notify_success.emit(format!("Renamed hauler to {}", hauler.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to rename hauler: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let delete_hauler = {
        let api_client = api_client.clone();
        let busy = haulers_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |id: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.delete_hauler(&id).await {
                    Ok(()) => {
                        on_notify_success.emit("Hauler deleted".to_string());
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to delete hauler: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let create_truck_type = {
        let api_client = api_client.clone();
        let busy = truck_types_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |name: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client
                    .create_truck_type(SaveTruckTypeRequest { name })
                    .await
                {
                    Ok(truck_type) => {
                        on_notify_success.emit(format!("Added truck type {}", truck_type.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to create truck type: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let rename_truck_type = {
        let api_client = api_client.clone();
        let busy = truck_types_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |(id, name): (String, String)| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client
                    .update_truck_type(&id, SaveTruckTypeRequest { name })
                    .await
                {
                    Ok(truck_type) => {
                        on_notify_success
                            .emit(format!("Renamed truck type to {}", truck_type.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to rename truck type: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let delete_truck_type = {
        let api_client = api_client.clone();
        let busy = truck_types_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |id: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.delete_truck_type(&id).await {
                    Ok(()) => {
                        on_notify_success.emit("Truck type deleted".to_string());
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to delete truck type: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let create_product = {
        let api_client = api_client.clone();
        let busy = products_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |name: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.create_product(SaveProductRequest { name }).await {
                    Ok(product) => {
                        on_notify_success.emit(format!("Added product {}", product.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to create product: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let rename_product = {
        let api_client = api_client.clone();
        let busy = products_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |(id, name): (String, String)| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.update_product(&id, SaveProductRequest { name }).await {
                    Ok(product) => {
                        on_notify_success.emit(format!("Renamed product to {}", product.name));
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to rename product: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    let delete_product = {
        let api_client = api_client.clone();
        let busy = products_busy.clone();
        let on_reload = props.on_reload.clone();
        let on_notify_success = props.on_notify_success.clone();
        let on_notify_error = props.on_notify_error.clone();
        Callback::from(move |id: String| {
            busy.set(true);
            let api_client = api_client.clone();
            let busy = busy.clone();
            let on_reload = on_reload.clone();
            let on_notify_success = on_notify_success.clone();
            let on_notify_error = on_notify_error.clone();
            spawn_local(async move {
                match api_client.delete_product(&id).await {
                    Ok(()) => {
                        on_notify_success.emit("Product deleted".to_string());
                        on_reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reference",
                            &format!("Failed to delete product: {}", e),
                        );
                        on_notify_error.emit(e);
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <section class="reference-section">
            <h2>{"Reference Data"}</h2>

            {if props.loading {
                html! { <div class="loading">{"Loading reference data..."}</div> }
            } else {
                html! {
                    <div class="reference-grid">
                        <ReferencePanel
                            title="Companies"
                            singular="company"
                            items={to_items(&props.companies)}
                            busy={*companies_busy}
                            on_create={create_company}
                            on_rename={rename_company}
                            on_delete={delete_company}
                        />
                        <ReferencePanel
                            title="Haulers"
                            singular="hauler"
                            items={to_items(&props.haulers)}
                            busy={*haulers_busy}
                            on_create={create_hauler}
                            on_rename={rename_hauler}
                            on_delete={delete_hauler}
                        />
                        <ReferencePanel
                            title="Truck Types"
                            singular="truck type"
                            items={to_items(&props.truck_types)}
                            busy={*truck_types_busy}
                            on_create={create_truck_type}
                            on_rename={rename_truck_type}
                            on_delete={delete_truck_type}
                        />
                        <ReferencePanel
                            title="Products"
                            singular="product"
                            items={to_items(&props.products)}
                            busy={*products_busy}
                            on_create={create_product}
                            on_rename={rename_product}
                            on_delete={delete_product}
                        />
                    </div>
                }
            }}
        </section>
    }
}
