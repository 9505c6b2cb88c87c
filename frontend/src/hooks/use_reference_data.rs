use shared::{Company, CompanyDropdownItem, Hauler, Product, TruckType};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct ReferenceDataState {
    pub companies: Vec<Company>,
    pub haulers: Vec<Hauler>,
    pub truck_types: Vec<TruckType>,
    pub products: Vec<Product>,
    pub company_dropdown: Vec<CompanyDropdownItem>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseReferenceDataResult {
    pub state: ReferenceDataState,
    pub actions: UseReferenceDataActions,
}

#[derive(Clone, PartialEq)]
pub struct UseReferenceDataActions {
    pub reload: Callback<()>,
}

/// Loads the four reference lists plus the reduced company dropdown. Lists
/// that load keep their data even when a sibling request fails; the last
/// failure is surfaced in `error`.
#[hook]
pub fn use_reference_data(api_client: &ApiClient) -> UseReferenceDataResult {
    let companies = use_state(Vec::<Company>::new);
    let haulers = use_state(Vec::<Hauler>::new);
    let truck_types = use_state(Vec::<TruckType>::new);
    let products = use_state(Vec::<Product>::new);
    let company_dropdown = use_state(Vec::<CompanyDropdownItem>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    let reload = {
        let api_client = api_client.clone();
        let companies = companies.clone();
        let haulers = haulers.clone();
        let truck_types = truck_types.clone();
        let products = products.clone();
        let company_dropdown = company_dropdown.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let companies = companies.clone();
            let haulers = haulers.clone();
            let truck_types = truck_types.clone();
            let products = products.clone();
            let company_dropdown = company_dropdown.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client.get_companies().await {
                    Ok(data) => companies.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "reference-data",
                            &format!("Failed to load companies: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                match api_client.get_haulers().await {
                    Ok(data) => haulers.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "reference-data",
                            &format!("Failed to load haulers: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                match api_client.get_truck_types().await {
                    Ok(data) => truck_types.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "reference-data",
                            &format!("Failed to load truck types: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                match api_client.get_products().await {
                    Ok(data) => products.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "reference-data",
                            &format!("Failed to load products: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                match api_client.get_company_dropdown().await {
                    Ok(data) => company_dropdown.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "reference-data",
                            &format!("Failed to load company dropdown: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let state = ReferenceDataState {
        companies: (*companies).clone(),
        haulers: (*haulers).clone(),
        truck_types: (*truck_types).clone(),
        products: (*products).clone(),
        company_dropdown: (*company_dropdown).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    UseReferenceDataResult {
        state,
        actions: UseReferenceDataActions { reload },
    }
}
