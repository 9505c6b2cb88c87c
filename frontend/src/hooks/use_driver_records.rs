use shared::records::{prepend_log, remove_log, replace_log};
use shared::{DriverLog, DriverProfile};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct DriverRecordsState {
    pub profiles: Vec<DriverProfile>,
    pub logs: Vec<DriverLog>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseDriverRecordsResult {
    pub state: DriverRecordsState,
    pub actions: UseDriverRecordsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDriverRecordsActions {
    pub refresh: Callback<()>,
    /// POST succeeded: prepend the server's record.
    pub apply_created: Callback<DriverLog>,
    /// PUT succeeded: replace the matching record in place.
    pub apply_updated: Callback<DriverLog>,
    /// DELETE succeeded: drop the record with this id.
    pub apply_deleted: Callback<String>,
}

/// Driver roster plus the full log list. Mutation results are merged into
/// the local list instead of refetching.
#[hook]
pub fn use_driver_records(api_client: &ApiClient) -> UseDriverRecordsResult {
    let profiles = use_state(Vec::<DriverProfile>::new);
    let logs = use_state(Vec::<DriverLog>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    let refresh = {
        let api_client = api_client.clone();
        let profiles = profiles.clone();
        let logs = logs.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let profiles = profiles.clone();
            let logs = logs.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client.get_driver_profiles().await {
                    Ok(data) => profiles.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "driver-records",
                            &format!("Failed to load driver profiles: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                match api_client.get_driver_logs().await {
                    Ok(data) => logs.set(data),
                    Err(e) => {
                        Logger::error_with_component(
                            "driver-records",
                            &format!("Failed to load driver logs: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let apply_created = use_callback(logs.clone(), |created: DriverLog, logs| {
        let mut next = (**logs).clone();
        prepend_log(&mut next, created);
        logs.set(next);
    });

    let apply_updated = {
        let refresh = refresh.clone();
        use_callback(logs.clone(), move |updated: DriverLog, logs| {
            let mut next = (**logs).clone();
            if replace_log(&mut next, updated) {
                logs.set(next);
            } else {
                // Local list is out of step with the server.
                Logger::warn_with_component(
                    "driver-records",
                    "Updated record not found locally, refetching",
                );
                refresh.emit(());
            }
        })
    };

    let apply_deleted = use_callback(logs.clone(), |id: String, logs| {
        let mut next = (**logs).clone();
        remove_log(&mut next, &id);
        logs.set(next);
    });

    let state = DriverRecordsState {
        profiles: (*profiles).clone(),
        logs: (*logs).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    UseDriverRecordsResult {
        state,
        actions: UseDriverRecordsActions {
            refresh,
            apply_created,
            apply_updated,
            apply_deleted,
        },
    }
}
