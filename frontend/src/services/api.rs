use gloo::net::http::{Request, Response};
use serde::Deserialize;
use shared::{
    Company, CompanyDropdownItem, DriverLog, DriverLogPayload, DriverProfile, Hauler, Product,
    RegisterUserRequest, RegisterUserResponse, SaveCompanyRequest, SaveHaulerRequest,
    SaveProductRequest, SaveTruckTypeRequest, TruckType,
};

/// Error body shape the yard API uses for rejected requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// API client for communicating with the yard API server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test connection to the yard API
    pub async fn test_connection(&self) -> Result<(), String> {
        match Request::get(&format!("{}/api/companies/dropdown", self.base_url))
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("Connection failed: {}", e)),
        }
    }

    // --- Companies ---

    pub async fn get_companies(&self) -> Result<Vec<Company>, String> {
        let url = format!("{}/api/companies", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<Company>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse companies: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch companies: {}", e)),
        }
    }

    /// Reduced company list for the arrival form's select.
    pub async fn get_company_dropdown(&self) -> Result<Vec<CompanyDropdownItem>, String> {
        let url = format!("{}/api/companies/dropdown", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<CompanyDropdownItem>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse company dropdown: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch company dropdown: {}", e)),
        }
    }

    pub async fn create_company(&self, request: SaveCompanyRequest) -> Result<Company, String> {
        let url = format!("{}/api/companies", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Company>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_company(
        &self,
        id: &str,
        request: SaveCompanyRequest,
    ) -> Result<Company, String> {
        let url = format!("{}/api/companies/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Company>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_company(&self, id: &str) -> Result<(), String> {
        self.delete(&format!("{}/api/companies/{}", self.base_url, id))
            .await
    }

    // --- Haulers ---

    pub async fn get_haulers(&self) -> Result<Vec<Hauler>, String> {
        let url = format!("{}/api/haulers", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<Hauler>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse haulers: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch haulers: {}", e)),
        }
    }

    pub async fn create_hauler(&self, request: SaveHaulerRequest) -> Result<Hauler, String> {
        let url = format!("{}/api/haulers", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Hauler>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_hauler(
        &self,
        id: &str,
        request: SaveHaulerRequest,
    ) -> Result<Hauler, String> {
        let url = format!("{}/api/haulers/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Hauler>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_hauler(&self, id: &str) -> Result<(), String> {
        self.delete(&format!("{}/api/haulers/{}", self.base_url, id))
            .await
    }

    // --- Truck types ---

    pub async fn get_truck_types(&self) -> Result<Vec<TruckType>, String> {
        let url = format!("{}/api/trucks", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<TruckType>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse truck types: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch truck types: {}", e)),
        }
    }

    pub async fn create_truck_type(
        &self,
        request: SaveTruckTypeRequest,
    ) -> Result<TruckType, String> {
        let url = format!("{}/api/trucks", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<TruckType>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_truck_type(
        &self,
        id: &str,
        request: SaveTruckTypeRequest,
    ) -> Result<TruckType, String> {
        let url = format!("{}/api/trucks/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<TruckType>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_truck_type(&self, id: &str) -> Result<(), String> {
        self.delete(&format!("{}/api/trucks/{}", self.base_url, id))
            .await
    }

    // --- Products ---

    pub async fn get_products(&self) -> Result<Vec<Product>, String> {
        let url = format!("{}/api/products", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<Product>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse products: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch products: {}", e)),
        }
    }

    pub async fn create_product(&self, request: SaveProductRequest) -> Result<Product, String> {
        let url = format!("{}/api/products", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Product>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_product(
        &self,
        id: &str,
        request: SaveProductRequest,
    ) -> Result<Product, String> {
        let url = format!("{}/api/products/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Product>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), String> {
        self.delete(&format!("{}/api/products/{}", self.base_url, id))
            .await
    }

    // --- Driver roster and logs ---

    /// Static driver profile roster
    pub async fn get_driver_profiles(&self) -> Result<Vec<DriverProfile>, String> {
        let url = format!("{}/api/drivers-data", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<DriverProfile>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse driver profiles: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch driver profiles: {}", e)),
        }
    }

    pub async fn get_driver_logs(&self) -> Result<Vec<DriverLog>, String> {
        let url = format!("{}/api/drivers", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<DriverLog>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse driver logs: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch driver logs: {}", e)),
        }
    }

    /// Record a new arrival
    pub async fn create_driver_log(&self, payload: DriverLogPayload) -> Result<DriverLog, String> {
        let url = format!("{}/api/drivers", self.base_url);

        match Request::post(&url)
            .json(&payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<DriverLog>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Replace an existing log (departure stamp or full edit)
    pub async fn update_driver_log(
        &self,
        id: &str,
        payload: DriverLogPayload,
    ) -> Result<DriverLog, String> {
        let url = format!("{}/api/drivers/{}", self.base_url, id);

        match Request::put(&url)
            .json(&payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<DriverLog>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_driver_log(&self, id: &str) -> Result<(), String> {
        self.delete(&format!("{}/api/drivers/{}", self.base_url, id))
            .await
    }

    // --- Users ---

    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, String> {
        let url = format!("{}/api/users/register", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<RegisterUserResponse>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn delete(&self, url: &str) -> Result<(), String> {
        match Request::delete(url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort extraction of the server's error message. The yard API sends
/// `{"message": ...}` or `{"error": ...}`; anything else falls back to the
/// raw body text.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(&body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }

    if body.trim().is_empty() {
        format!("Server error {}", status)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn default_client_points_at_the_yard_api() {
        let client = ApiClient::new();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[wasm_bindgen_test]
    fn base_url_override_is_kept() {
        let client = ApiClient::with_base_url("http://yard.example:8080".to_string());
        assert_eq!(client.base_url(), "http://yard.example:8080");
    }
}
