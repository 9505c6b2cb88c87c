use serde::{Deserialize, Serialize};

/// A reference-data entity as stored by the API (`_id` + display label).
pub trait ReferenceEntity {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// Company a driver hauls for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Hauler (trucking contractor) operating the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hauler {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Truck type/class. The API calls the label field `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckType {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub name: String,
}

/// Product that can be loaded on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Reduced company shape served by `GET /api/companies/dropdown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDropdownItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

macro_rules! impl_reference_entity {
    ($($ty:ident),*) => {
        $(impl ReferenceEntity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn label(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_reference_entity!(Company, Hauler, TruckType, Product, CompanyDropdownItem);

/// A foreign-key field as the API returns it: either a populated document
/// or a bare id string, depending on whether the server expanded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Populated(T),
    Id(String),
}

impl<T: ReferenceEntity> Reference<T> {
    pub fn id(&self) -> &str {
        match self {
            Reference::Populated(entity) => entity.id(),
            Reference::Id(id) => id,
        }
    }

    /// Display label when the server populated the document.
    pub fn label(&self) -> Option<&str> {
        match self {
            Reference::Populated(entity) => Some(entity.label()),
            Reference::Id(_) => None,
        }
    }
}

/// Identity record for a driver: static roster data served by
/// `GET /api/drivers-data`. Carries the driver's defaults, which seed the
/// arrival form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub hauler: String,
    #[serde(default)]
    pub truck_type: String,
    #[serde(default)]
    pub plate_number: String,
}

/// One product row on a log: `{ productId }`, possibly populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    pub product_id: Reference<Product>,
}

/// One arrival/departure event, as served by `GET /api/drivers`.
///
/// Timestamps (`arrival_time`, `departure_time`, `created_at`) are RFC 3339
/// strings; display formatting happens at the presentation boundary only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLog {
    #[serde(rename = "_id")]
    pub id: String,
    /// Stable foreign key to the driver profile. Status derivation matches
    /// on this, never on the name string.
    #[serde(default)]
    pub driver_data_id: String,
    pub name: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub company_id: Option<Reference<Company>>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub hauler_id: Option<Reference<Hauler>>,
    #[serde(default)]
    pub hauler: String,
    #[serde(default)]
    pub truck_type_id: Option<Reference<TruckType>>,
    #[serde(default)]
    pub truck_type: String,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub dn_number: String,
    #[serde(default)]
    pub created_at: String,
}

impl DriverLog {
    /// Arrival recorded but no departure yet.
    pub fn is_open(&self) -> bool {
        has_value(&self.arrival_time) && !has_value(&self.departure_time)
    }

    /// Company label: populated document name first, then the display string
    /// stored on the log itself.
    pub fn company_label(&self) -> Option<&str> {
        populated_or_stored(self.company_id.as_ref(), &self.company)
    }

    pub fn hauler_label(&self) -> Option<&str> {
        populated_or_stored(self.hauler_id.as_ref(), &self.hauler)
    }

    pub fn truck_type_label(&self) -> Option<&str> {
        populated_or_stored(self.truck_type_id.as_ref(), &self.truck_type)
    }

    /// Labels of the populated products on this log, in order. Entries the
    /// server left unpopulated resolve to `None`.
    pub fn product_labels(&self) -> Vec<Option<&str>> {
        self.products
            .iter()
            .map(|entry| entry.product_id.label())
            .collect()
    }
}

/// True when an optional timestamp is present and non-blank.
pub(crate) fn has_value(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

fn populated_or_stored<'a, T: ReferenceEntity>(
    reference: Option<&'a Reference<T>>,
    stored: &'a str,
) -> Option<&'a str> {
    if let Some(label) = reference.and_then(|r| r.label()) {
        return Some(label);
    }
    if stored.trim().is_empty() {
        None
    } else {
        Some(stored)
    }
}

/// Body for `POST /api/drivers` and `PUT /api/drivers/:id`: resolved ids
/// plus the display strings the history table shows without re-lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLogPayload {
    pub driver_data_id: String,
    pub name: String,
    pub plate_number: String,
    pub company_id: Option<String>,
    pub company: String,
    pub hauler_id: Option<String>,
    pub hauler: String,
    pub truck_type_id: Option<String>,
    pub truck_type: String,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub destination: String,
    pub products: Vec<ProductIdBody>,
    pub dn_number: String,
}

/// Product row inside a write payload: always the bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdBody {
    pub product_id: String,
}

/// Body for creating or renaming a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveCompanyRequest {
    pub name: String,
}

/// Body for creating or renaming a hauler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveHaulerRequest {
    pub name: String,
}

/// Body for creating or renaming a truck type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTruckTypeRequest {
    #[serde(rename = "type")]
    pub name: String,
}

/// Body for creating or renaming a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProductRequest {
    pub name: String,
}

/// Body for `POST /api/users/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

/// Response from `POST /api/users/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_log_deserializes_populated_references() {
        let json = r#"{
            "_id": "log1",
            "driverDataId": "drv1",
            "name": "J. Cruz",
            "plateNumber": "ABC-123",
            "companyId": {"_id": "c1", "name": "Acme Logistics"},
            "company": "Acme Logistics",
            "haulerId": "h1",
            "hauler": "Roadrunner",
            "truckTypeId": {"_id": "t1", "type": "10-Wheeler"},
            "arrivalTime": "2024-06-01T08:00:00+08:00",
            "departureTime": null,
            "products": [{"productId": {"_id": "p1", "name": "Cement"}}, {"productId": "p2"}],
            "dnNumber": "DN-0042",
            "createdAt": "2024-06-01T08:00:01+08:00"
        }"#;

        let log: DriverLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id, "log1");
        assert_eq!(log.driver_data_id, "drv1");
        assert_eq!(log.company_label(), Some("Acme Logistics"));
        assert_eq!(log.hauler_label(), Some("Roadrunner"));
        assert_eq!(log.truck_type_label(), Some("10-Wheeler"));
        assert_eq!(
            log.company_id.as_ref().map(|r| r.id().to_string()),
            Some("c1".to_string())
        );
        assert_eq!(
            log.hauler_id.as_ref().map(|r| r.id().to_string()),
            Some("h1".to_string())
        );
        assert_eq!(log.product_labels(), vec![Some("Cement"), None]);
        assert!(log.is_open());
    }

    #[test]
    fn driver_log_tolerates_missing_optional_fields() {
        let json = r#"{"_id": "log2", "name": "A. Reyes"}"#;
        let log: DriverLog = serde_json::from_str(json).unwrap();
        assert!(log.arrival_time.is_none());
        assert!(!log.is_open());
        assert_eq!(log.company_label(), None);
        assert!(log.products.is_empty());
    }

    #[test]
    fn blank_arrival_time_is_not_open() {
        let json = r#"{"_id": "log3", "name": "A. Reyes", "arrivalTime": "  "}"#;
        let log: DriverLog = serde_json::from_str(json).unwrap();
        assert!(!log.is_open());
    }

    #[test]
    fn payload_serializes_api_field_names() {
        let payload = DriverLogPayload {
            driver_data_id: "drv1".to_string(),
            name: "J. Cruz".to_string(),
            plate_number: "ABC-123".to_string(),
            company_id: Some("c1".to_string()),
            company: "Acme Logistics".to_string(),
            hauler_id: None,
            hauler: String::new(),
            truck_type_id: Some("t1".to_string()),
            truck_type: "10-Wheeler".to_string(),
            arrival_time: Some("2024-06-01T08:00:00+08:00".to_string()),
            departure_time: None,
            destination: "Plant B".to_string(),
            products: vec![ProductIdBody {
                product_id: "p1".to_string(),
            }],
            dn_number: "DN-0042".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["driverDataId"], "drv1");
        assert_eq!(value["plateNumber"], "ABC-123");
        assert_eq!(value["companyId"], "c1");
        assert_eq!(value["products"][0]["productId"], "p1");
        assert_eq!(value["dnNumber"], "DN-0042");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn truck_type_wire_field_is_type() {
        let truck: TruckType = serde_json::from_str(r#"{"_id": "t1", "type": "Trailer"}"#).unwrap();
        assert_eq!(truck.name, "Trailer");
        let body = serde_json::to_value(SaveTruckTypeRequest {
            name: "Trailer".to_string(),
        })
        .unwrap();
        assert_eq!(body["type"], "Trailer");
    }

    #[test]
    fn profile_deserializes_roster_shape() {
        let json = r#"{
            "_id": "drv1",
            "name": "J. Cruz",
            "company": "Acme Logistics",
            "hauler": "Roadrunner",
            "truckType": "10-Wheeler",
            "plateNumber": "ABC-123"
        }"#;
        let profile: DriverProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.truck_type, "10-Wheeler");
        assert_eq!(profile.plate_number, "ABC-123");
    }
}
