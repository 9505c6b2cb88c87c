//! Driver record lifecycle: roster search, arrival/departure status
//! derivation, the record form state machine, and the list merges applied
//! after each REST call succeeds.

use std::fmt;

use chrono::NaiveDate;

use crate::models::{
    has_value, DriverLog, DriverLogPayload, DriverProfile, ProductIdBody, ReferenceEntity,
};
use crate::time;

/// Client-side cap on products per trip.
pub const MAX_PRODUCTS: usize = 5;

/// Where a driver stands for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// No log for today.
    NewDriver,
    /// Arrived, not yet departed.
    Incomplete,
    /// Arrived and departed.
    Complete,
}

impl RecordStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::NewDriver => "New Driver",
            RecordStatus::Incomplete => "Incomplete",
            RecordStatus::Complete => "Complete",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RecordStatus::NewDriver => "status-badge new",
            RecordStatus::Incomplete => "status-badge incomplete",
            RecordStatus::Complete => "status-badge complete",
        }
    }
}

/// The most recent log for a profile on the given day. Matching is keyed by
/// `driver_data_id`, so two drivers sharing a name stay distinct.
pub fn latest_log_today<'a>(
    profile_id: &str,
    logs: &'a [DriverLog],
    today: NaiveDate,
) -> Option<&'a DriverLog> {
    logs.iter()
        .filter(|log| log.driver_data_id == profile_id)
        .filter(|log| arrived_on(log, today))
        .max_by_key(|log| log.arrival_time.as_deref().and_then(time::parse))
}

fn arrived_on(log: &DriverLog, day: NaiveDate) -> bool {
    log.arrival_time
        .as_deref()
        .is_some_and(|arrival| time::same_day(arrival, day))
}

pub fn derive_status(latest: Option<&DriverLog>) -> RecordStatus {
    match latest {
        None => RecordStatus::NewDriver,
        Some(log) if log.is_open() => RecordStatus::Incomplete,
        Some(_) => RecordStatus::Complete,
    }
}

/// True when the driver already has an arrival without a departure today.
/// Arrival submissions are rejected while this holds.
pub fn has_open_arrival(profile_id: &str, logs: &[DriverLog], today: NaiveDate) -> bool {
    logs.iter()
        .any(|log| log.driver_data_id == profile_id && arrived_on(log, today) && log.is_open())
}

/// A roster entry decorated for the search results list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileMatch {
    pub profile: DriverProfile,
    pub status: RecordStatus,
    pub latest_log: Option<DriverLog>,
}

/// Case-insensitive substring search over the roster (name OR company OR
/// hauler). An empty or whitespace query returns nothing: the search panel
/// is closed until the operator types.
pub fn search_profiles(
    query: &str,
    profiles: &[DriverProfile],
    logs: &[DriverLog],
    today: NaiveDate,
) -> Vec<ProfileMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    profiles
        .iter()
        .filter(|profile| {
            contains(&profile.name, &needle)
                || contains(&profile.company, &needle)
                || contains(&profile.hauler, &needle)
        })
        .map(|profile| {
            let latest = latest_log_today(&profile.id, logs, today);
            ProfileMatch {
                profile: profile.clone(),
                status: derive_status(latest),
                latest_log: latest.cloned(),
            }
        })
        .collect()
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Substring filter for the history table. Unlike the roster search, an
/// empty query keeps the full list (the table is always populated).
pub fn filter_logs(query: &str, logs: &[DriverLog]) -> Vec<DriverLog> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return logs.to_vec();
    }

    logs.iter()
        .filter(|log| {
            contains(&log.name, &needle)
                || contains(&log.plate_number, &needle)
                || contains(log.company_label().unwrap_or(""), &needle)
                || contains(log.hauler_label().unwrap_or(""), &needle)
                || contains(&log.destination, &needle)
        })
        .cloned()
        .collect()
}

/// The logs whose arrival falls on the given day, in list order.
pub fn logs_for_day(logs: &[DriverLog], day: NaiveDate) -> Vec<DriverLog> {
    logs.iter()
        .filter(|log| arrived_on(log, day))
        .cloned()
        .collect()
}

/// Counts shown in the history summary strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogCounts {
    pub total: usize,
    pub complete: usize,
    pub incomplete: usize,
}

pub fn summarize(logs: &[DriverLog]) -> LogCounts {
    let mut counts = LogCounts {
        total: logs.len(),
        ..LogCounts::default()
    };
    for log in logs {
        if log.is_open() {
            counts.incomplete += 1;
        } else if has_value(&log.arrival_time) && has_value(&log.departure_time) {
            counts.complete += 1;
        }
    }
    counts
}

/// Which flavor of the record modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    Arrival,
    Departure,
    EditFull,
}

impl RecordMode {
    pub fn title(&self) -> &'static str {
        match self {
            RecordMode::Arrival => "Record Arrival",
            RecordMode::Departure => "Record Departure",
            RecordMode::EditFull => "Edit Record",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            RecordMode::Arrival => "Save Arrival",
            RecordMode::Departure => "Save Departure",
            RecordMode::EditFull => "Save Changes",
        }
    }
}

/// Form fields the modal renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    PlateNumber,
    Company,
    Hauler,
    TruckType,
    ArrivalTime,
    DepartureTime,
    Destination,
    Products,
    DnNumber,
}

/// Mode-dependent access for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Editable,
    ReadOnly,
    Hidden,
}

impl FieldAccess {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FieldAccess::Hidden)
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, FieldAccess::Editable)
    }
}

/// The visibility/editability table from the record lifecycle design:
/// arrival edits identity and hides the departure leg, departure freezes
/// identity and opens the departure leg, full edit additionally reopens the
/// arrival stamp.
pub fn field_access(mode: RecordMode, field: FormField) -> FieldAccess {
    use FieldAccess::{Editable, Hidden, ReadOnly};
    use FormField::*;

    match mode {
        RecordMode::Arrival => match field {
            Name | PlateNumber | Company | Hauler | TruckType | ArrivalTime => Editable,
            DepartureTime | Destination | Products | DnNumber => Hidden,
        },
        RecordMode::Departure => match field {
            Name | PlateNumber | Company | Hauler | TruckType | ArrivalTime => ReadOnly,
            DepartureTime | Destination | Products | DnNumber => Editable,
        },
        RecordMode::EditFull => match field {
            Name | PlateNumber | Company | Hauler | TruckType => ReadOnly,
            ArrivalTime | DepartureTime | Destination | Products | DnNumber => Editable,
        },
    }
}

/// Validation and precondition failures raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    NoDriverSelected,
    NoRecordSelected,
    DuplicateArrival,
    MissingName,
    MissingPlateNumber,
    MissingCompany,
    MissingHauler,
    MissingArrivalTime,
    MissingDepartureTime,
    DepartureBeforeArrival,
    TooManyProducts,
    DuplicateProduct,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FormError::NoDriverSelected => "Select a driver before recording an arrival",
            FormError::NoRecordSelected => "No record selected",
            FormError::DuplicateArrival => "This driver already has an open arrival for today",
            FormError::MissingName => "Driver name is required",
            FormError::MissingPlateNumber => "Plate number is required",
            FormError::MissingCompany => "Company is required",
            FormError::MissingHauler => "Hauler is required",
            FormError::MissingArrivalTime => "Arrival time is required",
            FormError::MissingDepartureTime => "Departure time is required",
            FormError::DepartureBeforeArrival => "Departure time cannot be before arrival time",
            FormError::TooManyProducts => "A trip can carry at most 5 products",
            FormError::DuplicateProduct => "That product is already on the trip",
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for FormError {}

/// Mutable state behind the record modal. Reference selections carry both
/// the stable id and the display string from the moment they are made, so
/// payload assembly never resolves strings back to ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordForm {
    /// Present for departure/edit: the log being mutated.
    pub log_id: Option<String>,
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
    pub product_ids: Vec<String>,
    pub dn_number: String,
}

impl RecordForm {
    /// Arrival form: identity seeded from the roster profile, ids resolved
    /// against the loaded reference lists now (not at submit time), arrival
    /// stamped with the caller's clock.
    pub fn for_arrival<C, H, T>(
        profile: &DriverProfile,
        companies: &[C],
        haulers: &[H],
        truck_types: &[T],
        now: &str,
    ) -> Self
    where
        C: ReferenceEntity,
        H: ReferenceEntity,
        T: ReferenceEntity,
    {
        RecordForm {
            log_id: None,
            driver_data_id: profile.id.clone(),
            name: profile.name.clone(),
            plate_number: profile.plate_number.clone(),
            company_id: resolve_id(&profile.company, companies),
            company: profile.company.clone(),
            hauler_id: resolve_id(&profile.hauler, haulers),
            hauler: profile.hauler.clone(),
            truck_type_id: resolve_id(&profile.truck_type, truck_types),
            truck_type: profile.truck_type.clone(),
            arrival_time: Some(now.to_string()),
            ..RecordForm::default()
        }
    }

    /// Departure form: everything echoes the stored log, departure stamped
    /// with the caller's clock.
    pub fn for_departure(log: &DriverLog, now: &str) -> Self {
        let mut form = RecordForm::from_log(log);
        form.departure_time = Some(now.to_string());
        form
    }

    /// Full edit: the persisted values verbatim, nothing auto-stamped.
    pub fn for_edit(log: &DriverLog) -> Self {
        RecordForm::from_log(log)
    }

    fn from_log(log: &DriverLog) -> Self {
        RecordForm {
            log_id: Some(log.id.clone()),
            driver_data_id: log.driver_data_id.clone(),
            name: log.name.clone(),
            plate_number: log.plate_number.clone(),
            company_id: log.company_id.as_ref().map(|r| r.id().to_string()),
            company: log.company_label().unwrap_or_default().to_string(),
            hauler_id: log.hauler_id.as_ref().map(|r| r.id().to_string()),
            hauler: log.hauler_label().unwrap_or_default().to_string(),
            truck_type_id: log.truck_type_id.as_ref().map(|r| r.id().to_string()),
            truck_type: log.truck_type_label().unwrap_or_default().to_string(),
            arrival_time: log.arrival_time.clone(),
            departure_time: log.departure_time.clone(),
            destination: log.destination.clone(),
            product_ids: log
                .products
                .iter()
                .map(|entry| entry.product_id.id().to_string())
                .collect(),
            dn_number: log.dn_number.clone(),
        }
    }

    /// The reset-to-now control on the arrival stamp.
    pub fn reset_arrival_to(&mut self, now: &str) {
        self.arrival_time = Some(now.to_string());
    }

    /// Same control for the departure stamp.
    pub fn reset_departure_to(&mut self, now: &str) {
        self.departure_time = Some(now.to_string());
    }

    pub fn set_company(&mut self, selection: Option<(String, String)>) {
        match selection {
            Some((id, label)) => {
                self.company_id = Some(id);
                self.company = label;
            }
            None => {
                self.company_id = None;
                self.company.clear();
            }
        }
    }

    pub fn set_hauler(&mut self, selection: Option<(String, String)>) {
        match selection {
            Some((id, label)) => {
                self.hauler_id = Some(id);
                self.hauler = label;
            }
            None => {
                self.hauler_id = None;
                self.hauler.clear();
            }
        }
    }

    pub fn set_truck_type(&mut self, selection: Option<(String, String)>) {
        match selection {
            Some((id, label)) => {
                self.truck_type_id = Some(id);
                self.truck_type = label;
            }
            None => {
                self.truck_type_id = None;
                self.truck_type.clear();
            }
        }
    }

    pub fn add_product(&mut self, product_id: String) -> Result<(), FormError> {
        if self.product_ids.len() >= MAX_PRODUCTS {
            return Err(FormError::TooManyProducts);
        }
        if self.product_ids.contains(&product_id) {
            return Err(FormError::DuplicateProduct);
        }
        self.product_ids.push(product_id);
        Ok(())
    }

    pub fn remove_product(&mut self, product_id: &str) {
        self.product_ids.retain(|id| id != product_id);
    }

    pub fn validate(&self, mode: RecordMode) -> Result<(), FormError> {
        if self.product_ids.len() > MAX_PRODUCTS {
            return Err(FormError::TooManyProducts);
        }

        match mode {
            RecordMode::Arrival => {
                require(&self.name, FormError::MissingName)?;
                require(&self.plate_number, FormError::MissingPlateNumber)?;
                require(&self.company, FormError::MissingCompany)?;
                require(&self.hauler, FormError::MissingHauler)?;
                if !has_value(&self.arrival_time) {
                    return Err(FormError::MissingArrivalTime);
                }
            }
            RecordMode::Departure => {
                if !has_value(&self.departure_time) {
                    return Err(FormError::MissingDepartureTime);
                }
                self.check_time_order()?;
            }
            RecordMode::EditFull => {
                if !has_value(&self.arrival_time) {
                    return Err(FormError::MissingArrivalTime);
                }
                self.check_time_order()?;
            }
        }
        Ok(())
    }

    fn check_time_order(&self) -> Result<(), FormError> {
        if let (Some(arrival), Some(departure)) =
            (self.arrival_time.as_deref(), self.departure_time.as_deref())
        {
            if time::is_before(departure, arrival) {
                return Err(FormError::DepartureBeforeArrival);
            }
        }
        Ok(())
    }

    /// Body for `POST /api/drivers`. The departure leg is blank by
    /// definition of an arrival.
    pub fn to_create_payload(&self) -> DriverLogPayload {
        let mut payload = self.to_payload();
        payload.departure_time = None;
        payload.destination = String::new();
        payload.products = Vec::new();
        payload.dn_number = String::new();
        payload
    }

    /// Body for `PUT /api/drivers/:id`.
    pub fn to_update_payload(&self) -> DriverLogPayload {
        self.to_payload()
    }

    fn to_payload(&self) -> DriverLogPayload {
        DriverLogPayload {
            driver_data_id: self.driver_data_id.clone(),
            name: self.name.clone(),
            plate_number: self.plate_number.clone(),
            company_id: self.company_id.clone(),
            company: self.company.clone(),
            hauler_id: self.hauler_id.clone(),
            hauler: self.hauler.clone(),
            truck_type_id: self.truck_type_id.clone(),
            truck_type: self.truck_type.clone(),
            arrival_time: self.arrival_time.clone(),
            departure_time: self.departure_time.clone(),
            destination: self.destination.clone(),
            products: self
                .product_ids
                .iter()
                .map(|id| ProductIdBody {
                    product_id: id.clone(),
                })
                .collect(),
            dn_number: self.dn_number.clone(),
        }
    }
}

fn require(value: &str, error: FormError) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

fn resolve_id<T: ReferenceEntity>(label: &str, items: &[T]) -> Option<String> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    items
        .iter()
        .find(|item| item.label().eq_ignore_ascii_case(label))
        .map(|item| item.id().to_string())
}

/// Checks run before an arrival POST is issued. Any error here means no
/// network call happens.
pub fn arrival_preflight(
    selected: Option<&DriverProfile>,
    form: &RecordForm,
    logs: &[DriverLog],
    today: NaiveDate,
) -> Result<(), FormError> {
    let profile = selected.ok_or(FormError::NoDriverSelected)?;
    if has_open_arrival(&profile.id, logs, today) {
        return Err(FormError::DuplicateArrival);
    }
    form.validate(RecordMode::Arrival)
}

/// Checks run before a departure/edit PUT is issued.
pub fn mutation_preflight(form: &RecordForm, mode: RecordMode) -> Result<(), FormError> {
    if form.log_id.as_deref().map_or(true, str::is_empty) {
        return Err(FormError::NoRecordSelected);
    }
    form.validate(mode)
}

/// POST succeeded: the new record goes to the front of the list.
pub fn prepend_log(logs: &mut Vec<DriverLog>, created: DriverLog) {
    logs.insert(0, created);
}

/// PUT succeeded: replace the matching record in place. Returns false when
/// no local record matched (the caller refetches).
pub fn replace_log(logs: &mut [DriverLog], updated: DriverLog) -> bool {
    match logs.iter_mut().find(|log| log.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// DELETE succeeded: drop exactly the matching record.
pub fn remove_log(logs: &mut Vec<DriverLog>, id: &str) -> bool {
    let before = logs.len();
    logs.retain(|log| log.id != id);
    logs.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, Hauler, Reference, TruckType};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn no_refs() -> (Vec<Company>, Vec<Hauler>, Vec<TruckType>) {
        (Vec::new(), Vec::new(), Vec::new())
    }

    fn profile(id: &str, name: &str) -> DriverProfile {
        DriverProfile {
            id: id.to_string(),
            name: name.to_string(),
            company: "Acme Logistics".to_string(),
            hauler: "Roadrunner".to_string(),
            truck_type: "10-Wheeler".to_string(),
            plate_number: "ABC-123".to_string(),
        }
    }

    fn log(id: &str, driver_id: &str, arrival: Option<&str>, departure: Option<&str>) -> DriverLog {
        DriverLog {
            id: id.to_string(),
            driver_data_id: driver_id.to_string(),
            name: "J. Cruz".to_string(),
            plate_number: "ABC-123".to_string(),
            company_id: Some(Reference::Id("c1".to_string())),
            company: "Acme Logistics".to_string(),
            hauler_id: Some(Reference::Id("h1".to_string())),
            hauler: "Roadrunner".to_string(),
            truck_type_id: None,
            truck_type: String::new(),
            arrival_time: arrival.map(str::to_string),
            departure_time: departure.map(str::to_string),
            destination: String::new(),
            products: Vec::new(),
            dn_number: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn status_is_new_driver_without_a_same_day_log() {
        let logs = vec![log("l1", "drv1", Some("2024-05-31T22:00:00+08:00"), None)];
        let latest = latest_log_today("drv1", &logs, day());
        assert!(latest.is_none());
        assert_eq!(derive_status(latest), RecordStatus::NewDriver);
    }

    #[test]
    fn status_is_incomplete_with_open_arrival() {
        let logs = vec![log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None)];
        let latest = latest_log_today("drv1", &logs, day());
        assert_eq!(derive_status(latest), RecordStatus::Incomplete);
    }

    #[test]
    fn status_becomes_complete_after_departure_is_recorded() {
        let mut logs = vec![log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None)];
        assert_eq!(
            derive_status(latest_log_today("drv1", &logs, day())),
            RecordStatus::Incomplete
        );

        let mut updated = logs[0].clone();
        updated.departure_time = Some("2024-06-01T15:30:00+08:00".to_string());
        assert!(replace_log(&mut logs, updated));

        let latest = latest_log_today("drv1", &logs, day()).unwrap();
        assert_eq!(
            latest.departure_time.as_deref(),
            Some("2024-06-01T15:30:00+08:00")
        );
        assert_eq!(derive_status(Some(latest)), RecordStatus::Complete);
    }

    #[test]
    fn latest_log_picks_the_most_recent_arrival() {
        let logs = vec![
            log(
                "early",
                "drv1",
                Some("2024-06-01T06:00:00+08:00"),
                Some("2024-06-01T07:00:00+08:00"),
            ),
            log("late", "drv1", Some("2024-06-01T13:00:00+08:00"), None),
        ];
        assert_eq!(latest_log_today("drv1", &logs, day()).unwrap().id, "late");
    }

    #[test]
    fn same_name_drivers_are_not_conflated() {
        let logs = vec![log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None)];
        // Same display name, different profile id.
        assert_eq!(
            derive_status(latest_log_today("drv2", &logs, day())),
            RecordStatus::NewDriver
        );
        assert_eq!(
            derive_status(latest_log_today("drv1", &logs, day())),
            RecordStatus::Incomplete
        );
    }

    #[test]
    fn search_matches_name_company_or_hauler() {
        let profiles = vec![profile("drv1", "J. Cruz"), profile("drv2", "A. Reyes")];
        let logs = Vec::new();

        assert_eq!(search_profiles("cruz", &profiles, &logs, day()).len(), 1);
        // Both share the company and hauler defaults.
        assert_eq!(search_profiles("ACME", &profiles, &logs, day()).len(), 2);
        assert_eq!(
            search_profiles("roadrunner", &profiles, &logs, day()).len(),
            2
        );
        assert!(search_profiles("nobody", &profiles, &logs, day()).is_empty());
    }

    #[test]
    fn empty_query_closes_the_search_panel() {
        let profiles = vec![profile("drv1", "J. Cruz")];
        assert!(search_profiles("", &profiles, &[], day()).is_empty());
        assert!(search_profiles("   ", &profiles, &[], day()).is_empty());
    }

    #[test]
    fn search_decorates_matches_with_status() {
        let profiles = vec![profile("drv1", "J. Cruz")];
        let logs = vec![log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None)];
        let matches = search_profiles("cruz", &profiles, &logs, day());
        assert_eq!(matches[0].status, RecordStatus::Incomplete);
        assert_eq!(matches[0].latest_log.as_ref().unwrap().id, "l1");
    }

    #[test]
    fn history_filter_keeps_everything_on_empty_query() {
        let logs = vec![
            log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None),
            log("l2", "drv2", Some("2024-06-01T09:00:00+08:00"), None),
        ];
        assert_eq!(filter_logs("", &logs).len(), 2);
        assert_eq!(filter_logs("acme", &logs).len(), 2);
        assert!(filter_logs("zzz", &logs).is_empty());
    }

    #[test]
    fn day_slice_drops_other_days() {
        let logs = vec![
            log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None),
            log("l2", "drv2", Some("2024-05-31T09:00:00+08:00"), None),
            log("l3", "drv3", None, None),
        ];
        let todays = logs_for_day(&logs, day());
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].id, "l1");
    }

    #[test]
    fn summary_counts_complete_and_incomplete() {
        let logs = vec![
            log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None),
            log(
                "l2",
                "drv2",
                Some("2024-06-01T09:00:00+08:00"),
                Some("2024-06-01T11:00:00+08:00"),
            ),
        ];
        let counts = summarize(&logs);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.complete, 1);
        assert_eq!(counts.incomplete, 1);
    }

    #[test]
    fn arrival_form_resolves_reference_ids_at_open_time() {
        let companies = vec![Company {
            id: "c1".to_string(),
            name: "Acme Logistics".to_string(),
        }];
        let haulers = vec![Hauler {
            id: "h1".to_string(),
            name: "Roadrunner".to_string(),
        }];
        let trucks = vec![TruckType {
            id: "t1".to_string(),
            name: "10-Wheeler".to_string(),
        }];

        let form = RecordForm::for_arrival(
            &profile("drv1", "J. Cruz"),
            &companies,
            &haulers,
            &trucks,
            "2024-06-01T08:00:00+08:00",
        );
        assert_eq!(form.company_id.as_deref(), Some("c1"));
        assert_eq!(form.hauler_id.as_deref(), Some("h1"));
        assert_eq!(form.truck_type_id.as_deref(), Some("t1"));
        assert_eq!(
            form.arrival_time.as_deref(),
            Some("2024-06-01T08:00:00+08:00")
        );
        assert!(form.departure_time.is_none());
    }

    #[test]
    fn arrival_form_leaves_unknown_references_unresolved() {
        let (companies, haulers, trucks) = no_refs();
        let form = RecordForm::for_arrival(
            &profile("drv1", "J. Cruz"),
            &companies,
            &haulers,
            &trucks,
            "2024-06-01T08:00:00+08:00",
        );
        assert!(form.company_id.is_none());
        // The display string still rides along for the payload.
        assert_eq!(form.company, "Acme Logistics");
    }

    #[test]
    fn departure_form_stamps_now_and_carries_ids() {
        let source = log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None);
        let form = RecordForm::for_departure(&source, "2024-06-01T15:30:00+08:00");
        assert_eq!(form.log_id.as_deref(), Some("l1"));
        assert_eq!(
            form.departure_time.as_deref(),
            Some("2024-06-01T15:30:00+08:00")
        );

        let payload = form.to_update_payload();
        assert_eq!(payload.company_id.as_deref(), Some("c1"));
        assert_eq!(payload.hauler_id.as_deref(), Some("h1"));
    }

    #[test]
    fn edit_form_does_not_stamp_anything() {
        let source = log(
            "l1",
            "drv1",
            Some("2024-06-01T08:00:00+08:00"),
            Some("2024-06-01T15:30:00+08:00"),
        );
        let form = RecordForm::for_edit(&source);
        assert_eq!(
            form.departure_time.as_deref(),
            Some("2024-06-01T15:30:00+08:00")
        );
    }

    #[test]
    fn create_payload_blanks_the_departure_leg() {
        let (companies, haulers, trucks) = no_refs();
        let mut form = RecordForm::for_arrival(
            &profile("drv1", "J. Cruz"),
            &companies,
            &haulers,
            &trucks,
            "2024-06-01T08:00:00+08:00",
        );
        // Stray departure-leg state must not leak into an arrival POST.
        form.destination = "Plant B".to_string();
        form.departure_time = Some("2024-06-01T09:00:00+08:00".to_string());

        let payload = form.to_create_payload();
        assert!(payload.departure_time.is_none());
        assert!(payload.destination.is_empty());
        assert!(payload.products.is_empty());
        assert_eq!(
            payload.arrival_time.as_deref(),
            Some("2024-06-01T08:00:00+08:00")
        );
    }

    #[test]
    fn arrival_preflight_requires_a_selected_driver() {
        let form = RecordForm::default();
        assert_eq!(
            arrival_preflight(None, &form, &[], day()),
            Err(FormError::NoDriverSelected)
        );
    }

    #[test]
    fn arrival_preflight_rejects_duplicate_open_arrival() {
        let driver = profile("drv1", "J. Cruz");
        let logs = vec![log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None)];
        let (companies, haulers, trucks) = no_refs();
        let form = RecordForm::for_arrival(
            &driver,
            &companies,
            &haulers,
            &trucks,
            "2024-06-01T10:00:00+08:00",
        );
        assert_eq!(
            arrival_preflight(Some(&driver), &form, &logs, day()),
            Err(FormError::DuplicateArrival)
        );
    }

    #[test]
    fn arrival_preflight_allows_second_trip_after_departure() {
        let driver = profile("drv1", "J. Cruz");
        let logs = vec![log(
            "l1",
            "drv1",
            Some("2024-06-01T08:00:00+08:00"),
            Some("2024-06-01T11:00:00+08:00"),
        )];
        let (companies, haulers, trucks) = no_refs();
        let form = RecordForm::for_arrival(
            &driver,
            &companies,
            &haulers,
            &trucks,
            "2024-06-01T13:00:00+08:00",
        );
        assert_eq!(arrival_preflight(Some(&driver), &form, &logs, day()), Ok(()));
    }

    #[test]
    fn arrival_validation_requires_identity_fields() {
        let (companies, haulers, trucks) = no_refs();
        let mut form = RecordForm::for_arrival(
            &profile("drv1", "J. Cruz"),
            &companies,
            &haulers,
            &trucks,
            "2024-06-01T08:00:00+08:00",
        );
        form.plate_number = " ".to_string();
        assert_eq!(
            form.validate(RecordMode::Arrival),
            Err(FormError::MissingPlateNumber)
        );
    }

    #[test]
    fn departure_validation_requires_stamp_and_ordering() {
        let source = log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None);
        let mut form = RecordForm::for_departure(&source, "2024-06-01T07:00:00+08:00");
        assert_eq!(
            form.validate(RecordMode::Departure),
            Err(FormError::DepartureBeforeArrival)
        );

        form.departure_time = None;
        assert_eq!(
            form.validate(RecordMode::Departure),
            Err(FormError::MissingDepartureTime)
        );
    }

    #[test]
    fn mutation_preflight_requires_a_record() {
        let form = RecordForm::default();
        assert_eq!(
            mutation_preflight(&form, RecordMode::Departure),
            Err(FormError::NoRecordSelected)
        );
    }

    #[test]
    fn products_are_capped_and_deduplicated() {
        let mut form = RecordForm::default();
        for n in 0..MAX_PRODUCTS {
            form.add_product(format!("p{}", n)).unwrap();
        }
        assert_eq!(
            form.add_product("p9".to_string()),
            Err(FormError::TooManyProducts)
        );
        form.remove_product("p0");
        assert_eq!(
            form.add_product("p1".to_string()),
            Err(FormError::DuplicateProduct)
        );
        assert_eq!(form.add_product("p9".to_string()), Ok(()));
    }

    #[test]
    fn list_merges_follow_the_rest_lifecycle() {
        let mut logs = vec![log("l1", "drv1", Some("2024-06-01T08:00:00+08:00"), None)];

        prepend_log(
            &mut logs,
            log("l2", "drv2", Some("2024-06-01T09:00:00+08:00"), None),
        );
        assert_eq!(logs[0].id, "l2");

        assert!(remove_log(&mut logs, "l1"));
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, "l2");
        assert!(!remove_log(&mut logs, "l1"));

        let phantom = log("missing", "drv9", None, None);
        assert!(!replace_log(&mut logs, phantom));
    }

    #[test]
    fn field_access_matches_the_mode_table() {
        use FieldAccess::*;
        use FormField::*;

        assert_eq!(field_access(RecordMode::Arrival, DepartureTime), Hidden);
        assert_eq!(field_access(RecordMode::Arrival, Company), Editable);
        assert_eq!(field_access(RecordMode::Departure, Name), ReadOnly);
        assert_eq!(field_access(RecordMode::Departure, Destination), Editable);
        assert_eq!(field_access(RecordMode::EditFull, ArrivalTime), Editable);
        assert_eq!(field_access(RecordMode::EditFull, PlateNumber), ReadOnly);
        assert!(!field_access(RecordMode::Arrival, Products).is_visible());
        assert!(field_access(RecordMode::Departure, DnNumber).is_editable());
    }

    #[test]
    fn selection_setters_keep_id_and_label_paired() {
        let mut form = RecordForm::default();
        form.set_company(Some(("c1".to_string(), "Acme Logistics".to_string())));
        assert_eq!(form.company_id.as_deref(), Some("c1"));
        assert_eq!(form.company, "Acme Logistics");

        form.set_company(None);
        assert!(form.company_id.is_none());
        assert!(form.company.is_empty());
    }
}
