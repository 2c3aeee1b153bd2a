//! Registration service implementation
//!
//! Handles public registration submissions: the precondition chain, field
//! validation, the duplicate check and the final row append. The duplicate
//! check is read-then-write with no locking; two concurrent submissions can
//! both pass it. That race is an accepted limitation of the store.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::config::Settings;
use crate::middleware::auth::AuthContext;
use crate::models::{AcademicStatus, Gender, RegisterRequest, Registration};
use crate::sheets::codec;
use crate::sheets::scanner::{find_table, scan_tables, TableRegion};
use crate::sheets::store::SheetStore;
use crate::utils::errors::{Result, StoreError, TasgeelError};
use crate::utils::logging::log_registration;
use crate::utils::validation::{is_valid_email, is_valid_phone};

/// Registration service for event sign-ups
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn SheetStore>,
    settings: Settings,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(store: Arc<dyn SheetStore>, settings: Settings) -> Self {
        Self { store, settings }
    }

    fn registry(&self) -> &str {
        &self.settings.sheets.companies_sheet
    }

    /// Register for an event
    ///
    /// Preconditions are checked in order, each with its own failure mode:
    /// company exists, company enabled, event exists, event enabled, fields
    /// valid, no duplicate email/phone/national id within the event.
    pub async fn register(&self, request: RegisterRequest) -> Result<Registration> {
        debug!(company = %request.company_name, event = %request.event_name, "Registration received");

        let company = self.lookup_company(&request.company_name).await?;
        if !company.enabled {
            log_registration(&request.company_name, &request.event_name, false);
            return Err(TasgeelError::Forbidden(
                "This company is currently not accepting registrations".to_string(),
            ));
        }

        let rows = self.company_sheet(&company.name).await?;
        let tables = scan_tables(&rows);
        let region = find_table(&tables, &request.event_name)
            .cloned()
            .ok_or_else(|| TasgeelError::EventNotFound {
                name: request.event_name.clone(),
            })?;

        let header_cells = region.header_row.map(|index| rows[index].as_slice());
        let metadata_cells =
            (region.data_start < region.data_end).then(|| rows[region.data_start].as_slice());
        let (_, event_enabled) = codec::table_metadata(header_cells, metadata_cells);
        if !event_enabled {
            log_registration(&request.company_name, &request.event_name, false);
            return Err(TasgeelError::Forbidden(
                "This event is currently not accepting registrations".to_string(),
            ));
        }

        validate(&request)?;

        let header = owned_header(header_cells);
        self.check_duplicates(&rows, &region, &header, &request)?;

        let registration = Registration {
            id: None,
            name: request.name,
            phone: request.phone,
            email: request.email,
            gender: request.gender,
            college: request.college,
            status: request.status,
            national_id: request.national_id,
            registered_at: Utc::now().to_rfc3339(),
        };

        let row = codec::encode_registration(&registration, header.len());
        self.store
            .append_rows(&company.name, Some(&request.event_name), vec![row])
            .await?;

        log_registration(&request.company_name, &request.event_name, true);
        Ok(registration)
    }

    /// List an event's registrations, newest last
    pub async fn list(
        &self,
        actor: &AuthContext,
        company_name: &str,
        event_name: &str,
    ) -> Result<Vec<Registration>> {
        if !actor.can_manage(company_name) {
            return Err(TasgeelError::Forbidden(format!(
                "Not allowed to view registrations for {}",
                company_name
            )));
        }

        let rows = self.company_sheet(company_name).await?;
        let tables = scan_tables(&rows);
        let region = find_table(&tables, event_name).ok_or_else(|| TasgeelError::EventNotFound {
            name: event_name.to_string(),
        })?;

        let header = owned_header(region.header_row.map(|index| rows[index].as_slice()));

        Ok(registration_rows(region)
            .enumerate()
            .map(|(ordinal, index)| {
                let mut registration = codec::decode_registration(&rows[index], &header);
                registration.id = Some(ordinal.to_string());
                registration
            })
            .collect())
    }

    async fn lookup_company(&self, company_name: &str) -> Result<crate::models::Company> {
        let registry = match self.store.get_rows(self.registry(), None).await {
            Ok(rows) => rows,
            Err(StoreError::SheetMissing(_)) => {
                return Err(TasgeelError::CompanyNotFound {
                    name: company_name.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        registry
            .iter()
            .skip(1)
            .map(|row| codec::decode_company(row))
            .find(|company| company.name == company_name)
            .ok_or_else(|| TasgeelError::CompanyNotFound {
                name: company_name.to_string(),
            })
    }

    async fn company_sheet(&self, company_name: &str) -> Result<Vec<Vec<String>>> {
        self.store
            .get_rows(company_name, None)
            .await
            .map_err(|e| match e {
                StoreError::SheetMissing(_) => TasgeelError::CompanyNotFound {
                    name: company_name.to_string(),
                },
                other => other.into(),
            })
    }

    fn check_duplicates(
        &self,
        rows: &[Vec<String>],
        region: &TableRegion,
        header: &[String],
        request: &RegisterRequest,
    ) -> Result<()> {
        for index in registration_rows(region) {
            let existing = codec::decode_registration(&rows[index], header);
            if existing.email == request.email
                || existing.phone == request.phone
                || existing.national_id == request.national_id
            {
                return Err(TasgeelError::Conflict(
                    "You are already registered for this event".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Indexes of a region's registration rows, metadata row excluded
fn registration_rows(region: &TableRegion) -> std::ops::Range<usize> {
    let start = (region.data_start + 1).min(region.data_end);
    start..region.data_end
}

fn owned_header(header: Option<&[String]>) -> Vec<String> {
    match header {
        Some(cells) => cells.to_vec(),
        None => codec::EVENT_HEADERS.iter().map(|h| h.to_string()).collect(),
    }
}

fn validate(request: &RegisterRequest) -> Result<()> {
    let required = [
        &request.name,
        &request.phone,
        &request.email,
        &request.gender,
        &request.college,
        &request.status,
        &request.national_id,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(TasgeelError::InvalidInput(
            "All fields are required".to_string(),
        ));
    }

    if !is_valid_email(&request.email) {
        return Err(TasgeelError::InvalidInput(
            "Invalid email format".to_string(),
        ));
    }

    if !is_valid_phone(&request.phone) {
        return Err(TasgeelError::InvalidInput(
            "Invalid phone number format".to_string(),
        ));
    }

    if Gender::parse(&request.gender).is_none() {
        return Err(TasgeelError::InvalidInput(
            "Gender must be male or female".to_string(),
        ));
    }

    if AcademicStatus::parse(&request.status).is_none() {
        return Err(TasgeelError::InvalidInput(
            "Status must be student or graduate".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::ActorType;
    use crate::models::CreateEventRequest;
    use crate::services::event::EventService;
    use crate::services::image::ImageService;
    use crate::sheets::MemorySheetStore;
    use assert_matches::assert_matches;

    fn admin() -> AuthContext {
        AuthContext {
            id: "admin".to_string(),
            name: "Admin".to_string(),
            actor_type: ActorType::Admin,
        }
    }

    fn seed_company(store: &MemorySheetStore, name: &str, enabled: bool) {
        store.seed(
            "companies",
            vec![
                codec::COMPANY_HEADERS.iter().map(|h| h.to_string()).collect(),
                vec![
                    "company_1".to_string(),
                    name.to_string(),
                    name.to_lowercase(),
                    "hash".to_string(),
                    String::new(),
                    codec::encode_enabled(enabled).to_string(),
                ],
            ],
        );
        store.seed(name, Vec::new());
    }

    async fn seed_event(store: &MemorySheetStore, company: &str, event: &str) {
        let settings = Settings::default();
        let images = ImageService::new(settings.images.clone()).unwrap();
        let events = EventService::new(Arc::new(store.clone()), images, settings);
        events
            .create(
                &admin(),
                CreateEventRequest {
                    company_name: company.to_string(),
                    event_name: event.to_string(),
                    image: None,
                },
            )
            .await
            .unwrap();
    }

    fn service(store: &MemorySheetStore) -> RegistrationService {
        RegistrationService::new(Arc::new(store.clone()), Settings::default())
    }

    fn request(company: &str, event: &str) -> RegisterRequest {
        RegisterRequest {
            company_name: company.to_string(),
            event_name: event.to_string(),
            name: "Sara".to_string(),
            phone: "01012345678".to_string(),
            email: "sara@example.com".to_string(),
            gender: "female".to_string(),
            college: "Cairo".to_string(),
            status: "student".to_string(),
            national_id: "29001010100015".to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_registration_appends_row() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        seed_event(&store, "Acme", "Job Fair").await;
        let service = service(&store);

        let registration = service.register(request("Acme", "Job Fair")).await.unwrap();
        assert!(!registration.registered_at.is_empty());

        let listed = service.list(&admin(), "Acme", "Job Fair").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].email, "sara@example.com");
        assert_eq!(listed[0].id.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_unknown_company_is_not_found() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        let service = service(&store);

        let result = service.register(request("Ghost", "Job Fair")).await;
        assert_matches!(result, Err(TasgeelError::CompanyNotFound { .. }));
    }

    #[tokio::test]
    async fn test_disabled_company_is_forbidden_even_if_event_enabled() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", false);
        seed_event(&store, "Acme", "Job Fair").await;
        let service = service(&store);

        let result = service.register(request("Acme", "Job Fair")).await;
        assert_matches!(result, Err(TasgeelError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        let service = service(&store);

        let result = service.register(request("Acme", "Ghost")).await;
        assert_matches!(result, Err(TasgeelError::EventNotFound { .. }));
    }

    #[tokio::test]
    async fn test_disabled_event_is_forbidden_even_if_company_enabled() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        seed_event(&store, "Acme", "Job Fair").await;

        let settings = Settings::default();
        let images = ImageService::new(settings.images.clone()).unwrap();
        let events = EventService::new(Arc::new(store.clone()), images, settings);
        events
            .set_enabled(&admin(), "Acme", "Job Fair", false)
            .await
            .unwrap();

        let service = service(&store);
        let result = service.register(request("Acme", "Job Fair")).await;
        assert_matches!(result, Err(TasgeelError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_legacy_arabic_disabled_flag_blocks_registration() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        store.seed(
            "Acme",
            vec![
                vec!["Job Fair".to_string()],
                codec::EVENT_HEADERS.iter().map(|h| h.to_string()).collect(),
                {
                    let header: Vec<String> =
                        codec::EVENT_HEADERS.iter().map(|h| h.to_string()).collect();
                    let mut metadata = vec![String::new(); header.len()];
                    metadata[9] = "معطل".to_string();
                    metadata
                },
            ],
        );

        let service = service(&store);
        let result = service.register(request("Acme", "Job Fair")).await;
        assert_matches!(result, Err(TasgeelError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        seed_event(&store, "Acme", "Job Fair").await;
        let service = service(&store);

        for phone in ["01312345678", "0101234567", "not-a-phone"] {
            let mut bad = request("Acme", "Job Fair");
            bad.phone = phone.to_string();
            let result = service.register(bad).await;
            assert_matches!(result, Err(TasgeelError::InvalidInput(_)), "phone {phone}");
        }
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        seed_event(&store, "Acme", "Job Fair").await;
        let service = service(&store);

        let mut bad = request("Acme", "Job Fair");
        bad.college = String::new();
        let result = service.register(bad).await;
        assert_matches!(result, Err(TasgeelError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_duplicates_rejected_on_any_key() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        seed_event(&store, "Acme", "Job Fair").await;
        let service = service(&store);

        service.register(request("Acme", "Job Fair")).await.unwrap();

        // Same email, all other fields fresh
        let mut dup = request("Acme", "Job Fair");
        dup.phone = "01099999999".to_string();
        dup.national_id = "29911111111111".to_string();
        assert_matches!(
            service.register(dup).await,
            Err(TasgeelError::Conflict(_))
        );

        // Same phone
        let mut dup = request("Acme", "Job Fair");
        dup.email = "other@example.com".to_string();
        dup.national_id = "29911111111111".to_string();
        assert_matches!(
            service.register(dup).await,
            Err(TasgeelError::Conflict(_))
        );

        // Same national id
        let mut dup = request("Acme", "Job Fair");
        dup.email = "other@example.com".to_string();
        dup.phone = "01099999999".to_string();
        assert_matches!(
            service.register(dup).await,
            Err(TasgeelError::Conflict(_))
        );

        // A genuinely fresh registration still goes through
        let mut fresh = request("Acme", "Job Fair");
        fresh.email = "omar@example.com".to_string();
        fresh.phone = "01155555555".to_string();
        fresh.national_id = "29505050500012".to_string();
        assert!(service.register(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn test_company_actor_cannot_list_other_companies() {
        let store = MemorySheetStore::new();
        seed_company(&store, "Acme", true);
        seed_event(&store, "Acme", "Job Fair").await;
        let service = service(&store);

        let rival = AuthContext {
            id: "c2".to_string(),
            name: "Rival".to_string(),
            actor_type: ActorType::Company,
        };
        let result = service.list(&rival, "Acme", "Job Fair").await;
        assert_matches!(result, Err(TasgeelError::Forbidden(_)));
    }
}
