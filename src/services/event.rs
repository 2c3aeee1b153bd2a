//! Event service implementation
//!
//! Events live as table regions inside their company's sheet. This service
//! creates, lists, patches and deletes those regions, and owns the rule that
//! a company actor may only touch its own events.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::middleware::auth::AuthContext;
use crate::models::{CreateEventRequest, Event, UpdateEventRequest};
use crate::services::image::ImageService;
use crate::sheets::codec;
use crate::sheets::scanner::{find_table, scan_tables, TableRegion};
use crate::sheets::store::SheetStore;
use crate::utils::errors::{Result, StoreError, TasgeelError};

const IMAGE_FOLDER: &str = "events";

/// Event service for managing event tables
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn SheetStore>,
    images: ImageService,
    settings: Settings,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(store: Arc<dyn SheetStore>, images: ImageService, settings: Settings) -> Self {
        Self {
            store,
            images,
            settings,
        }
    }

    fn registry(&self) -> &str {
        &self.settings.sheets.companies_sheet
    }

    fn authorize(actor: &AuthContext, company_name: &str) -> Result<()> {
        if actor.can_manage(company_name) {
            Ok(())
        } else {
            warn!(actor = %actor.name, company = company_name, "Event mutation denied");
            Err(TasgeelError::Forbidden(format!(
                "Not allowed to manage events for {}",
                company_name
            )))
        }
    }

    /// Load a company's sheet, mapping a missing sheet to a missing company
    async fn company_rows(&self, company_name: &str) -> Result<Vec<Vec<String>>> {
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

    fn event_from_region(
        rows: &[Vec<String>],
        region: &TableRegion,
        company: Option<&str>,
    ) -> Event {
        let header = region.header_row.map(|index| rows[index].as_slice());
        let metadata = (region.data_start < region.data_end)
            .then(|| rows[region.data_start].as_slice());
        let (image, enabled) = codec::table_metadata(header, metadata);

        Event {
            id: region.name.clone(),
            name: region.name.clone(),
            company: company.map(|c| c.to_string()),
            registrations: region.registration_count(),
            image,
            enabled,
            registration_url: None,
        }
    }

    /// List one company's events, or every company's when no filter is given
    ///
    /// In the unfiltered case a single company's scan failure is logged and
    /// skipped so one broken sheet cannot hide everyone else's events.
    pub async fn list(&self, company_name: Option<&str>) -> Result<Vec<Event>> {
        match company_name {
            Some(company_name) => self.list_for_company(company_name, false).await,
            None => {
                let registry = match self.store.get_rows(self.registry(), None).await {
                    Ok(rows) => rows,
                    Err(StoreError::SheetMissing(_)) => return Ok(Vec::new()),
                    Err(e) => return Err(e.into()),
                };

                let mut events = Vec::new();
                for row in registry.iter().skip(1) {
                    let name = codec::cell(row, 1);
                    if name.is_empty() {
                        continue;
                    }
                    match self.list_for_company(name, true).await {
                        Ok(company_events) => events.extend(company_events),
                        Err(e) => {
                            warn!(company = name, error = %e, "Skipping company during event listing")
                        }
                    }
                }
                Ok(events)
            }
        }
    }

    async fn list_for_company(&self, company_name: &str, tag_company: bool) -> Result<Vec<Event>> {
        let rows = self.company_rows(company_name).await?;
        let tables = scan_tables(&rows);

        Ok(tables
            .iter()
            .map(|region| {
                Self::event_from_region(&rows, region, tag_company.then_some(company_name))
            })
            .collect())
    }

    /// Get a single event with its registration count
    pub async fn get(&self, company_name: &str, event_name: &str) -> Result<Event> {
        let rows = self.company_rows(company_name).await?;
        let tables = scan_tables(&rows);
        let region = find_table(&tables, event_name).ok_or_else(|| TasgeelError::EventNotFound {
            name: event_name.to_string(),
        })?;

        Ok(Self::event_from_region(&rows, region, Some(company_name)))
    }

    /// Create a new event table inside the company's sheet
    pub async fn create(&self, actor: &AuthContext, request: CreateEventRequest) -> Result<Event> {
        Self::authorize(actor, &request.company_name)?;
        debug!(company = %request.company_name, event = %request.event_name, "Creating event");

        if request.company_name.is_empty() || request.event_name.is_empty() {
            return Err(TasgeelError::InvalidInput(
                "Company name and event name are required".to_string(),
            ));
        }

        let rows = self.company_rows(&request.company_name).await?;
        let tables = scan_tables(&rows);
        if find_table(&tables, &request.event_name).is_some() {
            return Err(TasgeelError::Conflict(format!(
                "Event {} already exists",
                request.event_name
            )));
        }

        let image = match &request.image {
            Some(content) => Some(
                self.images
                    .upload(
                        &ImageService::event_file_name(&request.company_name, &request.event_name),
                        content,
                        IMAGE_FOLDER,
                    )
                    .await?,
            ),
            None => None,
        };

        let headers: Vec<String> = codec::EVENT_HEADERS.iter().map(|h| h.to_string()).collect();
        self.store
            .create_table(&request.company_name, &request.event_name, &headers)
            .await?;

        // New events start enabled; the metadata row carries image and flag
        let metadata = codec::metadata_row(&headers, image.as_deref(), true);
        self.store
            .append_rows(&request.company_name, Some(&request.event_name), vec![metadata])
            .await?;

        info!(company = %request.company_name, event = %request.event_name, "Event created");

        Ok(Event {
            id: request.event_name.clone(),
            name: request.event_name.clone(),
            company: Some(request.company_name.clone()),
            registrations: 0,
            image,
            enabled: true,
            registration_url: Some(self.registration_url(&request.company_name, &request.event_name)),
        })
    }

    fn registration_url(&self, company_name: &str, event_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.settings.server.public_url.trim_end_matches('/'),
            urlencoding::encode(company_name),
            urlencoding::encode(event_name)
        )
    }

    /// Patch an event's metadata row in place
    ///
    /// This is a locate-then-patch sequence with no compensating action: a
    /// crash between the header fix-up and the metadata write can leave the
    /// table half-updated.
    pub async fn update(&self, actor: &AuthContext, request: UpdateEventRequest) -> Result<Event> {
        Self::authorize(actor, &request.company_name)?;
        debug!(company = %request.company_name, event = %request.event_name, "Updating event");

        let mut rows = self.company_rows(&request.company_name).await?;
        let mut tables = scan_tables(&rows);
        let mut region = find_table(&tables, &request.event_name)
            .cloned()
            .ok_or_else(|| TasgeelError::EventNotFound {
                name: request.event_name.to_string(),
            })?;

        // Tables whose name row ended the sheet have no header yet; give them
        // one so the metadata columns exist, then rescan.
        if region.header_row.is_none() {
            let headers: Vec<String> =
                codec::EVENT_HEADERS.iter().map(|h| h.to_string()).collect();
            self.store
                .append_rows(&request.company_name, Some(&request.event_name), vec![headers])
                .await?;

            rows = self.company_rows(&request.company_name).await?;
            tables = scan_tables(&rows);
            region = find_table(&tables, &request.event_name)
                .cloned()
                .ok_or_else(|| TasgeelError::EventNotFound {
                    name: request.event_name.to_string(),
                })?;
        }

        let header_index = region.header_row.ok_or_else(|| {
            TasgeelError::Store(StoreError::InvalidResponse(
                "table header did not persist".to_string(),
            ))
        })?;

        let mut header = rows[header_index].clone();
        let mut header_changed = false;

        if request.image.is_some() && codec::find_column(&header, &codec::IMAGE_LABELS).is_none() {
            header.push("Image".to_string());
            header_changed = true;
        }
        if request.enabled.is_some()
            && codec::find_column(&header, &codec::ENABLED_LABELS).is_none()
        {
            header.push("Enabled".to_string());
            header_changed = true;
        }
        if header_changed {
            self.store
                .update_row(&request.company_name, None, header_index, header.clone())
                .await?;
        }

        let has_metadata_row = region.data_start < region.data_end;
        let mut metadata = if has_metadata_row {
            rows[region.data_start].clone()
        } else {
            vec![String::new(); header.len()]
        };

        if let Some(content) = &request.image {
            let url = self
                .images
                .upload(
                    &ImageService::event_file_name(&request.company_name, &request.event_name),
                    content,
                    IMAGE_FOLDER,
                )
                .await?;
            let index = codec::find_column(&header, &codec::IMAGE_LABELS)
                .unwrap_or(header.len().saturating_sub(1));
            set_cell(&mut metadata, index, url);
        }

        if let Some(enabled) = request.enabled {
            let index = codec::find_column(&header, &codec::ENABLED_LABELS)
                .unwrap_or(header.len().saturating_sub(1));
            set_cell(&mut metadata, index, codec::encode_enabled(enabled).to_string());
        }

        if has_metadata_row {
            self.store
                .update_row(&request.company_name, None, region.data_start, metadata.clone())
                .await?;
        } else {
            self.store
                .append_rows(
                    &request.company_name,
                    Some(&request.event_name),
                    vec![metadata.clone()],
                )
                .await?;
        }

        let (image, enabled) =
            codec::table_metadata(Some(header.as_slice()), Some(metadata.as_slice()));
        info!(company = %request.company_name, event = %request.event_name, enabled = enabled, "Event updated");

        Ok(Event {
            id: request.event_name.clone(),
            name: request.event_name.clone(),
            company: Some(request.company_name.clone()),
            registrations: region.registration_count(),
            image,
            enabled,
            registration_url: None,
        })
    }

    /// Toggle whether an event accepts registrations
    pub async fn set_enabled(
        &self,
        actor: &AuthContext,
        company_name: &str,
        event_name: &str,
        enabled: bool,
    ) -> Result<Event> {
        self.update(
            actor,
            UpdateEventRequest {
                company_name: company_name.to_string(),
                event_name: event_name.to_string(),
                image: None,
                enabled: Some(enabled),
            },
        )
        .await
    }

    /// Replace an event's banner image
    pub async fn set_image(
        &self,
        actor: &AuthContext,
        company_name: &str,
        event_name: &str,
        image: String,
    ) -> Result<Event> {
        self.update(
            actor,
            UpdateEventRequest {
                company_name: company_name.to_string(),
                event_name: event_name.to_string(),
                image: Some(image),
                enabled: None,
            },
        )
        .await
    }

    /// Remove an event's table region from the company's sheet
    pub async fn delete(
        &self,
        actor: &AuthContext,
        company_name: &str,
        event_name: &str,
    ) -> Result<()> {
        Self::authorize(actor, company_name)?;

        let rows = self.company_rows(company_name).await?;
        let tables = scan_tables(&rows);
        if find_table(&tables, event_name).is_none() {
            return Err(TasgeelError::EventNotFound {
                name: event_name.to_string(),
            });
        }

        self.store.delete_table(company_name, event_name).await?;
        info!(company = company_name, event = event_name, "Event deleted");
        Ok(())
    }
}

fn set_cell(row: &mut Vec<String>, index: usize, value: String) {
    while row.len() <= index {
        row.push(String::new());
    }
    row[index] = value;
}
