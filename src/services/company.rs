//! Company service implementation
//!
//! This service manages the reserved company registry sheet: account
//! creation, lookups, partial updates, the enabled gate and deletion.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Settings;
use crate::models::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::services::image::ImageService;
use crate::sheets::codec;
use crate::sheets::store::SheetStore;
use crate::utils::errors::{Result, StoreError, TasgeelError};

const IMAGE_FOLDER: &str = "companies";

/// Company service for managing company accounts
#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn SheetStore>,
    images: ImageService,
    settings: Settings,
}

impl CompanyService {
    /// Create a new CompanyService instance
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

    /// Load the registry rows, creating the sheet with its header on first use
    async fn load_registry(&self) -> Result<Vec<Vec<String>>> {
        match self.store.get_rows(self.registry(), None).await {
            Ok(rows) => Ok(rows),
            Err(StoreError::SheetMissing(_)) => {
                info!(sheet = %self.registry(), "Company registry missing, creating it");
                let header: Vec<String> =
                    codec::COMPANY_HEADERS.iter().map(|h| h.to_string()).collect();
                self.store.create_sheet(self.registry()).await?;
                self.store
                    .append_rows(self.registry(), None, vec![header.clone()])
                    .await?;
                Ok(vec![header])
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check that the spreadsheet provider answers at all
    pub async fn ping_store(&self) -> bool {
        matches!(
            self.store.get_rows(self.registry(), None).await,
            Ok(_) | Err(StoreError::SheetMissing(_))
        )
    }

    /// Create a new company account
    pub async fn create(&self, request: CreateCompanyRequest) -> Result<Company> {
        debug!(username = %request.username, "Creating company");

        if request.name.is_empty() || request.username.is_empty() || request.password.is_empty() {
            return Err(TasgeelError::InvalidInput(
                "Name, username, and password are required".to_string(),
            ));
        }

        let rows = self.load_registry().await?;
        if rows
            .iter()
            .skip(1)
            .any(|row| codec::cell(row, 2) == request.username)
        {
            return Err(TasgeelError::Conflict("Username already exists".to_string()));
        }

        let id = format!("company_{}", Uuid::new_v4());
        let password_hash = hash_password(&request.password)?;

        let image = match &request.image {
            Some(content) => Some(
                self.images
                    .upload(&ImageService::company_file_name(&id), content, IMAGE_FOLDER)
                    .await?,
            ),
            None => None,
        };

        let company = Company {
            id,
            name: request.name,
            username: request.username,
            password_hash,
            image,
            enabled: true,
        };

        self.store
            .append_rows(self.registry(), None, vec![codec::encode_company(&company)])
            .await?;

        // Each company gets its own sheet to hold its event tables
        self.store.create_sheet(&company.name).await?;

        info!(company = %company.name, id = %company.id, "Company created");
        Ok(company)
    }

    /// List all companies
    pub async fn list(&self) -> Result<Vec<Company>> {
        let rows = self.load_registry().await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter(|row| !codec::cell(row, 0).is_empty())
            .map(|row| codec::decode_company(row))
            .collect())
    }

    async fn find_row<F>(&self, target: &str, matches: F) -> Result<(usize, Company)>
    where
        F: Fn(&Company) -> bool,
    {
        let rows = self.load_registry().await?;
        for (index, row) in rows.iter().enumerate().skip(1) {
            if codec::cell(row, 0).is_empty() {
                continue;
            }
            let company = codec::decode_company(row);
            if matches(&company) {
                return Ok((index, company));
            }
        }

        Err(TasgeelError::CompanyNotFound {
            name: target.to_string(),
        })
    }

    /// Get a company by its identifier
    pub async fn get_by_id(&self, id: &str) -> Result<Company> {
        let (_, company) = self.find_row(id, |c| c.id == id).await?;
        Ok(company)
    }

    /// Get a company by its display name
    pub async fn get_by_name(&self, name: &str) -> Result<Company> {
        let (_, company) = self.find_row(name, |c| c.name == name).await?;
        Ok(company)
    }

    /// Partially update a company
    ///
    /// The password is re-hashed only when supplied; the image is re-uploaded
    /// only when supplied.
    pub async fn update(&self, id: &str, request: UpdateCompanyRequest) -> Result<Company> {
        debug!(id = id, "Updating company");

        let (index, mut company) = self.find_row(id, |c| c.id == id).await?;

        if let Some(username) = request.username {
            if username != company.username {
                let rows = self.load_registry().await?;
                if rows
                    .iter()
                    .enumerate()
                    .skip(1)
                    .any(|(i, row)| i != index && codec::cell(row, 2) == username)
                {
                    return Err(TasgeelError::Conflict(
                        "Username already exists".to_string(),
                    ));
                }
                company.username = username;
            }
        }

        if let Some(name) = request.name {
            company.name = name;
        }

        if let Some(password) = request.password {
            company.password_hash = hash_password(&password)?;
        }

        if let Some(content) = request.image {
            company.image = Some(
                self.images
                    .upload(
                        &ImageService::company_file_name(&company.id),
                        &content,
                        IMAGE_FOLDER,
                    )
                    .await?,
            );
        }

        if let Some(enabled) = request.enabled {
            company.enabled = enabled;
        }

        self.store
            .update_row(self.registry(), None, index, codec::encode_company(&company))
            .await?;

        info!(company = %company.name, id = %company.id, "Company updated");
        Ok(company)
    }

    /// Toggle whether a company accepts registrations and logins
    pub async fn set_enabled(&self, id: &str, enabled: bool) -> Result<Company> {
        self.update(
            id,
            UpdateCompanyRequest {
                enabled: Some(enabled),
                ..Default::default()
            },
        )
        .await
    }

    /// Delete a company's registry row
    ///
    /// The company's event sheet is retained; only the registry entry goes.
    pub async fn delete(&self, id: &str) -> Result<Company> {
        let (index, company) = self.find_row(id, |c| c.id == id).await?;

        self.store.delete_row(self.registry(), index).await?;

        info!(company = %company.name, id = %company.id, "Company deleted");
        Ok(company)
    }
}

/// Hash a password with Argon2id before it is persisted
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| TasgeelError::PasswordHash)
}
