//! Company profile

use shared::{Company, CompanyInput};

use super::ApiClient;
use crate::error::AppResult;

#[derive(Clone)]
pub struct CompanyApi {
    client: ApiClient,
}

impl CompanyApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The backend keeps at most one company record; reports need it
    /// for the letterhead and fail without it.
    pub async fn current(&self) -> AppResult<Option<Company>> {
        let mut companies: Vec<Company> = self.client.get_list("/company/", &[]).await?;
        if companies.is_empty() {
            Ok(None)
        } else {
            Ok(Some(companies.remove(0)))
        }
    }

    pub async fn create(&self, input: &CompanyInput) -> AppResult<Company> {
        self.client.post("/company/", input).await
    }

    pub async fn update(&self, id: i64, input: &CompanyInput) -> AppResult<Company> {
        self.client.put(&format!("/company/{}/", id), input).await
    }

    /// Attach or replace the logo; travels as a multipart upload
    pub async fn upload_logo(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> AppResult<Company> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("logo", part);
        self.client
            .patch_multipart(&format!("/company/{}/", id), form)
            .await
    }
}
