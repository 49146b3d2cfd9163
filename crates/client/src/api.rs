use std::path::Path;

use reqwest::{
    multipart::{Form, Part},
    Method, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ClientError;
use crate::models::{Complex, ComplexSubmission, Created, ErrorBody, LoginResponse, Occupation};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Typed access to every endpoint of the API service.
///
/// Admin calls need a token, obtained once through [`ApiClient::login`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of a stored photo.
    pub fn photo_url(&self, photo: &str) -> String {
        format!("{}/uploads/{}", self.base_url, photo)
    }

    pub fn is_admin(&self) -> bool {
        self.token.is_some()
    }

    pub async fn list_complexes(&self) -> Result<Vec<Complex>, ClientError> {
        decode(self.request(Method::GET, "/complexes").send().await?).await
    }

    pub async fn submit_complex(&self, submission: &ComplexSubmission) -> Result<i64, ClientError> {
        let form = submission_form(submission).await?;
        let created: Created = decode(
            self.request(Method::POST, "/complexes")
                .multipart(form)
                .send()
                .await?,
        )
        .await?;
        tracing::debug!(id = created.id, "complex submitted");
        Ok(created.id)
    }

    /// Flip a court and return its new occupied flag.
    pub async fn toggle_occupation(&self, terrain_id: i64) -> Result<bool, ClientError> {
        let path = format!("/terrains/{terrain_id}/occupation");
        let occupation: Occupation = decode(self.request(Method::POST, &path).send().await?).await?;
        Ok(occupation.occupied)
    }

    pub async fn login(&mut self, password: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, "/admin/login")
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let login: LoginResponse = decode(response).await?;
        self.token = Some(login.token);
        Ok(())
    }

    pub async fn list_all_complexes(&self) -> Result<Vec<Complex>, ClientError> {
        decode(self.admin(Method::GET, "/admin/complexes")?.send().await?).await
    }

    pub async fn validate_complex(&self, id: i64) -> Result<(), ClientError> {
        let path = format!("/admin/complexes/{id}/valider");
        expect_success(self.admin(Method::PATCH, &path)?.send().await?).await
    }

    pub async fn update_complex(
        &self,
        id: i64,
        submission: &ComplexSubmission,
    ) -> Result<(), ClientError> {
        let path = format!("/admin/complexes/{id}");
        let form = submission_form(submission).await?;
        expect_success(self.admin(Method::PUT, &path)?.multipart(form).send().await?).await
    }

    pub async fn delete_complex(&self, id: i64) -> Result<(), ClientError> {
        let path = format!("/admin/complexes/{id}");
        expect_success(self.admin(Method::DELETE, &path)?.send().await?).await
    }

    pub async fn update_terrain(&self, id: i64, number: u32) -> Result<(), ClientError> {
        let path = format!("/admin/terrains/{id}");
        let request = self.admin(Method::PUT, &path)?.json(&json!({ "number": number }));
        expect_success(request.send().await?).await
    }

    pub async fn delete_terrain(&self, id: i64) -> Result<(), ClientError> {
        let path = format!("/admin/terrains/{id}");
        expect_success(self.admin(Method::DELETE, &path)?.send().await?).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn admin(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        Ok(self.request(method, path).bearer_auth(token))
    }
}

async fn submission_form(submission: &ComplexSubmission) -> Result<Form, ClientError> {
    let coordinate = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    let mut form = Form::new()
        .text("name", submission.name.clone())
        .text("address", submission.address.clone())
        .text("surface", submission.surface.clone())
        .text("court_count", submission.court_count.to_string())
        .text("lat", coordinate(submission.lat))
        .text("lng", coordinate(submission.lng));

    if let Some(path) = &submission.photo {
        let bytes = tokio::fs::read(path).await?;
        form = form.part("photo", Part::bytes(bytes).file_name(file_name(path)));
    }

    Ok(form)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("photo")
        .to_string()
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check(response).await?;
    Ok(response.json().await?)
}

async fn expect_success(response: Response) -> Result<(), ClientError> {
    check(response).await.map(|_| ())
}

/// Turn a non-2xx answer into [`ClientError::Api`] carrying the server's message.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| if text.is_empty() { status.to_string() } else { text });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
