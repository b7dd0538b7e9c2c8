//! Client for the `/users` resource

use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiResult;

/// Raw outcome of one request; decoding and assertions live in `expect`
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub body: String,
}

/// Client wrapper issuing one request per call, without retries
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: reqwest::Client,
    base_url: String,
}

impl UsersClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Reads

    pub async fn list_users(&self) -> ApiResult<ApiResponse> {
        self.send(Method::GET, "/users", None::<&()>).await
    }

    pub async fn get_user(&self, id: u32) -> ApiResult<ApiResponse> {
        self.send(Method::GET, &format!("/users/{}", id), None::<&()>).await
    }

    pub async fn user_posts(&self, id: u32) -> ApiResult<ApiResponse> {
        self.send(Method::GET, &format!("/users/{}/posts", id), None::<&()>).await
    }

    pub async fn user_todos(&self, id: u32) -> ApiResult<ApiResponse> {
        self.send(Method::GET, &format!("/users/{}/todos", id), None::<&()>).await
    }

    pub async fn user_albums(&self, id: u32) -> ApiResult<ApiResponse> {
        self.send(Method::GET, &format!("/users/{}/albums", id), None::<&()>).await
    }

    // Writes

    pub async fn create_user<B: Serialize + ?Sized>(&self, body: &B) -> ApiResult<ApiResponse> {
        self.create_user_at("/users", body).await
    }

    /// POST a user to an arbitrary path, used to probe invalid endpoints
    pub async fn create_user_at<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn replace_user<B: Serialize + ?Sized>(&self, id: u32, body: &B) -> ApiResult<ApiResponse> {
        self.send(Method::PUT, &format!("/users/{}", id), Some(body)).await
    }

    pub async fn patch_user<B: Serialize + ?Sized>(&self, id: u32, body: &B) -> ApiResult<ApiResponse> {
        self.send(Method::PATCH, &format!("/users/{}", id), Some(body)).await
    }

    pub async fn delete_user(&self, id: u32) -> ApiResult<ApiResponse> {
        self.send(Method::DELETE, &format!("/users/{}", id), None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%method, path, %status, bytes = body.len(), "request complete");

        Ok(ApiResponse {
            method,
            path: path.to_string(),
            status,
            body,
        })
    }
}
