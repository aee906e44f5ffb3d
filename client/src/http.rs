use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::AUTHORIZATION,
    multipart::{Form, Part},
    RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use tradepost_core::{
    draft::ItemDraft,
    ids::RequestId,
    item::Item,
    swap::SwapRequest,
    user::Viewer,
};

use crate::{
    api::{AcceptOutcome, MarketApi},
    config::ClientConfig,
    error::ClientError,
    session::AuthToken,
};

/// HTTP implementation of the marketplace API, backed by one pooled
/// `reqwest::Client` for the whole session.
pub struct HttpMarketApi {
    http: reqwest::Client,
    api_base: String,
}

/// The item listing endpoints wrap their payload in an envelope.
#[derive(Deserialize)]
struct ItemsEnvelope {
    items: Vec<Item>,
}

impl HttpMarketApi {
    pub fn new(config: &ClientConfig) -> Result<Arc<Self>, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent("tradepost-client")
            .tcp_nodelay(true)
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ClientError::transport_with("failed to build http client", err))?;

        Ok(Arc::new(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
        }))
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.api_base)
    }

    fn authorized(&self, builder: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
    }

    /// Every non-success status is a transport failure, including 401: an
    /// expired or revoked token is a remote rejection, not a missing
    /// credential.
    async fn expect_success(what: &str, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::transport(format!(
                "{what} returned status {status}"
            )))
        }
    }

    async fn send_json<T: DeserializeOwned>(
        what: &str,
        response: Response,
    ) -> Result<T, ClientError> {
        let response = Self::expect_success(what, response).await?;
        response.json::<T>().await.map_err(|err| {
            ClientError::transport_with(format!("{what} returned an unreadable body"), err)
        })
    }

    fn multipart_draft(draft: &ItemDraft) -> Result<Form, ClientError> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("category", draft.category.as_str().to_owned())
            .text("description", draft.description.clone());

        if let Some(book_type) = &draft.book_type {
            form = form.text("bookType", book_type.as_str().to_owned());
        }

        for image in &draft.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|err| {
                    ClientError::transport_with(
                        format!("invalid image content type: {}", image.content_type),
                        err,
                    )
                })?;
            form = form.part("images", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl MarketApi for HttpMarketApi {
    async fn fetch_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.http.get(self.url("/api/items/getItem")).send().await?;
        let envelope: ItemsEnvelope = Self::send_json("item listing", response).await?;
        Ok(envelope.items)
    }

    async fn fetch_items_excluding_own(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<Item>, ClientError> {
        let request = self.http.get(self.url("/api/items/otheruser"));
        let response = self.authorized(request, token).send().await?;
        let envelope: ItemsEnvelope = Self::send_json("scoped item listing", response).await?;
        Ok(envelope.items)
    }

    async fn fetch_viewer(&self, token: &AuthToken) -> Result<Viewer, ClientError> {
        let request = self.http.get(self.url("/api/auth/me"));
        let response = self.authorized(request, token).send().await?;
        Self::send_json("viewer profile", response).await
    }

    async fn fetch_swap_requests(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<SwapRequest>, ClientError> {
        let request = self.http.get(self.url("/api/swap"));
        let response = self.authorized(request, token).send().await?;
        Self::send_json("swap requests", response).await
    }

    async fn post_item(&self, token: &AuthToken, draft: &ItemDraft) -> Result<Item, ClientError> {
        let form = Self::multipart_draft(draft)?;
        let request = self
            .http
            .post(self.url("/api/items/postItem"))
            .multipart(form);
        let response = self.authorized(request, token).send().await?;
        Self::send_json("item posting", response).await
    }

    async fn accept_request(
        &self,
        token: &AuthToken,
        id: &RequestId,
    ) -> Result<AcceptOutcome, ClientError> {
        let request = self.http.put(self.url(&format!("/api/swap/{id}/accept")));
        let response = self.authorized(request, token).send().await?;
        Self::send_json("swap accept", response).await
    }

    async fn reject_request(
        &self,
        token: &AuthToken,
        id: &RequestId,
    ) -> Result<SwapRequest, ClientError> {
        let request = self.http.put(self.url(&format!("/api/swap/{id}/reject")));
        let response = self.authorized(request, token).send().await?;
        Self::send_json("swap reject", response).await
    }

    async fn delete_request(
        &self,
        token: &AuthToken,
        id: &RequestId,
    ) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(&format!("/api/swap/{id}")));
        let response = self.authorized(request, token).send().await?;
        Self::expect_success("swap delete", response).await?;
        Ok(())
    }
}
