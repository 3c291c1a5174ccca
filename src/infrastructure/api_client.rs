//! REST client for the character backend

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::dto::{
    AddXpRequest, AddXpResponse, ArmorExpenditureRequest, ArmorExpenditureResponse,
    CharacterPayload, CharacterRecord, CreatedCharacter, HarmRequest, HarmResponse,
    IndulgeViceResponse, NewProgressClock, ProgressClockAdded, ProgressClockTick,
    ProgressClockTicked, RollActionRequest, RollActionResponse, SearchResponse, SearchResult,
};
use crate::application::ports::outbound::{
    ApiError, CharacterApiPort, ReferenceDataPort, SearchPort,
};
use crate::domain::entities::{Ability, Heritage, ReferenceData, Vice};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::config::{ApiCredentials, AppConfig};

/// List endpoints answer either with a bare array or a paginated page
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Plain(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> ListResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Page { results: items } => items,
        }
    }
}

/// Client for the character backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: ApiCredentials,
}

impl ApiClient {
    pub fn new(base_url: &str, credentials: ApiCredentials) -> Self {
        Self::with_client(Client::new(), base_url, credentials)
    }

    pub fn with_client(client: Client, base_url: &str, credentials: ApiCredentials) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(Self::with_client(
            client,
            &config.api_base_url,
            config.credentials(),
        ))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));
        match self.credentials.authorization() {
            Some(value) => builder.header(reqwest::header::AUTHORIZATION, value),
            None => builder,
        }
    }

    /// Send a request and map transport and status failures
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Authentication(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                body
            };
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        self.execute(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST a sheet action for one character
    async fn post_action<B, T>(&self, id: CharacterId, action: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(
            self.request(Method::POST, &format!("characters/{id}/{action}/"))
                .json(body),
        )
        .await
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let list: ListResponse<T> = self.send(self.request(Method::GET, path)).await?;
        Ok(list.into_items())
    }
}

#[async_trait]
impl CharacterApiPort for ApiClient {
    #[instrument(skip(self, payload))]
    async fn create_character(&self, payload: &CharacterPayload) -> Result<CharacterId, ApiError> {
        let created: CreatedCharacter = self
            .send(self.request(Method::POST, "characters/").json(payload))
            .await?;
        debug!(character_id = %created.id, "Backend created character");
        Ok(created.id)
    }

    #[instrument(skip(self))]
    async fn list_characters(&self) -> Result<Vec<CharacterRecord>, ApiError> {
        self.list("characters/").await
    }

    #[instrument(skip(self))]
    async fn get_character(&self, id: CharacterId) -> Result<CharacterRecord, ApiError> {
        self.send(self.request(Method::GET, &format!("characters/{id}/")))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn update_character(
        &self,
        id: CharacterId,
        payload: &CharacterPayload,
    ) -> Result<CharacterRecord, ApiError> {
        self.send(
            self.request(Method::PATCH, &format!("characters/{id}/"))
                .json(payload),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_character(&self, id: CharacterId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("characters/{id}/")))
            .await?;
        debug!(character_id = %id, "Backend deleted character");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn roll_action(
        &self,
        id: CharacterId,
        request: &RollActionRequest,
    ) -> Result<RollActionResponse, ApiError> {
        self.post_action(id, "roll-action", request).await
    }

    #[instrument(skip(self))]
    async fn add_xp(
        &self,
        id: CharacterId,
        request: &AddXpRequest,
    ) -> Result<AddXpResponse, ApiError> {
        self.post_action(id, "add-xp", request).await
    }

    #[instrument(skip(self))]
    async fn take_harm(
        &self,
        id: CharacterId,
        request: &HarmRequest,
    ) -> Result<HarmResponse, ApiError> {
        self.post_action(id, "take-harm", request).await
    }

    #[instrument(skip(self))]
    async fn heal_harm(
        &self,
        id: CharacterId,
        request: &HarmRequest,
    ) -> Result<HarmResponse, ApiError> {
        self.post_action(id, "heal-harm", request).await
    }

    #[instrument(skip(self))]
    async fn indulge_vice(&self, id: CharacterId) -> Result<IndulgeViceResponse, ApiError> {
        self.post_action(id, "indulge-vice", &serde_json::Map::new())
            .await
    }

    #[instrument(skip(self))]
    async fn log_armor_expenditure(
        &self,
        id: CharacterId,
        request: &ArmorExpenditureRequest,
    ) -> Result<ArmorExpenditureResponse, ApiError> {
        self.post_action(id, "log-armor-expenditure", request).await
    }

    #[instrument(skip(self))]
    async fn add_progress_clock(
        &self,
        id: CharacterId,
        clock: &NewProgressClock,
    ) -> Result<ProgressClockAdded, ApiError> {
        self.post_action(id, "add-progress-clock", clock).await
    }

    #[instrument(skip(self))]
    async fn update_progress_clock(
        &self,
        id: CharacterId,
        tick: &ProgressClockTick,
    ) -> Result<ProgressClockTicked, ApiError> {
        self.post_action(id, "update-progress-clock", tick).await
    }
}

#[async_trait]
impl ReferenceDataPort for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_reference_data(&self) -> Result<ReferenceData, ApiError> {
        let (heritages, vices, abilities) = futures_util::try_join!(
            self.list::<Heritage>("heritages/"),
            self.list::<Vice>("vices/"),
            self.list::<Ability>("abilities/"),
        )?;
        Ok(ReferenceData::new(heritages, vices, abilities))
    }
}

#[async_trait]
impl SearchPort for ApiClient {
    #[instrument(skip(self))]
    async fn global_search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let response: SearchResponse = self
            .send(
                self.request(Method::GET, "global-search/")
                    .query(&[("q", query)]),
            )
            .await?;
        Ok(response.into_results())
    }
}
