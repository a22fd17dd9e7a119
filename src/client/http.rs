use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    client::{ClientError, ClientResult, TripsApi},
    models::trip::{Trip, TripId, TripInput},
    resource::Envelope,
    services::uploads::StoredUpload,
};

/// [`TripsApi`] over the service's HTTP surface.
#[derive(Clone)]
pub struct HttpTripsApi {
    client: Client,
    base_url: Url,
}

#[derive(serde::Deserialize)]
struct UploadFailure {
    error: String,
}

impl HttpTripsApi {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self::with_client(Client::new(), Url::parse(base_url)?))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Sends an image to `/upload`; the returned `url` is what goes into a
    /// trip's `image` field.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<StoredUpload> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/upload")?)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let failure: UploadFailure = response.json().await?;
        Err(ClientError::Api {
            status: status.as_u16(),
            message: failure.error,
        })
    }
}

async fn envelope<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status().as_u16();
    let envelope: Envelope<T> = response.json().await?;
    envelope
        .into_result()
        .map_err(|message| ClientError::Api { status, message })
}

#[async_trait]
impl TripsApi for HttpTripsApi {
    async fn list(&self) -> ClientResult<Vec<Trip>> {
        let response = self.client.get(self.url("/trips")?).send().await?;
        envelope(response).await
    }

    async fn create(&self, input: &TripInput) -> ClientResult<Trip> {
        let response = self
            .client
            .post(self.url("/trips")?)
            .json(input)
            .send()
            .await?;
        envelope(response).await
    }

    async fn update(&self, id: TripId, input: &TripInput) -> ClientResult<Trip> {
        let response = self
            .client
            .put(self.url(&format!("/trips/{id}"))?)
            .json(input)
            .send()
            .await?;
        envelope(response).await
    }

    async fn delete(&self, id: TripId) -> ClientResult<Trip> {
        let response = self
            .client
            .delete(self.url(&format!("/trips/{id}"))?)
            .send()
            .await?;
        envelope(response).await
    }
}
