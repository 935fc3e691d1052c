//! HTTP client for the library REST API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::domain::Module;
use tracing::debug;
use url::Url;

use crate::HostError;

pub fn resource_path(module: Module) -> &'static str {
    match module {
        Module::Author => "author",
        Module::Book => "book",
        Module::Customer => "costumer",
        Module::Rental => "rent",
    }
}

pub struct LibraryApi {
    http: Client,
    base_url: Url,
}

impl LibraryApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, HostError> {
        let mut base_url = Url::parse(base_url.trim())
            .map_err(|err| HostError::Config(format!("invalid api base url '{base_url}': {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| HostError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn search_url(&self, module: Module) -> Result<Url, HostError> {
        self.base_url
            .join(&format!("{}/search", resource_path(module)))
            .map_err(|err| HostError::Config(format!("invalid search url: {err}")))
    }

    pub async fn search<T: DeserializeOwned>(
        &self,
        module: Module,
        term: &str,
    ) -> Result<Vec<T>, HostError> {
        let url = self.search_url(module)?;
        debug!(module = %module, %url, term, "searching library api");

        let res = self
            .http
            .get(url)
            .query(&[("term", term)])
            .send()
            .await
            .map_err(|err| HostError::Transport(err.to_string()))?
            .error_for_status()
            .map_err(|err| HostError::Transport(err.to_string()))?;

        res.json::<Vec<T>>()
            .await
            .map_err(|err| HostError::Decode(err.to_string()))
    }
}
