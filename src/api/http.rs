use crate::api::ResourceApi;
use crate::error::ApiError;
use crate::record::{Record, RecordId};

/// Blocking JSON client for a REST resource collection:
/// `GET /`, `POST /`, `PUT /{id}`, `DELETE /{id}`.
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::agent(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: RecordId) -> String {
        format!("{}/{id}", self.base_url)
    }
}

impl ResourceApi for HttpApi {
    fn list(&self) -> Result<Vec<Record>, ApiError> {
        self.agent
            .get(&self.base_url)
            .call()
            .map_err(into_api_error)?
            .into_json()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn create(&mut self, data: &Record) -> Result<Record, ApiError> {
        self.agent
            .post(&self.base_url)
            .send_json(data)
            .map_err(into_api_error)?
            .into_json()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn update(&mut self, id: RecordId, data: &Record) -> Result<Record, ApiError> {
        self.agent
            .put(&self.item_url(id))
            .send_json(data)
            .map_err(into_api_error)?
            .into_json()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn delete(&mut self, id: RecordId) -> Result<Record, ApiError> {
        self.agent
            .delete(&self.item_url(id))
            .call()
            .map_err(into_api_error)?
            .into_json()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn into_api_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(code, _) => ApiError::Status(code),
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::HttpApi;

    #[test]
    fn item_urls_join_cleanly() {
        let api = HttpApi::new("http://localhost:3000/posts/");
        assert_eq!(api.base_url(), "http://localhost:3000/posts");
        assert_eq!(api.item_url(7), "http://localhost:3000/posts/7");
    }
}
