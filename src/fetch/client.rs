use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes one HTTP request. Implementations may wrap or replace reqwest's
/// client, but must not retry on their own.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
