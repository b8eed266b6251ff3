use crate::errors::*;
pub use reqwest::blocking::{Client, RequestBuilder};
use std::time::Duration;

pub fn client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(Error::from)
}
