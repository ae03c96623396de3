//! Paginated endpoint iteration
//!
//! Paginated endpoints answer with `{"results": [...], "next": <url-or-null>}`.
//! [`PageIterator`] walks those pages one request at a time and yields the
//! individual items.

use crate::client::BitbucketClient;
use crate::error::{Error, Result};
use crate::request::{RequestOptions, decode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// One page of a paginated response
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Address of the following page; empty links count as absent
    pub fn next_address(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

/// Lazy, single-pass iterator over the items of a paginated endpoint
///
/// Pages are fetched on demand. The first page uses the options passed to
/// [`BitbucketClient::iter_get`]; subsequent pages follow the `next` link with
/// default options. After an error is yielded the iterator is exhausted.
pub struct PageIterator<'c, T = Value> {
    client: &'c BitbucketClient,
    first: Option<(String, RequestOptions)>,
    next: Option<String>,
    buffer: VecDeque<T>,
    failure: Option<Error>,
    done: bool,
}

impl<'c, T: DeserializeOwned> PageIterator<'c, T> {
    pub(crate) fn new(client: &'c BitbucketClient, address: String, options: RequestOptions) -> Self {
        Self {
            client,
            first: Some((address, options)),
            next: None,
            buffer: VecDeque::new(),
            failure: None,
            done: false,
        }
    }

    /// Whether the next call to [`Iterator::next`] yields an item or an error
    ///
    /// Fetches pages ahead until one has items, the last page has been read or
    /// a request fails.
    pub fn has_next(&mut self) -> bool {
        self.fill();
        !self.buffer.is_empty() || self.failure.is_some()
    }

    fn fill(&mut self) {
        while self.buffer.is_empty() && !self.done {
            match self.fetch_page() {
                Ok(Some(page)) => {
                    self.next = page.next_address().map(ToOwned::to_owned);
                    self.done = self.next.is_none();
                    self.buffer = VecDeque::from(page.results);
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    self.next = None;
                    self.failure = Some(e);
                }
            }
        }
    }

    fn fetch_page(&mut self) -> Result<Option<Page<T>>> {
        let response = if let Some((address, options)) = self.first.take() {
            self.client.get(&address, options)?
        } else if let Some(next) = self.next.take() {
            self.client.get(&next, RequestOptions::default())?
        } else {
            return Ok(None);
        };

        Ok(Some(decode(response)?))
    }
}

impl<T: DeserializeOwned> Iterator for PageIterator<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fill();
        match self.buffer.pop_front() {
            Some(item) => Some(Ok(item)),
            None => self.failure.take().map(Err),
        }
    }
}

impl<T: DeserializeOwned> FusedIterator for PageIterator<'_, T> {}

impl BitbucketClient {
    /// Iterate over every item of a paginated GET endpoint
    ///
    /// # Example
    /// ```rust,no_run
    /// use bitbucket_api::{BitbucketClient, ClientConfig, RequestOptions};
    ///
    /// # fn example() -> bitbucket_api::Result<()> {
    /// let client = BitbucketClient::new(ClientConfig::new("https://bitbucket.example.com/rest/api"))?;
    /// let address = client.api_url("projects");
    /// for project in client.iter_get::<serde_json::Value>(&address, RequestOptions::new()) {
    ///     println!("{}", project?["key"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter_get<T: DeserializeOwned>(&self, address: &str, options: RequestOptions) -> PageIterator<'_, T> {
        PageIterator::new(self, address.to_string(), options)
    }
}
