//! # History Service
//!
//! Read side of the backend's scan history. Fetching is delegated to
//! [`CipherApi`]; searching, summarising and exporting happen here.

use ciphercert_common::history::record::{self, ScanRecord};
use ciphercert_common::history::report::{self, HistorySummary};

use crate::api::CipherApi;
use crate::error::Result;
use crate::http::HttpClient;

pub struct HistoryService<C: HttpClient> {
    api: CipherApi<C>,
}

impl<C: HttpClient> HistoryService<C> {
    pub fn new(api: CipherApi<C>) -> Self {
        Self { api }
    }

    /// Stored scans, newest first, optionally narrowed by a search query.
    pub async fn records(&self, search: Option<&str>) -> Result<Vec<ScanRecord>> {
        let records = self.api.history().await?;
        Ok(match search {
            Some(query) => record::filter(&records, query).into_iter().cloned().collect(),
            None => records,
        })
    }

    pub async fn summary(&self) -> Result<HistorySummary> {
        let records = self.api.history().await?;
        Ok(HistorySummary::from_records(&records))
    }

    /// CSV rendering of [`HistoryService::records`], together with the row count.
    pub async fn export_csv(&self, search: Option<&str>) -> Result<(String, usize)> {
        let records = self.records(search).await?;
        Ok((report::to_csv(&records), records.len()))
    }

    pub async fn clear(&self) -> Result<()> {
        self.api.clear_history().await
    }
}
