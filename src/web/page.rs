//
// Copyright © 2025 Hardcore Engineering Inc.
//
// Licensed under the Eclipse Public License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may
// obtain a copy of the License at https://www.eclipse.org/legal/epl-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//
// See the License for the specific language governing permissions and
// limitations under the License.
//

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{Config, Error, Result};

fn check(page_number: i64, page_size: i64, len: usize, total_count: i64) -> Result<()> {
    let reason = if page_number < 1 {
        format!("pageNumber must be at least 1, got {page_number}")
    } else if page_size <= 0 {
        format!("pageSize must be positive, got {page_size}")
    } else if total_count < 0 {
        format!("totalCount must not be negative, got {total_count}")
    } else if i64::try_from(len).map_or(true, |len| len > page_size) {
        format!("content holds {len} items, more than pageSize {page_size}")
    } else {
        return Ok(());
    };

    tracing::debug!(%reason, "Rejected page");
    Err(Error::Validation(reason))
}

/// One page of an ordered result set. `page_number` is 1-based and
/// `total_count` is the size of the whole set, not of this page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase", try_from = "RawPage<T>")]
#[builder(pattern = "owned", build_fn(validate = "Self::validate", error = "Error"))]
pub struct ModelPage<T> {
    page_number: i64,
    page_size: i64,
    content: Vec<T>,
    total_count: i64,
}

impl<T> ModelPageBuilder<T> {
    fn validate(&self) -> Result<()> {
        match (self.page_number, self.page_size, &self.content, self.total_count) {
            (Some(page_number), Some(page_size), Some(content), Some(total_count)) => {
                check(page_number, page_size, content.len(), total_count)
            }

            // missing fields are reported by build()
            _ => Ok(()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    page_number: i64,
    page_size: i64,
    content: Vec<T>,
    total_count: i64,
}

impl<T> TryFrom<RawPage<T>> for ModelPage<T> {
    type Error = Error;

    fn try_from(raw: RawPage<T>) -> Result<Self> {
        ModelPage::new(raw.page_number, raw.page_size, raw.content, raw.total_count)
    }
}

impl<T> ModelPage<T> {
    pub fn new(
        page_number: i64,
        page_size: i64,
        content: Vec<T>,
        total_count: i64,
    ) -> Result<Self> {
        check(page_number, page_size, content.len(), total_count)?;

        Ok(Self {
            page_number,
            page_size,
            content,
            total_count,
        })
    }

    pub fn builder() -> ModelPageBuilder<T> {
        ModelPageBuilder::default()
    }

    /// Page answering `request`, filled with the rows the caller fetched
    pub fn from_request(request: &PageRequest, content: Vec<T>, total_count: i64) -> Result<Self> {
        Self::new(request.page_number, request.page_size, content, total_count)
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn total_pages(&self) -> i64 {
        self.total_count / self.page_size + i64::from(self.total_count % self.page_size != 0)
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ModelPage<U> {
        ModelPage {
            page_number: self.page_number,
            page_size: self.page_size,
            content: self.content.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

/// Validated page parameters taken from an incoming list request
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Result<Self> {
        check(page_number, page_size, 0, 0)?;

        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// Reads untrusted `page`/`size` query values. A missing page means the
    /// first one and a missing size means the configured default.
    pub fn from_query(page: Option<i64>, size: Option<i64>, config: &Config) -> Result<Self> {
        let page_size = size.unwrap_or(i64::from(config.default_page_size));
        let max_page_size = i64::from(config.max_page_size);

        if page_size > max_page_size {
            tracing::debug!(%page_size, %max_page_size, "Rejected page request");
            return Err(Error::Validation(format!(
                "pageSize must not exceed {max_page_size}, got {page_size}"
            )));
        }

        Self::new(page.unwrap_or(1), page_size)
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}
