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

use serde::{Deserialize, Serialize};

use crate::Error;

/// Namespace of the message catalog keys produced by [`ApiErrorCode::label`]
pub const LABEL_NAMESPACE: &str = "apierrorcode";

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    InputError,
    PermissionError,
    ValidationError,
    SystemError,
    NotFound,
    Unauthorized,
    GeneralError,
}

impl ApiErrorCode {
    /// Message catalog key, e.g. `apierrorcode.not_found`
    pub fn label(&self) -> String {
        format!("{LABEL_NAMESPACE}.{}", self.as_ref().to_ascii_lowercase())
    }

    /// Reverse of [`ApiErrorCode::label`]
    pub fn from_label(label: &str) -> Result<Self, Error> {
        ApiErrorCode::iter()
            .find(|code| code.label() == label)
            .ok_or_else(|| Error::UnknownErrorCode(label.to_owned()))
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            ApiErrorCode::InputError | ApiErrorCode::ValidationError => 400,
            ApiErrorCode::Unauthorized => 401,
            ApiErrorCode::PermissionError => 403,
            ApiErrorCode::NotFound => 404,
            ApiErrorCode::SystemError | ApiErrorCode::GeneralError => 500,
        }
    }

    pub fn iter() -> impl Iterator<Item = ApiErrorCode> {
        <ApiErrorCode as strum::IntoEnumIterator>::iter()
    }
}

/// Soft delete marker. The integer values are persisted and must not change.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[serde(into = "i32", try_from = "i32")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteFlag {
    #[default]
    Active,
    Deleted,
}

impl DeleteFlag {
    pub const fn flag(&self) -> i32 {
        match self {
            DeleteFlag::Active => 0,
            DeleteFlag::Deleted => 1,
        }
    }

    pub fn from_flag(flag: i32) -> Result<Self, Error> {
        match flag {
            0 => Ok(DeleteFlag::Active),
            1 => Ok(DeleteFlag::Deleted),
            other => Err(Error::UnknownDeleteFlag(other)),
        }
    }

    pub const fn is_deleted(&self) -> bool {
        matches!(self, DeleteFlag::Deleted)
    }

    pub fn iter() -> impl Iterator<Item = DeleteFlag> {
        <DeleteFlag as strum::IntoEnumIterator>::iter()
    }
}

impl From<DeleteFlag> for i32 {
    fn from(value: DeleteFlag) -> Self {
        value.flag()
    }
}

impl TryFrom<i32> for DeleteFlag {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        DeleteFlag::from_flag(value)
    }
}
