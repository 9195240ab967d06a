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

mod config;
pub mod web;

pub use self::config::{Config, ConfigBuilder, ConfigBuilderError};
pub use web::{
    ApiError, ApiErrorCode, ApiResponse, DeleteFlag, JwtAuthenticationResponse, ModelPage,
    PageRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Field not initialized: {0}")]
    UninitializedField(&'static str),

    #[error("Unknown delete flag: {0}")]
    UnknownDeleteFlag(i32),

    #[error("Unknown error code: {0}")]
    UnknownErrorCode(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(error: derive_builder::UninitializedFieldError) -> Self {
        Error::UninitializedField(error.field_name())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
