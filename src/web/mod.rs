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

pub mod audit;
pub mod constants;
pub mod jwt;
pub mod page;
pub mod response;
pub mod types;

pub use audit::{AuditFields, Auditable, AuditingHandler, AuditorAware, SoftDeletable};
pub use constants::{ApiErrorCode, DeleteFlag};
pub use jwt::{Claims, JwtAuthenticationResponse};
pub use page::{ModelPage, ModelPageBuilder, PageRequest};
pub use response::{ApiError, ApiResponse, MessageResolver};
