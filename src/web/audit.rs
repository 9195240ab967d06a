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
use tracing::*;

use super::constants::DeleteFlag;
use super::types::{Auditor, Timestamp};

/// Creation and modification provenance, flattened into persisted entities
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Auditor>,

    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<Auditor>,

    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<Timestamp>,
}

impl AuditFields {
    /// The first call fills every field, later calls only move the
    /// `last_modified_*` pair.
    pub fn touch(&mut self, auditor: Option<Auditor>, at: Timestamp) {
        if self.created_at.is_none() {
            self.created_by = auditor.clone();
            self.created_at = Some(at);
        }

        self.last_modified_by = auditor;
        self.last_modified_at = Some(at);
    }
}

pub trait Auditable {
    fn audit(&self) -> &AuditFields;
    fn audit_mut(&mut self) -> &mut AuditFields;
}

pub trait SoftDeletable {
    fn delete_flag(&self) -> DeleteFlag;
    fn set_delete_flag(&mut self, flag: DeleteFlag);

    fn is_deleted(&self) -> bool {
        self.delete_flag().is_deleted()
    }
}

/// Supplies the identity of whoever performs the current write
pub trait AuditorAware {
    fn current_auditor(&self) -> Option<Auditor>;
}

impl<F: Fn() -> Option<Auditor>> AuditorAware for F {
    fn current_auditor(&self) -> Option<Auditor> {
        self()
    }
}

/// Before-write hook, see [`AuditFields::touch`]
pub fn before_write<E: Auditable + ?Sized>(
    entity: &mut E,
    auditor: Option<Auditor>,
    at: Timestamp,
) {
    entity.audit_mut().touch(auditor, at);
}

/// Stamps entities on behalf of the host persistence layer, which calls it
/// right before each insert or update.
#[derive(Debug, Clone)]
pub struct AuditingHandler<P> {
    auditor: P,
}

impl<P: AuditorAware> AuditingHandler<P> {
    pub fn new(auditor: P) -> Self {
        Self { auditor }
    }

    pub fn mark<E: Auditable + ?Sized>(&self, entity: &mut E) {
        self.mark_at(entity, chrono::Utc::now());
    }

    pub fn mark_at<E: Auditable + ?Sized>(&self, entity: &mut E, at: Timestamp) {
        let auditor = self.auditor.current_auditor();
        let created = entity.audit().created_at.is_none();

        trace!(?auditor, %at, %created, "audit");

        before_write(entity, auditor, at);
    }

    /// Logical delete: flips the flag and records the modification, the row
    /// itself stays.
    pub fn mark_deleted<E: Auditable + SoftDeletable + ?Sized>(&self, entity: &mut E) {
        entity.set_delete_flag(DeleteFlag::Deleted);
        self.mark(entity);
    }
}
