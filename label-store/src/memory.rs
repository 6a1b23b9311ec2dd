//! In-memory template store

use std::collections::HashMap;

use parking_lot::RwLock;
use shared::models::{
    LabelTemplate, LabelTemplateCreate, LabelTemplateUpdate, TemplateId, TemplateKind,
};
use shared::util::{now_millis, snowflake_id};
use shared::validation::validate_template;
use tracing::{debug, info};

use crate::{RepoResult, TemplateStore, ensure_mutable, ensure_tenant, not_found};

struct Row {
    tenant_id: String,
    template: LabelTemplate,
}

/// Process-local store keyed by template id, each row tagged with its tenant
#[derive(Default)]
pub struct MemoryTemplateStore {
    rows: RwLock<HashMap<TemplateId, Row>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn owned(&self, tenant_id: &str, id: TemplateId) -> Option<LabelTemplate> {
        self.rows
            .read()
            .get(&id)
            .filter(|row| row.tenant_id == tenant_id)
            .map(|row| row.template.clone())
    }
}

impl TemplateStore for MemoryTemplateStore {
    async fn list(&self, tenant_id: &str) -> RepoResult<Vec<LabelTemplate>> {
        ensure_tenant(tenant_id)?;
        let mut templates: Vec<LabelTemplate> = self
            .rows
            .read()
            .values()
            .filter(|row| row.tenant_id == tenant_id)
            .map(|row| row.template.clone())
            .collect();
        templates.sort_by_key(|t| (t.created_at, t.id));
        Ok(templates)
    }

    async fn get(&self, tenant_id: &str, id: TemplateId) -> RepoResult<Option<LabelTemplate>> {
        ensure_tenant(tenant_id)?;
        Ok(self.owned(tenant_id, id))
    }

    async fn create(
        &self,
        tenant_id: &str,
        data: LabelTemplateCreate,
    ) -> RepoResult<LabelTemplate> {
        ensure_tenant(tenant_id)?;
        validate_template(&data.name, data.width, data.height, &data.elements)?;

        let now = now_millis();
        let mut rows = self.rows.write();
        let mut id = snowflake_id();
        while rows.contains_key(&id) {
            id = snowflake_id();
        }

        let template = LabelTemplate {
            id,
            name: data.name,
            width: data.width,
            height: data.height,
            kind: TemplateKind::Custom,
            created_at: Some(now),
            updated_at: Some(now),
            elements: data.elements,
        };
        rows.insert(
            id,
            Row {
                tenant_id: tenant_id.to_string(),
                template: template.clone(),
            },
        );
        info!(tenant_id, template_id = id, "Label template created");
        Ok(template)
    }

    async fn update(
        &self,
        tenant_id: &str,
        id: TemplateId,
        data: LabelTemplateUpdate,
    ) -> RepoResult<LabelTemplate> {
        ensure_tenant(tenant_id)?;
        ensure_mutable(id)?;
        validate_template(&data.name, data.width, data.height, &data.elements)?;

        let mut rows = self.rows.write();
        let row = rows
            .get_mut(&id)
            .filter(|row| row.tenant_id == tenant_id)
            .ok_or_else(|| not_found(id))?;

        let template = &mut row.template;
        template.name = data.name;
        template.width = data.width;
        template.height = data.height;
        template.elements = data.elements;
        template.updated_at = Some(now_millis());

        info!(tenant_id, template_id = id, "Label template updated");
        Ok(template.clone())
    }

    async fn delete(&self, tenant_id: &str, id: TemplateId) -> RepoResult<bool> {
        ensure_tenant(tenant_id)?;
        ensure_mutable(id)?;

        let mut rows = self.rows.write();
        let owned = rows.get(&id).is_some_and(|row| row.tenant_id == tenant_id);
        if !owned {
            debug!(tenant_id, template_id = id, "Delete of absent label template ignored");
            return Ok(false);
        }
        rows.remove(&id);
        info!(tenant_id, template_id = id, "Label template deleted");
        Ok(true)
    }
}
