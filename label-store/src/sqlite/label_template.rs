//! Label Template Repository

use std::collections::HashMap;

use shared::models::{
    AttributeElement, BoxElement, Element, ElementKind, ElementType, LabelTemplate,
    LabelTemplateCreate, LabelTemplateUpdate, TemplateId, TemplateKind, TextElement,
};
use shared::util::{now_millis, snowflake_id};
use shared::validation::validate_template;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

use crate::{RepoError, RepoResult, ensure_mutable, ensure_tenant, not_found};

const TEMPLATE_COLUMNS: &str = "id, name, width, height, kind, created_at, updated_at";

const ELEMENT_COLUMNS: &str =
    "template_id, element_id, element_type, x, y, width, height, content, attribute_key, font_size";

#[instrument(skip(pool))]
pub async fn list(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<LabelTemplate>> {
    ensure_tenant(tenant_id)?;

    let mut templates = sqlx::query_as::<_, LabelTemplate>(&format!(
        "SELECT {TEMPLATE_COLUMNS} FROM label_template WHERE tenant_id = ? ORDER BY created_at, id"
    ))
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    if templates.is_empty() {
        return Ok(templates);
    }

    let rows = sqlx::query_as::<_, ElementRow>(&format!(
        "SELECT {ELEMENT_COLUMNS} FROM label_element \
         WHERE template_id IN (SELECT id FROM label_template WHERE tenant_id = ?) \
         ORDER BY template_id, position"
    ))
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    let mut element_map: HashMap<TemplateId, Vec<Element>> = HashMap::new();
    for row in rows {
        element_map
            .entry(row.template_id)
            .or_default()
            .push(row.into_element()?);
    }
    for t in &mut templates {
        t.elements = element_map.remove(&t.id).unwrap_or_default();
    }
    Ok(templates)
}

pub async fn get(
    pool: &SqlitePool,
    tenant_id: &str,
    id: TemplateId,
) -> RepoResult<Option<LabelTemplate>> {
    ensure_tenant(tenant_id)?;
    let mut conn = pool.acquire().await?;
    find(&mut conn, tenant_id, id).await
}

#[instrument(skip(pool, data), fields(name = %data.name))]
pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    data: LabelTemplateCreate,
) -> RepoResult<LabelTemplate> {
    ensure_tenant(tenant_id)?;
    validate_template(&data.name, data.width, data.height, &data.elements)?;

    let now = now_millis();
    let id = snowflake_id();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO label_template (id, tenant_id, name, width, height, kind, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.name)
    .bind(data.width)
    .bind(data.height)
    .bind(TemplateKind::Custom)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    insert_elements(&mut tx, id, &data.elements).await?;

    let template = find(&mut tx, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create label template".into()))?;
    tx.commit().await?;

    info!(template_id = id, elements = template.elements.len(), "Label template created");
    Ok(template)
}

#[instrument(skip(pool, data), fields(name = %data.name))]
pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: TemplateId,
    data: LabelTemplateUpdate,
) -> RepoResult<LabelTemplate> {
    ensure_tenant(tenant_id)?;
    ensure_mutable(id)?;
    validate_template(&data.name, data.width, data.height, &data.elements)?;

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE label_template SET name = ?1, width = ?2, height = ?3, updated_at = ?4 \
         WHERE id = ?5 AND tenant_id = ?6",
    )
    .bind(&data.name)
    .bind(data.width)
    .bind(data.height)
    .bind(now_millis())
    .bind(id)
    .bind(tenant_id)
    .execute(&mut *tx)
    .await?;

    // Another tenant's row is indistinguishable from a missing one
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }

    sqlx::query("DELETE FROM label_element WHERE template_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_elements(&mut tx, id, &data.elements).await?;

    let template = find(&mut tx, tenant_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    info!(template_id = id, elements = template.elements.len(), "Label template updated");
    Ok(template)
}

#[instrument(skip(pool))]
pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: TemplateId) -> RepoResult<bool> {
    ensure_tenant(tenant_id)?;
    ensure_mutable(id)?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM label_template WHERE id = ? AND tenant_id = ?")
        .bind(id)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        debug!("Delete of absent label template ignored");
        return Ok(false);
    }

    // Also covered by the FK cascade; explicit for connections without foreign_keys
    sqlx::query("DELETE FROM label_element WHERE template_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!("Label template deleted");
    Ok(true)
}

// ── Elements ────────────────────────────────────────────────────────────

async fn find(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    id: TemplateId,
) -> RepoResult<Option<LabelTemplate>> {
    let template = sqlx::query_as::<_, LabelTemplate>(&format!(
        "SELECT {TEMPLATE_COLUMNS} FROM label_template WHERE id = ? AND tenant_id = ?"
    ))
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(mut template) = template else {
        return Ok(None);
    };

    let rows = sqlx::query_as::<_, ElementRow>(&format!(
        "SELECT {ELEMENT_COLUMNS} FROM label_element WHERE template_id = ? ORDER BY position"
    ))
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    template.elements = rows
        .into_iter()
        .map(ElementRow::into_element)
        .collect::<RepoResult<_>>()?;
    Ok(Some(template))
}

async fn insert_elements(
    conn: &mut SqliteConnection,
    template_id: TemplateId,
    elements: &[Element],
) -> RepoResult<()> {
    for (position, element) in elements.iter().enumerate() {
        let row = ElementRow::from_element(template_id, element);
        sqlx::query(
            "INSERT INTO label_element (template_id, position, element_id, element_type, x, y, width, height, content, attribute_key, font_size) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(template_id)
        .bind(position as i64)
        .bind(&row.element_id)
        .bind(row.element_type)
        .bind(row.x)
        .bind(row.y)
        .bind(row.width)
        .bind(row.height)
        .bind(&row.content)
        .bind(&row.attribute_key)
        .bind(row.font_size)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Flat storage shape of an [`Element`]
#[derive(Debug, sqlx::FromRow)]
struct ElementRow {
    template_id: TemplateId,
    element_id: String,
    element_type: ElementType,
    x: f32,
    y: f32,
    width: Option<f32>,
    height: Option<f32>,
    content: Option<String>,
    attribute_key: Option<String>,
    font_size: Option<i32>,
}

impl ElementRow {
    fn from_element(template_id: TemplateId, element: &Element) -> Self {
        let mut row = Self {
            template_id,
            element_id: element.id.clone(),
            element_type: element.element_type(),
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            content: None,
            attribute_key: None,
            font_size: None,
        };
        match &element.kind {
            ElementKind::Text(t) => {
                (row.x, row.y) = (t.x, t.y);
                row.content = Some(t.content.clone());
                row.font_size = Some(t.font_size);
            }
            ElementKind::Attribute(a) => {
                (row.x, row.y) = (a.x, a.y);
                row.attribute_key = Some(a.attribute_key.clone());
                row.font_size = Some(a.font_size);
            }
            ElementKind::Barcode(b)
            | ElementKind::Line(b)
            | ElementKind::Rectangle(b)
            | ElementKind::Background(b) => {
                (row.x, row.y) = (b.x, b.y);
                row.width = Some(b.width);
                row.height = Some(b.height);
            }
        }
        row
    }

    fn into_element(self) -> RepoResult<Element> {
        let corrupt = |what: &str| {
            RepoError::Database(format!("label_element {} is missing {what}", self.element_id))
        };

        let kind = match self.element_type {
            ElementType::Text => ElementKind::Text(TextElement {
                x: self.x,
                y: self.y,
                content: self.content.clone().unwrap_or_default(),
                font_size: self.font_size.ok_or_else(|| corrupt("font_size"))?,
            }),
            ElementType::Attribute => ElementKind::Attribute(AttributeElement {
                x: self.x,
                y: self.y,
                attribute_key: self
                    .attribute_key
                    .clone()
                    .ok_or_else(|| corrupt("attribute_key"))?,
                font_size: self.font_size.ok_or_else(|| corrupt("font_size"))?,
            }),
            boxed => {
                let b = BoxElement {
                    x: self.x,
                    y: self.y,
                    width: self.width.ok_or_else(|| corrupt("width"))?,
                    height: self.height.ok_or_else(|| corrupt("height"))?,
                };
                match boxed {
                    ElementType::Barcode => ElementKind::Barcode(b),
                    ElementType::Line => ElementKind::Line(b),
                    ElementType::Rectangle => ElementKind::Rectangle(b),
                    _ => ElementKind::Background(b),
                }
            }
        };
        Ok(Element {
            id: self.element_id,
            kind,
        })
    }
}
