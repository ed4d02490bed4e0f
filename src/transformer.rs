use crate::amount::resolve_amount;
use crate::dates::{format_date, resolve_date, DatePolicy};
use crate::fmt::amount_string;
use crate::headers::normalize_header;
use crate::models::{DataRow, EntityColumns, OutputRecord, ParsedTable, PARENT_TYPE};

/// Where each record's currency and parent id come from.
#[derive(Debug, Clone)]
pub enum EntityContext {
    Single { currency: String, parent_id: String },
    Multi(EntityColumns),
}

/// Last `>`-separated segment of a category path.
pub fn category_leaf(category: &str) -> String {
    category
        .rsplit('>')
        .next()
        .unwrap_or(category)
        .trim()
        .to_string()
}

fn row_entity(row: &DataRow, context: &EntityContext) -> Option<(String, String)> {
    match context {
        EntityContext::Single {
            currency,
            parent_id,
        } => Some((currency.clone(), parent_id.clone())),
        EntityContext::Multi(columns) => {
            let currency = row
                .get(columns.currency_column)
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_default();
            let entity = row
                .get(columns.entity_column)
                .map(|c| c.trim().to_string())
                .unwrap_or_default();
            if currency.is_empty() || entity.is_empty() {
                None
            } else {
                Some((currency, entity))
            }
        }
    }
}

/// Expand every (row, date column) pair that has an amount and a date into a record.
pub fn transform(table: &ParsedTable, context: &EntityContext, policy: &DatePolicy) -> Vec<OutputRecord> {
    let schema = &table.schema;
    let mut records = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let category = row
            .get(schema.category_column)
            .map(|c| c.trim())
            .unwrap_or_default();
        if category.is_empty() {
            tracing::debug!(row = row_idx, "skipping row without category");
            continue;
        }
        let Some((currency, parent_id)) = row_entity(row, context) else {
            tracing::debug!(row = row_idx, "skipping row without currency or entity id");
            continue;
        };
        let description = category_leaf(category);

        for &col in &schema.date_columns {
            let Some(amount) = row.get(col).and_then(|c| resolve_amount(c)) else {
                continue;
            };
            let date = match schema.expansions.get(&col) {
                Some(dates) => dates.last().copied().map(format_date),
                None => resolve_date(&normalize_header(&schema.headers[col]), policy),
            };
            let Some(date) = date else {
                tracing::debug!(row = row_idx, column = col, "skipping cell with unresolvable date");
                continue;
            };
            records.push(OutputRecord {
                currency: currency.clone(),
                amount: amount_string(amount),
                date,
                parent_id: parent_id.clone(),
                parent_type: PARENT_TYPE.to_string(),
                description: description.clone(),
                category: description.clone(),
            });
        }
    }

    tracing::info!(records = records.len(), rows = table.rows.len(), "transformed forecast rows");
    records
}
