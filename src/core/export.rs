use crate::domain::model::{Estimate, ItemType};
use crate::domain::ports::Storage;
use crate::utils::error::{EstimateError, Result};

fn item_type_label(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Labor => "labor",
        ItemType::Material => "material",
        ItemType::Equipment => "equipment",
        ItemType::Disposal => "disposal",
        ItemType::Testing => "testing",
        ItemType::Permits => "permits",
    }
}

/// Writes the estimate's line items as a CSV document (header, one row
/// per line item, subtotal and total footer rows) through the storage
/// port. Returns the file name written.
pub async fn export_csv<S: Storage>(storage: &S, estimate: &Estimate) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "item_type",
        "description",
        "quantity",
        "unit",
        "unit_price",
        "total_price",
    ])?;

    for item in &estimate.line_items {
        writer.write_record([
            item_type_label(item.item_type),
            item.description.as_str(),
            item.quantity.to_string().as_str(),
            item.unit.as_str(),
            item.unit_price.to_string().as_str(),
            item.total_price.to_string().as_str(),
        ])?;
    }

    writer.write_record(["subtotal", "", "", "", "", estimate.subtotal.to_string().as_str()])?;
    writer.write_record(["total", "", "", "", "", estimate.total.to_string().as_str()])?;

    let data = writer
        .into_inner()
        .map_err(|e| EstimateError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })?;

    let filename = format!("estimate_{}.csv", estimate.id);
    tracing::debug!("writing {} ({} bytes)", filename, data.len());
    storage.write_file(&filename, &data).await?;

    Ok(filename)
}
