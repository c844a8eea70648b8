use crate::{commands::ScanArgs, error::CliError};
use connectors::memory::source::MemorySource;
use model::{
    core::value::Value,
    pagination::{
        request::PagingRequest,
        settings::PagingSettings,
        token::{KeySetToken, TokenSchema},
    },
    records::schema::RowSchema,
};

/// Declares one key slot per dataset column.
pub fn token_for(schema: &RowSchema, fields: &[String]) -> Result<KeySetToken, CliError> {
    let mut builder = TokenSchema::builder(&format!("{}Token", schema.entity));
    for column in &schema.columns {
        builder = builder.slot(&column.name, column.data_type.clone());
    }

    let defaults = if fields.is_empty() {
        schema.columns.first().map(|c| vec![c.name.clone()]).unwrap_or_default()
    } else {
        fields.to_vec()
    };

    Ok(KeySetToken::new(builder.default_fields(defaults).build())?)
}

/// Applies `FIELD=VALUE` pairs; `VALUE` is read as JSON, falling back to a bare string.
/// A text column keeps the raw text when the JSON reading does not fit it (`code=123`).
pub fn apply_after(
    mut token: KeySetToken,
    schema: &RowSchema,
    after: &[String],
) -> Result<KeySetToken, CliError> {
    for pair in after {
        let (field, raw) = pair
            .split_once('=')
            .ok_or_else(|| CliError::InvalidArgument(format!("expected FIELD=VALUE, got '{pair}'")))?;

        let column = schema
            .column(field)
            .ok_or_else(|| CliError::InvalidArgument(format!("unknown field '{field}'")))?;

        let json = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        let value = match Value::from_json(&json, &column.data_type) {
            Ok(value) => value,
            Err(_) if column.data_type.is_text() => Value::String(raw.to_string()),
            Err(e) => return Err(CliError::InvalidArgument(e)),
        };

        token.set(field, value)?;
    }
    Ok(token)
}

pub async fn load_settings(scan: &ScanArgs) -> Result<PagingSettings, CliError> {
    let mut settings = match &scan.config {
        Some(path) => serde_json::from_str(&tokio::fs::read_to_string(path).await?)?,
        None => PagingSettings::default(),
    };

    if let Some(page_size) = scan.page_size {
        settings.page_size = page_size;
    }
    if let Some(direction) = &scan.direction {
        settings.sort_direction = direction.parse()?;
    }

    Ok(settings)
}

pub async fn load_source(scan: &ScanArgs) -> Result<MemorySource, CliError> {
    let json = tokio::fs::read_to_string(&scan.data).await?;
    Ok(MemorySource::from_json_str(&json)?)
}

pub async fn build_request(
    scan: &ScanArgs,
    schema: &RowSchema,
) -> Result<PagingRequest, CliError> {
    let token = token_for(schema, &scan.fields)?;
    let token = apply_after(token, schema, &scan.after)?;
    let settings = load_settings(scan).await?;
    Ok(settings.into_request(token, ())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::data_type::DataType,
        pagination::token::KeySlot,
        records::schema::ColumnDef,
    };

    fn schema() -> RowSchema {
        RowSchema::new(
            "people",
            vec![
                ColumnDef::new("name", DataType::String),
                ColumnDef::nullable("age", DataType::Int),
            ],
        )
    }

    #[test]
    fn test_token_defaults_to_first_column() {
        let token = token_for(&schema(), &[]).unwrap();
        assert_eq!(token.default_fields(), &["name".to_string()]);
        assert_eq!(token.schema().name(), "peopleToken");
    }

    #[test]
    fn test_apply_after() {
        let token = token_for(&schema(), &["name".into(), "age".into()]).unwrap();
        let token = apply_after(
            token,
            &schema(),
            &["name=bob".to_string(), "age=null".to_string()],
        )
        .unwrap();

        assert_eq!(token.slot("name"), Some(&KeySlot::SetValue(Value::from("bob"))));
        assert_eq!(token.slot("age"), Some(&KeySlot::SetNull));
    }

    #[test]
    fn test_apply_after_keeps_numeric_text() {
        let schema = RowSchema::new("codes", vec![ColumnDef::new("code", DataType::String)]);
        let token = token_for(&schema, &[]).unwrap();

        let numeric = apply_after(token.clone(), &schema, &["code=123".to_string()]).unwrap();
        assert_eq!(numeric.slot("code"), Some(&KeySlot::SetValue(Value::from("123"))));

        let padded = apply_after(token, &schema, &["code=007".to_string()]).unwrap();
        assert_eq!(padded.slot("code"), Some(&KeySlot::SetValue(Value::from("007"))));
    }

    #[test]
    fn test_apply_after_rejects_bad_input() {
        let token = token_for(&schema(), &[]).unwrap();

        assert!(matches!(
            apply_after(token.clone(), &schema(), &["name".to_string()]),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            apply_after(token.clone(), &schema(), &["age=old".to_string()]),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            apply_after(token, &schema(), &["nope=1".to_string()]),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
