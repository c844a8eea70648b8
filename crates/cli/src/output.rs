use crate::error::CliError;
use model::{core::value::Value, records::row::RowData};

fn row_to_json(row: &RowData) -> serde_json::Value {
    let map = row
        .field_values
        .iter()
        .map(|f| {
            let value = f.value.as_ref().map(Value::to_json).unwrap_or_default();
            (f.name.clone(), value)
        })
        .collect();
    serde_json::Value::Object(map)
}

pub fn print_page(index: usize, rows: &[RowData]) -> Result<(), CliError> {
    let page = serde_json::json!({
        "page": index,
        "rows": rows.iter().map(row_to_json).collect::<Vec<_>>(),
    });
    let json = serde_json::to_string(&page).map_err(CliError::JsonSerialize)?;
    println!("{json}");
    Ok(())
}

pub fn print_params(params: &[(String, Value)]) -> Result<(), CliError> {
    let pairs: Vec<_> = params
        .iter()
        .map(|(k, v)| serde_json::json!([k, v.to_json()]))
        .collect();
    let json = serde_json::to_string_pretty(&pairs).map_err(CliError::JsonSerialize)?;
    println!("{json}");
    Ok(())
}

pub fn print_sql(sql: &str, params: &[Value]) {
    println!("{sql}");
    for (i, param) in params.iter().enumerate() {
        println!("-- ${}: {param}", i + 1);
    }
}
