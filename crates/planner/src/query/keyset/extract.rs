use crate::error::PlanError;
use model::{
    pagination::token::{KeySetToken, KeySlot},
    records::row::Record,
};

/// Derives the cursor for the page following `last_row`.
///
/// `reference` must be the token the scan started from: it fixes the token
/// type, the default field list and the active field list whose values are
/// copied out of the row. A null row value becomes a set-to-null slot.
/// Returns `Ok(None)` when there is no last row (the page was empty).
pub fn next_token<R: Record>(
    reference: Option<&KeySetToken>,
    last_row: Option<&R>,
) -> Result<Option<KeySetToken>, PlanError> {
    let reference = reference.ok_or_else(|| PlanError::Argument("Token can't be null".into()))?;

    let Some(row) = last_row else {
        return Ok(None);
    };

    let mut token = reference.blank();
    for field in reference.active_fields() {
        match KeySlot::from(row.get_value(&field)) {
            KeySlot::SetValue(value) => token.set(&field, value)?,
            _ => token.set_null(&field)?,
        }
    }

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::testing::*;
    use model::{pagination::error::TokenError, records::row::RowData};

    #[test]
    fn test_missing_reference() {
        let err = next_token::<RowData>(None, None).unwrap_err();
        assert_eq!(err.to_string(), "Token can't be null");
    }

    #[test]
    fn test_no_last_row() {
        assert_eq!(next_token::<RowData>(Some(&token()), None).unwrap(), None);
    }

    #[test]
    fn test_copies_active_fields() {
        let last = row("sharon1", 1, 1, 1, Some(1));
        let next = next_token(Some(&token()), Some(&last)).unwrap().unwrap();

        let expected = token()
            .with("StringName", "sharon1")
            .unwrap()
            .with("NullableName", dec(1))
            .unwrap();
        assert_eq!(next, expected);
    }

    #[test]
    fn test_null_row_value_sets_null_slot() {
        let last = row("sharon3", 3, 3, 3, None);
        let next = next_token(Some(&token()), Some(&last)).unwrap().unwrap();

        assert_eq!(next.slot("NullableName"), Some(&KeySlot::SetNull));
        assert_eq!(next.active_fields(), vec!["StringName", "NullableName"]);
    }

    #[test]
    fn test_keeps_reference_defaults_and_extra_fields() {
        let reference = token()
            .with_default_fields(["DecimalName", "NullableName"])
            .with("IntName", 2)
            .unwrap();
        let last = row("sharon2", 1, 2, 2, Some(1));

        let next = next_token(Some(&reference), Some(&last)).unwrap().unwrap();

        assert_eq!(
            next.active_fields(),
            vec!["DecimalName", "NullableName", "IntName"]
        );
        assert_eq!(next.slot("StringName"), Some(&KeySlot::Unset));
    }

    #[test]
    fn test_default_field_without_slot() {
        let reference = token().prepend_default_fields(["TenantId"]);
        let last = row("sharon2", 1, 2, 2, Some(1));

        assert!(matches!(
            next_token(Some(&reference), Some(&last)),
            Err(PlanError::Token(TokenError::FieldNotFound { .. }))
        ));
    }
}
