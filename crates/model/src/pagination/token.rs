//! Composite keyset tokens.
//!
//! A token type is described once by a [`TokenSchema`]: the ordered list of key
//! fields it declares plus the default field list that gives a unique, total
//! order when nothing else is bound. Instances ([`KeySetToken`]) hold one
//! [`KeySlot`] per declared key field.

use crate::{
    core::{data_type::DataType, value::Value},
    pagination::error::TokenError,
};
use std::sync::Arc;

/// Per-field cursor state.
///
/// `Unset` and `SetNull` both mean "no concrete comparison value" to the
/// ordering and predicate logic, but only `SetNull` puts a field into the
/// active field list on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum KeySlot {
    #[default]
    Unset,
    SetNull,
    SetValue(Value),
}

impl KeySlot {
    pub fn is_set(&self) -> bool {
        !matches!(self, KeySlot::Unset)
    }

    /// The concrete comparison value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            KeySlot::SetValue(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for KeySlot {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => KeySlot::SetNull,
            v => KeySlot::SetValue(v),
        }
    }
}

/// A field declared on a token type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDecl {
    /// A key field held in a [`KeySlot`] over `domain`.
    Slot { name: String, domain: DataType },
    /// A field declared with a bare type instead of a slot. Token types
    /// carrying one fail validation.
    Plain { name: String, data_type: DataType },
}

impl FieldDecl {
    pub fn name(&self) -> &str {
        match self {
            FieldDecl::Slot { name, .. } | FieldDecl::Plain { name, .. } => name,
        }
    }
}

/// Static description of a token type.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSchema {
    name: String,
    fields: Vec<FieldDecl>,
    default_fields: Vec<String>,
}

impl TokenSchema {
    pub fn builder(name: &str) -> TokenSchemaBuilder {
        TokenSchemaBuilder {
            schema: TokenSchema {
                name: name.to_string(),
                fields: Vec::new(),
                default_fields: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn default_fields(&self) -> &[String] {
        &self.default_fields
    }

    /// Checks that every declared field is a key slot and that at least one exists.
    pub fn validate(&self) -> Result<(), TokenError> {
        if let Some(FieldDecl::Plain { name, data_type }) = self
            .fields
            .iter()
            .find(|f| matches!(f, FieldDecl::Plain { .. }))
        {
            return Err(TokenError::Shape {
                token: self.name.clone(),
                reason: format!(
                    "Property {name} of type {data_type} must be of type KeySetTokenValue"
                ),
            });
        }

        if self.fields.is_empty() {
            return Err(TokenError::Shape {
                token: self.name.clone(),
                reason: "token must declare at least one KeySetTokenValue field".to_string(),
            });
        }

        Ok(())
    }

    /// Position and domain type of a declared slot.
    pub fn slot(&self, name: &str) -> Option<(usize, &DataType)> {
        self.fields.iter().enumerate().find_map(|(idx, f)| match f {
            FieldDecl::Slot { name: n, domain } if n == name => Some((idx, domain)),
            _ => None,
        })
    }
}

pub struct TokenSchemaBuilder {
    schema: TokenSchema,
}

impl TokenSchemaBuilder {
    pub fn slot(mut self, name: &str, domain: DataType) -> Self {
        self.schema.fields.push(FieldDecl::Slot {
            name: name.to_string(),
            domain,
        });
        self
    }

    pub fn plain(mut self, name: &str, data_type: DataType) -> Self {
        self.schema.fields.push(FieldDecl::Plain {
            name: name.to_string(),
            data_type,
        });
        self
    }

    pub fn default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Arc<TokenSchema> {
        Arc::new(self.schema)
    }
}

/// A cursor position: one slot per declared key field plus the default field list.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySetToken {
    schema: Arc<TokenSchema>,
    slots: Vec<KeySlot>,
    default_fields: Vec<String>,
}

impl KeySetToken {
    /// Creates an all-unset token, validating the token type first.
    pub fn new(schema: Arc<TokenSchema>) -> Result<Self, TokenError> {
        schema.validate()?;

        Ok(KeySetToken {
            slots: vec![KeySlot::Unset; schema.fields.len()],
            default_fields: schema.default_fields.clone(),
            schema,
        })
    }

    /// An all-unset token of the same type and with the same default field list.
    pub fn blank(&self) -> Self {
        KeySetToken {
            schema: Arc::clone(&self.schema),
            slots: vec![KeySlot::Unset; self.slots.len()],
            default_fields: self.default_fields.clone(),
        }
    }

    pub fn schema(&self) -> &Arc<TokenSchema> {
        &self.schema
    }

    pub fn default_fields(&self) -> &[String] {
        &self.default_fields
    }

    /// Replaces the default field list of this instance.
    pub fn with_default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Puts extra leading tie-break fields in front of the default field list.
    pub fn prepend_default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut merged: Vec<String> = Vec::new();
        for field in fields
            .into_iter()
            .map(Into::into)
            .chain(self.default_fields.drain(..))
        {
            if !merged.contains(&field) {
                merged.push(field);
            }
        }
        self.default_fields = merged;
        self
    }

    /// Binds a slot. `Value::Null` sets the slot to null.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), TokenError> {
        let value = value.into();
        let (idx, domain) = self.lookup(field)?;

        if !value.is_null() && !value.fits(domain) {
            return Err(TokenError::TypeMismatch {
                field: field.to_string(),
                expected: domain.clone(),
                got: value
                    .data_type()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "null".to_string()),
            });
        }

        self.slots[idx] = KeySlot::from(value);
        Ok(())
    }

    /// Builder-style [`KeySetToken::set`].
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Result<Self, TokenError> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn set_null(&mut self, field: &str) -> Result<(), TokenError> {
        let (idx, _) = self.lookup(field)?;
        self.slots[idx] = KeySlot::SetNull;
        Ok(())
    }

    pub fn unset(&mut self, field: &str) -> Result<(), TokenError> {
        let (idx, _) = self.lookup(field)?;
        self.slots[idx] = KeySlot::Unset;
        Ok(())
    }

    /// The slot for a declared key field, `None` if no such slot exists.
    pub fn slot(&self, field: &str) -> Option<&KeySlot> {
        self.schema.slot(field).map(|(idx, _)| &self.slots[idx])
    }

    /// The declared domain type of a slot.
    pub fn domain(&self, field: &str) -> Option<&DataType> {
        self.schema.slot(field).map(|(_, domain)| domain)
    }

    /// Declared slots with their state, in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &KeySlot)> {
        self.schema
            .fields
            .iter()
            .zip(self.slots.iter())
            .map(|(decl, slot)| (decl.name(), slot))
    }

    /// True when no slot is set.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| !s.is_set())
    }

    /// Field sequence used for ordering and the after-cursor predicate:
    /// the default fields, then every set slot not already listed, in
    /// declaration order, without duplicates.
    pub fn active_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::with_capacity(self.default_fields.len());

        for field in &self.default_fields {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }

        for (name, slot) in self.slots() {
            if slot.is_set() && !fields.iter().any(|f| f == name) {
                fields.push(name.to_string());
            }
        }

        fields
    }

    fn lookup(&self, field: &str) -> Result<(usize, &DataType), TokenError> {
        self.schema
            .slot(field)
            .ok_or_else(|| TokenError::FieldNotFound {
                token: self.schema.name.clone(),
                field: field.to_string(),
            })
    }
}
