#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use schema_form::{
    persist::{error::PersistenceError, store::DurableStore},
    schema::{normalize::parse_schema, schema_model::FormSchema},
};
use serde_json::Value;

/// Records every `put`, sharing the log with clones so tests can inspect it
/// after handing the store to a gateway.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    pub saves: Rc<RefCell<Vec<(String, Value)>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn last_saved(&self) -> Option<Value> {
        self.saves.borrow().last().map(|(_, v)| v.clone())
    }
}

impl DurableStore for RecordingStore {
    fn put(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.saves.borrow_mut().push((key.to_string(), value));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self
            .saves
            .borrow()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }
}

/// Always fails to write; reads find nothing.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

impl DurableStore for FailingStore {
    fn put(&mut self, _key: &str, _value: Value) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".into()))
    }

    fn get(&self, _key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(None)
    }
}

pub const TWO_GROUP_SCHEMA: &str = r#"{
  "form": {
    "title": "Signup",
    "groups": [
      { "title": "A", "fields": [ { "name": "email", "type": "text", "label": "Email", "required": true } ] },
      { "title": "B", "fields": [ { "name": "bio", "type": "textarea", "label": "Bio", "required": false } ] }
    ]
  }
}"#;

pub const FULL_SCHEMA: &str = r#"{
  "form": {
    "title": "Personal Information",
    "description": "Tell us about yourself",
    "groups": [
      {
        "title": "Basics",
        "fields": [
          { "type": "text", "label": "Full Name", "name": "fullName", "placeholder": "Jane Doe", "required": true },
          { "type": "number", "label": "Age", "name": "age", "min": 0, "max": 120 },
          { "type": "textarea", "label": "About", "name": "about" },
          { "type": "radio", "label": "Gender", "name": "gender", "required": true,
            "options": [ { "label": "Male", "value": "m" }, { "label": "Female", "value": "f" } ] }
        ]
      },
      {
        "title": "Preferences",
        "fields": [
          { "type": "checkbox", "label": "Hobbies", "name": "hobbies", "required": true, "options": ["Reading", "Chess", "Running"] },
          { "type": "dropdown", "label": "Country", "name": "country", "options": ["India", "Kenya"] },
          { "type": "slider", "label": "Satisfaction", "name": "satisfaction", "min": 1, "max": 10, "step": 1 }
        ]
      },
      {
        "title": "Extras",
        "fields": [
          { "type": "date", "label": "Birthday", "name": "birthday", "required": true }
        ]
      }
    ]
  }
}"#;

pub fn two_group_schema() -> FormSchema {
    parse_schema(TWO_GROUP_SCHEMA).expect("two-group fixture is valid")
}

pub fn full_schema() -> FormSchema {
    parse_schema(FULL_SCHEMA).expect("full fixture is valid")
}
