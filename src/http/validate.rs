//! Request field validation.
//!
//! Controllers declare required fields and optional custom messages;
//! the validator checks them against the JSON body for body-carrying
//! verbs and against the query string for GET-like requests.

use std::collections::HashMap;

use axum::http::Method;
use serde_json::Value;

use crate::http::request::RequestContext;

/// Outcome of a validation run.
#[derive(Debug, Clone)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }

    /// Errors joined into one diagnostic string.
    pub fn message(&self) -> String {
        self.errors.join(",")
    }
}

/// Fluent validator bound to one request.
pub struct Validator<'a> {
    ctx: &'a RequestContext,
    required: Vec<String>,
    messages: HashMap<String, String>,
}

impl<'a> Validator<'a> {
    pub fn new(ctx: &'a RequestContext) -> Self {
        Self {
            ctx,
            required: Vec::new(),
            messages: HashMap::new(),
        }
    }

    /// Fields that must be present in the request input.
    pub fn required(mut self, fields: &[&str]) -> Self {
        self.required = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Custom per-field error messages.
    pub fn messages(mut self, messages: HashMap<String, String>) -> Self {
        self.messages = messages;
        self
    }

    /// Run the checks.
    pub fn check(self) -> Validation {
        let method = self.ctx.method();
        let data: Value = if *method == Method::GET || *method == Method::HEAD {
            Value::Object(
                self.ctx
                    .query()
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                    .collect(),
            )
        } else {
            match self.ctx.json() {
                Some(doc @ Value::Object(_)) => doc,
                _ => {
                    return Validation::invalid(vec![
                        "The request body is not valid JSON.".to_string()
                    ])
                }
            }
        };

        let mut errors = Vec::new();
        for field in &self.required {
            if data.get(field).is_none() {
                let error = self
                    .messages
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| default_error_message(field));
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Validation::valid()
        } else {
            Validation::invalid(errors)
        }
    }
}

fn default_error_message(field: &str) -> String {
    format!("The field '{field}' is required in the request.")
}
