//! Typed envelope structures, generic over the embedded payload.

use crate::PRODUCT_NS;
use soapbridge_core::{error::DecodeError, Product};

/// A parsed response envelope wrapping a typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    pub body: Body<T>,
}

/// The envelope body wrapping the payload element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body<T> {
    pub payload: T,
}

/// A payload type that can be extracted from an envelope body.
///
/// The parser locates the element named [`ELEMENT`](Self::ELEMENT) bound to
/// [`NAMESPACE`](Self::NAMESPACE) inside `Body`, collects its child elements
/// as (local name, text) pairs, and hands them to
/// [`from_fields`](Self::from_fields).
pub trait BodyPayload: Sized {
    /// Local name of the payload element.
    const ELEMENT: &'static str;
    /// Namespace the payload element must be bound to.
    const NAMESPACE: &'static str;

    fn from_fields(fields: Vec<(String, String)>) -> Result<Self, DecodeError>;
}

impl BodyPayload for Product {
    const ELEMENT: &'static str = "Product";
    const NAMESPACE: &'static str = PRODUCT_NS;

    fn from_fields(fields: Vec<(String, String)>) -> Result<Self, DecodeError> {
        let mut id = None;
        let mut name = None;
        for (field, value) in fields {
            match field.as_str() {
                "Id" => id = Some(value),
                "Name" => name = Some(value),
                // Unknown children are tolerated; the schema only pins Id and Name.
                _ => {}
            }
        }
        Ok(Product {
            id: id.ok_or_else(|| DecodeError::MissingElement {
                element: "Id".into(),
            })?,
            name: name.ok_or_else(|| DecodeError::MissingElement {
                element: "Name".into(),
            })?,
        })
    }
}
