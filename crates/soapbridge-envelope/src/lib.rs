//! # soapbridge-envelope
//!
//! Codec for the fixed-schema legacy SOAP envelope.
//!
//! ## Request side
//! [`build_request`] serializes the envelope through a document writer, so
//! the identifier is escaped and the produced markup is well-formed for any
//! input. The original service interpolated message text straight into a
//! string template, which broke on reserved XML characters; that injection
//! hole is closed here.
//!
//! ## Response side
//! [`parse_response`] is a strict, namespace-checked parse. Structural
//! mismatch (missing `Body`, wrong namespace, malformed markup) is always a
//! hard failure for the item; there is no lenient mode.

pub mod build;
pub mod envelope;
pub mod parse;

pub use build::build_request;
pub use envelope::{Body, BodyPayload, Envelope};
pub use parse::parse_response;

/// SOAP 1.1 envelope namespace.
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// XML Schema namespace, declared on the request envelope.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
/// XML Schema instance namespace, declared on the request envelope.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Namespace of the `Product` payload element.
pub const PRODUCT_NS: &str = "http://xmlns.xyz.com/webservice/version";

/// The fixed product name embedded in every request envelope.
pub const PRODUCT_NAME: &str = "some product";
