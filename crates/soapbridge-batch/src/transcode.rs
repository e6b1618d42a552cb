//! Payload transcoding to the outbound interchange format.

use soapbridge_core::{error::TranscodeError, Product};

/// Serialize the extracted payload to JSON, field for field.
///
/// Key order follows the struct definition, so output for a given payload is
/// stable. Only fails on internal serialization faults.
pub fn transcode(product: &Product) -> Result<String, TranscodeError> {
    Ok(serde_json::to_string(product)?)
}
