//! Request envelope building.

use crate::{PRODUCT_NAME, PRODUCT_NS, SOAP_NS, XSD_NS, XSI_NS};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use soapbridge_core::error::DecodeError;

/// Build the request envelope for one message.
///
/// The decoded message text becomes the `<Id>` child; `<Name>` carries the
/// fixed product name. All text goes through the writer's escaping, so the
/// result is well-formed markup regardless of what the message contains.
pub fn build_request(id: &str) -> Result<String, DecodeError> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_failed)?;

    let mut envelope = BytesStart::new("soapenv:Envelope");
    envelope.push_attribute(("xmlns:xsi", XSI_NS));
    envelope.push_attribute(("xmlns:xsd", XSD_NS));
    envelope.push_attribute(("xmlns:soapenv", SOAP_NS));
    writer
        .write_event(Event::Start(envelope))
        .map_err(write_failed)?;

    writer
        .write_event(Event::Start(BytesStart::new("soapenv:Body")))
        .map_err(write_failed)?;

    let mut product = BytesStart::new("Product");
    product.push_attribute(("xmlns", PRODUCT_NS));
    writer
        .write_event(Event::Start(product))
        .map_err(write_failed)?;

    write_text_element(&mut writer, "Id", id)?;
    write_text_element(&mut writer, "Name", PRODUCT_NAME)?;

    writer
        .write_event(Event::End(BytesEnd::new("Product")))
        .map_err(write_failed)?;
    writer
        .write_event(Event::End(BytesEnd::new("soapenv:Body")))
        .map_err(write_failed)?;
    writer
        .write_event(Event::End(BytesEnd::new("soapenv:Envelope")))
        .map_err(write_failed)?;

    String::from_utf8(writer.into_inner()).map_err(write_failed)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), DecodeError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_failed)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(write_failed)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_failed)?;
    Ok(())
}

fn write_failed<E: std::fmt::Display>(e: E) -> DecodeError {
    DecodeError::WriteFailed {
        reason: e.to_string(),
    }
}
