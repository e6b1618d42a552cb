//! Response envelope parsing.

use crate::envelope::{Body, BodyPayload, Envelope};
use crate::SOAP_NS;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use soapbridge_core::error::DecodeError;

/// Parse a typed response envelope from raw markup.
///
/// The markup must be well-formed XML with the shape
/// `Envelope > Body > <payload element>`, namespace-qualified throughout.
/// Any structural mismatch is a hard `DecodeError` for the item; there is no
/// partial or lenient parse. Unknown envelope children (e.g. a `Header`) and
/// anything after the payload element are skipped.
pub fn parse_response<T: BodyPayload>(markup: &str) -> Result<Envelope<T>, DecodeError> {
    let mut reader = NsReader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut saw_envelope = false;
    let mut saw_body = false;
    let mut in_payload = false;
    let mut payload_done = false;
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut current_field: Option<(String, String)> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event().map_err(malformed)?;
        // Own the namespace up front so the reader can be borrowed again below.
        let ns: Option<Vec<u8>> = match resolved {
            ResolveResult::Bound(Namespace(n)) => Some(n.to_vec()),
            _ => None,
        };

        match event {
            Event::Start(e) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                depth += 1;
                match depth {
                    1 => {
                        if local != "Envelope" {
                            return Err(DecodeError::MissingElement {
                                element: "Envelope".into(),
                            });
                        }
                        require_ns(ns.as_deref(), SOAP_NS, "Envelope")?;
                        saw_envelope = true;
                    }
                    2 if local == "Body" => {
                        require_ns(ns.as_deref(), SOAP_NS, "Body")?;
                        saw_body = true;
                    }
                    3 if saw_body && !payload_done && !in_payload => {
                        if local != T::ELEMENT {
                            return Err(DecodeError::MissingElement {
                                element: T::ELEMENT.into(),
                            });
                        }
                        require_ns(ns.as_deref(), T::NAMESPACE, T::ELEMENT)?;
                        in_payload = true;
                    }
                    4 if in_payload => {
                        current_field = Some((local, String::new()));
                    }
                    _ => {
                        // Header, trailing siblings, nested extras: skip the subtree.
                        reader.read_to_end(e.name()).map_err(malformed)?;
                        depth -= 1;
                    }
                }
            }
            Event::Empty(e) => {
                if in_payload && depth == 3 {
                    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    fields.push((local, String::new()));
                }
            }
            Event::Text(t) => {
                if let Some((_, value)) = current_field.as_mut() {
                    value.push_str(&t.unescape().map_err(malformed)?);
                }
            }
            Event::End(_) => {
                match depth {
                    4 if in_payload => {
                        if let Some(field) = current_field.take() {
                            fields.push(field);
                        }
                    }
                    3 if in_payload => {
                        in_payload = false;
                        payload_done = true;
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_envelope {
        return Err(DecodeError::MissingElement {
            element: "Envelope".into(),
        });
    }
    if !saw_body {
        return Err(DecodeError::MissingElement {
            element: "Body".into(),
        });
    }
    if !payload_done {
        return Err(DecodeError::MissingElement {
            element: T::ELEMENT.into(),
        });
    }

    let payload = T::from_fields(fields)?;
    Ok(Envelope {
        body: Body { payload },
    })
}

fn require_ns(ns: Option<&[u8]>, expected: &str, element: &str) -> Result<(), DecodeError> {
    match ns {
        Some(actual) if actual == expected.as_bytes() => Ok(()),
        _ => Err(DecodeError::WrongNamespace {
            element: element.into(),
            expected: expected.into(),
        }),
    }
}

fn malformed<E: std::fmt::Display>(e: E) -> DecodeError {
    DecodeError::MalformedMarkup {
        reason: e.to_string(),
    }
}
