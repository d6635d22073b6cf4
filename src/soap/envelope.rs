use crate::error::EnvelopeError;

/// Known envelope marker pairs. Checked in declaration order: the
/// first-declared style wins when both could match.
const MARKERS: [(&str, &str); 2] = [
    ("<soapenv:Envelope", "</soapenv:Envelope>"),
    ("<soap:Envelope", "</soap:Envelope>"),
];

/// Extract the well-formed envelope from a raw reply body.
///
/// Transport intermediaries are known to wrap the envelope with extra
/// framing bytes the XML parser cannot tolerate. Everything before the
/// opening marker and after the closing marker is dropped; the envelope
/// itself is returned untouched, markers inclusive.
pub fn extract_envelope(raw: &str) -> Result<&str, EnvelopeError> {
    for (open, close) in MARKERS {
        let start = match raw.find(open) {
            Some(start) => start,
            None => continue,
        };
        let envelope = &raw[start..];
        let end = envelope
            .find(close)
            .ok_or(EnvelopeError::ClosingMarkerNotFound(close))?;
        return Ok(&envelope[..end + close.len()]);
    }
    Err(EnvelopeError::OpeningMarkerNotFound)
}
