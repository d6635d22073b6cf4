// Envelope extraction: framing bytes around the reply are dropped, the
// two marker styles are tried in declaration order, and a missing marker
// is a defined error instead of an undefined split.

#[cfg(test)]
mod test {

    use crate::error::EnvelopeError;
    use crate::soap::envelope::extract_envelope;

    #[test]
    fn strips_leading_and_trailing_garbage() {
        let raw = "garbage<soapenv:Envelope xmlns:soapenv=\"x\"><soapenv:Body>content</soapenv:Body></soapenv:Envelope>trailer";
        assert_eq!(
            extract_envelope(raw).unwrap(),
            "<soapenv:Envelope xmlns:soapenv=\"x\"><soapenv:Body>content</soapenv:Body></soapenv:Envelope>"
        );
    }

    #[test]
    fn falls_back_to_the_soap_prefix_style() {
        let raw = "--frame\r\n<soap:Envelope><soap:Body/></soap:Envelope>\r\n--frame--";
        assert_eq!(
            extract_envelope(raw).unwrap(),
            "<soap:Envelope><soap:Body/></soap:Envelope>"
        );
    }

    #[test]
    fn soapenv_style_wins_regardless_of_position() {
        // the soap: envelope appears first in the body, soapenv: still wins
        let raw = "<soap:Envelope></soap:Envelope><soapenv:Envelope>real</soapenv:Envelope>";
        assert_eq!(
            extract_envelope(raw).unwrap(),
            "<soapenv:Envelope>real</soapenv:Envelope>"
        );
    }

    #[test]
    fn untouched_when_the_body_is_exactly_one_envelope() {
        let raw = "<soapenv:Envelope>x</soapenv:Envelope>";
        assert_eq!(extract_envelope(raw).unwrap(), raw);
    }

    #[test]
    fn missing_opening_marker_is_an_error() {
        assert_eq!(
            extract_envelope("<html>proxy error page</html>"),
            Err(EnvelopeError::OpeningMarkerNotFound)
        );
    }

    #[test]
    fn missing_closing_marker_is_an_error() {
        let raw = "<soapenv:Envelope><soapenv:Body>truncat";
        assert_eq!(
            extract_envelope(raw),
            Err(EnvelopeError::ClosingMarkerNotFound("</soapenv:Envelope>"))
        );
    }
}
