use crate::error::{ParseError, ParseResult};

/// Converts a dotted/hyphenated event name into a PascalCase identifier.
///
/// `PAYMENT.AUTHORIZATION.VOIDED` becomes `PaymentAuthorizationVoided` and
/// `CHECKOUT.PAYMENT-APPROVAL.REVERSED` becomes
/// `CheckoutPaymentApprovalReversed`. An empty segment (leading, trailing or
/// doubled delimiter) is rejected instead of producing a malformed name.
pub fn derive_identifier(event: &str) -> ParseResult<String> {
    let mut identifier = String::with_capacity(event.len());

    for part in event.split(['.', '-']) {
        let mut chars = part.chars();
        let Some(first) = chars.next() else {
            return Err(ParseError::MalformedEvent {
                event: event.to_string(),
            });
        };
        identifier.extend(first.to_uppercase());
        identifier.extend(chars.flat_map(char::to_lowercase));
    }

    Ok(identifier)
}
