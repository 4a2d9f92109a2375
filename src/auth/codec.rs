//! Conversion between DER `ECDSA-Sig-Value` and the fixed-width `r || s` wire form.

use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};

/// Width of one signature component (a P-256 scalar).
pub(crate) const COMPONENT_LEN: usize = 32;
/// Width of the concatenated `r || s` signature.
pub(crate) const SIGNATURE_LEN: usize = 2 * COMPONENT_LEN;

/// `ECDSA-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }` (RFC 3279).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
struct EcdsaSigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SignatureCodecError {
    #[error("malformed DER signature: {0}")]
    Der(#[from] der::Error),

    #[error("signature component is {len} bytes (max {COMPONENT_LEN})")]
    ComponentTooLong { len: usize },

    #[error("signature is {len} bytes (expected {SIGNATURE_LEN})")]
    InvalidLength { len: usize },
}

/// Decode a DER signature into exactly 64 bytes, left-padding `r` and `s` with zeros.
///
/// The DER sign-guard byte is stripped by the INTEGER decoder; a component that is still
/// wider than 32 bytes is an error, never truncated.
pub(crate) fn der_to_fixed(der: &[u8]) -> Result<[u8; SIGNATURE_LEN], SignatureCodecError> {
    let value = EcdsaSigValue::from_der(der)?;

    let mut fixed = [0u8; SIGNATURE_LEN];
    let (r, s) = fixed.split_at_mut(COMPONENT_LEN);
    left_pad(value.r.as_bytes(), r)?;
    left_pad(value.s.as_bytes(), s)?;
    Ok(fixed)
}

/// Encode a 64-byte `r || s` signature as DER.
pub(crate) fn fixed_to_der(fixed: &[u8]) -> Result<Vec<u8>, SignatureCodecError> {
    if fixed.len() != SIGNATURE_LEN {
        return Err(SignatureCodecError::InvalidLength { len: fixed.len() });
    }
    let (r, s) = fixed.split_at(COMPONENT_LEN);
    let value = EcdsaSigValue {
        r: UintRef::new(r)?,
        s: UintRef::new(s)?,
    };
    Ok(value.to_der()?)
}

fn left_pad(component: &[u8], out: &mut [u8]) -> Result<(), SignatureCodecError> {
    let first_nonzero = component
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(component.len());
    let significant = &component[first_nonzero..];

    if significant.len() > out.len() {
        return Err(SignatureCodecError::ComponentTooLong {
            len: significant.len(),
        });
    }
    let offset = out.len() - significant.len();
    out[..offset].fill(0);
    out[offset..].copy_from_slice(significant);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn der_of(r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        for int in [r, s] {
            body.push(0x02);
            body.push(int.len() as u8);
            body.extend_from_slice(int);
        }
        let mut out = vec![0x30, body.len() as u8];
        out.extend(body);
        out
    }

    #[test]
    fn short_components_are_left_padded() {
        let der = der_of(&[0x01, 0x02], &[0x7f]);
        let fixed = der_to_fixed(&der).unwrap();

        assert_eq!(fixed.len(), SIGNATURE_LEN);
        assert!(fixed[..30].iter().all(|b| *b == 0));
        assert_eq!(&fixed[30..32], &[0x01, 0x02]);
        assert!(fixed[32..63].iter().all(|b| *b == 0));
        assert_eq!(fixed[63], 0x7f);
    }

    #[test]
    fn sign_guard_byte_is_removed() {
        let mut r = vec![0x00];
        r.extend([0x80; 32]);
        let s = [0x11; 32];

        let fixed = der_to_fixed(&der_of(&r, &s)).unwrap();
        assert_eq!(&fixed[..32], &[0x80; 32]);
        assert_eq!(&fixed[32..], &[0x11; 32]);
    }

    #[test]
    fn oversized_component_is_an_error() {
        let r = [0x01; 33];
        let err = der_to_fixed(&der_of(&r, &[0x01])).unwrap_err();
        assert!(matches!(err, SignatureCodecError::ComponentTooLong { len: 33 }));
    }

    #[test]
    fn fixed_to_der_restores_sign_guard_and_strips_zeros() {
        let mut fixed = [0u8; SIGNATURE_LEN];
        fixed[31] = 0x05;
        fixed[32] = 0x80;

        let der = fixed_to_der(&fixed).unwrap();
        let mut s = vec![0x00, 0x80];
        s.extend([0u8; 31]);
        assert_eq!(der, der_of(&[0x05], &s));

        assert_eq!(der_to_fixed(&der).unwrap(), fixed);
    }

    #[test]
    fn fixed_to_der_rejects_wrong_length() {
        let err = fixed_to_der(&[0u8; 63]).unwrap_err();
        assert!(matches!(err, SignatureCodecError::InvalidLength { len: 63 }));
    }

    #[test]
    fn garbage_is_not_a_signature() {
        assert!(matches!(
            der_to_fixed(&[0x30, 0x03, 0x02]),
            Err(SignatureCodecError::Der(_))
        ));
    }
}
