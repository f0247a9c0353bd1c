use rsa::pkcs1v15::{Signature, SigningKey};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use std::str::FromStr;
use x509_cert::builder::{Builder, RequestBuilder};
use x509_cert::der::pem::LineEnding;
use x509_cert::der::EncodePem;
use x509_cert::name::Name;

pub const RSA_KEY_BITS: usize = 2048;

#[derive(Debug, thiserror::Error)]
pub enum CsrError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] rsa::Error),

    #[error("Invalid subject: {0}")]
    Subject(x509_cert::der::Error),

    #[error("Signing failed: {0}")]
    Signing(#[from] x509_cert::builder::Error),

    #[error("PEM encoding failed: {0}")]
    Encoding(x509_cert::der::Error),
}

/// A PEM-encoded PKCS#10 request and the key that signed it
pub struct CsrBundle {
    pub pem: String,
    pub private_key: RsaPrivateKey,
}

/// Generate a fresh 2048-bit RSA key and a SHA-256 signed CSR whose subject
/// is exactly `CN=<common_name>`.
///
/// The common name is not checked for FQDN syntax. CPU bound; call it from
/// a blocking context.
pub fn generate_csr(common_name: &str) -> Result<CsrBundle, CsrError> {
    let mut rng = rand::rngs::OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)?;

    let subject = Name::from_str(&format!("CN={}", escape_rdn_value(common_name)))
        .map_err(CsrError::Subject)?;

    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let request = RequestBuilder::new(subject, &signing_key)?.build::<Signature>()?;
    let pem = request.to_pem(LineEnding::LF).map_err(CsrError::Encoding)?;

    Ok(CsrBundle { pem, private_key })
}

/// RFC 4514 escaping for an attribute value
fn escape_rdn_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let last = value.chars().count().saturating_sub(1);

    for (i, c) in value.chars().enumerate() {
        let needs_escape = matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=')
            || (i == 0 && (c == '#' || c == ' '))
            || (i == last && c == ' ');
        if needs_escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1v15::VerifyingKey;
    use rsa::pkcs8::DecodePublicKey;
    use rsa::signature::Verifier;
    use rsa::RsaPublicKey;
    use x509_cert::der::{DecodePem, Encode};
    use x509_cert::request::CertReq;

    #[test]
    fn test_csr_is_valid_and_self_signed() {
        let bundle = generate_csr("example.com").unwrap();

        assert!(bundle.pem.starts_with("-----BEGIN CERTIFICATE REQUEST-----"));

        let request = CertReq::from_pem(bundle.pem.as_bytes()).unwrap();
        assert_eq!(request.info.subject.to_string(), "CN=example.com");

        let public_key =
            RsaPublicKey::from_public_key_der(&request.info.public_key.to_der().unwrap()).unwrap();
        assert_eq!(public_key, bundle.private_key.to_public_key());

        let verifying_key = VerifyingKey::<Sha256>::new(public_key);
        let signature = Signature::try_from(request.signature.raw_bytes()).unwrap();
        verifying_key
            .verify(&request.info.to_der().unwrap(), &signature)
            .unwrap();
    }

    #[test]
    fn test_every_call_uses_a_new_key() {
        let first = generate_csr("example.com").unwrap();
        let second = generate_csr("example.com").unwrap();
        assert_ne!(first.private_key, second.private_key);
        assert_ne!(first.pem, second.pem);
    }

    #[test]
    fn test_escape_rdn_value() {
        assert_eq!(escape_rdn_value("example.com"), "example.com");
        assert_eq!(escape_rdn_value("a,O=evil"), "a\\,O\\=evil");
        assert_eq!(escape_rdn_value("a+b"), "a\\+b");
        assert_eq!(escape_rdn_value("#x "), "\\#x\\ ");
    }

    #[test]
    fn test_comma_cannot_inject_attributes() {
        let bundle = generate_csr("example.com,O=Evil").unwrap();
        let request = CertReq::from_pem(bundle.pem.as_bytes()).unwrap();
        assert_eq!(request.info.subject.0.len(), 1);
    }
}
