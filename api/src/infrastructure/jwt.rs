//! HS256 token codec.
//!
//! Tokens are compact JWS strings signed and verified with `jsonwebtoken`.
//! Only `HS256` is accepted on parse and expiry is checked with no leeway.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use fintake::auth::{Claims, CodecError, SigningKey, TokenCodec};

/// The only algorithm this codec signs with or accepts.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

const SEGMENT_COUNT: usize = 3;

/// Compact JWS codec signed with HMAC-SHA256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hs256Codec;

impl Hs256Codec {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation
    }
}

fn codec_error(error: &JwtError, token: &str) -> CodecError {
    match error.kind() {
        ErrorKind::InvalidToken => CodecError::Malformed,
        ErrorKind::InvalidSignature => CodecError::Signature,
        ErrorKind::ExpiredSignature => CodecError::Expired,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            let named = jsonwebtoken::decode_header(token)
                .map_or_else(|_| "unknown".to_string(), |header| format!("{:?}", header.alg));
            CodecError::UnsupportedAlgorithm(named)
        }
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidEcdsaKey => {
            CodecError::Key(error.to_string())
        }
        _ => CodecError::Encoding(error.to_string()),
    }
}

impl TokenCodec for Hs256Codec {
    fn sign(&self, claims: &Claims, key: &SigningKey) -> Result<String, CodecError> {
        jsonwebtoken::encode(
            &Header::new(ALGORITHM),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .map_err(|error| codec_error(&error, ""))
    }

    fn parse(&self, token: &str, key: &SigningKey) -> Result<Claims, CodecError> {
        if token.split('.').count() != SEGMENT_COUNT {
            return Err(CodecError::Malformed);
        }

        jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(key.as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(|error| codec_error(&error, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn key() -> SigningKey {
        SigningKey::new(b"unit-test-secret".to_vec())
    }

    fn token_for(email: &str, ttl: Duration, key: &SigningKey) -> String {
        Hs256Codec
            .sign(&Claims::expiring_in(email, ttl), key)
            .unwrap()
    }

    #[rstest]
    fn test_sign_then_parse_returns_claims(key: SigningKey) {
        let claims = Claims::expiring_in("u@x.com", Duration::hours(24));
        let token = Hs256Codec.sign(&claims, &key).unwrap();

        assert_eq!(Hs256Codec.parse(&token, &key).unwrap(), claims);
    }

    #[rstest]
    fn test_header_names_hs256_jwt(key: SigningKey) {
        let token = token_for("u@x.com", Duration::hours(1), &key);
        let header = jsonwebtoken::decode_header(&token).unwrap();

        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[rstest]
    fn test_wrong_key_is_signature_error(key: SigningKey) {
        let token = token_for("u@x.com", Duration::hours(1), &key);
        let other = SigningKey::new(b"another-secret".to_vec());

        assert_eq!(Hs256Codec.parse(&token, &other), Err(CodecError::Signature));
    }

    #[rstest]
    fn test_tampered_claims_are_rejected(key: SigningKey) {
        let token = token_for("u@x.com", Duration::hours(1), &key);
        let forged = token_for("admin@x.com", Duration::hours(1), &key);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged.split('.').nth(1).unwrap();
        let spliced = parts.join(".");

        assert_eq!(Hs256Codec.parse(&spliced, &key), Err(CodecError::Signature));
    }

    #[rstest]
    fn test_expired_token_is_rejected(key: SigningKey) {
        let token = token_for("u@x.com", Duration::hours(-1), &key);

        assert_eq!(Hs256Codec.parse(&token, &key), Err(CodecError::Expired));
    }

    #[rstest]
    fn test_other_hmac_algorithm_is_rejected(key: SigningKey) {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &Claims::expiring_in("u@x.com", Duration::hours(1)),
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            Hs256Codec.parse(&token, &key),
            Err(CodecError::UnsupportedAlgorithm(_))
        ));
    }

    #[rstest]
    fn test_unsigned_token_is_rejected(key: SigningKey) {
        // {"alg":"none","typ":"JWT"} . {"email":"u@x.com","exp":4102444800} . <empty>
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJlbWFpbCI6InVAeC5jb20iLCJleHAiOjQxMDI0NDQ4MDB9.";

        assert!(Hs256Codec.parse(token, &key).is_err());
    }

    #[rstest]
    #[case("")]
    #[case("only-one-segment")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    fn test_wrong_segment_count_is_malformed(key: SigningKey, #[case] token: &str) {
        assert_eq!(Hs256Codec.parse(token, &key), Err(CodecError::Malformed));
    }

    #[rstest]
    fn test_garbage_segments_are_encoding_errors(key: SigningKey) {
        let result = Hs256Codec.parse("!!.??.**", &key);

        assert!(matches!(result, Err(CodecError::Encoding(_))));
    }
}
