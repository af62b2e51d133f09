// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bls12_381_plus::{multi_miller_loop, G2Prepared, G2Projective, Gt, Scalar};
use bls12_381_plus::G1Projective;
use elliptic_curve::{group::Curve, hash2curve::ExpandMsg};
use ff::Field;
use group::Group;
use serde::{Deserialize, Serialize};

use crate::ciphersuites::BbsCiphersuite;
use crate::errors::{ConfigurationError, Error, ValidationError};
use crate::generators::Generators;
use crate::keys::{BbsPublicKey, BbsSecretKey};
use crate::message::BbsMessage;
use crate::utils::{
    calculate_domain, hash_to_scalar, parse_g1, parse_scalar, serialize, SerItem,
    OCTET_POINT_LENGTH, OCTET_SCALAR_LENGTH,
};

/// A BBS signature over an ordered message vector: `(A, e)` with `A` a
/// non-identity G1 point and `0 < e < r`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsSignature {
    pub(crate) A: G1Projective,
    pub(crate) e: Scalar,
}

impl BbsSignature {
    /// Wire length: compressed `A` followed by big-endian `e`.
    pub const BYTES: usize = OCTET_POINT_LENGTH + OCTET_SCALAR_LENGTH;

    pub fn A(&self) -> G1Projective {
        self.A
    }

    pub fn e(&self) -> Scalar {
        self.e
    }

    pub fn sign<CS>(
        sk: &BbsSecretKey,
        pk: &BbsPublicKey,
        header: Option<&[u8]>,
        messages: Option<&[Vec<u8>]>,
    ) -> Result<Self, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let messages = messages.unwrap_or(&[]);
        let message_scalars = BbsMessage::messages_to_scalars::<CS>(messages, Some(CS::API_ID))?;
        let generators = Generators::create::<CS>(messages.len() + 1, Some(CS::API_ID))?;

        core_sign::<CS>(sk, pk, &generators, header, &message_scalars, Some(CS::API_ID))
    }

    pub fn verify<CS>(
        &self,
        pk: &BbsPublicKey,
        header: Option<&[u8]>,
        messages: Option<&[Vec<u8>]>,
    ) -> Result<(), Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let messages = messages.unwrap_or(&[]);
        let message_scalars = BbsMessage::messages_to_scalars::<CS>(messages, Some(CS::API_ID))?;
        let generators = Generators::create::<CS>(messages.len() + 1, Some(CS::API_ID))?;

        core_verify::<CS>(pk, self, &generators, header, &message_scalars, Some(CS::API_ID))
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[0..OCTET_POINT_LENGTH].copy_from_slice(&self.A.to_affine().to_compressed());
        bytes[OCTET_POINT_LENGTH..].copy_from_slice(&self.e.to_be_bytes());
        bytes
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Rejects any octet string that is not exactly 80 octets, decodes to the
    /// identity point, or carries a scalar outside `[1, r-1]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::BYTES {
            return Err(ValidationError::InvalidSignature.into());
        }
        let A = parse_g1(&bytes[0..OCTET_POINT_LENGTH]).ok_or(ValidationError::InvalidSignature)?;
        let e =
            parse_scalar(&bytes[OCTET_POINT_LENGTH..]).ok_or(ValidationError::InvalidSignature)?;
        Ok(Self { A, e })
    }
}

fn core_sign<CS>(
    sk: &BbsSecretKey,
    pk: &BbsPublicKey,
    generators: &Generators,
    header: Option<&[u8]>,
    messages: &[BbsMessage],
    api_id: Option<&[u8]>,
) -> Result<BbsSignature, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let L = messages.len();

    if generators.values.len() != L + 1 {
        return Err(ConfigurationError::WrongGeneratorCount.into());
    }

    let Q1 = generators.values[0];
    let H_points = &generators.values[1..];

    let api_id = api_id.unwrap_or(b"");
    let signature_dst = [api_id, b"H2S_"].concat();

    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, Some(api_id))?;

    let mut e_items: Vec<SerItem> = Vec::with_capacity(L + 2);
    e_items.push(SerItem::Scalar(sk.0));
    e_items.push(SerItem::Scalar(domain));
    e_items.extend(messages.iter().map(|m| SerItem::Scalar(m.value)));

    let e = hash_to_scalar::<CS>(&serialize(&e_items), &signature_dst)?;

    // B = P1 + Q_1 * domain + H_1 * msg_1 + ... + H_L * msg_L
    let mut B = generators.g1_base_point + Q1 * domain;
    for i in 0..L {
        B += H_points[i] * messages[i].value;
    }

    // A = B * (1 / (SK + e))
    let sk_plus_e_inv =
        Option::<Scalar>::from((sk.0 + e).invert()).ok_or(ValidationError::InvalidSignature)?;
    let A = B * sk_plus_e_inv;

    if A.is_identity().into() {
        return Err(ValidationError::InvalidSignature.into());
    }

    Ok(BbsSignature { A, e })
}

fn core_verify<CS>(
    pk: &BbsPublicKey,
    signature: &BbsSignature,
    generators: &Generators,
    header: Option<&[u8]>,
    messages: &[BbsMessage],
    api_id: Option<&[u8]>,
) -> Result<(), Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let L = messages.len();

    if generators.values.len() != L + 1 {
        return Err(ConfigurationError::WrongGeneratorCount.into());
    }

    let Q1 = generators.values[0];
    let H_points = &generators.values[1..];

    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, api_id)?;

    let mut B = generators.g1_base_point + Q1 * domain;
    for i in 0..L {
        B += H_points[i] * messages[i].value;
    }

    let BP2 = G2Projective::GENERATOR;
    let A2 = pk.0 + BP2 * signature.e;

    let term1 = (&signature.A.to_affine(), &G2Prepared::from(A2.to_affine()));
    let term2 = (&B.to_affine(), &G2Prepared::from(-BP2.to_affine()));

    let pairing = multi_miller_loop(&[term1, term2]).final_exponentiation();

    if pairing == Gt::IDENTITY {
        Ok(())
    } else {
        Err(ValidationError::InvalidSignature.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphersuites::Bls12381Shake256;
    use crate::keys::KeyPair;

    #[test]
    fn from_bytes_rejects_wrong_lengths() {
        assert!(BbsSignature::from_bytes(&[]).is_err());
        assert!(BbsSignature::from_bytes(&[0u8; 79]).is_err());
        assert!(BbsSignature::from_bytes(&[0u8; 81]).is_err());
    }

    #[test]
    fn from_bytes_rejects_zero_scalar() {
        let key_material = crate::utils::generate_random_secret(32);
        let keypair = KeyPair::generate::<Bls12381Shake256>(&key_material, None, None).unwrap();
        let messages = vec![b"msg".to_vec()];
        let signature = BbsSignature::sign::<Bls12381Shake256>(
            keypair.private_key(),
            keypair.public_key(),
            None,
            Some(&messages),
        )
        .unwrap();

        let mut octets = signature.to_bytes();
        octets[OCTET_POINT_LENGTH..].fill(0);
        assert!(BbsSignature::from_bytes(&octets).is_err());
    }

    #[test]
    fn from_bytes_rejects_scalar_not_below_r() {
        // e set to r, the scalar field order
        let r_octets =
            hex::decode("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001")
                .unwrap();
        let key_material = crate::utils::generate_random_secret(32);
        let keypair = KeyPair::generate::<Bls12381Shake256>(&key_material, None, None).unwrap();
        let signature = BbsSignature::sign::<Bls12381Shake256>(
            keypair.private_key(),
            keypair.public_key(),
            None,
            None,
        )
        .unwrap();

        let mut octets = signature.to_bytes();
        octets[OCTET_POINT_LENGTH..].copy_from_slice(&r_octets);
        assert!(BbsSignature::from_bytes(&octets).is_err());
    }

    #[test]
    fn octets_round_trip() {
        let key_material = crate::utils::generate_random_secret(32);
        let keypair = KeyPair::generate::<Bls12381Shake256>(&key_material, None, None).unwrap();
        let messages = vec![b"a".to_vec(), b"b".to_vec()];
        let signature = BbsSignature::sign::<Bls12381Shake256>(
            keypair.private_key(),
            keypair.public_key(),
            Some(b"header"),
            Some(&messages),
        )
        .unwrap();

        let decoded = BbsSignature::from_bytes(&signature.to_bytes()).unwrap();
        assert_eq!(decoded, signature);
    }
}
