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

//! Selective-disclosure proof of knowledge of a BBS signature.
//!
//! The holder runs Init -> Challenge -> Finalize over fresh ephemeral
//! randomness; the verifier reconstructs the commitments from the disclosed
//! messages, recomputes the Fiat-Shamir challenge and closes with the pairing
//! check. Disclosed indexes are 1-based at the API boundary and carried as
//! `index - 1` inside the challenge transcript.

use bls12_381_plus::{multi_miller_loop, G1Projective, G2Prepared, G2Projective, Scalar};
use elliptic_curve::{group::Curve, hash2curve::ExpandMsg};
use ff::Field;
use group::Group;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::ciphersuites::BbsCiphersuite;
use crate::errors::{ConfigurationError, Error, ValidationError};
use crate::generators::Generators;
use crate::keys::BbsPublicKey;
use crate::message::BbsMessage;
use crate::signature::BbsSignature;
use crate::utils::{
    calculate_domain, calculate_random_scalars, get_remaining_indexes, hash_to_scalar, i2osp,
    parse_g1, parse_scalar, pick_indexed, serialize, SerItem, OCTET_POINT_LENGTH,
    OCTET_SCALAR_LENGTH,
};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsProof {
    pub(crate) Abar: G1Projective,
    pub(crate) Bbar: G1Projective,
    pub(crate) D: G1Projective,
    pub(crate) e_cap: Scalar,
    pub(crate) r1_cap: Scalar,
    pub(crate) r3_cap: Scalar,
    pub(crate) m_cap: Vec<Scalar>,
    pub(crate) challenge: Scalar,
}

impl BbsProof {
    /// Minimum wire length: three points plus the four scalars every proof
    /// carries. Each undisclosed message adds one more scalar.
    pub const LEN_FLOOR: usize = 3 * OCTET_POINT_LENGTH + 4 * OCTET_SCALAR_LENGTH;

    /// Generates a proof of knowledge of `signature` over `messages`,
    /// disclosing exactly the (1-based) `disclosed_indexes`.
    ///
    /// The 5+U ephemeral scalars are drawn fresh from `rng` on every call.
    pub fn proof_gen<CS, R>(
        pk: &BbsPublicKey,
        signature: &[u8],
        header: Option<&[u8]>,
        ph: Option<&[u8]>,
        messages: Option<&[Vec<u8>]>,
        disclosed_indexes: Option<&[usize]>,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
        R: RngCore + CryptoRng,
    {
        let messages = messages.unwrap_or(&[]);
        let disclosed_indexes = disclosed_indexes.unwrap_or(&[]);

        let signature = BbsSignature::from_bytes(signature)?;
        let message_scalars = BbsMessage::messages_to_scalars::<CS>(messages, Some(CS::API_ID))?;
        let generators = Generators::create::<CS>(messages.len() + 1, Some(CS::API_ID))?;

        core_proof_gen::<CS, R>(
            pk,
            &signature,
            &generators,
            header,
            ph,
            &message_scalars,
            disclosed_indexes,
            Some(CS::API_ID),
            rng,
        )
    }

    /// Verifies this proof against the disclosed messages and their (1-based)
    /// indexes. Any structural or cryptographic mismatch yields the same
    /// opaque rejection.
    pub fn proof_verify<CS>(
        &self,
        pk: &BbsPublicKey,
        disclosed_messages: Option<&[Vec<u8>]>,
        disclosed_indexes: Option<&[usize]>,
        header: Option<&[u8]>,
        ph: Option<&[u8]>,
    ) -> Result<(), Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let disclosed_messages = disclosed_messages.unwrap_or(&[]);
        let mut disclosed_indexes = disclosed_indexes.unwrap_or(&[]).to_vec();
        disclosed_indexes.sort_unstable();
        disclosed_indexes.dedup();

        let U = self.m_cap.len();
        let R = disclosed_indexes.len();

        let disclosed_message_scalars =
            BbsMessage::messages_to_scalars::<CS>(disclosed_messages, Some(CS::API_ID))?;
        let generators = Generators::create::<CS>(U + R + 1, Some(CS::API_ID))?;

        core_proof_verify::<CS>(
            pk,
            self,
            &generators,
            header,
            ph,
            &disclosed_message_scalars,
            &disclosed_indexes,
            Some(CS::API_ID),
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::with_capacity(Self::LEN_FLOOR + self.m_cap.len() * OCTET_SCALAR_LENGTH);

        bytes.extend_from_slice(&self.Abar.to_affine().to_compressed());
        bytes.extend_from_slice(&self.Bbar.to_affine().to_compressed());
        bytes.extend_from_slice(&self.D.to_affine().to_compressed());
        bytes.extend_from_slice(&self.e_cap.to_be_bytes());
        bytes.extend_from_slice(&self.r1_cap.to_be_bytes());
        bytes.extend_from_slice(&self.r3_cap.to_be_bytes());
        self.m_cap
            .iter()
            .for_each(|v| bytes.extend_from_slice(&v.to_be_bytes()));
        bytes.extend_from_slice(&self.challenge.to_be_bytes());
        bytes
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The length floor is checked before any field is parsed; every decoded
    /// point must be non-identity and every scalar in `[1, r-1]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < Self::LEN_FLOOR {
            return Err(ValidationError::InvalidProof.into());
        }
        if (bytes.len() - 3 * OCTET_POINT_LENGTH) % OCTET_SCALAR_LENGTH != 0 {
            return Err(ValidationError::InvalidProof.into());
        }

        let mut index = 0;
        let mut points = [G1Projective::IDENTITY; 3];
        for point in points.iter_mut() {
            *point = parse_g1(&bytes[index..index + OCTET_POINT_LENGTH])
                .ok_or(ValidationError::InvalidProof)?;
            index += OCTET_POINT_LENGTH;
        }

        let mut scalars: Vec<Scalar> = Vec::new();
        for chunk in bytes[index..].chunks_exact(OCTET_SCALAR_LENGTH) {
            scalars.push(parse_scalar(chunk).ok_or(ValidationError::InvalidProof)?);
        }

        let challenge = *scalars.last().ok_or(ValidationError::InvalidProof)?;
        let m_cap = scalars[3..scalars.len() - 1].to_vec();

        Ok(Self {
            Abar: points[0],
            Bbar: points[1],
            D: points[2],
            e_cap: scalars[0],
            r1_cap: scalars[1],
            r3_cap: scalars[2],
            m_cap,
            challenge,
        })
    }
}

fn core_proof_gen<CS, Csprng>(
    pk: &BbsPublicKey,
    signature: &BbsSignature,
    generators: &Generators,
    header: Option<&[u8]>,
    ph: Option<&[u8]>,
    messages: &[BbsMessage],
    disclosed_indexes: &[usize],
    api_id: Option<&[u8]>,
    rng: &mut Csprng,
) -> Result<BbsProof, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
    Csprng: RngCore + CryptoRng,
{
    let L = messages.len();

    let mut disclosed_indexes = disclosed_indexes.to_vec();
    disclosed_indexes.sort_unstable();
    disclosed_indexes.dedup();

    let R = disclosed_indexes.len();
    if R > L {
        return Err(ValidationError::InvalidDisclosedIndexes.into());
    }
    let U = L - R;

    if disclosed_indexes.iter().any(|&i| i < 1 || i > L) {
        return Err(ValidationError::InvalidDisclosedIndexes.into());
    }

    let undisclosed_indexes = get_remaining_indexes(L, &disclosed_indexes);
    let disclosed_messages = pick_indexed(messages, &disclosed_indexes);
    let undisclosed_messages = pick_indexed(messages, &undisclosed_indexes);

    // fresh per call: reuse across two presentations breaks zero-knowledge
    let random_scalars = calculate_random_scalars(5 + U, rng);

    let init_res = proof_init::<CS>(
        pk,
        signature,
        generators,
        &random_scalars,
        header,
        messages,
        &undisclosed_indexes,
        api_id,
    )?;

    let challenge = proof_challenge_calculate::<CS>(
        &init_res,
        &disclosed_indexes,
        &disclosed_messages,
        ph,
        api_id,
    )?;

    proof_finalize(
        &init_res,
        challenge,
        signature.e(),
        &random_scalars,
        &undisclosed_messages,
    )
}

#[derive(Clone, Debug)]
struct ProofInitResult {
    Abar: G1Projective,
    Bbar: G1Projective,
    D: G1Projective,
    T1: G1Projective,
    T2: G1Projective,
    domain: Scalar,
}

fn proof_init<CS>(
    pk: &BbsPublicKey,
    signature: &BbsSignature,
    generators: &Generators,
    random_scalars: &[Scalar],
    header: Option<&[u8]>,
    messages: &[BbsMessage],
    undisclosed_indexes: &[usize],
    api_id: Option<&[u8]>,
) -> Result<ProofInitResult, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let L = messages.len();
    let U = undisclosed_indexes.len();

    if random_scalars.len() != 5 + U {
        return Err(ConfigurationError::WrongRandomScalarCount.into());
    }
    if generators.values.len() != L + 1 {
        return Err(ConfigurationError::WrongGeneratorCount.into());
    }

    let Q1 = generators.values[0];
    let H_points = &generators.values[1..];

    let r1 = random_scalars[0];
    let r2 = random_scalars[1];
    let e_tilde = random_scalars[2];
    let r1_tilde = random_scalars[3];
    let r3_tilde = random_scalars[4];
    let m_tilde = &random_scalars[5..(5 + U)];

    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, api_id)?;

    let mut B = generators.g1_base_point + Q1 * domain;
    for i in 0..L {
        B += H_points[i] * messages[i].value;
    }

    let D = B * r2;
    let Abar = signature.A() * (r1 * r2);
    let Bbar = D * r1 - Abar * signature.e();

    let T1 = Abar * e_tilde + D * r1_tilde;
    let mut T2 = D * r3_tilde;
    for (j, &idx) in undisclosed_indexes.iter().enumerate() {
        T2 += H_points[idx - 1] * m_tilde[j];
    }

    Ok(ProofInitResult {
        Abar,
        Bbar,
        D,
        T1,
        T2,
        domain,
    })
}

/// Fiat-Shamir challenge over the full presentation transcript: the five
/// commitment points, the disclosed positions and message scalars, the domain
/// and the presentation header.
fn proof_challenge_calculate<CS>(
    init_res: &ProofInitResult,
    disclosed_indexes: &[usize],
    disclosed_messages: &[BbsMessage],
    ph: Option<&[u8]>,
    api_id: Option<&[u8]>,
) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let R = disclosed_indexes.len();
    if disclosed_messages.len() != R {
        return Err(ValidationError::InvalidProof.into());
    }

    let api_id = api_id.unwrap_or(b"");
    let challenge_dst = [api_id, b"H2S_"].concat();

    let ph = ph.unwrap_or(b"");

    let mut c_items: Vec<SerItem> = Vec::with_capacity(7 + 2 * R);
    c_items.push(SerItem::G1(init_res.Abar));
    c_items.push(SerItem::G1(init_res.Bbar));
    c_items.push(SerItem::G1(init_res.D));
    c_items.push(SerItem::G1(init_res.T1));
    c_items.push(SerItem::G1(init_res.T2));
    c_items.push(SerItem::Uint(R as u64));
    for &i in disclosed_indexes {
        c_items.push(SerItem::Uint((i - 1) as u64));
    }
    for m in disclosed_messages {
        c_items.push(SerItem::Scalar(m.value));
    }
    c_items.push(SerItem::Scalar(init_res.domain));

    let mut c_octs = serialize(&c_items);
    c_octs.extend_from_slice(&i2osp(ph.len() as u64, 8)?);
    c_octs.extend_from_slice(ph);

    hash_to_scalar::<CS>(&c_octs, &challenge_dst)
}

fn proof_finalize(
    init_res: &ProofInitResult,
    challenge: Scalar,
    e: Scalar,
    random_scalars: &[Scalar],
    undisclosed_messages: &[BbsMessage],
) -> Result<BbsProof, Error> {
    let U = undisclosed_messages.len();

    if random_scalars.len() != 5 + U {
        return Err(ConfigurationError::WrongRandomScalarCount.into());
    }

    let r1 = random_scalars[0];
    let r2 = random_scalars[1];
    let e_tilde = random_scalars[2];
    let r1_tilde = random_scalars[3];
    let r3_tilde = random_scalars[4];
    let m_tilde = &random_scalars[5..(5 + U)];

    let r3 = Option::<Scalar>::from(r2.invert()).ok_or(ValidationError::InvalidProof)?;

    let e_cap = e_tilde + e * challenge;
    let r1_cap = r1_tilde - r1 * challenge;
    let r3_cap = r3_tilde - r3 * challenge;

    let mut m_cap: Vec<Scalar> = Vec::with_capacity(U);
    for j in 0..U {
        m_cap.push(m_tilde[j] + undisclosed_messages[j].value * challenge);
    }

    Ok(BbsProof {
        Abar: init_res.Abar,
        Bbar: init_res.Bbar,
        D: init_res.D,
        e_cap,
        r1_cap,
        r3_cap,
        m_cap,
        challenge,
    })
}

fn core_proof_verify<CS>(
    pk: &BbsPublicKey,
    proof: &BbsProof,
    generators: &Generators,
    header: Option<&[u8]>,
    ph: Option<&[u8]>,
    disclosed_messages: &[BbsMessage],
    disclosed_indexes: &[usize],
    api_id: Option<&[u8]>,
) -> Result<(), Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let init_res = proof_verify_init::<CS>(
        pk,
        proof,
        generators,
        header,
        disclosed_messages,
        disclosed_indexes,
        api_id,
    )?;

    let challenge = proof_challenge_calculate::<CS>(
        &init_res,
        disclosed_indexes,
        disclosed_messages,
        ph,
        api_id,
    )?;

    if proof.challenge != challenge {
        return Err(ValidationError::InvalidProof.into());
    }

    let BP2 = G2Projective::GENERATOR;

    let term1 = (&proof.Abar.to_affine(), &G2Prepared::from(pk.0.to_affine()));
    let term2 = (&proof.Bbar.to_affine(), &G2Prepared::from(-BP2.to_affine()));

    let pairing = multi_miller_loop(&[term1, term2]).final_exponentiation();

    if pairing.is_identity().into() {
        Ok(())
    } else {
        Err(ValidationError::InvalidProof.into())
    }
}

fn proof_verify_init<CS>(
    pk: &BbsPublicKey,
    proof: &BbsProof,
    generators: &Generators,
    header: Option<&[u8]>,
    disclosed_messages: &[BbsMessage],
    disclosed_indexes: &[usize],
    api_id: Option<&[u8]>,
) -> Result<ProofInitResult, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let U = proof.m_cap.len();
    let R = disclosed_indexes.len();
    let L = U + R;

    if disclosed_messages.len() != R {
        return Err(ValidationError::InvalidProof.into());
    }
    if disclosed_indexes.iter().any(|&i| i < 1 || i > L) {
        return Err(ValidationError::InvalidProof.into());
    }
    if generators.values.len() != L + 1 {
        return Err(ConfigurationError::WrongGeneratorCount.into());
    }

    let undisclosed_indexes = get_remaining_indexes(L, disclosed_indexes);

    let Q1 = generators.values[0];
    let H_points = &generators.values[1..];

    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, api_id)?;

    let T1 = proof.Bbar * proof.challenge + proof.Abar * proof.e_cap + proof.D * proof.r1_cap;

    let mut Bv = generators.g1_base_point + Q1 * domain;
    for (i, &idx) in disclosed_indexes.iter().enumerate() {
        Bv += H_points[idx - 1] * disclosed_messages[i].value;
    }

    let mut T2 = Bv * proof.challenge + proof.D * proof.r3_cap;
    for (j, &idx) in undisclosed_indexes.iter().enumerate() {
        T2 += H_points[idx - 1] * proof.m_cap[j];
    }

    Ok(ProofInitResult {
        Abar: proof.Abar,
        Bbar: proof.Bbar,
        D: proof.D,
        T1,
        T2,
        domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_rejects_short_octets() {
        assert!(BbsProof::from_bytes(&[]).is_err());
        assert!(BbsProof::from_bytes(&[0u8; BbsProof::LEN_FLOOR - 1]).is_err());
    }

    #[test]
    fn from_bytes_rejects_trailing_octets() {
        let bytes = vec![0u8; BbsProof::LEN_FLOOR + 1];
        assert!(BbsProof::from_bytes(&bytes).is_err());
    }
}
