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

//! Canonical octet encodings and the hashing/derivation primitives shared by
//! every other module: `i2osp`/`os2ip`, typed-sequence serialization,
//! `expand_message`, `hash_to_scalar`, domain calculation and the random
//! scalar draws of the proof protocol.

use bls12_381_plus::{G1Affine, G1Projective, G2Projective, Scalar};
use elliptic_curve::hash2curve::{ExpandMsg, Expander};
use ff::Field;
use group::{Curve, Group};
use rand::{CryptoRng, RngCore};

use crate::ciphersuites::BbsCiphersuite;
use crate::errors::{ConfigurationError, Error};
use crate::keys::BbsPublicKey;

/// Octet length of a canonically encoded scalar.
pub const OCTET_SCALAR_LENGTH: usize = 32;
/// Octet length of a compressed G1 point.
pub const OCTET_POINT_LENGTH: usize = 48;
/// Output length of every internal `expand_message` invocation.
pub(crate) const EXPAND_LEN: usize = 48;

pub(crate) const MAX_DST_LENGTH: usize = 255;
pub(crate) const MAX_EXPAND_LENGTH: usize = 65535;

/// I2OSP: encodes `x` into exactly `len` big-endian octets.
pub fn i2osp(x: u64, len: usize) -> Result<Vec<u8>, Error> {
    if len == 0 {
        return Err(ConfigurationError::IntegerTooLarge.into());
    }
    if len < 8 && x >= 1u64 << (8 * len as u32) {
        return Err(ConfigurationError::IntegerTooLarge.into());
    }
    let be = x.to_be_bytes();
    if len <= 8 {
        Ok(be[8 - len..].to_vec())
    } else {
        let mut out = vec![0u8; len - 8];
        out.extend_from_slice(&be);
        Ok(out)
    }
}

/// OS2IP: big-endian decode of up to 48 octets, reduced into Z_r.
pub fn os2ip(octets: &[u8]) -> Result<Scalar, Error> {
    if octets.len() > EXPAND_LEN {
        return Err(ConfigurationError::IntegerTooLarge.into());
    }
    let mut wide = [0u8; EXPAND_LEN];
    wide[EXPAND_LEN - octets.len()..].copy_from_slice(octets);
    Ok(Scalar::from_okm(&wide))
}

/// An element of a canonically serializable sequence.
#[derive(Clone, Copy, Debug)]
pub enum SerItem {
    G1(G1Projective),
    G2(G2Projective),
    Scalar(Scalar),
    Uint(u64),
}

impl From<G1Projective> for SerItem {
    fn from(p: G1Projective) -> Self {
        Self::G1(p)
    }
}

impl From<G2Projective> for SerItem {
    fn from(p: G2Projective) -> Self {
        Self::G2(p)
    }
}

impl From<Scalar> for SerItem {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<u64> for SerItem {
    fn from(x: u64) -> Self {
        Self::Uint(x)
    }
}

/// Concatenates the canonical encodings of an ordered, possibly heterogeneous
/// sequence: compressed points, 32-octet big-endian scalars, 8-octet integers.
pub fn serialize(items: &[SerItem]) -> Vec<u8> {
    let mut result: Vec<u8> = Vec::new();
    for item in items {
        match item {
            SerItem::G1(p) => result.extend_from_slice(&p.to_affine().to_compressed()),
            SerItem::G2(p) => result.extend_from_slice(&p.to_affine().to_compressed()),
            SerItem::Scalar(s) => result.extend_from_slice(&s.to_be_bytes()),
            SerItem::Uint(x) => result.extend_from_slice(&x.to_be_bytes()),
        }
    }
    result
}

/// Decodes a compressed G1 point, rejecting non-canonical octets and the
/// identity element.
pub(crate) fn parse_g1(octets: &[u8]) -> Option<G1Projective> {
    let octets: [u8; OCTET_POINT_LENGTH] = octets.try_into().ok()?;
    let point =
        Option::<G1Affine>::from(G1Affine::from_compressed(&octets)).map(G1Projective::from)?;
    if point.is_identity().into() {
        return None;
    }
    Some(point)
}

/// Decodes a canonical 32-octet scalar, rejecting zero and values >= r.
pub(crate) fn parse_scalar(octets: &[u8]) -> Option<Scalar> {
    let octets: [u8; OCTET_SCALAR_LENGTH] = octets.try_into().ok()?;
    let s = Option::<Scalar>::from(Scalar::from_be_bytes(&octets))?;
    if s.is_zero().into() {
        return None;
    }
    Some(s)
}

/// Uniform byte expansion bound to `(msg, dst)`.
pub(crate) fn expand_message<CS>(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    if dst.len() > MAX_DST_LENGTH {
        return Err(ConfigurationError::DstTooLong.into());
    }
    if len_in_bytes > MAX_EXPAND_LENGTH {
        return Err(ConfigurationError::ExpandLengthTooLong.into());
    }

    let mut uniform_bytes = vec![0u8; len_in_bytes];
    CS::Expander::expand_message(&[msg], &[dst], len_in_bytes)
        .map_err(|_| ConfigurationError::ExpandMessageFailed)?
        .fill_bytes(&mut uniform_bytes);
    Ok(uniform_bytes)
}

/// hash_to_scalar: `OS2IP(expand_message(msg, dst, 48)) mod r`.
pub fn hash_to_scalar<CS>(msg_octets: &[u8], dst: &[u8]) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let uniform_bytes = expand_message::<CS>(msg_octets, dst, EXPAND_LEN)?;
    let mut okm = [0u8; EXPAND_LEN];
    okm.copy_from_slice(&uniform_bytes);
    Ok(Scalar::from_okm(&okm))
}

/// Binds the signer's public key, the generator set and the header into a
/// single scalar. Signing and every verification path must recompute it
/// identically.
pub(crate) fn calculate_domain<CS>(
    pk: &BbsPublicKey,
    q1: G1Projective,
    h_points: &[G1Projective],
    header: Option<&[u8]>,
    api_id: Option<&[u8]>,
) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let header = header.unwrap_or(b"");
    let api_id = api_id.unwrap_or(b"");
    let domain_dst = [api_id, b"H2S_"].concat();

    let L = h_points.len();

    let mut dom_items: Vec<SerItem> = Vec::with_capacity(L + 2);
    dom_items.push(SerItem::Uint(L as u64));
    dom_items.push(SerItem::G1(q1));
    dom_items.extend(h_points.iter().map(|&p| SerItem::G1(p)));

    let mut dom_octs = serialize(&dom_items);
    dom_octs.extend_from_slice(api_id);

    let mut dom_input = pk.to_bytes().to_vec();
    dom_input.extend_from_slice(&dom_octs);
    dom_input.extend_from_slice(&i2osp(header.len() as u64, 8)?);
    dom_input.extend_from_slice(header);

    hash_to_scalar::<CS>(&dom_input, &domain_dst)
}

/// Draws `count` uniformly random scalars from the injected CSPRNG, one
/// 48-octet draw per scalar, reduced like `hash_to_scalar` output.
pub fn calculate_random_scalars<R>(count: usize, rng: &mut R) -> Vec<Scalar>
where
    R: RngCore + CryptoRng,
{
    let mut random_scalars: Vec<Scalar> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut buf = [0u8; EXPAND_LEN];
        rng.fill_bytes(&mut buf);
        random_scalars.push(Scalar::from_okm(&buf));
    }
    random_scalars
}

/// Deterministic scalar sequence derived from a seed. Test tooling only:
/// replaces the CSPRNG when replaying fixtures, never used for real proofs.
pub fn seeded_random_scalars<CS>(count: usize, seed: &[u8], dst: Option<&[u8]>) -> Result<Vec<Scalar>, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let default_dst = CS::mocked_scalars_dst();
    let dst = dst.unwrap_or(&default_dst);

    let out_len = count
        .checked_mul(EXPAND_LEN)
        .filter(|&l| l <= MAX_EXPAND_LENGTH)
        .ok_or(ConfigurationError::ExpandLengthTooLong)?;

    let v = expand_message::<CS>(seed, dst, out_len)?;

    let mut scalars: Vec<Scalar> = Vec::with_capacity(count);
    for chunk in v.chunks_exact(EXPAND_LEN) {
        let mut okm = [0u8; EXPAND_LEN];
        okm.copy_from_slice(chunk);
        scalars.push(Scalar::from_okm(&okm));
    }
    Ok(scalars)
}

/// Random octet string of the given length, e.g. key material or a nonce.
pub fn generate_random_secret(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut secret = vec![0u8; len];
    rng.fill_bytes(&mut secret);
    secret
}

/// Ordered complement of a set of 1-based indexes within `[1, length]`.
pub(crate) fn get_remaining_indexes(length: usize, indexes: &[usize]) -> Vec<usize> {
    let mut remaining: Vec<usize> = Vec::new();
    for i in 1..=length {
        if !indexes.contains(&i) {
            remaining.push(i);
        }
    }
    remaining
}

/// Picks `items` at the given 1-based indexes, preserving index order.
pub(crate) fn pick_indexed<T: Clone>(items: &[T], indexes: &[usize]) -> Vec<T> {
    indexes.iter().map(|&i| items[i - 1].clone()).collect()
}

/// Picks the messages at the given 1-based indexes, preserving index order.
pub fn get_messages_vec(messages: &[Vec<u8>], indexes: &[usize]) -> Vec<Vec<u8>> {
    indexes.iter().map(|&i| messages[i - 1].clone()).collect()
}
