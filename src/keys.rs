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

use bls12_381_plus::{G2Affine, G2Projective, Scalar};
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use group::{Curve, Group};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::ciphersuites::BbsCiphersuite;
use crate::errors::{ConfigurationError, Error, ValidationError};
use crate::utils::{hash_to_scalar, i2osp};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsPublicKey(pub G2Projective);

impl BbsPublicKey {
    /// Compressed form, 96 octets.
    pub fn to_bytes(&self) -> [u8; G2Affine::COMPRESSED_BYTES] {
        self.0.to_affine().to_compressed()
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Rejects non-canonical octets and the identity element: an identity
    /// public key is never a stand-in for a real one.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; G2Affine::COMPRESSED_BYTES] = bytes
            .try_into()
            .map_err(|_| ValidationError::InvalidPublicKey)?;
        let point = Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .map(G2Projective::from)
            .ok_or(ValidationError::InvalidPublicKey)?;
        if point.is_identity().into() {
            return Err(ValidationError::InvalidPublicKey.into());
        }
        Ok(Self(point))
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsSecretKey(pub Scalar);

impl BbsSecretKey {
    /// Big-endian canonical form, 32 octets.
    pub fn to_bytes(&self) -> [u8; Scalar::BYTES] {
        self.0.to_be_bytes()
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Scalar::BYTES] = bytes
            .try_into()
            .map_err(|_| ValidationError::InvalidSecretKey)?;
        let s = Option::<Scalar>::from(Scalar::from_be_bytes(&bytes))
            .ok_or(ValidationError::InvalidSecretKey)?;
        if s.is_zero().into() {
            return Err(ValidationError::InvalidSecretKey.into());
        }
        Ok(Self(s))
    }
}

impl Zeroize for BbsSecretKey {
    fn zeroize(&mut self) {
        self.0 = Scalar::ZERO;
    }
}

impl Drop for BbsSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyPair {
    pub(crate) public: BbsPublicKey,
    pub(crate) private: BbsSecretKey,
}

impl KeyPair {
    /// KeyGen: derives the secret key deterministically from `key_material`
    /// and pairs it with `SkToPk(SK)`.
    pub fn generate<CS>(
        key_material: &[u8],
        key_info: Option<&[u8]>,
        key_dst: Option<&[u8]>,
    ) -> Result<Self, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let sk = key_gen::<CS>(key_material, key_info, key_dst)?;
        let pk = sk_to_pk(sk);

        Ok(Self {
            public: BbsPublicKey(pk),
            private: BbsSecretKey(sk),
        })
    }

    pub fn public_key(&self) -> &BbsPublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &BbsSecretKey {
        &self.private
    }

    /// Returns the couple `(sk, pk)`.
    pub fn into_parts(self) -> (BbsSecretKey, BbsPublicKey) {
        (self.private.clone(), self.public.clone())
    }
}

/// SK = hash_to_scalar(key_material || I2OSP(length(key_info), 2) || key_info, key_dst)
///
/// `key_material` must be at least `IKM_LEN` octets, `key_info` at most 65535.
/// An empty or absent `key_dst` defaults to `api_id || "KEYGEN_DST_"`.
pub(crate) fn key_gen<CS>(
    key_material: &[u8],
    key_info: Option<&[u8]>,
    key_dst: Option<&[u8]>,
) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    if key_material.len() < CS::IKM_LEN {
        return Err(ConfigurationError::KeyMaterialTooShort.into());
    }

    let key_info = key_info.unwrap_or(&[]);
    if key_info.len() > 65535 {
        return Err(ConfigurationError::KeyInfoTooLong.into());
    }

    let default_dst = CS::keygen_dst();
    let key_dst = match key_dst {
        Some(dst) if !dst.is_empty() => dst,
        _ => default_dst.as_slice(),
    };

    let derive_input = [key_material, &i2osp(key_info.len() as u64, 2)?, key_info].concat();

    let sk = hash_to_scalar::<CS>(&derive_input, key_dst)?;
    if sk.is_zero().into() {
        return Err(ValidationError::InvalidSecretKey.into());
    }
    Ok(sk)
}

/// W = SK * BP2
pub(crate) fn sk_to_pk(sk: Scalar) -> G2Projective {
    G2Affine::generator() * sk
}
