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

use digest::HashMarker;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd, ExpandMsgXof};
use sha2::Sha256;
use sha3::Shake256;

/// A BBS ciphersuite: the identifier every domain separation tag is derived
/// from, plus the `expand_message` variant the suite runs on.
///
/// The suite type is passed as a type parameter into every operation of the
/// crate, so two suites can never be mixed within one exchange.
pub trait BbsCiphersuite {
    /// Ciphersuite identifier.
    const ID: &'static [u8];
    /// Root of every derived DST: `ID || "H2G_HM2S_"`.
    const API_ID: &'static [u8];
    /// Minimum octet length of the key material accepted by key generation.
    const IKM_LEN: usize = 32;

    type HashAlg: HashMarker;
    type Expander: ExpandMsg<'static>;

    fn keygen_dst() -> Vec<u8> {
        [Self::API_ID, b"KEYGEN_DST_"].concat()
    }

    fn h2s_dst() -> Vec<u8> {
        [Self::API_ID, b"H2S_"].concat()
    }

    fn map_msg_to_scalar_dst() -> Vec<u8> {
        [Self::API_ID, b"MAP_MSG_TO_SCALAR_AS_HASH_"].concat()
    }

    fn generator_seed() -> Vec<u8> {
        [Self::API_ID, b"MESSAGE_GENERATOR_SEED"].concat()
    }

    /// Seed of the base point `P1`, distinct from the message generator seed.
    fn bp_generator_seed() -> Vec<u8> {
        [Self::API_ID, b"BP_MESSAGE_GENERATOR_SEED"].concat()
    }

    fn generator_seed_dst() -> Vec<u8> {
        [Self::API_ID, b"SIG_GENERATOR_SEED_"].concat()
    }

    fn generator_dst() -> Vec<u8> {
        [Self::API_ID, b"SIG_GENERATOR_DST_"].concat()
    }

    fn mocked_scalars_dst() -> Vec<u8> {
        [Self::API_ID, b"MOCK_RANDOM_SCALARS_DST_"].concat()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bls12381Shake256 {}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bls12381Sha256 {}

impl BbsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";
    const API_ID: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_H2G_HM2S_";
    type HashAlg = Shake256;
    type Expander = ExpandMsgXof<Self::HashAlg>;
}

impl BbsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_";
    const API_ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_H2G_HM2S_";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}
