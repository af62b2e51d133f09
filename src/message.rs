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

use bls12_381_plus::Scalar;
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::ciphersuites::BbsCiphersuite;
use crate::errors::Error;
use crate::utils::hash_to_scalar;

/// A signed message, mapped once per signing/proof context from its octet
/// representation into Z_r.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsMessage {
    pub value: Scalar,
}

impl BbsMessage {
    pub fn new(msg: Scalar) -> Self {
        Self { value: msg }
    }

    pub fn random(rng: impl RngCore) -> Self {
        Self::new(Scalar::random(rng))
    }

    /// Maps one message to a scalar with dst `api_id || "MAP_MSG_TO_SCALAR_AS_HASH_"`.
    pub fn map_message_to_scalar_as_hash<CS>(data: &[u8], api_id: Option<&[u8]>) -> Result<Self, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let api_id = api_id.unwrap_or(b"");
        let map_dst = [api_id, b"MAP_MSG_TO_SCALAR_AS_HASH_"].concat();

        let value = hash_to_scalar::<CS>(data, &map_dst)?;
        Ok(Self { value })
    }

    /// Maps a message vector to scalars, preserving order.
    pub fn messages_to_scalars<CS>(messages: &[Vec<u8>], api_id: Option<&[u8]>) -> Result<Vec<Self>, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        messages
            .iter()
            .map(|m| Self::map_message_to_scalar_as_hash::<CS>(m, api_id))
            .collect()
    }
}
