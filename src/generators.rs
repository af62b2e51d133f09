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

use bls12_381_plus::G1Projective;
use elliptic_curve::hash2curve::ExpandMsg;
use serde::{Deserialize, Serialize};

use crate::ciphersuites::BbsCiphersuite;
use crate::errors::Error;
use crate::utils::{expand_message, i2osp, EXPAND_LEN};

/// The deterministic G1 point sequence of a ciphersuite: the base point `P1`
/// plus `values = [Q1, H_1, ..., H_L]` for an `L`-message vector.
///
/// Derivation is a pure function of `(count, api_id)`: identical inputs always
/// yield the identical sequence, and the sequence for a smaller count is a
/// prefix of the sequence for any larger one.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Generators {
    pub g1_base_point: G1Projective,
    pub values: Vec<G1Projective>,
}

impl Generators {
    pub fn create<CS>(count: usize, api_id: Option<&[u8]>) -> Result<Generators, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let api_id = api_id.unwrap_or(b"");

        let generator_seed = [api_id, b"MESSAGE_GENERATOR_SEED"].concat();
        let g1_base_point = Self::create_g1_base_point::<CS>(api_id)?;
        let values = hash_to_generators::<CS>(api_id, &generator_seed, count)?;

        Ok(Generators {
            g1_base_point,
            values,
        })
    }

    /// The ciphersuite base point `P1`: the single generator grown from the
    /// dedicated `BP_MESSAGE_GENERATOR_SEED` seed.
    fn create_g1_base_point<CS>(api_id: &[u8]) -> Result<G1Projective, Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let bp_seed = [api_id, b"BP_MESSAGE_GENERATOR_SEED"].concat();
        let points = hash_to_generators::<CS>(api_id, &bp_seed, 1)?;
        Ok(points[0])
    }
}

fn hash_to_generators<CS>(api_id: &[u8], seed: &[u8], count: usize) -> Result<Vec<G1Projective>, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let seed_dst = [api_id, b"SIG_GENERATOR_SEED_"].concat();
    let generator_dst = [api_id, b"SIG_GENERATOR_DST_"].concat();

    let mut v = expand_message::<CS>(seed, &seed_dst, EXPAND_LEN)?;
    let mut generators: Vec<G1Projective> = Vec::with_capacity(count);

    for i in 1..=count {
        let state = [v.as_slice(), &i2osp(i as u64, 8)?].concat();
        v = expand_message::<CS>(&state, &seed_dst, EXPAND_LEN)?;
        generators.push(G1Projective::hash::<CS::Expander>(&v, &generator_dst));
    }

    Ok(generators)
}
